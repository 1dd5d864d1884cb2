//! Layered settings: built-in defaults, then an optional TOML file named by
//! `HEADSUP_CONFIG`, then `HEADSUP_*` environment variables.

use headsup_ai::Difficulty;
use headsup_engine::game::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    pub difficulty: String,
    /// Base opponent thinking delay; 0 answers immediately
    pub think_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub difficulty: ValueSource,
    pub think_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            difficulty: ValueSource::Default,
            think_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            starting_stack: table.starting_stack,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            seed: None,
            difficulty: Difficulty::default().as_str().into(),
            think_ms: 0,
        }
    }
}

impl Config {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            ..TableConfig::default()
        }
    }

    /// Already checked by `validate`, so this only fails on hand-built configs.
    pub fn difficulty(&self) -> Result<Difficulty, ConfigError> {
        self.difficulty.parse().map_err(ConfigError::Invalid)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HEADSUP_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = v;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.think_ms {
            cfg.think_ms = v;
            sources.think_ms = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HEADSUP_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(stack) = std::env::var("HEADSUP_STACK")
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(diff) = std::env::var("HEADSUP_DIFFICULTY")
        && !diff.is_empty()
    {
        cfg.difficulty = diff.trim().to_ascii_lowercase();
        sources.difficulty = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var("HEADSUP_THINK_MS")
        && !ms.is_empty()
    {
        cfg.think_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid think_ms".into()))?;
        sources.think_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    think_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    cfg.difficulty()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "HEADSUP_CONFIG",
            "HEADSUP_SEED",
            "HEADSUP_STACK",
            "HEADSUP_DIFFICULTY",
            "HEADSUP_THINK_MS",
        ] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn defaults_match_table_defaults() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config.starting_stack, 1000);
        assert_eq!(resolved.config.small_blind, 10);
        assert_eq!(resolved.config.big_blind, 20);
        assert_eq!(resolved.config.difficulty, "medium");
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn file_then_env_precedence() {
        clear_env();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "starting_stack = 500\nseed = 7\ndifficulty = \"easy\"").unwrap();
        unsafe {
            std::env::set_var("HEADSUP_CONFIG", f.path());
            std::env::set_var("HEADSUP_SEED", "99");
        }
        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.starting_stack, 500);
        assert_eq!(resolved.sources.starting_stack, ValueSource::File);
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.difficulty().unwrap(), Difficulty::Easy);
        assert_eq!(resolved.sources.big_blind, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn rejects_bad_values() {
        clear_env();
        unsafe { std::env::set_var("HEADSUP_DIFFICULTY", "impossible") };
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        unsafe { std::env::set_var("HEADSUP_STACK", "0") };
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        unsafe { std::env::set_var("HEADSUP_SEED", "abc") };
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn blinds_from_file_are_validated() {
        clear_env();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "small_blind = 50\nbig_blind = 20").unwrap();
        unsafe { std::env::set_var("HEADSUP_CONFIG", f.path()) };
        let res = load();
        clear_env();
        assert!(matches!(res, Err(ConfigError::Invalid(_))));
    }
}
