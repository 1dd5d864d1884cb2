//! File and stream helpers shared by the commands.
//!
//! Hand histories are plain JSONL or zstd-compressed JSONL; the `.zst`
//! extension selects the codec both when reading and when writing.

use std::io::{BufRead, Write};
use std::path::Path;

/// Reads one line from `stdin`, trimmed. `None` on EOF or a read error.
///
/// ```rust
/// use std::io::Cursor;
/// # use headsup_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("raise 60\n");
/// assert_eq!(read_stdin_line(&mut input), Some("raise 60".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing it first when the path ends in `.zst`.
/// A leading UTF-8 BOM is dropped.
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Creates the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Opens `path` for writing, truncating it. A `.zst` path gets a zstd
/// encoder that finishes the frame when dropped.
pub fn open_output(path: &Path) -> Result<Box<dyn Write>, String> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Failed to open output file {}: {}", path.display(), e))?;
    let compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"));
    if compressed {
        let encoder = zstd::Encoder::new(file, 0)
            .map_err(|e| format!("Failed to start zstd stream: {}", e))?;
        Ok(Box::new(encoder.auto_finish()))
    } else {
        Ok(Box::new(file))
    }
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_trims() {
        let mut cursor = Cursor::new(b"  call  \n".as_slice());
        assert_eq!(read_stdin_line(&mut cursor), Some("call".to_string()));
    }

    #[test]
    fn test_read_stdin_line_empty_after_trim() {
        let mut cursor = Cursor::new(b"   \n".as_slice());
        assert_eq!(read_stdin_line(&mut cursor), Some(String::new()));
    }

    #[test]
    fn test_read_stdin_line_eof() {
        let mut cursor = Cursor::new(b"".as_slice());
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");

        let mut plain = "hello".to_string();
        strip_utf8_bom(&mut plain);
        assert_eq!(plain, "hello");
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("subdir").join("file.jsonl");
        ensure_parent_dir(&nested).unwrap();
        assert!(temp_dir.path().join("subdir").exists());
        assert!(ensure_parent_dir(Path::new("file.jsonl")).is_ok());
    }

    #[test]
    fn test_open_output_round_trips_zst() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("hands.jsonl.zst");
        {
            let mut w = open_output(&path).unwrap();
            w.write_all(b"{\"a\":1}\n").unwrap();
        }
        let raw = std::fs::read(&path).unwrap();
        assert_ne!(raw, b"{\"a\":1}\n");
        let text = read_text_auto(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "{\"a\":1}\n");
    }

    #[test]
    fn test_open_output_plain() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hands.jsonl");
        {
            let mut w = open_output(&path).unwrap();
            w.write_all(b"line\n").unwrap();
        }
        assert_eq!(read_text_auto(path.to_str().unwrap()).unwrap(), "line\n");
    }
}
