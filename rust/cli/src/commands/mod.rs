//! One module per subcommand.
//!
//! Every handler has the shape `handle_X_command(..., out, err) -> Result<(), CliError>`
//! and writes only to the streams it is given, so tests drive them with
//! in-memory buffers.

mod cfg;
mod deal;
mod eval;
mod play;
mod sim;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
