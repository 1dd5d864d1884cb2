//! Process exit codes returned by [`crate::run`].

/// Command finished normally (including a user quitting `play`).
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration, I/O or engine failure.
pub const ERROR: i32 = 2;

/// Input ended in the middle of an interactive hand.
pub const INTERRUPTED: i32 = 130;
