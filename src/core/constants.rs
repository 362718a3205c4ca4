//! Simulation timing constants

/// Game logic frames per real-time second
pub const TICKS_PER_SECOND: u32 = 15;

/// Game logic frames per minute of game time
pub const TICKS_PER_MINUTE: u32 = TICKS_PER_SECOND * 60;

/// Elapsed-time triggers are authored in tenths of a minute
pub const TICKS_PER_TENTH_MINUTE: u32 = TICKS_PER_MINUTE / 10;

/// Cadence of the sleep mission (and of kinds without a handler)
pub const SLEEP_DELAY: u32 = TICKS_PER_SECOND * 30;

/// Number of scenario global flags
pub const GLOBAL_FLAG_COUNT: usize = 30;
