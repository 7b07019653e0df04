/// Scheduler configuration constants.
///
/// The tick interval is the only clock of the simulation: rooms advance once per
/// tick and each countdown step waits one tick interval.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Number of countdown values sent before a room starts (1, 2, .., COUNTDOWN_STEPS).
pub const COUNTDOWN_STEPS: u32 = 3;
