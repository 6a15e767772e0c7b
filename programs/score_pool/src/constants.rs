pub const BASIS_POINT_SCALE: u64 = 10_000;

/// Anyone may report the final score this long after kickoff.
pub const FINALIZE_DELAY_SECS: i64 = 48 * 60 * 60;

pub const MAX_TEAM_NAME_BYTES: usize = 32;
