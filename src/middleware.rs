//! Per-peer rate limiting for the solve/enumerate endpoints.
//!
//! `main` builds one [`actix_governor::GovernorConfig`] from these tuning
//! constants and clones it into every worker, wrapping the app in
//! `Governor::new(&config)` the way the crate's own examples do.

/// Steady refill rate, in requests per peer per second.
pub const REFILL_PER_SECOND: u64 = 1;

/// Burst allowance on top of the steady refill rate.
pub const BURST_SIZE: u32 = 10;
