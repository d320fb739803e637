//! Rate limiting utilities for destination writes.
//!
//! This module checks the destination's remaining write quota and blocks
//! until the quota window resets when it falls below a low-water mark.
//! Running low is never an error, only a pause.

mod info;

pub use info::RateLimitInfo;

use crate::destination::{Destination, DestinationError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
pub const MAX_WAIT_SECS: u64 = 3600;

/// Remaining requests below which writes pause until the window resets.
pub const DEFAULT_LOW_WATER_MARK: u32 = 50;

/// When and how long to pause for quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Remaining requests below which a wait is triggered.
    pub low_water_mark: u32,

    /// Upper bound on a single wait.
    pub max_wait: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            max_wait: Duration::from_secs(MAX_WAIT_SECS),
        }
    }
}

/// Computes how long to wait, if at all, given the current Unix time.
///
/// Returns `None` when quota is above the low-water mark or the reset time
/// has already passed.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, policy: &RateLimitPolicy, now: u64) -> Option<Duration> {
    if info.remaining >= policy.low_water_mark {
        return None;
    }

    if info.reset <= now {
        return None;
    }

    let wait = Duration::from_secs(info.reset - now);
    if wait > policy.max_wait {
        warn!(
            wait_secs = wait.as_secs(),
            max_wait = policy.max_wait.as_secs(),
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(wait.min(policy.max_wait))
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// # Arguments
///
/// * `info` - Current rate limit information
/// * `policy` - Low-water mark and wait cap
///
/// # Returns
///
/// Returns `true` if we waited, `false` if no wait was needed.
pub async fn wait_if_needed(info: &RateLimitInfo, policy: &RateLimitPolicy) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, policy, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(wait).await;
    true
}

/// Ensures sufficient write quota before a destination write.
///
/// The quota is queried again after every wait, so a reset further away than
/// `max_wait` results in several capped waits.
///
/// # Errors
///
/// Returns an error if the rate limit query fails.
pub async fn ensure_quota(
    destination: &dyn Destination,
    policy: &RateLimitPolicy,
) -> Result<(), DestinationError> {
    loop {
        let info = destination.rate_limit().await?;
        debug!(remaining = info.remaining, "Remaining write quota");
        if !wait_if_needed(&info, policy).await {
            return Ok(());
        }
    }
}
