//! Minimum undisputed period a selected report must sit through before it
//! can finalize a pool.

use crate::error::AdapterError;

/// Lower bound for the minimum undisputed period (1 hour).
pub const MIN_PERIOD_UNDISPUTED_LOWER: u64 = 3_600;
/// Upper bound for the minimum undisputed period (18 hours).
pub const MIN_PERIOD_UNDISPUTED_UPPER: u64 = 64_800;

pub fn validate_min_period_undisputed(period: u64) -> Result<(), AdapterError> {
    if !(MIN_PERIOD_UNDISPUTED_LOWER..=MIN_PERIOD_UNDISPUTED_UPPER).contains(&period) {
        return Err(AdapterError::OutOfRange);
    }
    Ok(())
}

pub fn is_finalizable(report_timestamp: u64, min_period_undisputed: u64, now: u64) -> bool {
    match report_timestamp.checked_add(min_period_undisputed) {
        Some(opens_at) => now >= opens_at,
        None => false,
    }
}

pub fn ensure_undisputed_period_passed(
    report_timestamp: u64,
    min_period_undisputed: u64,
    now: u64,
) -> Result<(), AdapterError> {
    if !is_finalizable(report_timestamp, min_period_undisputed, now) {
        return Err(AdapterError::MinPeriodUndisputedNotPassed);
    }
    Ok(())
}
