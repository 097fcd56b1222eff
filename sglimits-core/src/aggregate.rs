//! Folding daily statistics into month-to-date summaries.

use crate::models::{DailyStat, SubAccountStats};

/// Summarizes one sub-account's daily stats.
///
/// Element 0 is the most recent day and supplies `delivered` and
/// `used_today`; the month totals are order-independent sums. An empty
/// slice yields all-zero stats, never the `-1` sentinel.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(daily: &[DailyStat]) -> SubAccountStats {
    let Some(latest) = daily.first() else {
        return SubAccountStats::zero();
    };

    let requests = daily
        .iter()
        .fold(0u64, |acc, d| acc.saturating_add(d.metrics.requests));
    let delivered = daily
        .iter()
        .fold(0u64, |acc, d| acc.saturating_add(d.metrics.delivered));

    let reputation_percent = if requests > 0 {
        (delivered as f64 / requests as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    SubAccountStats {
        delivered: to_i64(latest.metrics.delivered),
        requests_this_month: to_i64(requests),
        used_today: to_i64(latest.metrics.used),
        delivered_this_month: to_i64(delivered),
        reputation_percent,
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
