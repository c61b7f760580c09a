//! Parsers for the scalar formats used in route summaries
//!
//! Both parsers return `None` for anything they do not understand; a route
//! summary with an unreadable duration or distance is still a valid route.

use std::time::Duration;

/// Unit tag the service uses for kilometers
pub const KILOMETER_UNIT: &str = "KM";

/// Parse a compound duration of the form `PT{h}H{m}M{s}S`
///
/// Each group is optional but groups must appear in H, M, S order and at
/// most once. Every present group must be a non-negative integer, nothing
/// may follow the last group, and the total must be positive.
///
/// ```
/// use std::time::Duration;
/// use integration_openls::parse::parse_duration;
///
/// assert_eq!(parse_duration("PT6H38M52S"), Some(Duration::from_secs(23932)));
/// assert_eq!(parse_duration("PT5M"), Some(Duration::from_secs(300)));
/// assert_eq!(parse_duration("PT0S"), None);
/// ```
#[must_use]
pub fn parse_duration(value: &str) -> Option<Duration> {
    let mut rest = value.strip_prefix("PT")?;
    let mut total: u64 = 0;

    for (designator, factor) in [('H', 3600_u64), ('M', 60), ('S', 1)] {
        let Some((group, remainder)) = rest.split_once(designator) else {
            continue;
        };
        if remainder.contains(designator) {
            return None;
        }
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let amount: u64 = group.parse().ok()?;
        total = total.checked_add(amount.checked_mul(factor)?)?;
        rest = remainder;
    }

    if !rest.is_empty() || total == 0 {
        return None;
    }
    Some(Duration::from_secs(total))
}

/// Parse a distance value with an optional unit tag into meters
///
/// Only kilometers are understood. A missing unit is taken as kilometers.
///
/// ```
/// use integration_openls::parse::parse_distance;
///
/// assert_eq!(parse_distance("84.0", Some("KM")), Some(84_000.0));
/// assert_eq!(parse_distance("84.0", Some("MI")), None);
/// ```
#[must_use]
pub fn parse_distance(value: &str, unit: Option<&str>) -> Option<f64> {
    if unit.is_some_and(|unit| unit != KILOMETER_UNIT) {
        return None;
    }
    let kilometers: f64 = value.parse().ok()?;
    let meters = kilometers * 1000.0;
    (meters.is_finite() && meters > 0.0).then_some(meters)
}
