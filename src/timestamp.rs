// ⏰ Timestamps - ISO-8601 in, local 12-hour clock out
//
// "2024-03-15T18:30:00Z" --parse--> 18:30 UTC --America/New_York--> "02:30 PM"

use crate::errors::{ExtractError, ExtractResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone purchases are reported in unless configured otherwise
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// 12-hour clock with zero-padded hour and AM/PM marker
pub const PURCHASE_TIME_FORMAT: &str = "%I:%M %p";

/// Rewrite a trailing `Z` designator as an explicit `+00:00` offset
pub fn normalize_zone_designator(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    }
}

/// Parse an ISO-8601 timestamp
///
/// Accepts `T` or space as the date/time separator, optional fractional
/// seconds and `+HH`, `+HHMM` or `+HH:MM` offsets. A timestamp without any
/// offset is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> ExtractResult<DateTime<FixedOffset>> {
    let normalized = normalize_zone_designator(raw);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt);
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        // hour-only offsets such as "+00" or "-05"
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }

    Err(ExtractError::InvalidTimestamp {
        value: raw.to_string(),
        reason: "expected ISO-8601 date and time".to_string(),
    })
}

/// Format an instant as wall-clock time in `zone`
pub fn format_local_time(instant: &DateTime<FixedOffset>, zone: Tz) -> String {
    instant
        .with_timezone(&zone)
        .format(PURCHASE_TIME_FORMAT)
        .to_string()
}

/// Parse + convert + format in one step
pub fn local_purchase_time(raw: &str, zone: Tz) -> ExtractResult<String> {
    let instant = parse_timestamp(raw)?;
    Ok(format_local_time(&instant, zone))
}

/// Resolve an IANA zone name such as "America/Chicago"
pub fn parse_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}
