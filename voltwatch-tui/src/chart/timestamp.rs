//! Timestamp normalization for chart records.
//!
//! The station emits timestamps with more sub-second precision than a
//! millisecond axis can hold, in a mix of UTC-suffixed, offset, and naive
//! forms. Normalization turns any of them into display-local epoch
//! milliseconds: UTC-suffixed instants are shifted by the display locale's
//! offset so the axis reads in wall-clock time, explicit non-UTC offsets
//! are taken at face value, and naive strings are read as local time.
//!
//! Everything here is a pure function of its inputs; malformed input
//! yields `None`, never a panic.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDateTime, Offset, TimeZone};

/// Truncate fractional-second digits beyond millisecond precision.
///
/// The first `.` followed by four or more digits keeps exactly three;
/// whatever trails the digits (offset, `Z`) is preserved.
///
/// ```
/// use voltwatch_tui::chart::timestamp::truncate_subseconds;
///
/// assert_eq!(
///     truncate_subseconds("2024-01-15T10:30:00.1234567Z"),
///     "2024-01-15T10:30:00.123Z"
/// );
/// ```
pub fn truncate_subseconds(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'.' {
            continue;
        }
        let digits = bytes[i + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 3 {
            let mut out = String::with_capacity(raw.len());
            out.push_str(&raw[..i + 4]);
            out.push_str(&raw[i + 1 + digits..]);
            return Cow::Owned(out);
        }
    }
    Cow::Borrowed(raw)
}

/// Whether a timestamp string denotes UTC explicitly.
pub fn denotes_utc(raw: &str) -> bool {
    let trimmed = raw.trim_end();
    trimmed.ends_with('Z') || trimmed.ends_with('z') || trimmed.contains("+00:00")
}

/// Normalize a raw timestamp to display-local epoch milliseconds.
///
/// Uses the system's local timezone as the display locale; see
/// [`normalize_in`] for the timezone-injected variant.
pub fn normalize(raw: &str) -> Option<i64> {
    normalize_in(raw, &Local)
}

/// Normalize a raw timestamp against an explicit display timezone.
///
/// - UTC-suffixed strings (trailing `Z` or a `+00:00` offset) shift by
///   the display zone's offset at that instant, so charts read in local
///   wall-clock time.
/// - Other explicit offsets are honored at face value.
/// - Naive strings parse as local time in the display zone; ambiguous
///   local times (DST fold) resolve to the earlier mapping.
/// - Anything unparseable is `None`.
pub fn normalize_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<i64> {
    let cleaned = truncate_subseconds(raw.trim());

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&cleaned) {
        let utc_ms = parsed.timestamp_millis();
        if denotes_utc(&cleaned) {
            let offset_secs = tz
                .offset_from_utc_datetime(&parsed.naive_utc())
                .fix()
                .local_minus_utc() as i64;
            return Some(utc_ms + offset_secs * 1000);
        }
        return Some(utc_ms);
    }

    let naive = parse_naive(&cleaned)?;
    let local = tz.from_local_datetime(&naive).earliest()?;
    Some(local.timestamp_millis())
}

fn parse_naive(cleaned: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(cleaned, format) {
            return Some(naive);
        }
    }
    None
}

/// Parse a timestamp to true epoch milliseconds, for ordering.
///
/// Unlike [`normalize`], no display shift is applied: offsets resolve to
/// the instant they denote, and naive strings are read as UTC. Use this
/// as a sort key, not for chart axes.
pub fn parse_instant_ms(raw: &str) -> Option<i64> {
    let cleaned = truncate_subseconds(raw.trim());

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(parsed.timestamp_millis());
    }

    parse_naive(&cleaned).map(|naive| naive.and_utc().timestamp_millis())
}
