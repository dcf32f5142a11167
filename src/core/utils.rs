//! Shared display helpers: timestamps and number formatting

use chrono::{DateTime, Duration, Utc};

/// Bangladesh is fixed at GMT+06:00, no DST.
const BD_UTC_OFFSET_HOURS: i64 = 6;

/// Current Bangladesh time, formatted for receipts
/// (e.g. `07 January 2025, 03:04 PM`).
pub fn bd_time_now() -> String {
    format_bd_time(Utc::now())
}

/// Format a UTC instant as Bangladesh local time.
pub fn format_bd_time(utc: DateTime<Utc>) -> String {
    (utc + Duration::hours(BD_UTC_OFFSET_HOURS))
        .format("%d %B %Y, %I:%M %p")
        .to_string()
}

/// Convert a unix timestamp to a Bangladesh-time date string.
/// Unparseable input is returned as-is.
pub fn unix_to_date(raw: &str) -> String {
    match raw.trim().parse::<i64>() {
        Ok(ts) => match DateTime::from_timestamp(ts, 0) {
            Some(dt) => format_bd_time(dt),
            None => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}

/// Format an integer with thousands separators (`1234567` -> `1,234,567`).
/// Non-numeric input is returned as-is.
pub fn format_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(num) = trimmed.parse::<i64>() else {
        return raw.to_string();
    };

    let negative = num < 0;
    let digits = num.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_numbers_with_separators() {
        assert_eq!(format_number("0"), "0");
        assert_eq!(format_number("999"), "999");
        assert_eq!(format_number("1000"), "1,000");
        assert_eq!(format_number("1234567"), "1,234,567");
        assert_eq!(format_number("-1234"), "-1,234");
    }

    #[test]
    fn non_numeric_input_passes_through() {
        assert_eq!(format_number("N/A"), "N/A");
        assert_eq!(format_number(""), "");
    }

    #[test]
    fn converts_unix_timestamps_to_bd_time() {
        // 2021-01-01 00:00:00 UTC is 06:00 AM in Dhaka.
        assert_eq!(unix_to_date("1609459200"), "01 January 2021, 06:00 AM");
    }

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(unix_to_date("soon"), "soon");
        assert_eq!(unix_to_date("N/A"), "N/A");
    }

    #[test]
    fn bd_time_is_six_hours_ahead_of_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 15, 20, 30, 0).unwrap();
        assert_eq!(format_bd_time(utc), "16 June 2025, 02:30 AM");
    }
}
