//! Excel date serial numbers
//!
//! The 1900 date system counts days from 1899-12-31 and keeps Lotus 1-2-3's
//! fictional 1900-02-29 as serial 60. The 1904 system counts from 1904-01-01
//! without the quirk.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const MILLIS_PER_DAY: i64 = 86_400_000;

fn epoch(date_1904: bool) -> Option<NaiveDate> {
    if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31)
    }
}

/// Convert a serial number into a date and time
///
/// Returns `None` for negative or non-finite serials. In the 1900 system
/// serial 60 reads as 1900-03-01.
pub fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let mut days = serial.floor() as i64;
    let mut millis = ((serial - serial.floor()) * MILLIS_PER_DAY as f64).round() as i64;
    if millis >= MILLIS_PER_DAY {
        days += 1;
        millis -= MILLIS_PER_DAY;
    }
    if !date_1904 && days > 60 {
        days -= 1;
    }

    let date = epoch(date_1904)?.checked_add_signed(Duration::days(days))?;
    Some(date.and_time(NaiveTime::MIN) + Duration::milliseconds(millis))
}

/// Convert a date and time into a serial number
///
/// Returns `None` for moments before the epoch of the date system.
pub fn datetime_to_serial(datetime: NaiveDateTime, date_1904: bool) -> Option<f64> {
    let mut days = (datetime.date() - epoch(date_1904)?).num_days();
    if days < 0 {
        return None;
    }
    if !date_1904 && days >= 60 {
        days += 1;
    }

    let time = datetime.time();
    let millis = time.num_seconds_from_midnight() as i64 * 1000
        + (time.nanosecond() / 1_000_000) as i64;
    Some(days as f64 + millis as f64 / MILLIS_PER_DAY as f64)
}

/// Parse a date written as text
///
/// Accepts ISO 8601 (`2024-03-15`, `2024-03-15 10:30[:00]`,
/// `2024-03-15T10:30:00`), slash-separated year-first dates and US
/// month-first dates (`3/15/2024`, optionally followed by a time).
pub fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 7] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%m/%d/%Y %I:%M %p",
    ];
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_serial_1900() {
        assert_eq!(serial_to_datetime(1.0, false), Some(dt(1900, 1, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(59.0, false), Some(dt(1900, 2, 28, 0, 0, 0)));
        assert_eq!(serial_to_datetime(60.0, false), Some(dt(1900, 3, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(61.0, false), Some(dt(1900, 3, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(45366.5, false), Some(dt(2024, 3, 15, 12, 0, 0)));
        assert_eq!(serial_to_datetime(-1.0, false), None);
        assert_eq!(serial_to_datetime(f64::NAN, false), None);
    }

    #[test]
    fn test_serial_1904() {
        assert_eq!(serial_to_datetime(0.0, true), Some(dt(1904, 1, 1, 0, 0, 0)));
        assert_eq!(serial_to_datetime(43904.5, true), Some(dt(2024, 3, 15, 12, 0, 0)));
    }

    #[test]
    fn test_datetime_to_serial() {
        assert_eq!(datetime_to_serial(dt(1900, 1, 1, 0, 0, 0), false), Some(1.0));
        assert_eq!(datetime_to_serial(dt(1900, 3, 1, 0, 0, 0), false), Some(61.0));
        assert_eq!(datetime_to_serial(dt(2024, 3, 15, 18, 0, 0), false), Some(45366.75));
        assert_eq!(datetime_to_serial(dt(2024, 3, 15, 0, 0, 0), true), Some(43904.0));
        assert_eq!(datetime_to_serial(dt(1800, 1, 1, 0, 0, 0), false), None);
    }

    #[test]
    fn test_rounding_to_next_day() {
        let almost = 45366.0 + (MILLIS_PER_DAY as f64 - 0.1) / MILLIS_PER_DAY as f64;
        assert_eq!(serial_to_datetime(almost, false), Some(dt(2024, 3, 16, 0, 0, 0)));
    }

    #[test]
    fn test_parse_date_text() {
        assert_eq!(parse_date_text("2024-03-15"), Some(dt(2024, 3, 15, 0, 0, 0)));
        assert_eq!(parse_date_text(" 2024-03-15 10:30 "), Some(dt(2024, 3, 15, 10, 30, 0)));
        assert_eq!(parse_date_text("2024-03-15T10:30:05"), Some(dt(2024, 3, 15, 10, 30, 5)));
        assert_eq!(parse_date_text("3/15/2024"), Some(dt(2024, 3, 15, 0, 0, 0)));
        assert_eq!(parse_date_text("3/15/2024 2:05 PM"), Some(dt(2024, 3, 15, 14, 5, 0)));
        assert_eq!(parse_date_text("not a date"), None);
    }
}
