use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses the date portion of a backend timestamp.
///
/// Accepts `M/D/YYYY...` and `YYYY-MM-DD...`; anything after the date is ignored.
/// Returns `None` for blank input, unknown layouts, or impossible calendar dates.
pub fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((month, rest)) = take_digits(s, 1, 2) {
        if let Some(rest) = rest.strip_prefix('/') {
            let (day, rest) = take_digits(rest, 1, 2)?;
            let rest = rest.strip_prefix('/')?;
            let (year, _) = take_digits(rest, 4, 4)?;
            return NaiveDate::from_ymd_opt(year as i32, month, day);
        }
    }

    let (year, rest) = take_digits(s, 4, 4)?;
    let rest = rest.strip_prefix('-')?;
    let (month, rest) = take_digits(rest, 1, 2)?;
    let rest = rest.strip_prefix('-')?;
    let (day, _) = take_digits(rest, 1, 2)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Day bucket key: the raw date text before the first space, kept verbatim.
/// Only returned when it parses, so every key maps to a calendar date.
pub fn day_key(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let key = trimmed.split(' ').next().unwrap_or("");
    if key.is_empty() {
        return None;
    }
    parse_backend_date(key).map(|_| key)
}

/// Full ordering key for a timestamp: the parsed date plus any trailing time of day.
pub fn timestamp_sort_key(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let date = parse_backend_date(trimmed)?;
    let time = trimmed
        .split_once(' ')
        .and_then(|(_, rest)| parse_time_of_day(rest.trim()))
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    const FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];
    FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// Reads between `min` and `max` leading ASCII digits.
fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len < min {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_month_day_year_with_time() {
        assert_eq!(parse_backend_date("3/14/2024 10:00"), Some(date(2024, 3, 14)));
        assert_eq!(parse_backend_date("12/01/2023"), Some(date(2023, 12, 1)));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_backend_date("2024-03-14"), Some(date(2024, 3, 14)));
        assert_eq!(
            parse_backend_date("2024-3-4T09:30:00Z"),
            Some(date(2024, 3, 4))
        );
    }

    #[test]
    fn rejects_blank_and_unknown_formats() {
        assert_eq!(parse_backend_date(""), None);
        assert_eq!(parse_backend_date("   "), None);
        assert_eq!(parse_backend_date("not a date"), None);
        assert_eq!(parse_backend_date("14.03.2024"), None);
        assert_eq!(parse_backend_date("3/14/24"), None);
        assert_eq!(parse_backend_date("2/30/2024"), None);
    }

    #[test]
    fn day_key_keeps_raw_text() {
        assert_eq!(day_key(" 3/4/2024 10:00:00"), Some("3/4/2024"));
        assert_eq!(day_key("2024-03-04"), Some("2024-03-04"));
        assert_eq!(day_key("garbage 10:00"), None);
        assert_eq!(day_key(""), None);
    }

    #[test]
    fn sort_key_uses_time_when_present() {
        let morning = timestamp_sort_key("3/4/2024 9:15").unwrap();
        let evening = timestamp_sort_key("3/4/2024 6:30 PM").unwrap();
        let bare = timestamp_sort_key("3/4/2024").unwrap();
        assert!(bare < morning);
        assert!(morning < evening);
        assert_eq!(timestamp_sort_key("nope"), None);
    }
}
