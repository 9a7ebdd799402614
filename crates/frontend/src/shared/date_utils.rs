/// Date helpers for table cells and file names

/// Normalises backend timestamps to `YYYY-MM-DD HH:MM:SS`
/// Example: "2024-03-15T14:02:26.123456" -> "2024-03-15 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    let trimmed = datetime_str.trim();
    let Some((date_part, time_part)) = trimmed.split_once(['T', ' ']) else {
        return trimmed.to_string();
    };
    if chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_err() {
        return trimmed.to_string();
    }
    let time = time_part.split('.').next().unwrap_or(time_part);
    let time = time.trim_end_matches('Z');
    format!("{} {}", date_part, time)
}

/// Local calendar date, used in export file names.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123456"),
            "2024-03-15 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31 23:59:59"),
            "2024-12-31 23:59:59"
        );
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "2024-12-31 23:59:59");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_datetime("2024-03-15"), "2024-03-15");
        assert_eq!(format_datetime(""), "");
        assert_eq!(format_datetime("昨天 10:00"), "昨天 10:00");
    }
}
