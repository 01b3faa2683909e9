/// Format a millisecond position as `HH:MM:SS`.
///
/// Hours are not clamped, so very long media renders as e.g. `123:04:05`.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(0), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_time(3_661_000), "01:01:01");
        assert_eq!(format_time(59_000), "00:00:59");
        assert_eq!(format_time(102_000), "00:01:42");
    }

    #[test]
    fn truncates_sub_second_part() {
        assert_eq!(format_time(999), "00:00:00");
        assert_eq!(format_time(60_999), "00:01:00");
    }

    #[test]
    fn hours_are_not_clamped() {
        assert_eq!(format_time(100 * 3600 * 1000), "100:00:00");
        assert_eq!(format_time((123 * 3600 + 4 * 60 + 5) * 1000), "123:04:05");
    }
}
