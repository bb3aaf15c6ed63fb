/// Intra-day times are minutes from local midnight, durations plain minutes.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Whether `minutes` is a valid time of day (`0..=1439`).
pub fn is_time_of_day(minutes: i32) -> bool {
    (0..MINUTES_PER_DAY).contains(&minutes)
}

/// Length of the overlap of the half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)`, zero when they do not intersect.
pub fn overlap_minutes(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> i32 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// `HH:MM` rendering for logs and warning payloads.
pub fn format_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_time_of_day() {
        assert!(is_time_of_day(0));
        assert!(is_time_of_day(1439));
        assert!(!is_time_of_day(1440));
        assert!(!is_time_of_day(-1));
    }

    #[test]
    fn test_overlap_minutes() {
        assert_eq!(overlap_minutes(480, 720, 600, 660), 60);
        assert_eq!(overlap_minutes(480, 720, 720, 750), 0);
        assert_eq!(overlap_minutes(480, 720, 400, 500), 20);
        assert_eq!(overlap_minutes(480, 720, 400, 800), 240);
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(509), "08:29");
        assert_eq!(format_hhmm(1439), "23:59");
    }
}
