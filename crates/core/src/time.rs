/// Renders seconds as `M:SS`. Minutes are unbounded; negative or non-finite
/// input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(3725.4), "62:05");
    }

    #[test]
    fn garbage_input_is_zero() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }
}
