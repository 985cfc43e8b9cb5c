//! Formatting helpers for the trip readouts.

/// Kilometres with one decimal, e.g. `12.3 км`.
pub fn format_distance_text(distance_m: f64) -> String {
    format!("{:.1} км", distance_m / 1000.0)
}

/// Whole minutes, rounded to nearest, e.g. `16 мин`.
pub fn format_duration_text(duration_secs: f64) -> String {
    format!("{} мин", (duration_secs / 60.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_renders_kilometres_to_one_decimal() {
        assert_eq!(format_distance_text(12345.0), "12.3 км");
        assert_eq!(format_distance_text(900.0), "0.9 км");
    }

    #[test]
    fn duration_renders_rounded_minutes() {
        assert_eq!(format_duration_text(930.0), "16 мин");
        assert_eq!(format_duration_text(89.0), "1 мин");
        assert_eq!(format_duration_text(31.0), "1 мин");
        assert_eq!(format_duration_text(29.0), "0 мин");
    }
}
