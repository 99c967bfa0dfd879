/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Whole seconds elapsed, for the timer readout.
pub fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    }
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(round_to(12.344, 2), 12.34);
        assert_eq!(round_to(0.0, 2), 0.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(0.0), 0);
        assert_eq!(whole_seconds(1.99), 1);
        assert_eq!(whole_seconds(-3.0), 0);
        assert_eq!(whole_seconds(f64::NAN), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(600), "10:00");
    }
}
