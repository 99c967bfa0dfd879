use itertools::{Itertools, MinMaxResult};

/// X (seconds) and Y (wpm) upper bounds for the results chart
pub fn compute_chart_params(wpm_coords: &[(f64, f64)]) -> (f64, f64) {
    let highest_wpm = match wpm_coords.iter().map(|&(_, wpm)| wpm).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(w) => w,
        MinMaxResult::MinMax(_, w) => w,
    };

    let overall_duration = wpm_coords.last().map_or(1.0, |&(t, _)| t).max(1.0);

    (overall_duration, highest_wpm.round().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_still_has_bounds() {
        assert_eq!(compute_chart_params(&[]), (1.0, 1.0));
    }

    #[test]
    fn bounds_follow_the_series() {
        let coords = [(0.0, 0.0), (2.5, 48.4), (6.0, 41.0)];
        assert_eq!(compute_chart_params(&coords), (6.0, 48.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
