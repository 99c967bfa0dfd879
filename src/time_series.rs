use serde::Serialize;

/// Speed at a moment of the run: seconds since the first keystroke and the wpm then.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Chart-ready coordinates.
pub fn to_coords(points: &[TimeSeriesPoint]) -> Vec<(f64, f64)> {
    points.iter().copied().map(Into::into).collect()
}
