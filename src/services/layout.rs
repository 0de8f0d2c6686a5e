use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Offset from the top of the visible day and vertical extent, in the
/// caller's pixels-per-hour scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub offset: f64,
    pub extent: f64,
}

// Degenerate ranges (end <= start) are not repaired here; callers
// clamp durations before asking for geometry.
pub fn layout(
    start: NaiveTime,
    end: NaiveTime,
    window_start_hour: u32,
    px_per_hour: f64,
) -> Geometry {
    use chrono::Timelike;

    let start_minutes =
        (start.hour() as i64 - window_start_hour as i64) * 60 + start.minute() as i64;
    let duration_minutes = (end.hour() as i64 * 60 + end.minute() as i64)
        - (start.hour() as i64 * 60 + start.minute() as i64);

    Geometry {
        offset: start_minutes as f64 / 60.0 * px_per_hour,
        extent: duration_minutes as f64 / 60.0 * px_per_hour,
    }
}

// When end <= start, fall back to a fixed duration from start.
pub fn clamp_range(start: NaiveTime, end: NaiveTime, fallback_minutes: i64) -> NaiveTime {
    if end > start {
        end
    } else {
        start + chrono::Duration::minutes(fallback_minutes)
    }
}
