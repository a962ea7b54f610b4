//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use std::time::Instant;

/// Time left on a run, as `m:ss` (or `h:mm:ss` past an hour).
/// `None` once the estimate has passed.
pub(crate) fn fmt_remaining(ends_at: Instant, now: Instant) -> Option<String> {
    let left = ends_at.checked_duration_since(now)?;
    let secs = left.as_secs();
    if secs == 0 {
        return None;
    }

    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    Some(if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    })
}

/// Slider label: "45 min", "1 h", "1 h 30 min".
pub(crate) fn fmt_minutes(minutes: u16) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    match (h, m) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}
