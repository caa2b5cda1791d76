use crate::surface::ProgressView;
use jukelet_core::format_time;

/// Turns a playback position into a progress view. `None` while the duration
/// is unknown or not positive.
pub fn progress_view(current: f64, duration: Option<f64>) -> Option<ProgressView> {
    let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    let current = if current.is_finite() {
        current.clamp(0.0, duration)
    } else {
        0.0
    };
    Some(ProgressView {
        percent: current / duration * 100.0,
        current: format_time(current),
        total: format_time(duration),
    })
}
