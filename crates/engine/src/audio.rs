use jukelet_core::WidgetResult;

/// The playback primitive the controller drives. "Time advanced" and
/// "ended" signals are not part of the trait; the owner of the output turns
/// them into [`crate::Event`]s.
pub trait AudioOutput {
    /// Replaces the current source. `duration_hint` is whatever metadata the
    /// playlist carried; outputs that probe media themselves may ignore it.
    fn load(&mut self, src: &str, duration_hint: Option<f64>);
    fn play(&mut self) -> WidgetResult<()>;
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    /// `None` until metadata is known.
    fn duration(&self) -> Option<f64>;
    fn set_current_time(&mut self, seconds: f64);
}
