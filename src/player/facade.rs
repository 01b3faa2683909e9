/// Operations the control layer issues against a media engine.
///
/// Positions and durations are milliseconds, volume is `0..=100`.
/// Implementations clamp out-of-range arguments.
pub trait PlaybackFacade {
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop playback and rewind to the start
    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn position(&self) -> u64;
    fn set_position(&mut self, position_ms: u64);
    fn duration(&self) -> u64;

    fn volume(&self) -> u8;
    fn set_volume(&mut self, volume: u8);
}
