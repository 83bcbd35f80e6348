//! Buzzer trait

/// Piezo buzzer
pub trait Buzzer {
    /// Start sounding a tone
    ///
    /// `duration_hint_ms` is how long the caller intends to keep the tone
    /// on. The caller still calls [`Buzzer::stop`] explicitly.
    fn start_tone(&mut self, duration_hint_ms: u32);

    /// Silence the buzzer
    fn stop(&mut self);
}
