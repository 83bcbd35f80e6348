//! LED outputs

/// Addressable LED strip (WS2812-class)
///
/// The strip receives raw channel bytes in wire order. The matrix renderer
/// sends three bytes per LED (green, red, blue) for every LED on the
/// strip, in strip order. Transmission is synchronous.
pub trait LedStrip {
    /// Send one channel byte
    fn send(&mut self, value: u8);
}

/// Single RGB status LED driven by PWM
pub trait StatusLed {
    /// Set PWM levels for each channel (0..=4095, 0 = off)
    fn set_levels(&mut self, red: u16, green: u16, blue: u16);

    /// Turn all channels off
    fn off(&mut self) {
        self.set_levels(0, 0, 0);
    }
}
