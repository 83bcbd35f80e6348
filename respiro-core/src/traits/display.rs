//! Status display trait

/// Text status display
///
/// The session only places short strings of text; glyph rendering and
/// the bus transfer belong to the implementation. Calls are assumed to
/// always succeed.
pub trait Display {
    /// Clear the off-screen buffer
    fn clear(&mut self);

    /// Draw text with its top-left corner at pixel (`x`, `y`)
    fn draw_text(&mut self, text: &str, x: u8, y: u8);

    /// Push the buffer to the panel
    fn flush(&mut self);
}
