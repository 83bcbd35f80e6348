//! Frame buffer and strip transmission
//!
//! Drawing only touches the in-memory frame. Nothing reaches the strip
//! until [`MatrixRenderer::flush`], which sends the whole frame in one
//! synchronous pass, so the panel never shows a half-drawn frame.

use smart_leds::RGB8;

use super::serpentine::{logical_index, CELL_COUNT, MATRIX_SIZE, TRANSMIT_ORDER};
use super::MatrixError;
use crate::traits::LedStrip;

/// One color channel of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

/// Owner of the live matrix frame
#[derive(Debug, Clone)]
pub struct MatrixRenderer {
    /// Cells in logical row-major order
    frame: [RGB8; CELL_COUNT],
}

impl Default for MatrixRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixRenderer {
    /// Create a renderer with every cell off
    pub const fn new() -> Self {
        Self {
            frame: [RGB8 { r: 0, g: 0, b: 0 }; CELL_COUNT],
        }
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.frame.fill(RGB8::default());
    }

    /// Write one channel of the cell at (`x`, `y`)
    ///
    /// Out-of-range coordinates are reported and leave the frame untouched.
    pub fn set(
        &mut self,
        x: u8,
        y: u8,
        channel: ColorChannel,
        intensity: u8,
    ) -> Result<(), MatrixError> {
        let cell = &mut self.frame[logical_index(x, y)?];
        match channel {
            ColorChannel::Red => cell.r = intensity,
            ColorChannel::Green => cell.g = intensity,
            ColorChannel::Blue => cell.b = intensity,
        }
        Ok(())
    }

    /// Write all three channels of the cell at (`x`, `y`)
    pub fn set_cell(&mut self, x: u8, y: u8, color: RGB8) -> Result<(), MatrixError> {
        self.set(x, y, ColorChannel::Red, color.r)?;
        self.set(x, y, ColorChannel::Green, color.g)?;
        self.set(x, y, ColorChannel::Blue, color.b)
    }

    /// Paint a whole logical row
    pub fn fill_row(&mut self, y: u8, color: RGB8) -> Result<(), MatrixError> {
        for x in 0..MATRIX_SIZE as u8 {
            self.set_cell(x, y, color)?;
        }
        Ok(())
    }

    /// Read the cell at (`x`, `y`)
    pub fn cell(&self, x: u8, y: u8) -> Result<RGB8, MatrixError> {
        Ok(self.frame[logical_index(x, y)?])
    }

    /// Frame in logical row-major order
    pub fn frame(&self) -> &[RGB8; CELL_COUNT] {
        &self.frame
    }

    /// Number of cells that are not off
    pub fn lit_count(&self) -> usize {
        self.frame.iter().filter(|c| **c != RGB8::default()).count()
    }

    /// Send the frame to the strip
    ///
    /// Cells go out in serpentine strip order, each as green, red, blue:
    /// 75 bytes per flush.
    pub fn flush<S: LedStrip + ?Sized>(&self, strip: &mut S) {
        for &logical in TRANSMIT_ORDER.iter() {
            let cell = self.frame[logical];
            strip.send(cell.g);
            strip.send(cell.r);
            strip.send(cell.b);
        }
    }
}
