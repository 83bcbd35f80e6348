//! 5×5 RGB LED matrix
//!
//! The frame is stored in logical row-major order: (0, 0) is the top-left
//! cell and y grows downward. The physical strip is wired bottom-up and
//! snakes back and forth, so every flush reorders the cells through
//! [`serpentine::TRANSMIT_ORDER`] before sending them.

pub mod renderer;
pub mod serpentine;

pub use renderer::{ColorChannel, MatrixRenderer};
pub use serpentine::{physical_index, CELL_COUNT, MATRIX_SIZE};

pub use smart_leds::RGB8;

/// Matrix addressing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    /// Coordinate outside 0..MATRIX_SIZE on either axis
    OutOfRange { x: u8, y: u8 },
}

/// Colors used on the matrix
///
/// The panel is very bright at close range; these levels are what the
/// device actually shows.
pub mod palette {
    use super::RGB8;

    /// Unlit cell
    pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    /// Game target
    pub const TARGET: RGB8 = RGB8 { r: 128, g: 0, b: 0 };
    /// Game player cursor
    pub const PLAYER: RGB8 = RGB8 { r: 0, g: 15, b: 0 };
    /// Closing animation row sweep
    pub const SWEEP: RGB8 = RGB8 { r: 0, g: 0, b: 15 };
}
