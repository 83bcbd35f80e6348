//! Button and analog stick input handling
//!
//! Button edges are captured outside the main loop (by the GPIO interrupt
//! side) and handed over as [`ButtonEdge`] records. The session consumes
//! them through the [`Debouncer`], which turns bouncy edges into at most
//! one logical press per debounce window.
//!
//! The analog stick is sampled once per tick and mapped to a discrete
//! [`Direction`] by the [`StickMapper`].

pub mod debounce;
pub mod edge;
pub mod stick;

pub use debounce::{ButtonChannel, Debouncer};
pub use edge::{capture_edge, ButtonEdge, ButtonId};
pub use stick::{AxisConfig, Direction, StickConfig, StickMapper, StickSample};
