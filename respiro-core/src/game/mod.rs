//! Reflex mini-game played on the LED matrix

pub mod reflex;

pub use reflex::{GameEvent, GamePhase, GameState, Position, ReflexConfig, ReflexGame};
