//! Work/break session lifecycle
//!
//! The [`SessionController`] is the root of the application logic. It
//! consumes debounced button edges, polls the work timer, runs the reflex
//! game and the closing animation, and drives every output collaborator.

pub mod animation;
pub mod controller;
pub mod screen;
pub mod state;

pub use animation::{AnimationConfig, AnimationEvent, AnimationPhase, ClosingAnimation, GuidedStep};
pub use controller::{Fault, SessionController};
pub use screen::Screen;
pub use state::{SessionConfig, SessionEvent, SessionState};
