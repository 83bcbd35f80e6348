//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod buttons;
pub mod session;

pub use buttons::button_task;
pub use session::session_task;
