//! Inter-task communication channels
//!
//! Button edges travel from the button task to the session task through a
//! bounded queue. The session task drains it once per tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use respiro_core::input::ButtonEdge;

/// Channel capacity for button edges
const EDGE_CHANNEL_SIZE: usize = 8;

/// Button edges, timestamped when the interrupt fired
pub static BUTTON_EDGES: Channel<CriticalSectionRawMutex, ButtonEdge, EDGE_CHANNEL_SIZE> =
    Channel::new();
