//! Session task
//!
//! Owns the board and the session controller. Every tick it drains the
//! button queue and then polls the controller, which advances the timer,
//! the game and the closing animation.

use defmt::*;
use embassy_time::{Duration, Ticker};

use respiro_core::config::DeviceConfig;
use respiro_core::session::{Fault, SessionController, SessionEvent};

use crate::board::DeviceBoard;
use crate::channels::BUTTON_EDGES;

/// Session task - runs the work/break cycle
#[embassy_executor::task]
pub async fn session_task(mut board: DeviceBoard, config: &'static DeviceConfig) {
    info!("Session task started");

    let mut controller = SessionController::new(config.clone());
    controller.start(&mut board);

    let mut state = controller.state();
    let mut ticker = Ticker::every(Duration::from_millis(config.timing.tick_ms as u64));

    loop {
        ticker.next().await;

        while let Ok(edge) = BUTTON_EDGES.try_receive() {
            trace!("Edge {:?} at {}", edge.button, edge.at);
            log_outcome(controller.handle_edge(edge, &mut board));
        }

        log_outcome(controller.poll(&mut board));

        let next = controller.state();
        if next != state {
            info!("Session {:?} -> {:?}", state, next);
            state = next;
        }
    }
}

/// Log a controller outcome; a fault halts the device
fn log_outcome(outcome: Result<Option<SessionEvent>, Fault>) {
    match outcome {
        Ok(Some(event)) => debug!("Session event: {:?}", event),
        Ok(None) => {}
        Err(fault) => {
            error!("Session fault: {:?}", fault);
            panic!("session fault");
        }
    }
}
