//! Button edge task
//!
//! Waits for falling edges on the three buttons, timestamps them and hands
//! them to the session task. No debouncing happens here.

use defmt::*;
use embassy_time::Instant;

use respiro_core::input::capture_edge;
use respiro_hal_rp2040::pins::gpio_for_button;
use respiro_hal_rp2040::ButtonPins;

use crate::channels::BUTTON_EDGES;

/// Button task - forwards pressed edges to the session queue
#[embassy_executor::task]
pub async fn button_task(mut pins: ButtonPins<'static>) {
    info!("Button task started");

    loop {
        let button = pins.wait_for_edge().await;
        let at = Instant::now().as_micros();

        let Some(edge) = capture_edge(&pins, button, at) else {
            trace!("Release glitch on {:?} dropped", button);
            continue;
        };

        debug!("{:?} pressed (GPIO{})", button, gpio_for_button(button));
        if BUTTON_EDGES.try_send(edge).is_err() {
            warn!("Edge queue full, dropping {:?}", button);
        }
    }
}
