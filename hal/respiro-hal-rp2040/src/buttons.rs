//! Button inputs
//!
//! All three buttons are wired to ground with internal pull-ups, so a
//! press reads low and starts with a falling edge.

use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

use respiro_core::input::ButtonId;
use respiro_core::traits::DigitalInput;

/// The three device buttons
pub struct ButtonPins<'d> {
    primary: Input<'d>,
    secondary: Input<'d>,
    stick: Input<'d>,
}

impl<'d> ButtonPins<'d> {
    /// Configure the button pins with pull-ups
    pub fn new(
        primary: Peri<'d, impl Pin>,
        secondary: Peri<'d, impl Pin>,
        stick: Peri<'d, impl Pin>,
    ) -> Self {
        Self {
            primary: Input::new(primary, Pull::Up),
            secondary: Input::new(secondary, Pull::Up),
            stick: Input::new(stick, Pull::Up),
        }
    }

    fn input(&self, button: ButtonId) -> &Input<'d> {
        match button {
            ButtonId::Primary => &self.primary,
            ButtonId::Secondary => &self.secondary,
            ButtonId::Stick => &self.stick,
        }
    }

    /// Wait for the next falling edge on any button
    pub async fn wait_for_edge(&mut self) -> ButtonId {
        match select3(
            self.primary.wait_for_falling_edge(),
            self.secondary.wait_for_falling_edge(),
            self.stick.wait_for_falling_edge(),
        )
        .await
        {
            Either3::First(()) => ButtonId::Primary,
            Either3::Second(()) => ButtonId::Secondary,
            Either3::Third(()) => ButtonId::Stick,
        }
    }
}

impl DigitalInput for ButtonPins<'_> {
    fn is_pressed(&self, button: ButtonId) -> bool {
        self.input(button).is_low()
    }
}
