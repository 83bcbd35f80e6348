//! Status display screens
//!
//! A [`Screen`] is a small value describing what the display should show.
//! The controller compares it with the last drawn one and only redraws
//! when it changed, so the display bus sees one transfer per visible
//! change rather than one per tick.

use core::fmt::Write;

use heapless::String;

use super::animation::AnimationConfig;
use crate::traits::Display;

/// Longest line the 128 px panel fits with a 6 px font
pub const LINE_LEN: usize = 21;

/// Screen contents per session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Accumulated wait while configuring
    Configuring { wait_s: u32 },
    /// Time left until the break
    Running { remaining_s: u32 },
    /// Break alert
    Alerting,
    /// Game in progress
    Playing { hits: u8, target: u8, remaining_s: u32 },
    /// Game round lost
    TimedOut,
    /// Row sweep after a won game
    Sweep,
    /// Guided step counting down
    StepCountdown { step: u8, remaining_s: u32 },
    /// Guided step waiting for a stick press
    StepConfirm { step: u8 },
}

impl Screen {
    /// Render the screen and push it to the display
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D, animation: &AnimationConfig) {
        let mut line: String<LINE_LEN> = String::new();
        display.clear();

        match *self {
            Screen::Configuring { wait_s } => {
                display.draw_text("Break timer", 0, 0);
                let _ = write!(line, "Wait: {} s", wait_s);
                display.draw_text(&line, 0, 20);
                display.draw_text("A: +time  B: start", 0, 40);
            }
            Screen::Running { remaining_s } => {
                display.draw_text("Working", 0, 0);
                let _ = write!(
                    line,
                    "Break in {:02}:{:02}",
                    remaining_s / 60,
                    remaining_s % 60
                );
                display.draw_text(&line, 0, 20);
            }
            Screen::Alerting => {
                display.draw_text("Time for a break!", 10, 20);
                display.draw_text("B: continue", 10, 40);
            }
            Screen::Playing {
                hits,
                target,
                remaining_s,
            } => {
                display.draw_text("Catch the red dot", 0, 0);
                let _ = write!(line, "Hits: {}/{}", hits, target);
                display.draw_text(&line, 0, 20);
                line.clear();
                let _ = write!(line, "Time: {} s", remaining_s);
                display.draw_text(&line, 0, 40);
            }
            Screen::TimedOut => {
                display.draw_text("Time's up!", 10, 20);
                display.draw_text("B: retry", 10, 40);
            }
            Screen::Sweep => {
                display.draw_text("Well done!", 10, 20);
            }
            Screen::StepCountdown { step, remaining_s } => {
                display.draw_text(step_label(animation, step), 0, 20);
                let _ = write!(line, "{} s", remaining_s);
                display.draw_text(&line, 0, 40);
            }
            Screen::StepConfirm { step } => {
                display.draw_text(step_label(animation, step), 0, 20);
                display.draw_text("Press stick", 0, 40);
            }
        }

        display.flush();
    }
}

fn step_label(animation: &AnimationConfig, step: u8) -> &str {
    animation.step(step).map_or("", |s| s.label.as_str())
}
