//! Closing animation after a won game
//!
//! A time-driven sequence with no sleeps: the caller polls
//! [`ClosingAnimation::advance`] every tick and forwards stick-button
//! presses to [`ClosingAnimation::confirm`].
//!
//! 1. Row sweep: rows 0..=4 light up cumulatively, one per interval.
//! 2. Guided steps: each step counts down, then waits for a stick press.
//! 3. Done: the matrix is cleared.

use heapless::{String, Vec};
use smart_leds::RGB8;

use crate::matrix::{palette, MatrixError, MatrixRenderer, MATRIX_SIZE};
use crate::traits::LedStrip;
use crate::{Micros, MICROS_PER_MS, MICROS_PER_S};

/// Maximum guided step label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum number of guided steps
pub const MAX_GUIDED_STEPS: usize = 4;

/// One guided break exercise
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GuidedStep {
    /// Text shown on the display
    pub label: String<MAX_LABEL_LEN>,
    /// Countdown length in seconds
    pub seconds: u16,
}

impl GuidedStep {
    /// Create a step, truncating the label to fit
    pub fn new(label: &str, seconds: u16) -> Self {
        let mut text = String::new();
        for c in label.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Self {
            label: text,
            seconds,
        }
    }
}

/// Closing animation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Delay between lighting consecutive rows
    pub row_interval_ms: u32,
    /// Row color
    pub sweep_color: RGB8,
    /// Guided exercises, in order
    pub steps: Vec<GuidedStep, MAX_GUIDED_STEPS>,
}

impl AnimationConfig {
    /// Default guided exercises
    pub fn default_steps() -> Vec<GuidedStep, MAX_GUIDED_STEPS> {
        let mut steps = Vec::new();
        for step in [
            GuidedStep::new("Stretch arms", 10),
            GuidedStep::new("Roll shoulders", 10),
            GuidedStep::new("Rest your eyes", 20),
        ] {
            let _ = steps.push(step);
        }
        steps
    }

    /// Step at `index`, if configured
    pub fn step(&self, index: u8) -> Option<&GuidedStep> {
        self.steps.get(index as usize)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            row_interval_ms: 200,
            sweep_color: palette::SWEEP,
            steps: Self::default_steps(),
        }
    }
}

/// Animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationPhase {
    /// `lit_rows` rows are on; the next change is due at `next_at`
    RowSweep { lit_rows: u8, next_at: Micros },
    /// Guided step counting down
    Countdown { step: u8, ends_at: Micros },
    /// Guided step finished; waiting for a stick press
    AwaitConfirm { step: u8 },
    /// Sequence complete
    Done,
}

/// Progress reported by the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationEvent {
    /// Row lit; carries the number of lit rows
    RowLit(u8),
    /// Guided step countdown started
    StepStarted(u8),
    /// Guided step countdown reached zero
    StepAwaitingConfirm(u8),
    /// Sequence complete, matrix cleared
    Finished,
}

/// Closing animation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingAnimation {
    phase: AnimationPhase,
}

impl ClosingAnimation {
    /// Create an animation whose first row lights on the first advance
    pub fn new(now: Micros) -> Self {
        Self {
            phase: AnimationPhase::RowSweep {
                lit_rows: 0,
                next_at: now,
            },
        }
    }

    /// Current phase
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Check if the sequence is complete
    pub fn is_done(&self) -> bool {
        self.phase == AnimationPhase::Done
    }

    /// Whole seconds left in the current countdown, rounded up
    pub fn remaining_s(&self, now: Micros) -> Option<u32> {
        match self.phase {
            AnimationPhase::Countdown { ends_at, .. } => {
                let left = ends_at.saturating_sub(now);
                Some(left.div_ceil(MICROS_PER_S) as u32)
            }
            _ => None,
        }
    }

    /// Move the sequence forward to `now`
    ///
    /// At most one phase change happens per call.
    pub fn advance<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        config: &AnimationConfig,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Result<Option<AnimationEvent>, MatrixError> {
        match self.phase {
            AnimationPhase::RowSweep { lit_rows, next_at } if now >= next_at => {
                if (lit_rows as usize) < MATRIX_SIZE {
                    renderer.fill_row(lit_rows, config.sweep_color)?;
                    renderer.flush(strip);
                    let lit_rows = lit_rows + 1;
                    self.phase = AnimationPhase::RowSweep {
                        lit_rows,
                        next_at: next_at + config.row_interval_ms as Micros * MICROS_PER_MS,
                    };
                    Ok(Some(AnimationEvent::RowLit(lit_rows)))
                } else {
                    Ok(Some(self.start_step(0, now, config, renderer, strip)))
                }
            }
            AnimationPhase::Countdown { step, ends_at } if now >= ends_at => {
                self.phase = AnimationPhase::AwaitConfirm { step };
                Ok(Some(AnimationEvent::StepAwaitingConfirm(step)))
            }
            _ => Ok(None),
        }
    }

    /// Handle a stick press
    ///
    /// Only advances a step that is waiting for confirmation; presses at
    /// any other time are ignored.
    pub fn confirm<S: LedStrip + ?Sized>(
        &mut self,
        now: Micros,
        config: &AnimationConfig,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> Option<AnimationEvent> {
        match self.phase {
            AnimationPhase::AwaitConfirm { step } => {
                Some(self.start_step(step + 1, now, config, renderer, strip))
            }
            _ => None,
        }
    }

    fn start_step<S: LedStrip + ?Sized>(
        &mut self,
        step: u8,
        now: Micros,
        config: &AnimationConfig,
        renderer: &mut MatrixRenderer,
        strip: &mut S,
    ) -> AnimationEvent {
        match config.step(step) {
            Some(guided) => {
                self.phase = AnimationPhase::Countdown {
                    step,
                    ends_at: now + guided.seconds as Micros * MICROS_PER_S,
                };
                AnimationEvent::StepStarted(step)
            }
            None => {
                self.phase = AnimationPhase::Done;
                renderer.clear();
                renderer.flush(strip);
                AnimationEvent::Finished
            }
        }
    }
}
