//! Session controller
//!
//! The controller holds no hardware handles. Every call borrows a
//! [`Board`] and reaches the collaborators through it. Two entry points
//! drive it:
//!
//! - [`SessionController::handle_edge`] for each button edge drained from
//!   the interrupt queue
//! - [`SessionController::poll`] once per tick
//!
//! Alerting is a suspended state: polling keeps running but nothing moves
//! until the secondary button acknowledges the alert.

use crate::config::DeviceConfig;
use crate::game::{GameEvent, GamePhase, ReflexGame};
use crate::input::{ButtonEdge, ButtonId, Debouncer};
use crate::matrix::{MatrixError, MatrixRenderer};
use crate::traits::{Board, Buzzer, StatusLed};
use crate::{Micros, MICROS_PER_MS, MICROS_PER_S};

use super::animation::{AnimationPhase, ClosingAnimation};
use super::screen::Screen;
use super::state::{SessionConfig, SessionEvent, SessionState};

/// Status LED green level while the work timer runs
const RUNNING_GREEN: u16 = 2048;

/// Runtime faults; the device cannot continue after one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Matrix drawing outside the grid
    Matrix(MatrixError),
}

impl From<MatrixError> for Fault {
    fn from(e: MatrixError) -> Self {
        Fault::Matrix(e)
    }
}

/// Work/break session controller
#[derive(Debug)]
pub struct SessionController {
    config: DeviceConfig,
    state: SessionState,
    session: SessionConfig,
    debouncer: Debouncer,
    renderer: MatrixRenderer,
    game: ReflexGame,
    animation: Option<ClosingAnimation>,
    /// Set while the alert tone sounds
    tone_started: Option<Micros>,
    /// Last screen pushed to the display
    last_screen: Option<Screen>,
}

impl SessionController {
    /// Create a controller in the Configuring state
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            state: SessionState::Configuring,
            session: SessionConfig::new(),
            debouncer: Debouncer::new(config.timing.debounce_us()),
            renderer: MatrixRenderer::new(),
            game: ReflexGame::new(config.game, config.stick),
            animation: None,
            tone_started: None,
            last_screen: None,
            config,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current cycle configuration
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Reflex game
    pub fn game(&self) -> &ReflexGame {
        &self.game
    }

    /// Closing animation, while Animating
    pub fn animation(&self) -> Option<&ClosingAnimation> {
        self.animation.as_ref()
    }

    /// Live matrix frame
    pub fn renderer(&self) -> &MatrixRenderer {
        &self.renderer
    }

    /// Device configuration
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Check if the alert tone is sounding
    pub fn tone_active(&self) -> bool {
        self.tone_started.is_some()
    }

    /// Bring the outputs to the Configuring state
    pub fn start<B: Board>(&mut self, board: &mut B) {
        self.renderer.clear();
        self.renderer.flush(board.strip());
        board.buzzer().stop();
        board.status_led().off();
        let now = board.now();
        self.refresh_screen(now, board);
    }

    /// Handle one button edge from the interrupt queue
    ///
    /// The edge is debounced with its own timestamp; a rejected edge has
    /// no effect at all.
    pub fn handle_edge<B: Board>(
        &mut self,
        edge: ButtonEdge,
        board: &mut B,
    ) -> Result<Option<SessionEvent>, Fault> {
        if !self.debouncer.accept(edge.button, edge.at) {
            return Ok(None);
        }

        let now = board.now();
        let event = match (self.state, edge.button) {
            (SessionState::Configuring, ButtonId::Primary) => {
                let timing = &self.config.timing;
                let wait = self
                    .session
                    .add(timing.wait_increment_us(), timing.max_wait_us());
                Some(SessionEvent::WaitIncreased {
                    wait_ms: to_ms(wait),
                })
            }
            (SessionState::Configuring, ButtonId::Secondary) => {
                self.session.commit(edge.at);
                Some(SessionEvent::Committed {
                    wait_ms: to_ms(self.session.wait_us),
                })
            }
            (SessionState::Alerting, ButtonId::Secondary) => Some(SessionEvent::Acknowledged),
            (SessionState::InGame, ButtonId::Secondary) => self
                .game
                .retry(now, &mut self.renderer, board.strip())?
                .map(SessionEvent::Game),
            (SessionState::Animating, ButtonId::Stick) => match self.animation.as_mut() {
                Some(animation) => animation
                    .confirm(
                        now,
                        &self.config.animation,
                        &mut self.renderer,
                        board.strip(),
                    )
                    .map(SessionEvent::Animation),
                None => None,
            },
            _ => None,
        };

        self.finish(event, now, board)
    }

    /// Advance timers, the game and the animation by one tick
    pub fn poll<B: Board>(&mut self, board: &mut B) -> Result<Option<SessionEvent>, Fault> {
        let now = board.now();

        if let Some(started) = self.tone_started {
            let tone_us = self.config.alert.tone_ms as Micros * MICROS_PER_MS;
            if now.saturating_sub(started) >= tone_us {
                self.stop_tone(board);
            }
        }

        let event = match self.state {
            SessionState::Configuring | SessionState::Alerting => None,
            SessionState::Running => self
                .session
                .elapsed(now)
                .then_some(SessionEvent::WaitElapsed),
            SessionState::InGame => {
                let sample = self.game.mapper().sample(board.stick());
                if self.game.phase() == GamePhase::Playing {
                    let (red, blue) = self.game.mapper().indicator_levels(sample);
                    board.status_led().set_levels(red, 0, blue);
                }
                self.game
                    .tick(now, sample, &mut self.renderer, board.strip())?
                    .map(SessionEvent::Game)
            }
            SessionState::Animating => match self.animation.as_mut() {
                Some(animation) => animation
                    .advance(
                        now,
                        &self.config.animation,
                        &mut self.renderer,
                        board.strip(),
                    )?
                    .map(SessionEvent::Animation),
                None => None,
            },
        };

        self.finish(event, now, board)
    }

    /// Apply the event's transition, then bring the display up to date
    fn finish<B: Board>(
        &mut self,
        event: Option<SessionEvent>,
        now: Micros,
        board: &mut B,
    ) -> Result<Option<SessionEvent>, Fault> {
        if let Some(event) = event {
            let next = self.state.transition(event);
            if next != self.state {
                self.state = next;
                self.enter(now, board)?;
            }
            if event == SessionEvent::Game(GameEvent::TimedOut) {
                board.status_led().off();
            }
        }

        self.refresh_screen(now, board);
        Ok(event)
    }

    /// Entry actions of the current state
    fn enter<B: Board>(&mut self, now: Micros, board: &mut B) -> Result<(), Fault> {
        match self.state {
            SessionState::Configuring => {
                self.session.reset();
                self.animation = None;
                self.game.abandon(&mut self.renderer, board.strip());
                board.status_led().off();
            }
            SessionState::Running => {
                board.status_led().set_levels(0, RUNNING_GREEN, 0);
            }
            SessionState::Alerting => {
                board.status_led().off();
                board.buzzer().start_tone(self.config.alert.tone_ms);
                self.tone_started = Some(now);
            }
            SessionState::InGame => {
                self.stop_tone(board);
                self.game.start(now, &mut self.renderer, board.strip())?;
            }
            SessionState::Animating => {
                board.status_led().off();
                self.animation = Some(ClosingAnimation::new(now));
            }
        }
        Ok(())
    }

    /// Silence the alert tone if it is still sounding
    fn stop_tone<B: Board>(&mut self, board: &mut B) {
        if self.tone_started.take().is_some() {
            board.buzzer().stop();
        }
    }

    /// Screen for the current state
    fn screen(&self, now: Micros) -> Screen {
        match self.state {
            SessionState::Configuring => Screen::Configuring {
                wait_s: (self.session.wait_us / MICROS_PER_S) as u32,
            },
            SessionState::Running => Screen::Running {
                remaining_s: self.session.remaining_us(now).div_ceil(MICROS_PER_S) as u32,
            },
            SessionState::Alerting => Screen::Alerting,
            SessionState::InGame => match self.game.phase() {
                GamePhase::TimedOut => Screen::TimedOut,
                _ => Screen::Playing {
                    hits: self.game.hits(),
                    target: self.game.config().hits_target,
                    remaining_s: self.game.remaining_ms(now).div_ceil(1_000),
                },
            },
            SessionState::Animating => match self.animation.map(|a| (a.phase(), a)) {
                Some((AnimationPhase::Countdown { step, .. }, animation)) => {
                    Screen::StepCountdown {
                        step,
                        remaining_s: animation.remaining_s(now).unwrap_or(0),
                    }
                }
                Some((AnimationPhase::AwaitConfirm { step }, _)) => Screen::StepConfirm { step },
                _ => Screen::Sweep,
            },
        }
    }

    /// Redraw the display if the screen changed
    fn refresh_screen<B: Board>(&mut self, now: Micros, board: &mut B) {
        let screen = self.screen(now);
        if self.last_screen != Some(screen) {
            screen.draw(board.display(), &self.config.animation);
            self.last_screen = Some(screen);
        }
    }
}

fn to_ms(us: Micros) -> u32 {
    (us / MICROS_PER_MS).min(u32::MAX as Micros) as u32
}
