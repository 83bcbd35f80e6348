//! Session lifecycle states and per-cycle configuration
//!
//! ```text
//! Configuring ──commit──► Running ──wait elapsed──► Alerting
//!      ▲                                              │ acknowledge
//!      └──── finished ──── Animating ◄──── won ──── InGame
//! ```

use crate::game::GameEvent;
use crate::session::animation::AnimationEvent;
use crate::Micros;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Accumulating the wait time
    Configuring,
    /// Work timer running
    Running,
    /// Break due; waiting for acknowledgement
    Alerting,
    /// Reflex game in progress
    InGame,
    /// Closing animation and guided steps
    Animating,
}

/// Things that happened during one controller call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Primary press added time; carries the new total
    WaitIncreased { wait_ms: u32 },
    /// Wait committed and the work timer started
    Committed { wait_ms: u32 },
    /// Work timer reached the committed wait
    WaitElapsed,
    /// Alert acknowledged
    Acknowledged,
    /// Reflex game progress
    Game(GameEvent),
    /// Closing animation progress
    Animation(AnimationEvent),
}

impl SessionState {
    /// Apply an event, returning the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Configuring, E::Committed { .. }) => S::Running,
            (S::Running, E::WaitElapsed) => S::Alerting,
            (S::Alerting, E::Acknowledged) => S::InGame,
            (S::InGame, E::Game(GameEvent::Won)) => S::Animating,
            (S::Animating, E::Animation(AnimationEvent::Finished)) => S::Configuring,
            _ => self,
        }
    }

    /// Check if the work timer is counting in this state
    pub fn timer_active(&self) -> bool {
        matches!(self, SessionState::Running)
    }
}

/// Per-cycle wait configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Accumulated wait
    pub wait_us: Micros,
    /// Set once the wait has been committed
    pub configured: bool,
    /// Commit time of the current cycle
    pub start: Option<Micros>,
}

impl SessionConfig {
    /// Create an empty configuration
    pub const fn new() -> Self {
        Self {
            wait_us: 0,
            configured: false,
            start: None,
        }
    }

    /// Add `increment` to the wait, saturating at `cap`
    ///
    /// Ignored once committed.
    pub fn add(&mut self, increment: Micros, cap: Micros) -> Micros {
        if !self.configured {
            self.wait_us = self.wait_us.saturating_add(increment).min(cap);
        }
        self.wait_us
    }

    /// Commit the wait and start the cycle at `now`
    pub fn commit(&mut self, now: Micros) {
        self.configured = true;
        self.start = Some(now);
    }

    /// Time since the cycle started
    pub fn elapsed_us(&self, now: Micros) -> Micros {
        self.start.map_or(0, |start| now.saturating_sub(start))
    }

    /// Check if the committed wait has fully elapsed
    pub fn elapsed(&self, now: Micros) -> bool {
        self.configured && self.start.is_some() && self.elapsed_us(now) >= self.wait_us
    }

    /// Time left until the wait elapses
    pub fn remaining_us(&self, now: Micros) -> Micros {
        self.wait_us.saturating_sub(self.elapsed_us(now))
    }

    /// Start over for the next cycle
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
