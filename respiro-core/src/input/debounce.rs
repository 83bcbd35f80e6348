//! Time-window button debouncing
//!
//! A press is accepted at most once per debounce window on each channel.
//! Edges inside the window are contact bounce and are dropped silently.

use super::edge::ButtonId;
use crate::Micros;

/// Debounce state for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    /// Button this channel tracks
    pub id: ButtonId,
    /// Time of the last accepted press, `None` until the first one
    pub last_accepted: Option<Micros>,
    /// Minimum spacing between accepted presses (µs)
    pub window_us: Micros,
}

impl ButtonChannel {
    /// Create a channel that has never seen a press
    pub const fn new(id: ButtonId, window_us: Micros) -> Self {
        Self {
            id,
            last_accepted: None,
            window_us,
        }
    }

    /// Decide whether a press at `now` counts
    ///
    /// The last-accepted timestamp only moves when the press is accepted,
    /// so a long run of bounces cannot keep extending the window.
    pub fn accept(&mut self, now: Micros) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            // An edge stamped before the last accepted press is stale
            Some(last) => now >= last && now - last >= self.window_us,
        };

        if accepted {
            self.last_accepted = Some(now);
        }

        accepted
    }
}

/// Debouncer for all button channels
#[derive(Debug, Clone)]
pub struct Debouncer {
    channels: [ButtonChannel; ButtonId::COUNT],
}

impl Debouncer {
    /// Create a debouncer with the same window on every channel
    pub fn new(window_us: Micros) -> Self {
        Self {
            channels: ButtonId::ALL.map(|id| ButtonChannel::new(id, window_us)),
        }
    }

    /// Accept or reject a press on `button` at `now`
    pub fn accept(&mut self, button: ButtonId, now: Micros) -> bool {
        self.channels[button.index()].accept(now)
    }

    /// Get the state of one channel
    pub fn channel(&self, button: ButtonId) -> &ButtonChannel {
        &self.channels[button.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: Micros = 200_000;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.accept(ButtonId::Primary, 0));
        assert_eq!(debouncer.channel(ButtonId::Primary).last_accepted, Some(0));
    }

    #[test]
    fn test_bounce_rejected_without_moving_window() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.accept(ButtonId::Primary, 1_000));

        // Bounces inside the window
        assert!(!debouncer.accept(ButtonId::Primary, 1_050));
        assert!(!debouncer.accept(ButtonId::Primary, 150_000));
        assert_eq!(
            debouncer.channel(ButtonId::Primary).last_accepted,
            Some(1_000)
        );

        // Window measured from the accepted press, not the last bounce
        assert!(debouncer.accept(ButtonId::Primary, 201_000));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.accept(ButtonId::Primary, 0));
        assert!(debouncer.accept(ButtonId::Secondary, 10));
        assert!(debouncer.accept(ButtonId::Stick, 20));
        assert!(!debouncer.accept(ButtonId::Secondary, 30));
    }

    #[test]
    fn test_stale_edge_rejected() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.accept(ButtonId::Stick, 500_000));
        assert!(!debouncer.accept(ButtonId::Stick, 100_000));
    }

    #[test]
    fn test_configurable_window() {
        // Earlier hardware revision used a 250ms window
        let mut debouncer = Debouncer::new(250_000);
        assert!(debouncer.accept(ButtonId::Primary, 0));
        assert!(!debouncer.accept(ButtonId::Primary, 220_000));
        assert!(debouncer.accept(ButtonId::Primary, 250_000));
    }

    proptest! {
        #[test]
        fn prop_press_inside_window_rejected(t in 0u64..1_000_000_000, d in 0u64..WINDOW) {
            let mut debouncer = Debouncer::new(WINDOW);
            prop_assert!(debouncer.accept(ButtonId::Secondary, t));
            prop_assert!(!debouncer.accept(ButtonId::Secondary, t + d));
        }

        #[test]
        fn prop_press_after_window_accepted(t in 0u64..1_000_000_000, d in WINDOW..10 * WINDOW) {
            let mut debouncer = Debouncer::new(WINDOW);
            prop_assert!(debouncer.accept(ButtonId::Secondary, t));
            prop_assert!(debouncer.accept(ButtonId::Secondary, t + d));
        }
    }
}
