//! Button identities and the interrupt-to-main-loop edge record

use crate::traits::DigitalInput;
use crate::Micros;

/// Logical buttons on the device
///
/// The set is closed: a channel that is not listed here cannot be named,
/// so an unknown channel id is rejected at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Adds time while configuring (button A)
    Primary,
    /// Commits, acknowledges and retries (button B)
    Secondary,
    /// Stick push switch, confirms guided break steps
    Stick,
}

impl ButtonId {
    /// Number of button channels
    pub const COUNT: usize = 3;

    /// All buttons, in channel index order
    pub const ALL: [ButtonId; Self::COUNT] = [ButtonId::Primary, ButtonId::Secondary, ButtonId::Stick];

    /// Dense channel index (0..COUNT)
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A falling edge recorded by the interrupt side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdge {
    /// Button that produced the edge
    pub button: ButtonId,
    /// Time the edge was observed (µs since boot)
    pub at: Micros,
}

/// Producer side of the edge handoff
///
/// Called right after an edge interrupt fires. The edge is kept only if
/// the pin still reads pressed, which drops release glitches before they
/// ever reach the queue.
pub fn capture_edge<I: DigitalInput + ?Sized>(
    input: &I,
    button: ButtonId,
    at: Micros,
) -> Option<ButtonEdge> {
    if input.is_pressed(button) {
        Some(ButtonEdge { button, at })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockButtons {
        pressed: [bool; ButtonId::COUNT],
    }

    impl DigitalInput for MockButtons {
        fn is_pressed(&self, button: ButtonId) -> bool {
            self.pressed[button.index()]
        }
    }

    #[test]
    fn test_channel_indices_are_dense() {
        for (i, button) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn test_capture_keeps_pressed_edge() {
        let buttons = MockButtons {
            pressed: [false, true, false],
        };
        let edge = capture_edge(&buttons, ButtonId::Secondary, 1234);
        assert_eq!(
            edge,
            Some(ButtonEdge {
                button: ButtonId::Secondary,
                at: 1234
            })
        );
    }

    #[test]
    fn test_capture_drops_released_glitch() {
        let buttons = MockButtons {
            pressed: [false; ButtonId::COUNT],
        };
        assert_eq!(capture_edge(&buttons, ButtonId::Primary, 10), None);
    }
}
