//! Per-tick input commands and button edge detection
//!
//! The simulation consumes [`TickInput`]: stick axes plus one-shot button
//! edges. Raw button levels from an [`InputSource`] go through
//! [`DebouncedButton`], which fires once per physical press and re-arms
//! only after the button is seen released.

use crate::platform::InputSource;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Horizontal stick axis, 0..=1023
    pub stick_x: u16,
    /// Vertical stick axis, 0..=1023
    pub stick_y: u16,
    /// Confirm/start button edge
    pub confirm: bool,
    /// Exit-to-menu button edge
    pub exit: bool,
    /// Special-function (cheat) button edge
    pub special: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            // Centered stick, no presses
            stick_x: 512,
            stick_y: 512,
            confirm: false,
            exit: false,
            special: false,
        }
    }
}

/// Edge detector for one button.
///
/// Arms when the button is observed released; fires on the next press and
/// stays quiet until released again. A fresh detector is unarmed, so a
/// button held at power-on does not fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebouncedButton {
    armed: bool,
}

impl DebouncedButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current raw level; returns true on a press edge.
    pub fn update(&mut self, down: bool) -> bool {
        if !down {
            self.armed = true;
            return false;
        }
        if self.armed {
            self.armed = false;
            return true;
        }
        false
    }
}

/// The three console buttons, sampled together once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonPad {
    confirm: DebouncedButton,
    exit: DebouncedButton,
    special: DebouncedButton,
}

impl ButtonPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample an input source into a tick's worth of commands.
    pub fn sample(&mut self, source: &mut impl InputSource) -> TickInput {
        TickInput {
            stick_x: source.stick_x(),
            stick_y: source.stick_y(),
            confirm: self.confirm.update(source.confirm_down()),
            exit: self.exit.update(source.exit_down()),
            special: self.special.update(source.special_down()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_fires_once_per_press() {
        let mut btn = DebouncedButton::new();
        // Arm with a released read
        assert!(!btn.update(false));
        // Press: fires exactly once, holding stays quiet
        assert!(btn.update(true));
        assert!(!btn.update(true));
        assert!(!btn.update(true));
        // Release re-arms, next press fires again
        assert!(!btn.update(false));
        assert!(btn.update(true));
    }

    #[test]
    fn test_held_at_startup_does_not_fire() {
        let mut btn = DebouncedButton::new();
        assert!(!btn.update(true));
        assert!(!btn.update(true));
        // Must be released once before a press counts
        assert!(!btn.update(false));
        assert!(btn.update(true));
    }

    struct FakePad {
        confirm: bool,
    }

    impl InputSource for FakePad {
        fn stick_x(&mut self) -> u16 {
            700
        }
        fn stick_y(&mut self) -> u16 {
            300
        }
        fn confirm_down(&mut self) -> bool {
            self.confirm
        }
        fn exit_down(&mut self) -> bool {
            false
        }
        fn special_down(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn test_pad_sample() {
        let mut pad = ButtonPad::new();
        let mut source = FakePad { confirm: false };

        let input = pad.sample(&mut source);
        assert_eq!(input.stick_x, 700);
        assert_eq!(input.stick_y, 300);
        assert!(!input.confirm);

        source.confirm = true;
        let input = pad.sample(&mut source);
        assert!(input.confirm);
        let input = pad.sample(&mut source);
        assert!(!input.confirm, "held button must not re-fire");
    }
}
