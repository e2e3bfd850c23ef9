//! Keyboard Input
//!
//! Maps physical keys to game controls and tracks which controls are held.
//! The table is written by window events and sampled by the fixed-step
//! simulation, so a key held across several steps moves the player every step.

use winit::keyboard::KeyCode;

/// Number of distinct game controls.
const CONTROL_COUNT: usize = 7;

/// The game's control set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    TurnLeft,
    TurnRight,
    StrafeLeft,
    StrafeRight,
    Forward,
    Backward,
}

impl Control {
    /// Maps a physical key code to its control, if it is bound.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Escape => Some(Self::Quit),
            KeyCode::ArrowLeft => Some(Self::TurnLeft),
            KeyCode::ArrowRight => Some(Self::TurnRight),
            KeyCode::KeyA => Some(Self::StrafeLeft),
            KeyCode::KeyD => Some(Self::StrafeRight),
            KeyCode::KeyW => Some(Self::Forward),
            KeyCode::KeyS => Some(Self::Backward),
            _ => None,
        }
    }
}

/// Held-state table for all game controls.
///
/// `snapshot` copies the live table into a previous-frame copy once per
/// frame, after simulation and rendering. Nothing reads the copy yet; it
/// exists so edge-triggered input (pressed-this-frame) can be added without
/// reworking the loop.
pub struct KeyState {
    current: [bool; CONTROL_COUNT],
    /// Table as of the end of the previous frame.
    #[allow(dead_code)]
    previous: [bool; CONTROL_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            current: [false; CONTROL_COUNT],
            previous: [false; CONTROL_COUNT],
        }
    }

    /// Records a press or release for one control.
    pub fn set(&mut self, control: Control, pressed: bool) {
        self.current[control as usize] = pressed;
    }

    /// Returns whether the control is currently held.
    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.current[control as usize]
    }

    /// Copies the live table into the previous-frame table.
    pub fn snapshot(&mut self) {
        self.previous = self.current;
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_keys() {
        assert_eq!(Control::from_key_code(KeyCode::Escape), Some(Control::Quit));
        assert_eq!(
            Control::from_key_code(KeyCode::ArrowLeft),
            Some(Control::TurnLeft)
        );
        assert_eq!(
            Control::from_key_code(KeyCode::ArrowRight),
            Some(Control::TurnRight)
        );
        assert_eq!(
            Control::from_key_code(KeyCode::KeyA),
            Some(Control::StrafeLeft)
        );
        assert_eq!(
            Control::from_key_code(KeyCode::KeyD),
            Some(Control::StrafeRight)
        );
        assert_eq!(Control::from_key_code(KeyCode::KeyW), Some(Control::Forward));
        assert_eq!(
            Control::from_key_code(KeyCode::KeyS),
            Some(Control::Backward)
        );
    }

    #[test]
    fn ignores_unbound_keys() {
        assert_eq!(Control::from_key_code(KeyCode::Space), None);
        assert_eq!(Control::from_key_code(KeyCode::Enter), None);
    }

    #[test]
    fn press_and_release_update_the_table() {
        let mut keys = KeyState::new();
        assert!(!keys.is_held(Control::Forward));

        keys.set(Control::Forward, true);
        assert!(keys.is_held(Control::Forward));
        assert!(!keys.is_held(Control::Backward));

        keys.set(Control::Forward, false);
        assert!(!keys.is_held(Control::Forward));
    }

    #[test]
    fn snapshot_copies_the_live_table() {
        let mut keys = KeyState::new();
        keys.set(Control::TurnLeft, true);
        keys.snapshot();
        assert!(keys.previous[Control::TurnLeft as usize]);
        assert!(!keys.previous[Control::Quit as usize]);

        keys.set(Control::TurnLeft, false);
        // The copy keeps the previous frame's view until the next snapshot.
        assert!(keys.previous[Control::TurnLeft as usize]);
        keys.snapshot();
        assert!(!keys.previous[Control::TurnLeft as usize]);
    }
}
