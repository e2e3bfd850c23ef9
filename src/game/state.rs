//! Player State
//!
//! Holds the camera/player pose and integrates held keys into motion, once
//! per fixed simulation step. This keeps movement speed independent of the
//! render rate.

use crate::game::input::{Control, KeyState};

/// Distance moved per simulation step while a movement key is held.
const MOVE_SPEED: f32 = 0.2;

/// Yaw change per simulation step while a turn key is held, in degrees.
const TURN_RATE_DEGREES: f32 = 1.0;

/// The camera/player pose, mutated only by [`PlayerState::step`].
pub struct PlayerState {
    /// Horizontal view rotation in degrees. Unbounded; converted to radians
    /// for the movement trigonometry, which wraps naturally.
    pub yaw_degrees: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Eye height. Carried with the pose but not consulted by movement.
    #[allow(dead_code)]
    pub height: f32,
}

impl PlayerState {
    /// Creates a player at the world origin facing negative Z.
    pub fn new() -> Self {
        Self {
            yaw_degrees: 0.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            height: 0.0,
        }
    }

    /// Advances the pose by one simulation step.
    ///
    /// Movement uses the yaw as it was on entry, so a turn applied in this
    /// step only affects movement from the next step on. When a strafe key
    /// and a forward/back key are held together the speed is scaled by
    /// 1/sqrt(2) so the diagonal covers the same distance per step.
    /// Conflicting pairs resolve in favor of strafe-left and forward; the
    /// two turn keys are independent and cancel when both are held.
    ///
    /// # Returns
    /// `false` once the quit control is held. The rest of the step still
    /// executes, so turns and movement apply even on the quitting step.
    pub fn step(&mut self, keys: &KeyState) -> bool {
        let yaw = self.yaw_degrees.to_radians();

        let mut speed = MOVE_SPEED;
        let strafing = keys.is_held(Control::StrafeLeft) || keys.is_held(Control::StrafeRight);
        let advancing = keys.is_held(Control::Forward) || keys.is_held(Control::Backward);
        if strafing && advancing {
            speed *= std::f32::consts::FRAC_1_SQRT_2;
        }

        let mut running = true;
        if keys.is_held(Control::Quit) {
            running = false;
        }

        if keys.is_held(Control::TurnLeft) {
            self.yaw_degrees -= TURN_RATE_DEGREES;
        }
        if keys.is_held(Control::TurnRight) {
            self.yaw_degrees += TURN_RATE_DEGREES;
        }

        if keys.is_held(Control::StrafeLeft) {
            self.x -= speed * yaw.cos();
            self.z -= speed * yaw.sin();
        } else if keys.is_held(Control::StrafeRight) {
            self.x += speed * yaw.cos();
            self.z += speed * yaw.sin();
        }

        if keys.is_held(Control::Forward) {
            self.x += speed * yaw.sin();
            self.z -= speed * yaw.cos();
        } else if keys.is_held(Control::Backward) {
            self.x -= speed * yaw.sin();
            self.z += speed * yaw.cos();
        }

        running
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn held(controls: &[Control]) -> KeyState {
        let mut keys = KeyState::new();
        for &control in controls {
            keys.set(control, true);
        }
        keys
    }

    #[test]
    fn idle_step_keeps_the_pose() {
        let mut player = PlayerState::new();
        assert!(player.step(&KeyState::new()));
        assert_eq!(player.x, 0.0);
        assert_eq!(player.y, 0.0);
        assert_eq!(player.z, 0.0);
        assert_eq!(player.yaw_degrees, 0.0);
    }

    #[test]
    fn five_forward_steps_reach_minus_one_z() {
        let mut player = PlayerState::new();
        let keys = held(&[Control::Forward]);
        for _ in 0..5 {
            assert!(player.step(&keys));
        }
        assert!(player.x.abs() < EPSILON);
        assert!((player.z + 1.0).abs() < EPSILON);
        assert_eq!(player.yaw_degrees, 0.0);
    }

    #[test]
    fn backward_inverts_forward() {
        let mut player = PlayerState::new();
        player.step(&held(&[Control::Backward]));
        assert!(player.x.abs() < EPSILON);
        assert!((player.z - 0.2).abs() < EPSILON);
    }

    #[test]
    fn quarter_turn_then_forward_heads_along_x() {
        let mut player = PlayerState::new();
        let turn = held(&[Control::TurnRight]);
        for _ in 0..90 {
            player.step(&turn);
        }
        assert_eq!(player.yaw_degrees, 90.0);

        player.step(&held(&[Control::Forward]));
        assert!((player.x - 0.2).abs() < EPSILON);
        assert!(player.z.abs() < EPSILON);
    }

    #[test]
    fn strafe_left_wins_when_both_strafes_are_held() {
        let mut both = PlayerState::new();
        both.step(&held(&[Control::StrafeLeft, Control::StrafeRight]));

        let mut left_only = PlayerState::new();
        left_only.step(&held(&[Control::StrafeLeft]));

        assert_eq!(both.x, left_only.x);
        assert_eq!(both.z, left_only.z);
        assert!((both.x + 0.2).abs() < EPSILON);
    }

    #[test]
    fn forward_wins_when_both_axes_are_held() {
        let mut both = PlayerState::new();
        both.step(&held(&[Control::Forward, Control::Backward]));

        let mut forward_only = PlayerState::new();
        forward_only.step(&held(&[Control::Forward]));

        assert_eq!(both.x, forward_only.x);
        assert_eq!(both.z, forward_only.z);
    }

    #[test]
    fn diagonal_covers_the_same_distance_as_straight() {
        let mut straight = PlayerState::new();
        straight.step(&held(&[Control::Forward]));
        let straight_distance = (straight.x * straight.x + straight.z * straight.z).sqrt();

        let mut diagonal = PlayerState::new();
        diagonal.step(&held(&[Control::Forward, Control::StrafeLeft]));
        let diagonal_distance = (diagonal.x * diagonal.x + diagonal.z * diagonal.z).sqrt();

        assert!((straight_distance - diagonal_distance).abs() < 1e-4);
    }

    #[test]
    fn yaw_accumulates_without_clamping() {
        let mut player = PlayerState::new();
        let keys = held(&[Control::TurnLeft]);
        for _ in 0..400 {
            player.step(&keys);
        }
        assert_eq!(player.yaw_degrees, -400.0);
    }

    #[test]
    fn yaw_past_a_full_turn_still_steers_correctly() {
        let mut player = PlayerState::new();
        let turn = held(&[Control::TurnRight]);
        for _ in 0..450 {
            player.step(&turn);
        }
        assert_eq!(player.yaw_degrees, 450.0);

        // 450 degrees is a quarter turn plus a full revolution.
        player.step(&held(&[Control::Forward]));
        assert!((player.x - 0.2).abs() < EPSILON);
        assert!(player.z.abs() < EPSILON);
    }

    #[test]
    fn both_turns_cancel() {
        let mut player = PlayerState::new();
        player.step(&held(&[Control::TurnLeft, Control::TurnRight]));
        assert_eq!(player.yaw_degrees, 0.0);
    }

    #[test]
    fn movement_uses_the_yaw_from_step_entry() {
        let mut player = PlayerState::new();
        player.step(&held(&[Control::TurnRight, Control::Forward]));
        // The turn lands, but this step's movement still follows yaw zero.
        assert_eq!(player.yaw_degrees, 1.0);
        assert!(player.x.abs() < EPSILON);
        assert!((player.z + 0.2).abs() < EPSILON);
    }

    #[test]
    fn quit_clears_running_but_the_step_still_integrates() {
        let mut player = PlayerState::new();
        let keys = held(&[Control::Quit, Control::Forward]);
        assert!(!player.step(&keys));
        assert!((player.z + 0.2).abs() < EPSILON);
    }
}
