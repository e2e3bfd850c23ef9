//! Camera Module
//!
//! Builds the projection and view matrices for the third-person pivot camera.
//! The camera hangs ten units behind the player and looks down at a fixed
//! 20 degree pitch; yaw comes from the player's heading. Y-up, right-handed,
//! `perspective_rh` with Z in [0, 1].

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::game::PlayerState;

/// Distance from the player to the camera along the view axis.
const PIVOT_DISTANCE: f32 = 10.0;

/// Fixed downward pitch of the camera in degrees.
const PITCH_DEGREES: f32 = 20.0;

// ============================================================================
// Object Uniform (GPU-side)
// ============================================================================

/// GPU-side per-object uniform data.
///
/// Every draw call reads one of these: the full model-view-projection matrix
/// for the object plus a base color the fragment shader multiplies in.
///
/// Memory Layout (80 bytes):
/// - `mvp`: mat4x4<f32> at offset 0 (64 bytes, 16-byte aligned)
/// - `color`: vec4<f32> at offset 64 (16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Combined model-view-projection matrix.
    /// Stored as column-major [[f32; 4]; 4] to match WGSL mat4x4<f32>.
    pub mvp: [[f32; 4]; 4],
    /// Base color (RGBA) multiplied into the fragment output.
    pub color: [f32; 4],
}

impl ObjectUniform {
    /// Packs a matrix and color into the layout the shaders expect.
    pub fn new(mvp: Mat4, color: [f32; 4]) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            color,
        }
    }
}

// ============================================================================
// Camera (CPU-side)
// ============================================================================

/// CPU-side camera holding the perspective parameters.
///
/// The view half lives in the free functions below; the projection is fixed
/// at a 60 degree vertical FOV with a far plane distant enough for the whole
/// ground plane.
pub struct Camera {
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Near clipping plane distance (must be > 0).
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Creates a camera for the given aspect ratio.
    ///
    /// # Arguments
    /// * `aspect` - Initial aspect ratio (width / height).
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            fovy: 60.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Builds the projection matrix.
    ///
    /// Uses `perspective_rh` for:
    /// - Right-handed coordinate system
    /// - Z range [0, 1] (WebGPU/Vulkan convention)
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Updates the aspect ratio.
    ///
    /// # Arguments
    /// * `width` - New surface width in pixels.
    /// * `height` - New surface height in pixels.
    pub fn update_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

// ============================================================================
// View Matrices
// ============================================================================

/// The camera-to-pivot transform: back off ten units, then pitch down.
fn pivot() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -PIVOT_DISTANCE))
        * Mat4::from_rotation_x(PITCH_DEGREES.to_radians())
}

/// Builds the view matrix for world-space geometry.
///
/// Applies the player's yaw and position so that the player always lands at
/// view-space (0, 0, -distance), whatever direction they face.
pub fn world_view(player: &PlayerState) -> Mat4 {
    pivot()
        * Mat4::from_rotation_y(player.yaw_degrees.to_radians())
        * Mat4::from_translation(Vec3::new(-player.x, -player.y, -player.z))
}

/// Builds the view matrix for the player marker.
///
/// The marker ignores yaw and position entirely: it is drawn straight ahead
/// of the camera at the pivot point, standing in for the player's body.
pub fn marker_view() -> Mat4 {
    pivot()
}

/// Builds the view matrix for the sky cube.
///
/// Only yaw applies. The sky stays centered on the viewer and never pitches,
/// so its quads read as a horizon-to-zenith gradient in every direction.
pub fn sky_view(yaw_degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(yaw_degrees.to_radians())
}

// ============================================================================
// Compile-time Size Verification
// ============================================================================

/// Verify ObjectUniform is exactly 80 bytes (mat4x4<f32> + vec4<f32>).
const _: () = assert!(std::mem::size_of::<ObjectUniform>() == 80);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_view_pins_the_player_to_the_pivot() {
        let player = PlayerState {
            yaw_degrees: 123.0,
            x: 5.5,
            y: -2.0,
            z: 42.0,
            ..PlayerState::new()
        };
        let view = world_view(&player);
        let in_view = view.transform_point3(Vec3::new(player.x, player.y, player.z));
        assert!((in_view.x).abs() < 1e-3);
        assert!((in_view.y).abs() < 1e-3);
        assert!((in_view.z + PIVOT_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn marker_sits_straight_ahead_of_the_camera() {
        let in_view = marker_view().transform_point3(Vec3::ZERO);
        assert!((in_view.x).abs() < 1e-6);
        assert!((in_view.y).abs() < 1e-6);
        assert!((in_view.z + PIVOT_DISTANCE).abs() < 1e-6);
    }

    #[test]
    fn sky_view_carries_no_translation() {
        let view = sky_view(77.0);
        assert_eq!(view.w_axis, glam::Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn projection_spans_the_zero_to_one_depth_range() {
        let camera = Camera::new(1280.0 / 720.0);
        let projection = camera.projection();
        let near = projection.project_point3(Vec3::new(0.0, 0.0, -camera.znear));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, -camera.zfar));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
