//! Auto-rotating orbit camera framing the surface at the origin.

use std::f64::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::params::{CameraConfig, RenderConfig};

/// Camera circling the Y axis through the target at constant speed
pub struct CameraSystem {
    config: CameraConfig,
}

impl CameraSystem {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Eye and look-at target at `time_s`
    pub fn compute_position_and_target(&self, time_s: f64) -> (Vec3, Vec3) {
        let target = Vec3::from_array(self.config.target);
        let offset = Vec3::from_array(self.config.position) - target;

        // Angle is reduced in f64 before narrowing
        let angle = (f64::from(self.config.angular_velocity()) * time_s).rem_euclid(TAU);
        let eye = target + Quat::from_rotation_y(angle as f32) * offset;

        (eye, target)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(
        &self,
        time_s: f64,
        render_config: &RenderConfig,
    ) -> (Mat4, Vec3) {
        let (eye, target) = self.compute_position_and_target(time_s);

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, eye)
    }
}
