use crate::types::{F32x3, Matrix4};

/// Fixed camera on the +Z axis looking at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: F32x3,
    /// Projection aspect ratio
    pub aspect: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Camera {
    pub const DEFAULT_POSITION: F32x3 = F32x3::new(0.0, 0.0, 3.0);
    pub const DEFAULT_FOV: f32 = 45.0;
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 100.0;

    pub fn new(aspect: f32) -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
            aspect,
            fov: Self::DEFAULT_FOV,
        }
    }

    /// Aspect ratio for a `width` x `height` viewport. A degenerate viewport
    /// (minimized window) keeps a square aspect.
    pub fn aspect_of(width: u32, height: u32) -> f32 {
        if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    pub fn proj_mat(&self) -> Matrix4 {
        Matrix4::perspective_rh(self.fov.to_radians(), self.aspect, Self::Z_NEAR, Self::Z_FAR)
    }

    pub fn view_mat(&self) -> Matrix4 {
        Matrix4::look_at_rh(self.position, F32x3::ZERO, F32x3::Y)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn origin_lands_in_the_middle_of_the_screen() {
        let camera = Camera::new(16.0 / 9.0);
        let clip = camera.proj_mat() * camera.view_mat() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;

        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        // wgpu depth range is [0, 1]
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn degenerate_viewport_is_square() {
        assert_eq!(Camera::aspect_of(0, 720), 1.0);
        assert_eq!(Camera::aspect_of(1280, 0), 1.0);
        assert_eq!(Camera::aspect_of(1280, 640), 2.0);
    }
}
