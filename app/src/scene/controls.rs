use glam::{EulerRot, Quat};

use crate::{
    mesh::MeshPart,
    settings::Settings,
    types::{Color, Degrees, F32x3, Matrix4},
};

use super::shape::Shape;

/// State the overlay edits and the scene reads every frame
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    pub shape: Shape,
    /// Fill color of built-in shapes, and of model parts when
    /// `use_part_colors` is off
    pub color: Color,
    /// Draw model parts with their material colors
    pub use_part_colors: bool,
    pub scale: f32,
    /// Euler angles (XYZ) in degrees
    pub rotation: F32x3,
    pub auto_rotate: bool,
    /// Auto-rotation speed around Y, degrees per second
    pub spin_speed: Degrees,
    pub background: Color,
    /// Text of the model path field
    pub model_path: String,
}

impl Controls {
    pub const DEFAULT_COLOR: Color = [1.0, 0.5, 0.2, 1.0];
    pub const DEFAULT_BACKGROUND: Color = [0.1, 0.1, 0.12, 1.0];
    pub const DEFAULT_SPIN_SPEED: Degrees = 45.0;
    pub const SCALE_RANGE: (f32, f32) = (0.1, 3.0);

    pub fn new(settings: &Settings) -> Self {
        Self {
            shape: settings.shape,
            model_path: settings.model_path.display().to_string(),
            ..Default::default()
        }
    }

    /// Scale first, then rotate
    pub fn model_mat(&self) -> Matrix4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );

        Matrix4::from_scale_rotation_translation(F32x3::splat(self.scale), rotation, F32x3::ZERO)
    }

    /// Advance auto-rotation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate {
            self.rotation.y = (self.rotation.y + self.spin_speed * dt).rem_euclid(360.0);
        }
    }

    /// Color `part` is drawn with
    pub fn part_color(&self, part: &MeshPart) -> Color {
        if self.use_part_colors && self.shape == Shape::Model {
            part.color
        } else {
            self.color
        }
    }

    pub fn reset_transform(&mut self) {
        let defaults = Self::default();
        self.scale = defaults.scale;
        self.rotation = defaults.rotation;
        self.auto_rotate = defaults.auto_rotate;
        self.spin_speed = defaults.spin_speed;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            color: Self::DEFAULT_COLOR,
            use_part_colors: true,
            scale: 1.0,
            rotation: F32x3::ZERO,
            auto_rotate: false,
            spin_speed: Self::DEFAULT_SPIN_SPEED,
            background: Self::DEFAULT_BACKGROUND,
            model_path: String::new(),
        }
    }
}
