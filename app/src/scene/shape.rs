use std::{fmt, str::FromStr};

use crate::settings::SettingsError;

/// Primitive drawn by the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Triangle,
    Quad,
    /// The imported model
    Model,
}

impl Shape {
    pub const ALL: [Self; 3] = [Self::Triangle, Self::Quad, Self::Model];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Triangle => "Triangle",
            Self::Quad => "Quad",
            Self::Model => "Model",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SettingsError::Shape(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("triangle".parse::<Shape>(), Ok(Shape::Triangle));
        assert_eq!(" QUAD ".parse::<Shape>(), Ok(Shape::Quad));
        assert_eq!("Model".parse::<Shape>(), Ok(Shape::Model));
    }

    #[test]
    fn display_round_trips() {
        for shape in Shape::ALL {
            assert_eq!(shape.to_string().parse::<Shape>(), Ok(shape));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "hexagon".parse::<Shape>(),
            Err(SettingsError::Shape("hexagon".into()))
        );
    }
}
