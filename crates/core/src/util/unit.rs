use anyhow::anyhow;
use derive_more::{Display, Mul};
use serde::{Deserialize, Serialize};
use std::ops::{self, RangeInclusive};

/// A point in 2D pixel space. Used both for positions on the drawing surface
/// and for per-axis hex sizes. See the [crate::hex] module docs for how pixel
/// space relates to hex space.
#[derive(
    Copy, Clone, Debug, Default, Display, PartialEq, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance between two points
    pub fn distance_to(self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A vector in 2D space. This represents an offset between two [Point2]s,
/// e.g. from the center of a hex to one of its corners.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Mul)]
#[display(fmt = "({}, {})", x, y)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ops::Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    const COMPONENT_RANGE: RangeInclusive<f32> = 0.0..=1.0;

    /// Create a new RGB color. Return an error if any of the components are
    /// out of the range [0.0, 1.0].
    pub fn new(red: f32, green: f32, blue: f32) -> anyhow::Result<Self> {
        fn check_component(
            component_name: &str,
            value: f32,
        ) -> anyhow::Result<f32> {
            if Color3::COMPONENT_RANGE.contains(&value) {
                Ok(value)
            } else {
                Err(anyhow!(
                    "Color component {} must be in {:?}, but was {}",
                    component_name,
                    Color3::COMPONENT_RANGE,
                    value
                ))
            }
        }

        Ok(Self {
            red: check_component("red", red)?,
            green: check_component("green", green)?,
            blue: check_component("blue", blue)?,
        })
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Convert this color to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        // Round rather than truncate, so new_int -> to_ints is lossless
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_point_plus_vector() {
        let point = Point2::new(1.0, 2.0) + Vector2::new(0.5, -3.0);
        assert_eq!(point, Point2::new(1.5, -1.0));
        assert_approx_eq!(Point2::new(0.0, 0.0).distance_to(point), 1.8027756);
    }

    #[test]
    fn test_color_new() {
        assert!(Color3::new(0.0, 0.5, 1.0).is_ok());
        assert!(Color3::new(-0.1, 0.5, 1.0).is_err());
        assert!(Color3::new(0.0, 1.1, 1.0).is_err());
    }

    #[test]
    fn test_color_to_html() {
        assert_eq!(Color3::new_int(34, 139, 34).to_ints(), (34, 139, 34));
        assert_eq!(Color3::new_int(30, 144, 255).to_html(), "#1e90ff");
        assert_eq!(Color3::new_int(0, 0, 0).to_html(), "#000000");
    }
}
