//! Conversion between hex space and pixel space. See the [crate::hex] module
//! docs for a description of both coordinate systems.

use crate::{
    hex::{FractionalHex, Hex},
    util::unit::{Point2, Vector2},
};
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum::{Display, EnumIter, EnumString};

/// `f64::consts::SQRT_3` isn't stable yet
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Which way hexes are rotated when drawn. This decides the linear transform
/// between hex space and pixel space, and where a hex's corners fall.
///
/// See [this page](https://www.redblobgames.com/grids/hexagons/#basics) for
/// pictures of both.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    /// Flat edges on top and bottom, columns of hexes stack along the x axis
    Flat,
    /// A corner on top and bottom, rows of hexes stack along the y axis
    Pointy,
}

impl Orientation {
    /// Matrix that maps `(q, r)` to a pixel offset, for a hex size of `1x1`
    pub fn forward(self) -> Matrix2<f64> {
        match self {
            Self::Flat => Matrix2::new(1.5, 0.0, SQRT_3 / 2.0, SQRT_3),
            Self::Pointy => Matrix2::new(SQRT_3, SQRT_3 / 2.0, 0.0, 1.5),
        }
    }

    /// Inverse of [Self::forward], mapping a pixel offset back to `(q, r)`
    pub fn inverse(self) -> Matrix2<f64> {
        match self {
            Self::Flat => {
                Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0)
            }
            Self::Pointy => {
                Matrix2::new(SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0)
            }
        }
    }

    /// Angle of the first corner, in multiples of 60°
    pub fn start_angle(self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Pointy => 0.5,
        }
    }
}

/// Everything needed to convert between hex and pixel space: an orientation,
/// the size of a hex along each axis, and the pixel position of the origin
/// hex. A layout is immutable once created.
///
/// The size is the distance from a hex's center to its corners. With equal
/// `x` and `y` sizes you get regular hexagons; unequal sizes squash them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    orientation: Orientation,
    size: Point2,
    origin: Point2,
}

impl Layout {
    pub fn new(orientation: Orientation, size: Point2, origin: Point2) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    /// Build a layout that fits hexes to sprites of the given pixel size. On
    /// the cross axis (x for pointy-topped, y for flat-topped) the sprite
    /// extent is exactly `√3 * size`. On the stacking axis, the sprite extent
    /// is divided by `spacing_divisor`. `1.5` is geometrically exact; larger
    /// values pull rows (or columns) closer together so sprites overlap.
    pub fn for_tileset(
        orientation: Orientation,
        tile_size: Point2,
        spacing_divisor: f64,
        origin: Point2,
    ) -> Self {
        let size = match orientation {
            Orientation::Flat => Point2::new(
                tile_size.x / spacing_divisor,
                tile_size.y / SQRT_3,
            ),
            Orientation::Pointy => Point2::new(
                tile_size.x / SQRT_3,
                tile_size.y / spacing_divisor,
            ),
        };
        Self::new(orientation, size, origin)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size(&self) -> Point2 {
        self.size
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Get the pixel position of the center of a hex
    pub fn hex_to_pixel(&self, hex: Hex) -> Point2 {
        let offset = self.orientation.forward()
            * nalgebra::Vector2::new(f64::from(hex.q()), f64::from(hex.r()));
        Point2::new(
            offset.x * self.size.x + self.origin.x,
            offset.y * self.size.y + self.origin.y,
        )
    }

    /// Convert a pixel position to hex space, without rounding to a whole
    /// hex. Most of the time you want [Self::pixel_to_hex] instead.
    pub fn pixel_to_fractional_hex(&self, point: Point2) -> FractionalHex {
        let scaled = nalgebra::Vector2::new(
            (point.x - self.origin.x) / self.size.x,
            (point.y - self.origin.y) / self.size.y,
        );
        let qr = self.orientation.inverse() * scaled;
        FractionalHex::new(qr.x, qr.y, -qr.x - qr.y)
    }

    /// Find the hex that contains a pixel position. This is the primitive
    /// behind mapping a pointer click to a tile.
    pub fn pixel_to_hex(&self, point: Point2) -> Hex {
        self.pixel_to_fractional_hex(point).round()
    }

    /// Get the offset from a hex's center to one of its six corners. Corners
    /// past 5 wrap around.
    pub fn corner_offset(&self, corner: usize) -> Vector2 {
        let angle =
            2.0 * PI * (self.orientation.start_angle() + corner as f64) / 6.0;
        Vector2::new(self.size.x * angle.cos(), self.size.y * angle.sin())
    }

    /// Get the pixel positions of all six corners of a hex, in corner order
    pub fn polygon_corners(&self, hex: Hex) -> [Point2; 6] {
        let center = self.hex_to_pixel(hex);
        let mut corners = [center; 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = center + self.corner_offset(i);
        }
        corners
    }
}
