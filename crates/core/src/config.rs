use crate::{
    layout::{Layout, Orientation},
    map::HexMap,
    util::unit::Point2,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a map and how it's laid out in pixel space. Any
/// field missing from a serialized config takes its default value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// Distance from the center of the map to the edge (in tiles). 0 means
    /// a single tile.
    #[validate(range(min = 0, max = 1000))]
    pub radius: u16,

    /// Config for the mapping between hex space and pixel space
    #[validate]
    pub layout: LayoutConfig,
}

/// Configuration for a [Layout]. The origin hex is always placed at the
/// center of the virtual canvas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    /// Flat-topped or pointy-topped hexes
    pub orientation: Orientation,

    /// Distance from the center of a hex to its corners, along the x axis
    #[validate(range(min = 0.001))]
    pub hex_width: f64,

    /// Distance from the center of a hex to its corners, along the y axis
    #[validate(range(min = 0.001))]
    pub hex_height: f64,

    /// Width of the virtual canvas, in pixels. All drawing happens on this
    /// canvas, which is then letterboxed into the actual window.
    #[validate(range(min = 1))]
    pub canvas_width: u32,

    /// Height of the virtual canvas, in pixels
    #[validate(range(min = 1))]
    pub canvas_height: u32,

    /// Only used when fitting hexes to a tileset (see
    /// [Self::build_for_tileset]). The sprite extent along the stacking axis
    /// is divided by this to get the hex size on that axis. `1.5` makes
    /// sprites tile exactly, while larger values such as `2.0` pack them
    /// tighter so they overlap.
    #[validate(range(min = 0.1))]
    pub spacing_divisor: f64,
}

impl MapConfig {
    /// Recover the config a map was built from, as far as the map records
    /// it. The radius, hex size and canvas (twice the map's center) come from
    /// the map. Maps don't record their orientation, so that's passed in, and
    /// the spacing divisor gets its default.
    pub fn for_map(map: &HexMap, orientation: Orientation) -> Self {
        let center = map.center();
        let hex_size = map.hex_size();
        Self {
            radius: map.radius(),
            layout: LayoutConfig {
                orientation,
                hex_width: hex_size.x,
                hex_height: hex_size.y,
                canvas_width: (center.x * 2.0).round().max(0.0) as u32,
                canvas_height: (center.y * 2.0).round().max(0.0) as u32,
                ..Default::default()
            },
        }
    }
}

impl LayoutConfig {
    /// Pixel position of the canvas center
    pub fn canvas_center(&self) -> Point2 {
        Point2::new(
            self.canvas_width as f64 / 2.0,
            self.canvas_height as f64 / 2.0,
        )
    }

    /// Build a layout from the configured hex size
    pub fn build(&self) -> Layout {
        Layout::new(
            self.orientation,
            Point2::new(self.hex_width, self.hex_height),
            self.canvas_center(),
        )
    }

    /// Build a layout whose hex size is derived from the pixel size of each
    /// sprite in a tileset. The configured hex size is ignored.
    pub fn build_for_tileset(&self, tile_size: Point2) -> Layout {
        Layout::for_tileset(
            self.orientation,
            tile_size,
            self.spacing_divisor,
            self.canvas_center(),
        )
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Pointy,
            hex_width: 24.0,
            hex_height: 24.0,
            canvas_width: 640,
            canvas_height: 480,
            spacing_divisor: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_default_is_valid() {
        MapConfig::default().validate().unwrap();
    }

    #[test]
    fn test_build() {
        let config = LayoutConfig {
            orientation: Orientation::Flat,
            hex_width: 10.0,
            hex_height: 12.0,
            canvas_width: 800,
            canvas_height: 600,
            ..Default::default()
        };
        let layout = config.build();
        assert_eq!(layout.orientation(), Orientation::Flat);
        assert_eq!(layout.size(), Point2::new(10.0, 12.0));
        assert_eq!(layout.origin(), Point2::new(400.0, 300.0));
    }

    #[test]
    fn test_build_for_tileset() {
        let config = LayoutConfig {
            spacing_divisor: 2.0,
            ..Default::default()
        };
        let layout = config.build_for_tileset(Point2::new(32.0, 48.0));
        assert_approx_eq!(layout.size().x, 32.0 / 3.0f64.sqrt());
        assert_approx_eq!(layout.size().y, 24.0);
        assert_eq!(layout.origin(), Point2::new(320.0, 240.0));
    }

    #[test]
    fn test_for_map() {
        let map =
            HexMap::new(Point2::new(400.0, 300.0), Point2::new(10.0, 12.5), 4);
        let config = MapConfig::for_map(&map, Orientation::Flat);
        assert_eq!(config.radius, 4);
        assert_eq!(config.layout.orientation, Orientation::Flat);
        assert_eq!(config.layout.hex_width, 10.0);
        assert_eq!(config.layout.hex_height, 12.5);
        assert_eq!(config.layout.canvas_width, 800);
        assert_eq!(config.layout.canvas_height, 600);
        assert_eq!(config.layout.build().origin(), map.center());
        assert_eq!(config.layout.build().size(), map.hex_size());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: MapConfig = serde_json::from_str(
            r#"{"radius": 3, "layout": {"orientation": "flat"}}"#,
        )
        .unwrap();
        assert_eq!(config.radius, 3);
        assert_eq!(config.layout.orientation, Orientation::Flat);
        assert_eq!(config.layout.hex_width, 24.0);
        assert_eq!(config.layout.spacing_divisor, 1.5);
    }
}
