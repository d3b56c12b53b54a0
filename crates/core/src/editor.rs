use crate::{
    hex::Hex,
    layout::Layout,
    map::{HexMap, Tile, TileType},
    util::unit::Point2,
    HasHexPosition, MapConfig,
};
use anyhow::{ensure, Context};
use log::{debug, info};
use validator::Validate;

/// How far (in pixels) a config's layout may stray from a loaded map's
/// center and hex size
const LAYOUT_TOLERANCE: f64 = 1e-6;

/// All the state of an interactive map session: the config it came from, the
/// layout that maps pointer positions onto hexes, and the map itself. Input
/// handlers and the draw pass both work through a reference to this.
#[derive(Clone, Debug)]
pub struct MapEditor {
    config: MapConfig,
    layout: Layout,
    map: HexMap,
}

impl MapEditor {
    /// Build a fresh map from config. Returns an error if the config is
    /// invalid.
    pub fn new(config: MapConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        let layout = config.layout.build();
        let map = HexMap::new(layout.origin(), layout.size(), config.radius);
        Ok(Self {
            config,
            layout,
            map,
        })
    }

    /// Edit an existing map, e.g. one loaded from a file. The map must be
    /// consistent, and the config must describe the map: same radius, and a
    /// layout with the origin and hex size the map was built with. See
    /// [MapConfig::for_map] to recover a config from the map itself.
    pub fn from_map(config: MapConfig, map: HexMap) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        map.validate().context("invalid map")?;
        ensure!(
            map.radius() == config.radius,
            "map has radius {}, but config has radius {}",
            map.radius(),
            config.radius
        );

        let layout = config.layout.build();
        ensure!(
            layout.origin().distance_to(map.center()) <= LAYOUT_TOLERANCE,
            "map is centered at {}, but config puts the origin at {}",
            map.center(),
            layout.origin()
        );
        ensure!(
            layout.size().distance_to(map.hex_size()) <= LAYOUT_TOLERANCE,
            "map has hex size {}, but config has hex size {}",
            map.hex_size(),
            layout.size()
        );

        info!("Editing existing map of {} tiles", map.len());
        Ok(Self {
            config,
            layout,
            map,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn map(&self) -> &HexMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut HexMap {
        &mut self.map
    }

    pub fn into_map(self) -> HexMap {
        self.map
    }

    /// Get the tile under a point on the canvas, if there is one
    pub fn tile_at_pixel(&self, point: Point2) -> Option<&Tile> {
        self.map.tile(self.layout.pixel_to_hex(point))
    }

    /// Select the tile under a point on the canvas. Clicking off the map
    /// clears the selection. Returns the newly selected position, if any.
    pub fn select_at(&mut self, point: Point2) -> Option<Hex> {
        let position = self.layout.pixel_to_hex(point);
        if self.map.set_tile_selected(position, true) {
            debug!("Selected {} at {}", position, point);
            Some(position)
        } else {
            None
        }
    }

    /// Cycle the terrain of the tile under a point on the canvas. Returns the
    /// tile's new type, or `None` if the point isn't on the map.
    pub fn cycle_terrain_at(&mut self, point: Point2) -> Option<TileType> {
        let position = self.layout.pixel_to_hex(point);
        let tile_type = self.map.cycle_tile_type(position)?;
        debug!("Changed {} to {}", position, tile_type);
        Some(tile_type)
    }

    /// Every tile alongside the canvas positions of its six corners, in map
    /// order. This is everything the per-frame draw pass needs.
    pub fn tile_outlines(
        &self,
    ) -> impl Iterator<Item = (&Tile, [Point2; 6])> + '_ {
        self.map
            .tiles()
            .map(move |tile| (tile, self.layout.polygon_corners(tile.position())))
    }
}
