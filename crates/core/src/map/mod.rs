mod tile;

pub use self::tile::{Tile, TileType};

use crate::{
    hex::{self, Hex, HexIndexMap},
    timed,
    util::{map_len, unit::Point2},
    HasHexPosition,
};
use anyhow::ensure;
#[cfg(feature = "json")]
use anyhow::Context;
use fnv::FnvBuildHasher;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A hexagon of tiles, centered on the origin hex `(0, 0, 0)`. For a map of
/// radius `r`, every hex at most `r` steps from the origin has exactly one
/// tile, and no other hex does. The set of tiles is fixed at creation; tiles
/// can be modified in place but never added or removed.
///
/// Tiles are stored in creation order (increasing `q`, then increasing `r`)
/// and keyed by position, so lookups are constant time and iteration order is
/// stable.
///
/// ## Serialization
/// Maps serialize with their tiles as a list rather than a keyed object,
/// since hexes can't be used as keys in most formats. Each tile has its
/// `position`, `type` (snake case), `walkable` and `selected` fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexMap {
    /// Pixel position of the origin hex at the time the map was created
    center: Point2,
    /// Per-axis size of each hex, in pixels
    hex_size: Point2,
    /// Distance from the origin to the edge. 0 means the map is exactly 1
    /// tile, 1 means 7 tiles, and so on.
    radius: u16,
    #[serde(with = "crate::util::serde_hex_map_to_vec")]
    tiles: HexIndexMap<Tile>,
}

impl HexMap {
    /// Create a new map of the given radius. Every tile starts as walkable,
    /// unselected grass.
    pub fn new(center: Point2, hex_size: Point2, radius: u16) -> Self {
        info!("Creating map with radius {}", radius);
        let tiles = timed!("Map creation", {
            let capacity = map_len(radius);
            let mut tiles = HexIndexMap::with_capacity_and_hasher(
                capacity,
                FnvBuildHasher::default(),
            );
            for position in hex::disk(radius) {
                tiles.insert(position, Tile::new(position));
            }
            debug_assert_eq!(tiles.len(), capacity, "expected 3r²+3r+1 tiles");
            tiles
        });

        Self {
            center,
            hex_size,
            radius,
            tiles,
        }
    }

    /// Release this map's tile storage, returning how many tiles were
    /// released. Since this consumes the map, it can only happen once.
    pub fn destroy(self) -> usize {
        let released = self.tiles.len();
        debug!("Destroying map of {} tiles", released);
        drop(self);
        released
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn hex_size(&self) -> Point2 {
        self.hex_size
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// Number of tiles in the map. Always `3r²+3r+1` for radius `r`.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false, since every map has at least the origin tile. Here for
    /// completeness alongside [Self::len].
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over every tile, in creation order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Get the tile at the given position. `None` if the position is outside
    /// the map.
    pub fn tile(&self, position: Hex) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn contains(&self, position: Hex) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Change the terrain of the tile at the given position. Walkability is
    /// updated to match. Returns `false`, and changes nothing, if there is no
    /// tile at the position.
    pub fn set_tile_type(&mut self, position: Hex, tile_type: TileType) -> bool {
        match self.tiles.get_mut(&position) {
            Some(tile) => {
                tile.set_type(tile_type);
                true
            }
            None => {
                debug!("No tile at {} to set type on", position);
                false
            }
        }
    }

    /// Advance the terrain of the tile at the given position to the next type
    /// (see [TileType::next]). Returns the new type, or `None` if there is no
    /// tile at the position.
    pub fn cycle_tile_type(&mut self, position: Hex) -> Option<TileType> {
        let tile = self.tiles.get_mut(&position)?;
        let tile_type = tile.tile_type().next();
        tile.set_type(tile_type);
        Some(tile_type)
    }

    /// Select or deselect the tile at the given position. At most one tile is
    /// selected at a time, so selecting clears every other tile first, even
    /// when the position is outside the map. Deselecting only touches the
    /// target tile. Returns whether a tile exists at the position.
    pub fn set_tile_selected(&mut self, position: Hex, selected: bool) -> bool {
        if selected {
            for tile in self.tiles.values_mut() {
                tile.selected = false;
            }
        }

        match self.tiles.get_mut(&position) {
            Some(tile) => {
                tile.selected = selected;
                true
            }
            None => {
                debug!("No tile at {} to select", position);
                false
            }
        }
    }

    /// Get the selected tile, if any
    pub fn selected(&self) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.is_selected())
    }

    /// Check that the map is internally consistent. A map built with
    /// [Self::new] and mutated through its methods always is, but a
    /// deserialized one might not be.
    pub fn validate(&self) -> anyhow::Result<()> {
        let expected_len = map_len(self.radius);
        ensure!(
            self.tiles.len() == expected_len,
            "expected {} tiles for radius {}, but found {}",
            expected_len,
            self.radius,
            self.tiles.len()
        );

        let mut selected_count = 0;
        for (key, tile) in &self.tiles {
            let position = tile.position();
            ensure!(*key == position, "tile {} stored under {}", position, key);
            ensure!(
                position.length() <= self.radius as usize,
                "tile {} is outside radius {}",
                position,
                self.radius
            );
            ensure!(
                tile.is_walkable() == tile.tile_type().is_walkable(),
                "tile {} has walkable={} but type {}",
                position,
                tile.is_walkable(),
                tile.tile_type()
            );
            if tile.is_selected() {
                selected_count += 1;
            }
        }
        ensure!(
            selected_count <= 1,
            "expected at most one selected tile, but found {}",
            selected_count
        );

        Ok(())
    }

    /// Serialize this map into JSON. It can be loaded back with
    /// [Self::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing map")
    }

    /// Deserialize a map from JSON, as written by [Self::to_json]. Fails if
    /// the input is malformed or describes an inconsistent map.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let map: Self =
            serde_json::from_str(json).context("error deserializing map")?;
        map.validate().context("invalid map")?;
        Ok(map)
    }
}
