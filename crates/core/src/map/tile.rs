use crate::{hex::Hex, util::unit::Color3, HasHexPosition};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The terrain on a tile. The ordinal of each variant is stable, since it's
/// used to index into sprite atlases (see [TileType::atlas_cell]).
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
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
#[repr(u8)]
pub enum TileType {
    #[default]
    Grass = 0,
    Water = 1,
    Rocks = 2,
    Sand = 3,
    Forest = 4,
}

impl TileType {
    /// All tile types, in ordinal order
    pub const ALL: [Self; 5] = [
        Self::Grass,
        Self::Water,
        Self::Rocks,
        Self::Sand,
        Self::Forest,
    ];

    /// Color used for any ordinal that doesn't map to a tile type
    pub const FALLBACK_COLOR: Color3 = Color3::new_int(200, 200, 200);

    /// Can units move through tiles of this type?
    pub fn is_walkable(self) -> bool {
        !matches!(self, Self::Water | Self::Rocks)
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The next type in ordinal order, wrapping around from the last to the
    /// first. Used to cycle a tile's terrain with repeated clicks.
    pub fn next(self) -> Self {
        Self::ALL[(self.ordinal() as usize + 1) % Self::ALL.len()]
    }

    /// The `(column, row)` of this type's sprite in an atlas that lays its
    /// sprites out in ordinal order, `columns` per row. A zero column count
    /// is treated as one.
    pub fn atlas_cell(self, columns: u8) -> (u8, u8) {
        let columns = columns.max(1);
        (self.ordinal() % columns, self.ordinal() / columns)
    }

    /// Display color for this terrain
    pub fn color(self) -> Color3 {
        match self {
            Self::Grass => Color3::new_int(34, 139, 34),
            Self::Water => Color3::new_int(30, 144, 255),
            Self::Rocks => Color3::new_int(128, 128, 128),
            Self::Sand => Color3::new_int(244, 164, 96),
            Self::Forest => Color3::new_int(0, 100, 0),
        }
    }

    /// Display color for a raw ordinal, e.g. one read out of external data.
    /// Unknown ordinals get [Self::FALLBACK_COLOR].
    pub fn color_for_ordinal(ordinal: u8) -> Color3 {
        Self::try_from(ordinal)
            .map(Self::color)
            .unwrap_or(Self::FALLBACK_COLOR)
    }
}

impl TryFrom<u8> for TileType {
    type Error = anyhow::Error;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("invalid tile type {}", ordinal))
    }
}

/// A single cell of a [HexMap](crate::HexMap). Tiles can only be created and
/// modified through their map, which keeps walkability in sync with the
/// terrain type and enforces that at most one tile is selected.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    // These fields are all pub(super) so the map can manage them
    /// The location of this tile in the map. Every tile in a map has a unique
    /// position.
    pub(super) position: Hex,

    /// Terrain type
    #[serde(rename = "type")]
    pub(super) tile_type: TileType,

    /// Derived from `tile_type`, but stored so consumers can read it
    /// directly
    pub(super) walkable: bool,

    pub(super) selected: bool,
}

impl Tile {
    /// A fresh, unselected tile of the default terrain
    pub(super) fn new(position: Hex) -> Self {
        let tile_type = TileType::default();
        Self {
            position,
            tile_type,
            walkable: tile_type.is_walkable(),
            selected: false,
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Change the terrain, keeping walkability in sync
    pub(super) fn set_type(&mut self, tile_type: TileType) {
        self.tile_type = tile_type;
        self.walkable = tile_type.is_walkable();
    }
}

impl HasHexPosition for Tile {
    fn position(&self) -> Hex {
        self.position
    }
}
