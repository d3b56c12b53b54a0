//! Hexmap is the core of a hex tile map editor. It provides cube-coordinate
//! hex arithmetic, projection between hex space and pixel space, and a store
//! of terrain tiles covering a hexagonal region. Presentation (windows,
//! sprites, input polling) is left to the caller.
//!
//! ```
//! use hexmap::{MapConfig, MapEditor, TileType};
//!
//! let mut editor = MapEditor::new(MapConfig::default()).unwrap();
//! // The origin hex sits in the middle of the canvas
//! let center = editor.layout().origin();
//! editor.select_at(center);
//! assert_eq!(editor.cycle_terrain_at(center), Some(TileType::Water));
//! for (_tile, _corners) in editor.tile_outlines() {
//!     // Draw each tile however you like
//! }
//! ```
//!
//! See [MapConfig] for details on how the map and its layout can be
//! customized.

mod config;
mod editor;
pub mod hex;
mod layout;
mod map;
mod util;

pub use crate::{
    config::{LayoutConfig, MapConfig},
    editor::MapEditor,
    hex::{FractionalHex, HasHexPosition, Hex, HexDirection, HexError},
    layout::{Layout, Orientation},
    map::{HexMap, Tile, TileType},
    util::{
        map_len,
        unit::{Color3, Point2, Vector2},
    },
};
