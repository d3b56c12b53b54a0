//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! There are two coordinate systems in play:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates address cells of the grid. We use the [cube coordinate
//! system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//!
//! Each coordinate has three components (`q`, `r`, and `s`). **For any cell,
//! all three components are integers and `q + r + s = 0`.** Even though the
//! grid is two-dimensional, the third component makes the math for neighbors,
//! distances and rounding much simpler, because each of the six neighbors is
//! one step along one axis and one step back along another.
//!
//! [Hex] is a whole cell. [FractionalHex] is the same coordinate with real
//! components, which only shows up while converting a pixel position back into
//! a cell (see [FractionalHex::round]).
//!
//! ### Pixel Coordinates
//!
//! Pixel coordinates are plain 2D points ([Point2](crate::Point2)) on whatever
//! surface the grid is drawn onto. Y grows downward, like most screen APIs. The
//! mapping between the two systems is defined by a
//! [Layout](crate::Layout), which combines an orientation (flat-topped or
//! pointy-topped), a per-axis hex size, and the pixel position of the origin
//! hex `(0, 0, 0)`.

mod unit;

pub use self::unit::*;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::cmp;

/// An ORDERED map of hexes to some `T`. Lookups are hashed, and iteration
/// follows insertion order.
pub type HexIndexMap<T> = IndexMap<Hex, T, FnvBuildHasher>;

/// Get every hex within `radius` steps of the origin (a "hex disk"), ordered
/// by increasing `q`, then increasing `r`. Radius 0 yields just the origin, 1
/// yields 7 hexes, 2 yields 19, etc.
pub fn disk(radius: u16) -> impl Iterator<Item = Hex> {
    let r = radius as i32;
    (-r..=r).flat_map(move |q| {
        // If we just do [-r,r] for r as well, then we end up with a diamond
        // pattern instead of a hexagon. Clamp so that |s| <= radius too
        // https://www.redblobgames.com/grids/hexagons/#range
        let r_min = cmp::max(-r, -q - r);
        let r_max = cmp::min(r, -q + r);
        (r_min..=r_max).map(move |r| Hex::new_qr(q, r))
    })
}
