//! This sub-module contains the basic value types of the cube coordinate
//! system. See the parent module documentation for more info on the
//! coordinate system.

use derive_more::{
    Add, AddAssign, Display, Mul, MulAssign, Neg, Sub, SubAssign,
};
use log::error;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// How far the components of a [FractionalHex] are allowed to stray from the
/// plane `q + r + s = 0` before the value is considered invalid. Fractional
/// values are produced by float math, so an exact check would be too strict.
pub const FRACTIONAL_TOLERANCE: f64 = 1e-4;

/// Ways in which a coordinate value can be invalid. None of these are fatal:
/// the lenient constructors log them and substitute a valid value, while the
/// strict constructors hand them back to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum HexError {
    /// Integer cube components that don't sum to zero
    #[error("invalid cube coordinates ({q}, {r}, {s}); sum must be 0")]
    InvariantViolation { q: i32, r: i32, s: i32 },

    /// Fractional cube components that don't sum to (nearly) zero
    #[error(
        "invalid fractional cube coordinates ({q}, {r}, {s}); sum must be 0"
    )]
    FractionalInvariantViolation { q: f64, r: f64, s: f64 },

    /// Direction index outside of `[0, 5]`
    #[error("invalid direction {0}; must be between 0 and 5")]
    InvalidDirection(i32),
}

/// A trait that denotes any data type that has a singular assigned position in
/// the hex grid.
pub trait HasHexPosition: Sized {
    fn position(&self) -> Hex;
}

/// A whole cell in the hex grid, addressed by cube coordinates. See the
/// module-level docs for a description of the coordinate system.
///
/// ## Implementation
///
/// Since `q + r + s = 0` for every cell, only `q` and `r` are stored and `s`
/// is derived on demand. That makes the sum-zero invariant impossible to break
/// after construction, so all the arithmetic below (add, subtract, scale,
/// negate) always produces a valid hex.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Mul,
    Neg,
    AddAssign,
    SubAssign,
    MulAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.q()", "self.r()", "self.s()")]
pub struct Hex {
    q: i32,
    r: i32,
}

impl Hex {
    pub const ORIGIN: Self = Self::new_qr(0, 0);

    /// Construct a hex from its `q` and `r` components. Since q+r+s=0 for all
    /// hexes, we can derive `s` from the other two.
    pub const fn new_qr(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Construct a hex from all three cube components, returning an error if
    /// they don't fall on the plane `q + r + s = 0`.
    pub fn try_new(q: i32, r: i32, s: i32) -> Result<Self, HexError> {
        // Widen before summing so extreme components can't overflow into a
        // false positive
        if q as i64 + r as i64 + s as i64 == 0 {
            Ok(Self::new_qr(q, r))
        } else {
            Err(HexError::InvariantViolation { q, r, s })
        }
    }

    /// Construct a hex from all three cube components. If the components are
    /// invalid, the error is logged and [Hex::ORIGIN] is returned instead, so
    /// the caller always gets a structurally valid hex. Use [Hex::try_new] if
    /// you need to detect the failure.
    pub fn new(q: i32, r: i32, s: i32) -> Self {
        Self::try_new(q, r, s).unwrap_or_else(|err| {
            error!("{}", err);
            Self::ORIGIN
        })
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Multiply each component by a constant
    pub fn scale(self, factor: i32) -> Self {
        self * factor
    }

    /// Number of steps between this hex and the origin
    pub fn length(self) -> usize {
        Self::cube_length(self.q.into(), self.r.into())
    }

    /// Calculate the path distance between two hexes, meaning the number of
    /// hops it takes to get from one to the other. 0 if the hexes are equal,
    /// 1 if they are adjacent, 2 if there is 1 hex between them, etc.
    pub fn distance_to(self, other: Hex) -> usize {
        // Subtracting as i64 so hexes near the edge of i32 can't overflow
        Self::cube_length(
            i64::from(self.q) - i64::from(other.q),
            i64::from(self.r) - i64::from(other.r),
        )
    }

    fn cube_length(q: i64, r: i64) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        // Two adjacent cells are always separated by two cube edges, hence /2
        let s = -q - r;
        ((q.abs() + r.abs() + s.abs()) / 2) as usize
    }

    /// Get the hex adjacent to this one in the given direction
    pub fn adjacent(self, direction: HexDirection) -> Self {
        self + direction.vector()
    }

    /// Get the neighbor in the direction with the given index. Out of range
    /// indexes are wrapped into `[0, 5]`; see [HexDirection::from_index].
    pub fn neighbor(self, direction: i32) -> Self {
        self.adjacent(HexDirection::from_index(direction))
    }

    /// Get an iterator of all the hexes directly adjacent to this one, in
    /// direction index order. The iterator will always contain exactly 6
    /// values.
    pub fn adjacents(self) -> impl Iterator<Item = Hex> {
        HexDirection::iter().map(move |dir| self.adjacent(dir))
    }
}

/// A point in cube space with real-valued components. This only exists as an
/// intermediate value while converting from pixel space, before it's snapped
/// to a whole [Hex] with [FractionalHex::round].
#[derive(Copy, Clone, Debug, Default, PartialEq, Display)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct FractionalHex {
    q: f64,
    r: f64,
    s: f64,
}

impl FractionalHex {
    pub const ORIGIN: Self = Self {
        q: 0.0,
        r: 0.0,
        s: 0.0,
    };

    /// Construct a fractional hex from `q` and `r`, deriving `s`. This can't
    /// violate the invariant (barring non-finite input) so it isn't checked.
    pub fn new_qr(q: f64, r: f64) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Construct a fractional hex, returning an error if the components are
    /// further than [FRACTIONAL_TOLERANCE] from the plane `q + r + s = 0`.
    /// Non-finite components are always rejected.
    pub fn try_new(q: f64, r: f64, s: f64) -> Result<Self, HexError> {
        // Written as a negated <= so that NaN fails the check
        if !((q + r + s).abs() <= FRACTIONAL_TOLERANCE) {
            Err(HexError::FractionalInvariantViolation { q, r, s })
        } else {
            Ok(Self { q, r, s })
        }
    }

    /// Construct a fractional hex. If the components are invalid, the error
    /// is logged and [FractionalHex::ORIGIN] is returned instead.
    pub fn new(q: f64, r: f64, s: f64) -> Self {
        Self::try_new(q, r, s).unwrap_or_else(|err| {
            error!("{}", err);
            Self::ORIGIN
        })
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    /// Snap to the nearest whole hex. Each component is rounded on its own,
    /// then whichever component moved the most is recalculated from the other
    /// two so the result lands back on the plane.
    ///
    /// Ties are broken in a fixed order so that points exactly on a boundary
    /// always resolve the same way: `q` is only recalculated if its error is
    /// strictly the largest, then `r` if its error beats `s`'s, otherwise `s`.
    pub fn round(self) -> Hex {
        // https://www.redblobgames.com/grids/hexagons/#rounding
        let mut q = self.q.round();
        let mut r = self.r.round();
        let mut s = self.s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - s;
        } else if r_diff > s_diff {
            r = -q - s;
        } else {
            s = -q - r;
        }

        // Float->int casts saturate, so a wildly out of range point can still
        // break the invariant here. Hex::new covers that case
        Hex::new(q as i32, r as i32, s as i32)
    }
}

impl From<Hex> for FractionalHex {
    fn from(hex: Hex) -> Self {
        Self {
            q: hex.q().into(),
            r: hex.r().into(),
            s: hex.s().into(),
        }
    }
}

/// The 6 directions in which hexes line up side-to-side. The variant order is
/// the direction index order, which starts at `(1, -1, 0)` and goes
/// counter-clockwise in a y-up frame. The compass names describe pointy-topped
/// tiles drawn with y pointing down (screen space), where that same order
/// appears clockwise.
#[derive(Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum HexDirection {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl HexDirection {
    /// All directions, in index order
    pub const ALL: [Self; 6] = [
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Position of this direction in [Self::ALL]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the unit offset that moves a hex one step in this direction
    pub fn vector(self) -> Hex {
        match self {
            Self::NorthEast => Hex::new_qr(1, -1),
            Self::East => Hex::new_qr(1, 0),
            Self::SouthEast => Hex::new_qr(0, 1),
            Self::SouthWest => Hex::new_qr(-1, 1),
            Self::West => Hex::new_qr(-1, 0),
            Self::NorthWest => Hex::new_qr(0, -1),
        }
    }

    /// Get the direction for an index. Indexes outside `[0, 5]` are logged,
    /// then wrapped around (including negatives, so -1 is 5) so there's
    /// always a defined direction. Use `TryFrom` for a strict conversion.
    pub fn from_index(index: i32) -> Self {
        if let Err(err) = Self::try_from(index) {
            error!("{}", err);
        }
        // % is remainder, not modulus, so -1 % 6 is -1. rem_euclid gets us
        // back into [0, 5] for negative inputs too
        Self::ALL[index.rem_euclid(6) as usize]
    }
}

impl TryFrom<i32> for HexDirection {
    type Error = HexError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(HexError::InvalidDirection(index))
    }
}
