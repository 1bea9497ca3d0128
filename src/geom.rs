//! Basic value types for the two coordinate worlds this crate deals with:
//! continuous scene space ([Position]) and discrete grid space
//! ([SquareOffset] and [CubePoint]).

use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A point in continuous scene space. `x` and `y` are the usual canvas
/// coordinates, `z` is elevation above the scene's reference plane. All
/// three are measured in world units (pixels, typically), **not** in grid
/// cells; a grid converts between the two via its cell size.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Construct a position on the reference plane (zero elevation)
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Construct a position at the given elevation
    pub const fn with_elevation(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line (Euclidean) distance to another position, in world
    /// units, including the elevation axis.
    pub fn distance_to(self, other: Position) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

/// A cell on a square grid. `i` and `j` are column/row indices, `k` is the
/// elevation layer (number of cell-sized steps above or below the reference
/// plane). All three are unbounded in either direction.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", i, j, k)]
pub struct SquareOffset {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl SquareOffset {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct an offset on the reference layer
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j, k: 0 }
    }

    /// Construct an offset on a specific elevation layer
    pub const fn with_layer(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// The number of grid moves between two cells when diagonal moves cost
    /// the same as straight ones (the Chebyshev metric, over all three
    /// axes).
    pub fn chebyshev_to(self, other: SquareOffset) -> u32 {
        let d = self - other;
        *[d.i.abs(), d.j.abs(), d.k.abs()].iter().max().unwrap() as u32
    }
}

/// A cell on a hexagonal grid, in cube coordinates. See this page for info
/// on how the cube coordinate system works:
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube
///
/// Every cube point satisfies `q + r + s == 0`. Rather than trusting
/// callers to uphold that, this struct only stores `q` and `r` and derives
/// `s` on demand, so an invalid point is unrepresentable. `k` is the
/// elevation layer, identical in meaning to [SquareOffset::k]; it is not
/// part of the cube constraint.
#[derive(
    Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.q()", "self.r()", "self.s()")]
pub struct CubePoint {
    q: i32,
    r: i32,
    k: i32,
}

impl CubePoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Alias for [Self::new_qr]
    pub const fn new(q: i32, r: i32) -> Self {
        Self::new_qr(q, r)
    }

    /// Construct a new cube point with the given q and r. Since q+r+s=0 for
    /// all points, we can derive s from q & r.
    pub const fn new_qr(q: i32, r: i32) -> Self {
        Self { q, r, k: 0 }
    }

    /// Construct a new cube point with the given q and s. Since q+r+s=0 for
    /// all points, we can derive r from q & s.
    pub const fn new_qs(q: i32, s: i32) -> Self {
        Self::new_qr(q, -q - s)
    }

    /// Construct a new cube point with the given r and s. Since q+r+s=0 for
    /// all points, we can derive q from r & s.
    pub const fn new_rs(r: i32, s: i32) -> Self {
        Self::new_qr(-r - s, r)
    }

    /// Construct a cube point on a specific elevation layer
    pub const fn with_layer(q: i32, r: i32, k: i32) -> Self {
        Self { q, r, k }
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        -(self.q + self.r)
    }

    pub fn layer(&self) -> i32 {
        self.k
    }

    /// Replace the elevation layer, keeping the cube position
    pub fn at_layer(self, k: i32) -> Self {
        Self { k, ..self }
    }

    /// The hex-grid distance between two cells: the number of hops it takes
    /// to get from one to the other, ignoring elevation. 0 if the points
    /// are equal, 1 if adjacent, etc.
    /// https://www.redblobgames.com/grids/hexagons/#distances
    pub fn distance_to(self, other: CubePoint) -> u32 {
        *[
            (self.q() - other.q()).abs(),
            (self.r() - other.r()).abs(),
            (self.s() - other.s()).abs(),
        ]
        .iter()
        .max()
        .unwrap() as u32
    }

    /// Round a fractional cube coordinate to the nearest whole cell. Each
    /// component is rounded independently, then the component with the
    /// largest rounding residual is thrown away and re-derived from the
    /// other two, so the result always satisfies q+r+s=0. On a residual
    /// tie, s is the one re-derived.
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(qf: f64, rf: f64, sf: f64) -> Self {
        let q = qf.round();
        let r = rf.round();
        let s = sf.round();
        let dq = (q - qf).abs();
        let dr = (r - rf).abs();
        let ds = (s - sf).abs();
        if dq > dr && dq > ds {
            // q has the most error, rebuild it from r and s
            Self::new_rs(r as i32, s as i32)
        } else if dr > ds {
            Self::new_qs(q as i32, s as i32)
        } else {
            Self::new_qr(q as i32, r as i32)
        }
    }
}
