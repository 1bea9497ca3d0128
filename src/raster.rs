//! Rasterization of straight lines onto integer lattices: the classic
//! digital-line (Bresenham) family, generalized over axis count, plus the
//! two grid-aware variants the measurement engine actually walks — square
//! cells with a coupled elevation axis, and hex cells in cube coordinates.

use crate::{
    config::GridKind,
    geom::{CubePoint, Position, SquareOffset},
    grid::Grid,
};
use serde::{Deserialize, Serialize};

/// An ordered sequence of cells from a start cell to an end cell,
/// inclusive on both ends, with no duplicated consecutive entries. Which
/// variant you get depends on the grid that produced it. Gridless scenes
/// have no lattice, so a direct path there is just its two endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticePath {
    Square(Vec<SquareOffset>),
    Hex(Vec<CubePoint>),
    Points(Vec<Position>),
}

impl LatticePath {
    /// Number of waypoints in the path (at least 1 for any valid path)
    pub fn len(&self) -> usize {
        match self {
            Self::Square(cells) => cells.len(),
            Self::Hex(cells) => cells.len(),
            Self::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rasterize a straight line between two lattice points into every integer
/// point along it, for any axis count (2D, 3D, 4D grids all go through
/// here). The axis with the largest absolute delta drives: it steps on
/// every iteration, while each other axis accumulates error independently
/// and steps when its error crosses half the driving delta.
///
/// Tie-breaks are deliberately fixed rather than incidental: when several
/// axes share the largest delta, the lowest axis index drives, and a
/// secondary axis sitting exactly at half-error steps early.
///
/// Coincident endpoints yield a single-point path.
pub fn lattice_line<const N: usize>(
    start: [i32; N],
    end: [i32; N],
) -> Vec<[i32; N]> {
    let mut delta = [0_i64; N];
    let mut sign = [0_i32; N];
    for axis in 0..N {
        delta[axis] = (end[axis] as i64 - start[axis] as i64).abs();
        sign[axis] = (end[axis] - start[axis]).signum();
    }

    // Lowest index wins ties, making x-before-y-before-z the documented
    // behavior instead of whatever the comparison order happens to be
    let drive = (0..N)
        .max_by_key(|&axis| (delta[axis], -(axis as i64)))
        .unwrap();
    let n = delta[drive];

    let mut points = Vec::with_capacity(n as usize + 1);
    let mut pos = start;
    let mut err = [0_i64; N];
    points.push(pos);
    for _ in 0..n {
        pos[drive] += sign[drive];
        for axis in 0..N {
            if axis == drive {
                continue;
            }
            err[axis] += delta[axis];
            if 2 * err[axis] >= n {
                pos[axis] += sign[axis];
                err[axis] -= n;
            }
        }
        points.push(pos);
    }
    points
}

/// Walk a pre-rasterized planar path and an elevation delta in lockstep.
/// Whichever changes more drives; the other follows on a single error
/// accumulator. Treating the planar path as one coupled axis (rather than
/// giving elevation its own independent accumulator per planar axis) is
/// what makes "diagonal + climb" come out as one combined step instead of
/// a diagonal followed by a climb.
///
/// On an exact tie the planar path drives; elevation only takes over when
/// it strictly dominates.
fn couple_elevation<C: Copy, T>(
    cells: &[C],
    k_start: i32,
    k_end: i32,
    make: impl Fn(C, i32) -> T,
) -> Vec<T> {
    let planar = cells.len() as i64 - 1;
    let vertical = (k_end as i64 - k_start as i64).abs();
    let k_sign = (k_end - k_start).signum();

    let mut points = Vec::with_capacity(planar.max(vertical) as usize + 1);
    points.push(make(cells[0], k_start));
    let mut k = k_start;
    let mut err = 0_i64;
    if vertical > planar {
        // Elevation drives; the planar path advances on accumulated error
        let mut index = 0;
        for _ in 0..vertical {
            k += k_sign;
            err += planar;
            if 2 * err >= vertical {
                index += 1;
                err -= vertical;
            }
            points.push(make(cells[index], k));
        }
    } else {
        // The planar path drives; elevation follows
        for cell in &cells[1..] {
            err += vertical;
            if 2 * err >= planar {
                k += k_sign;
                err -= planar;
            }
            points.push(make(*cell, k));
        }
    }
    points
}

/// Rasterize a straight line between two square-grid cells, including the
/// elevation axis. Unlike `lattice_line::<3>`, the planar pair and the
/// elevation axis are coupled (see [couple_elevation]), so a move that
/// changes a planar axis and elevation at once is emitted as one step.
pub fn square_line(start: SquareOffset, end: SquareOffset) -> Vec<SquareOffset> {
    let planar = lattice_line([start.i, start.j], [end.i, end.j]);
    couple_elevation(&planar, start.k, end.k, |[i, j], k| {
        SquareOffset::with_layer(i, j, k)
    })
}

/// Rasterize a straight line between two hex cells in cube coordinates,
/// including the elevation axis.
///
/// The cube portion is sampled by linear interpolation in fractional
/// (q, r, s) space and rounded back to a cell at every step via
/// [CubePoint::round], which re-derives the worst-rounded component from
/// the other two. The q+r+s=0 invariant therefore holds for every emitted
/// point, not just the endpoints. Elevation is coupled exactly as on
/// square grids.
pub fn cube_line(start: CubePoint, end: CubePoint) -> Vec<CubePoint> {
    let n = start.distance_to(end);
    let cells: Vec<CubePoint> = if n == 0 {
        vec![start]
    } else {
        let (q0, r0, s0) =
            (start.q() as f64, start.r() as f64, start.s() as f64);
        let (dq, dr, ds) = (
            end.q() as f64 - q0,
            end.r() as f64 - r0,
            end.s() as f64 - s0,
        );
        (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                CubePoint::round(q0 + dq * t, r0 + dr * t, s0 + ds * t)
            })
            .collect()
    };
    couple_elevation(&cells, start.layer(), end.layer(), |cell, k| {
        cell.at_layer(k)
    })
}

/// Rasterize the straight line between two world positions into the cells
/// of the given grid. On a gridless scene there is nothing to rasterize,
/// so the result is the two endpoints themselves (one, if they coincide).
pub fn rasterize_direct_path(
    grid: &impl Grid,
    start: Position,
    end: Position,
) -> LatticePath {
    match grid.kind() {
        GridKind::Gridless => LatticePath::Points(if start == end {
            vec![start]
        } else {
            vec![start, end]
        }),
        GridKind::Square => LatticePath::Square(square_line(
            grid.world_to_offset(start),
            grid.world_to_offset(end),
        )),
        GridKind::Hex => LatticePath::Hex(cube_line(
            grid.world_to_cube(start),
            grid.world_to_cube(end),
        )),
    }
}
