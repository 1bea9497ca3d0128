//! The measurement engine: point-to-point gameplay distance and
//! multi-waypoint path measurement under every diagonal rule.

pub mod alternating;
pub mod cost;
pub mod rule;

use crate::{
    config::GridKind,
    geom::Position,
    grid::Grid,
    measure::{
        alternating::AlternatingTracker,
        cost::OffsetCost,
        rule::{rule_distance, DiagonalRule},
    },
    raster::{rasterize_direct_path, LatticePath},
};
use log::debug;

/// Relative tolerance for treating a distance as an exact multiple of the
/// grid's per-cell distance. The axis-delta math introduces noise on the
/// order of a few ulps; anything inside this band is noise, not signal.
const SNAP_TOLERANCE: f64 = 1e-9;

/// The result of measuring a multi-waypoint path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PathMeasurement {
    /// Total gameplay distance along the waypoints, under the active rule
    pub distance: f64,
    /// Total cost of walking the rasterized cells of the path, in gameplay
    /// distance units. Diverges from `distance` when the lattice can't
    /// follow the straight line exactly.
    pub offset_cost: f64,
    /// Diagonal moves taken along the rasterized path. Feed this to
    /// [AlternatingTracker::with_prior_diagonals] to continue measuring
    /// where this path left off.
    pub diagonals: u32,
}

/// Measure the gameplay distance between two positions on the given grid,
/// in the grid's distance units (so a square grid at 5 ft/cell returns
/// feet). `rule` overrides the grid's configured diagonal rule; alternating
/// rules are measured as a path of one segment.
///
/// Results within a tiny tolerance of a whole number of cells snap to it
/// exactly, so callers comparing against range brackets ("within 30 ft")
/// never lose to floating-point noise.
pub fn measure_distance(
    grid: &impl Grid,
    a: Position,
    b: Position,
    rule: Option<DiagonalRule>,
) -> f64 {
    let rule = rule.unwrap_or_else(|| grid.diagonal_rule());
    let mut tracker = rule
        .is_alternating()
        .then(|| AlternatingTracker::new(rule));
    segment_distance(grid, a, b, rule, tracker.as_mut())
}

/// Measure one segment, threading the alternating tracker (if any) so that
/// consecutive segments of one path alternate correctly across waypoints.
fn segment_distance(
    grid: &impl Grid,
    a: Position,
    b: Position,
    rule: DiagonalRule,
    tracker: Option<&mut AlternatingTracker>,
) -> f64 {
    let cell_size = grid.cell_size();
    let dpc = grid.distance_per_cell();
    let cells = match grid.kind() {
        // No lattice: true Euclidean distance, rescaled to cells
        GridKind::Gridless => a.distance_to(b) / cell_size,
        GridKind::Square => {
            let d = a - b;
            let mut deltas = [
                d.x.abs() / cell_size,
                d.y.abs() / cell_size,
                d.z.abs() / cell_size,
            ];
            deltas.sort_by(|x, y| y.partial_cmp(x).unwrap());
            match tracker {
                Some(tracker) => tracker.step(deltas[0], deltas[1], deltas[2]),
                None => rule_distance(rule, deltas),
            }
        }
        GridKind::Hex => {
            let cube_a = grid.world_to_cube(a);
            let cube_b = grid.world_to_cube(b);
            let hops = grid.cube_distance(cube_a, cube_b) as f64;
            let climb = (a.z - b.z).abs() / cell_size;
            // Only two axes here; the third formula slot stays empty
            let (max, min) = if hops >= climb {
                (hops, climb)
            } else {
                (climb, hops)
            };
            match tracker {
                Some(tracker) => tracker.step(max, min, 0.0),
                None => rule_distance(rule, [max, min, 0.0]),
            }
        }
    };
    snap_to_cell_multiple(cells * dpc, dpc)
}

/// Measure a path through the given waypoints: total gameplay distance,
/// total offset (grid-move) cost over the rasterized cells, and the
/// diagonal count. Fewer than two waypoints measure as zero.
///
/// One alternating tracker and one diagonal counter span the whole walk,
/// so alternation parity carries across waypoints — a diagonal before a
/// waypoint makes the diagonal after it expensive, exactly as if the path
/// had no waypoint there.
pub fn measure_path(
    grid: &impl Grid,
    points: &[Position],
    rule: Option<DiagonalRule>,
) -> PathMeasurement {
    let rule = rule.unwrap_or_else(|| grid.diagonal_rule());
    if points.len() < 2 {
        return PathMeasurement::default();
    }
    debug!(
        "Measuring path of {} waypoints under {:?}",
        points.len(),
        rule
    );

    let dpc = grid.distance_per_cell();
    let mut tracker = rule
        .is_alternating()
        .then(|| AlternatingTracker::new(rule));
    let mut cost = OffsetCost::new(rule);
    let mut distance = 0.0;
    let mut moves = 0.0;

    for pair in points.windows(2) {
        distance +=
            segment_distance(grid, pair[0], pair[1], rule, tracker.as_mut());
        match rasterize_direct_path(grid, pair[0], pair[1]) {
            LatticePath::Square(cells) => {
                for w in cells.windows(2) {
                    moves += cost.step(w[0], w[1]);
                }
            }
            LatticePath::Hex(cells) => {
                for w in cells.windows(2) {
                    moves += cost.step_cube(w[0], w[1]);
                }
            }
            // No cells to walk; the move cost of free movement is its
            // distance
            LatticePath::Points(_) => {
                moves += pair[0].distance_to(pair[1]) / grid.cell_size();
            }
        }
    }

    PathMeasurement {
        distance: snap_to_cell_multiple(distance, dpc),
        offset_cost: snap_to_cell_multiple(moves * dpc, dpc),
        diagonals: cost.diagonals(),
    }
}

/// Snap a distance to the nearest multiple of the per-cell distance if
/// it's within tolerance, treating numeric noise as exact.
fn snap_to_cell_multiple(distance: f64, distance_per_cell: f64) -> f64 {
    let cells = distance / distance_per_cell;
    let rounded = cells.round();
    // Relative to the magnitude, so long paths snap as readily as short
    if (cells - rounded).abs() <= SNAP_TOLERANCE * cells.abs().max(1.0) {
        rounded * distance_per_cell
    } else {
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GridConfig, GridKind},
        grid::SceneGrid,
    };
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::SQRT_2;
    use strum::IntoEnumIterator;

    fn grid(kind: GridKind, rule: DiagonalRule) -> SceneGrid {
        SceneGrid::new(GridConfig {
            kind,
            cell_size: 100.0,
            distance_per_cell: 5.0,
            diagonals: rule,
        })
        .unwrap()
    }

    /// Center of a square cell, for building unambiguous measurements
    fn cell(i: i32, j: i32) -> Position {
        Position::new((i as f64 + 0.5) * 100.0, (j as f64 + 0.5) * 100.0)
    }

    #[test]
    fn test_square_equidistant() {
        // 3 cells east, 4 north, at 5 per cell: max(3, 4) * 5
        let grid = grid(GridKind::Square, DiagonalRule::Equidistant);
        let d = measure_distance(&grid, cell(0, 0), cell(3, 4), None);
        assert_approx_eq!(d, 20.0);
    }

    #[test]
    fn test_square_exact() {
        let grid = grid(GridKind::Square, DiagonalRule::Exact);
        let d = measure_distance(&grid, cell(0, 0), cell(3, 4), None);
        assert_approx_eq!(d, (4.0 + (SQRT_2 - 1.0) * 3.0) * 5.0);
    }

    #[test]
    fn test_hex_equidistant() {
        let grid = grid(GridKind::Hex, DiagonalRule::Equidistant);
        let a = grid.cube_to_world(crate::geom::CubePoint::ORIGIN);
        let b = grid.cube_to_world(crate::geom::CubePoint::new(2, 0));
        assert_approx_eq!(measure_distance(&grid, a, b, None), 10.0);
    }

    #[test]
    fn test_gridless_euclidean() {
        let grid = grid(GridKind::Gridless, DiagonalRule::Equidistant);
        let a = Position::ORIGIN;
        let b = Position::new(300.0, 400.0);
        // 500 world units = 5 cells = 25 distance
        assert_approx_eq!(measure_distance(&grid, a, b, None), 25.0);
    }

    #[test]
    fn test_elevation_counts_as_axis() {
        let grid = grid(GridKind::Square, DiagonalRule::Equidistant);
        let a = cell(0, 0);
        let b = Position::with_elevation(cell(2, 0).x, cell(2, 0).y, 700.0);
        // 2 cells over, 7 layers up: Chebyshev says 7 cells
        assert_approx_eq!(measure_distance(&grid, a, b, None), 35.0);
    }

    #[test]
    fn test_symmetry_all_rules_and_grids() {
        for kind in GridKind::iter() {
            for rule in DiagonalRule::iter() {
                let grid = grid(kind, rule);
                let a = Position::with_elevation(120.0, -340.0, 100.0);
                let b = Position::with_elevation(-410.0, 220.0, 0.0);
                assert_approx_eq!(
                    measure_distance(&grid, a, b, None),
                    measure_distance(&grid, b, a, None)
                );
            }
        }
    }

    #[test]
    fn test_coincident_points() {
        for kind in GridKind::iter() {
            let grid = grid(kind, DiagonalRule::Exact);
            let p = Position::new(123.0, 456.0);
            assert_approx_eq!(measure_distance(&grid, p, p, None), 0.0);
        }
    }

    #[test]
    fn test_snapping_idempotence() {
        // Chains of cell-exact moves must produce a whole number of cells,
        // no matter how the intermediate float math wobbles
        let grid = grid(GridKind::Square, DiagonalRule::Rectilinear);
        let d = measure_distance(&grid, cell(0, 0), cell(7, 3), None);
        let cells = d / grid.distance_per_cell();
        assert_approx_eq!(cells, cells.round(), 1e-12);
    }

    #[test]
    fn test_rule_override() {
        let grid = grid(GridKind::Square, DiagonalRule::Equidistant);
        let d = measure_distance(
            &grid,
            cell(0, 0),
            cell(3, 3),
            Some(DiagonalRule::Rectilinear),
        );
        assert_approx_eq!(d, 30.0);
    }

    #[test]
    fn test_alternating_across_waypoints() {
        // Two consecutive single-diagonal segments: 1 cell then 2 cells
        // (or 2 then 1 for the other variant), never equal
        let grid1 = grid(GridKind::Square, DiagonalRule::Alternating1);
        let first =
            measure_distance(&grid1, cell(0, 0), cell(1, 1), None);
        let path = measure_path(
            &grid1,
            &[cell(0, 0), cell(1, 1), cell(2, 2)],
            None,
        );
        assert_approx_eq!(first, 5.0);
        assert_approx_eq!(path.distance, 15.0);

        let grid2 = grid(GridKind::Square, DiagonalRule::Alternating2);
        let path = measure_path(
            &grid2,
            &[cell(0, 0), cell(1, 1), cell(2, 2)],
            None,
        );
        assert_approx_eq!(path.distance, 15.0);
        let first = measure_distance(&grid2, cell(0, 0), cell(1, 1), None);
        assert_approx_eq!(first, 10.0);
    }

    #[test]
    fn test_alternation_conservation() {
        // Summing per-segment alternating costs over a path must equal the
        // one-shot measurement of the cumulative deltas
        for rule in [DiagonalRule::Alternating1, DiagonalRule::Alternating2] {
            let grid = grid(GridKind::Square, rule);
            let waypoints =
                [cell(0, 0), cell(2, 1), cell(3, 3), cell(5, 4), cell(5, 8)];

            let path = measure_path(&grid, &waypoints, None);

            let mut tracker = AlternatingTracker::new(rule);
            let mut cumulative = [0.0_f64; 3];
            for pair in waypoints.windows(2) {
                let d = pair[0] - pair[1];
                let mut deltas =
                    [d.x.abs() / 100.0, d.y.abs() / 100.0, d.z.abs() / 100.0];
                deltas.sort_by(|x, y| y.partial_cmp(x).unwrap());
                for (total, delta) in cumulative.iter_mut().zip(deltas) {
                    *total += delta;
                }
            }
            let one_shot = tracker.step(
                cumulative[0],
                cumulative[1],
                cumulative[2],
            ) * 5.0;
            assert_approx_eq!(path.distance, one_shot);
        }
    }

    #[test]
    fn test_measure_path_offset_cost() {
        let grid = grid(GridKind::Square, DiagonalRule::Approximate);
        // One straight and one diagonal move: 1 + 1.5 cells
        let path =
            measure_path(&grid, &[cell(0, 0), cell(1, 0), cell(2, 1)], None);
        assert_approx_eq!(path.offset_cost, 12.5);
        assert_eq!(path.diagonals, 1);
    }

    #[test]
    fn test_measure_path_degenerate() {
        let grid = grid(GridKind::Square, DiagonalRule::Equidistant);
        assert_eq!(measure_path(&grid, &[], None), PathMeasurement::default());
        assert_eq!(
            measure_path(&grid, &[cell(1, 1)], None),
            PathMeasurement::default()
        );
        let path = measure_path(&grid, &[cell(1, 1), cell(1, 1)], None);
        assert_approx_eq!(path.distance, 0.0);
        assert_approx_eq!(path.offset_cost, 0.0);
        assert_eq!(path.diagonals, 0);
    }

    #[test]
    fn test_hex_climb_is_diagonal() {
        // Moving 2 hexes while climbing 1 layer: the climb hides inside
        // the planar movement under Equidistant
        let grid = grid(GridKind::Hex, DiagonalRule::Equidistant);
        let a = grid.cube_to_world(crate::geom::CubePoint::ORIGIN);
        let b_flat = grid.cube_to_world(crate::geom::CubePoint::new(2, 0));
        let b = Position::with_elevation(b_flat.x, b_flat.y, 100.0);
        assert_approx_eq!(measure_distance(&grid, a, b, None), 10.0);

        // Under Rectilinear the climb is paid separately
        assert_approx_eq!(
            measure_distance(&grid, a, b, Some(DiagonalRule::Rectilinear)),
            15.0
        );
    }
}
