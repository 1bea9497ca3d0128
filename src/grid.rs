//! The grid configuration provider: the seam between scene data and the
//! measurement engine. The engine only ever talks to a [Grid], so hosts
//! with their own scene model implement the trait; everyone else builds a
//! [SceneGrid] from a [GridConfig] and moves on.

use crate::{
    config::{GridConfig, GridKind},
    geom::{CubePoint, Position, SquareOffset},
    measure::rule::DiagonalRule,
};
use anyhow::Context;
use log::debug;
use validator::Validate;

/// Everything the measurement engine needs to know about a scene's grid.
///
/// The square-offset methods are meaningful on square and gridless scenes
/// (a gridless scene quantizes to virtual square cells when asked); the
/// cube methods are meaningful on hex scenes only. Calling a method on the
/// wrong kind of grid is a programming error and panics — a silently
/// made-up conversion would corrupt gameplay-visible distances.
pub trait Grid {
    fn kind(&self) -> GridKind;

    /// Size of one cell (and height of one elevation layer) in world units
    fn cell_size(&self) -> f64;

    /// Gameplay distance covered by one cell
    fn distance_per_cell(&self) -> f64;

    /// The diagonal rule measurements default to
    fn diagonal_rule(&self) -> DiagonalRule;

    /// The cell containing a world position (square/gridless)
    fn world_to_offset(&self, position: Position) -> SquareOffset;

    /// The world position of a cell's center (square/gridless)
    fn offset_to_world(&self, offset: SquareOffset) -> Position;

    /// The cell containing a world position (hex)
    fn world_to_cube(&self, position: Position) -> CubePoint;

    /// The world position of a cell's center (hex)
    fn cube_to_world(&self, cube: CubePoint) -> Position;

    /// Hex-grid distance between two cells, in hops, ignoring elevation
    fn cube_distance(&self, a: CubePoint, b: CubePoint) -> u32 {
        a.distance_to(b)
    }
}

/// The standard [Grid] implementation, built from a validated
/// [GridConfig].
///
/// Hexes are pointy-topped, with the axial-to-pixel mapping from
/// https://www.redblobgames.com/grids/hexagons/#hex-to-pixel scaled so
/// that `cell_size` is the distance between adjacent cell centers:
/// `x = size * (q + r/2)`, `y = size * r * √3/2`. Square cells put cell
/// `(0, 0)` over the world-origin quadrant with its center at
/// `(size/2, size/2)`.
#[derive(Copy, Clone, Debug)]
pub struct SceneGrid {
    config: GridConfig,
}

impl SceneGrid {
    /// Build a grid from a config. Returns an error if the config is
    /// invalid (degenerate cell sizes); an invalid config must never get
    /// as far as producing distances.
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        debug!("Constructing scene grid with config {:?}", config);
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Elevation layer containing a world-space elevation
    fn layer(&self, z: f64) -> i32 {
        (z / self.config.cell_size).round() as i32
    }

    fn assert_kind(&self, expected: GridKind, operation: &str) {
        assert!(
            self.config.kind == expected,
            "{} is a {:?}-grid operation, but this scene is {:?}",
            operation,
            expected,
            self.config.kind
        );
    }
}

impl Grid for SceneGrid {
    fn kind(&self) -> GridKind {
        self.config.kind
    }

    fn cell_size(&self) -> f64 {
        self.config.cell_size
    }

    fn distance_per_cell(&self) -> f64 {
        self.config.distance_per_cell
    }

    fn diagonal_rule(&self) -> DiagonalRule {
        self.config.diagonals
    }

    fn world_to_offset(&self, position: Position) -> SquareOffset {
        // Gridless scenes quantize to virtual square cells on request
        assert!(
            self.config.kind != GridKind::Hex,
            "world_to_offset is not a hex-grid operation"
        );
        let size = self.config.cell_size;
        SquareOffset::with_layer(
            (position.x / size).floor() as i32,
            (position.y / size).floor() as i32,
            self.layer(position.z),
        )
    }

    fn offset_to_world(&self, offset: SquareOffset) -> Position {
        assert!(
            self.config.kind != GridKind::Hex,
            "offset_to_world is not a hex-grid operation"
        );
        let size = self.config.cell_size;
        Position::with_elevation(
            (offset.i as f64 + 0.5) * size,
            (offset.j as f64 + 0.5) * size,
            offset.k as f64 * size,
        )
    }

    fn world_to_cube(&self, position: Position) -> CubePoint {
        self.assert_kind(GridKind::Hex, "world_to_cube");
        let size = self.config.cell_size;
        // Invert the axial-to-pixel mapping, then round onto the lattice
        let r = position.y / (size * 3.0_f64.sqrt() / 2.0);
        let q = position.x / size - r / 2.0;
        CubePoint::round(q, r, -q - r).at_layer(self.layer(position.z))
    }

    fn cube_to_world(&self, cube: CubePoint) -> Position {
        self.assert_kind(GridKind::Hex, "cube_to_world");
        let size = self.config.cell_size;
        let q = cube.q() as f64;
        let r = cube.r() as f64;
        Position::with_elevation(
            size * (q + r / 2.0),
            size * r * 3.0_f64.sqrt() / 2.0,
            cube.layer() as f64 * size,
        )
    }
}
