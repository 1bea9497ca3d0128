//! Rangefinder is the measurement core for a tabletop-simulation canvas:
//! gameplay distance between points on square, hexagonal, or gridless
//! scenes under the full set of diagonal movement rules, and rasterization
//! of straight lines into ordered sequences of grid cells.
//!
//! ```
//! use rangefinder::{measure_distance, GridConfig, Position, SceneGrid};
//!
//! let grid = SceneGrid::new(GridConfig::default()).unwrap();
//! let feet = measure_distance(
//!     &grid,
//!     Position::new(0.5, 0.5),
//!     Position::new(3.5, 4.5),
//!     None,
//! );
//! assert_eq!(feet, 20.0);
//! ```
//!
//! The crate is a pure computational library: no I/O, no global state.
//! Scenes with their own data model implement the [Grid] trait; everyone
//! else configures a [SceneGrid]. See [GridConfig] for the knobs.

mod config;
mod geom;
mod grid;
mod measure;
mod raster;

pub use crate::{
    config::{GridConfig, GridKind},
    geom::{CubePoint, Position, SquareOffset},
    grid::{Grid, SceneGrid},
    measure::{
        alternating::AlternatingTracker,
        cost::{OffsetCost, StepKind},
        measure_distance, measure_path,
        rule::{rule_distance, DiagonalRule},
        PathMeasurement,
    },
    raster::{
        cube_line, lattice_line, rasterize_direct_path, square_line,
        LatticePath,
    },
};
