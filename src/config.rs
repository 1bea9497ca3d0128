use crate::measure::rule::DiagonalRule;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use validator::Validate;

/// The tiling of a scene's canvas. The catalog is closed; distance math
/// dispatches exhaustively on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKind {
    /// No grid at all; distances are continuous
    Gridless,
    /// Square cells addressed by column/row offsets
    Square,
    /// Pointy-topped hexagonal cells addressed by cube coordinates
    Hex,
}

/// Configuration describing one scene's grid. Two scenes with the same
/// config measure every pair of points identically.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// What tiling the scene uses
    pub kind: GridKind,

    /// Size of one cell in world units (pixels, typically). For hex grids
    /// this is the distance between the centers of two adjacent cells; for
    /// square grids it's the side length. Elevation layers are this tall
    /// on every grid, which keeps one grid move "worth" the same amount in
    /// any direction.
    #[validate(range(min = 0.000001))]
    pub cell_size: f64,

    /// Gameplay distance covered by one cell, in whatever unit the scene's
    /// ruleset uses (feet, meters, parsecs). All distances this crate
    /// returns are multiples of... well, approximately multiples of this;
    /// see the snapping behavior on
    /// [measure_distance](crate::measure_distance).
    #[validate(range(min = 0.000001))]
    pub distance_per_cell: f64,

    /// The diagonal rule active on this scene. Individual measurements can
    /// override it.
    pub diagonals: DiagonalRule,
}

impl Default for GridConfig {
    fn default() -> Self {
        // One-unit square cells, five distance per cell: the common
        // tabletop default, and a sane baseline for tests
        Self {
            kind: GridKind::Square,
            cell_size: 1.0,
            distance_per_cell: 5.0,
            diagonals: DiagonalRule::Equidistant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_cells() {
        let config = GridConfig {
            cell_size: 0.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GridConfig {
            distance_per_cell: -5.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        // Missing fields fall back to the defaults
        let config: GridConfig =
            serde_json::from_str(r#"{"kind": "hex", "diagonals": "exact"}"#)
                .unwrap();
        assert_eq!(config.kind, GridKind::Hex);
        assert_eq!(config.diagonals, DiagonalRule::Exact);
        assert_eq!(config.cell_size, 1.0);
        assert_eq!(config.distance_per_cell, 5.0);
    }
}
