//! The catalog of diagonal movement rules. A rule is a named convention
//! for how much a non-axis-aligned grid move costs, relative to a straight
//! one. The catalog is closed: every rule a scene can be configured with is
//! listed here, and an alternating rule showing up where stateless math is
//! expected is a bug, not an input error.

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use strum::EnumIter;

/// A convention for weighting diagonal movement on a grid. The non-moving
/// parts of the rules differ only in how they combine the per-axis deltas
/// of a move; see [rule_distance] for the formulas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalRule {
    /// Diagonals cost the same as straight moves (Chebyshev distance)
    Equidistant,
    /// Diagonals cost their true geometric length, per move (√2, √3)
    Exact,
    /// Straight-line distance of the whole segment, not per move
    Euclidean,
    /// Diagonals cost 1.5 straights, triple-diagonals 1.75 (the stateless
    /// average of the alternating rules)
    Approximate,
    /// Diagonals cost as much as taking the two straight moves separately
    /// (Manhattan distance)
    Rectilinear,
    /// Measures like [Self::Rectilinear]. Scenes use this to declare that
    /// diagonal movement is forbidden; enforcing that is movement policy,
    /// not distance math, so it lives outside this crate.
    Illegal,
    /// Diagonals alternate 1, 2, 1, 2, ... across the whole path, starting
    /// cheap
    #[serde(rename = "alternating_1")]
    Alternating1,
    /// Diagonals alternate 2, 1, 2, 1, ... across the whole path, starting
    /// expensive
    #[serde(rename = "alternating_2")]
    Alternating2,
}

impl DiagonalRule {
    /// Does this rule assign path-history-dependent costs? If so, distance
    /// must be computed through an [AlternatingTracker](crate::AlternatingTracker) rather than
    /// [rule_distance].
    pub fn is_alternating(self) -> bool {
        matches!(self, Self::Alternating1 | Self::Alternating2)
    }
}

/// The stateless weighting shared by [DiagonalRule::Approximate] and the
/// alternating tracker: a diagonal averages 1.5 straight moves, a triple
/// diagonal 1.75.
pub(crate) fn approx_distance(max: f64, mid: f64, min: f64) -> f64 {
    max + 0.5 * mid + 0.25 * min
}

/// Measure a single segment under the given rule. The input is the
/// segment's per-axis deltas in cells, sorted from largest to smallest.
/// Hex grids only have two meaningful axes (cube distance and elevation),
/// so they pass `[max, min, 0.0]` and the three-axis formulas degrade
/// correctly.
///
/// Alternating rules cannot be measured without path history; routing one
/// here is a programmer error and panics. Use an [AlternatingTracker](crate::AlternatingTracker)
/// (a fresh tracker stepped once gives the "no history" answer).
pub fn rule_distance(rule: DiagonalRule, [max, mid, min]: [f64; 3]) -> f64 {
    debug_assert!(
        max >= mid && mid >= min && min >= 0.0,
        "axis deltas must be sorted descending and non-negative: [{}, {}, {}]",
        max,
        mid,
        min
    );
    match rule {
        DiagonalRule::Equidistant => max,
        DiagonalRule::Exact => {
            max + (SQRT_2 - 1.0) * mid + (3.0_f64.sqrt() - SQRT_2) * min
        }
        DiagonalRule::Euclidean => {
            (max * max + mid * mid + min * min).sqrt()
        }
        DiagonalRule::Approximate => approx_distance(max, mid, min),
        DiagonalRule::Rectilinear | DiagonalRule::Illegal => max + mid + min,
        DiagonalRule::Alternating1 | DiagonalRule::Alternating2 => panic!(
            "alternating rules carry path state; \
             measure through an AlternatingTracker instead"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_rule_formulas() {
        let deltas = [4.0, 3.0, 1.0];
        assert_approx_eq!(rule_distance(DiagonalRule::Equidistant, deltas), 4.0);
        assert_approx_eq!(
            rule_distance(DiagonalRule::Exact, deltas),
            4.0 + (SQRT_2 - 1.0) * 3.0 + (3.0_f64.sqrt() - SQRT_2)
        );
        assert_approx_eq!(
            rule_distance(DiagonalRule::Euclidean, deltas),
            26.0_f64.sqrt()
        );
        assert_approx_eq!(rule_distance(DiagonalRule::Approximate, deltas), 5.75);
        assert_approx_eq!(rule_distance(DiagonalRule::Rectilinear, deltas), 8.0);
        assert_approx_eq!(rule_distance(DiagonalRule::Illegal, deltas), 8.0);
    }

    #[test]
    fn test_two_axis_degradation() {
        // Hex passes [max, min, 0] and must get the two-axis formulas
        assert_approx_eq!(
            rule_distance(DiagonalRule::Exact, [4.0, 3.0, 0.0]),
            4.0 + (SQRT_2 - 1.0) * 3.0
        );
        assert_approx_eq!(
            rule_distance(DiagonalRule::Euclidean, [4.0, 3.0, 0.0]),
            5.0
        );
    }

    #[test]
    fn test_degenerate_segment() {
        for rule in [
            DiagonalRule::Equidistant,
            DiagonalRule::Exact,
            DiagonalRule::Euclidean,
            DiagonalRule::Approximate,
            DiagonalRule::Rectilinear,
        ] {
            assert_approx_eq!(rule_distance(rule, [0.0, 0.0, 0.0]), 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "alternating rules carry path state")]
    fn test_alternating_rejected() {
        rule_distance(DiagonalRule::Alternating1, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &DiagonalRule::Alternating1,
            &[Token::UnitVariant {
                name: "DiagonalRule",
                variant: "alternating_1",
            }],
        );
        assert_tokens(
            &DiagonalRule::Equidistant,
            &[Token::UnitVariant {
                name: "DiagonalRule",
                variant: "equidistant",
            }],
        );
    }
}
