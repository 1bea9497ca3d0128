//! Per-step movement cost over a rasterized path. Where
//! [measure_distance](crate::measure::measure_distance) answers "how far
//! apart are these points", this module answers "what does it cost to walk
//! this exact sequence of cells", one adjacent pair at a time. The two
//! disagree whenever a path wanders off the direct line.

use crate::{
    geom::{CubePoint, SquareOffset},
    measure::{
        alternating::AlternatingTracker,
        rule::{rule_distance, DiagonalRule},
    },
};

/// Classification of a single move between adjacent cells. The weight of a
/// step is fully determined by its kind (plus alternation history, for the
/// alternating rules).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// The two cells are the same; a degenerate non-move
    None,
    /// One axis changed: a cardinal move, or an elevation-only move
    Straight,
    /// Two planar axes changed (square), or cell and elevation both
    /// changed (hex)
    Diagonal,
    /// One planar axis and elevation changed together
    DiagonalElevation,
    /// Both planar axes and elevation changed together. Only reachable on
    /// square grids; a hex cell has no second planar axis to pair with.
    DoubleDiagonalElevation,
}

impl StepKind {
    /// Number of axes that moved
    fn axes(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Straight => 1,
            Self::Diagonal | Self::DiagonalElevation => 2,
            Self::DoubleDiagonalElevation => 3,
        }
    }
}

/// A stateful per-step cost function for walking a rasterized path.
///
/// Create one per walk with [OffsetCost::new] (or
/// [OffsetCost::with_prior_diagonals] to continue the diagonal parity of an
/// earlier walk), then feed it each adjacent pair of cells in order. The
/// diagonal counter is readable at any point via [OffsetCost::diagonals],
/// which is how a follow-up measurement seeds its
/// [AlternatingTracker](crate::AlternatingTracker) with the right parity.
#[derive(Clone, Debug)]
pub struct OffsetCost {
    rule: DiagonalRule,
    /// Present iff the rule is alternating
    tracker: Option<AlternatingTracker>,
    diagonals: u32,
}

impl OffsetCost {
    pub fn new(rule: DiagonalRule) -> Self {
        Self::with_prior_diagonals(rule, 0)
    }

    /// Create a cost function that continues a walk which already took
    /// `diagonals` diagonal moves.
    pub fn with_prior_diagonals(rule: DiagonalRule, diagonals: u32) -> Self {
        let tracker = rule
            .is_alternating()
            .then(|| AlternatingTracker::with_prior_diagonals(rule, diagonals));
        Self {
            rule,
            tracker,
            diagonals,
        }
    }

    /// Diagonal moves taken so far, including any seeded prior ones
    pub fn diagonals(&self) -> u32 {
        self.diagonals
    }

    /// Classify a move between two square-grid cells. Cells further than
    /// one grid move apart don't come out of the rasterizer and are
    /// rejected as a programmer error.
    pub fn classify(prev: SquareOffset, curr: SquareOffset) -> StepKind {
        let d = curr - prev;
        let (di, dj, dk) = (d.i.abs(), d.j.abs(), d.k.abs());
        assert!(
            di <= 1 && dj <= 1 && dk <= 1,
            "cells {} and {} are not adjacent",
            prev,
            curr
        );
        match (di + dj, dk) {
            (0, 0) => StepKind::None,
            (1, 0) | (0, 1) => StepKind::Straight,
            (2, 0) => StepKind::Diagonal,
            (1, 1) => StepKind::DiagonalElevation,
            (2, 1) => StepKind::DoubleDiagonalElevation,
            _ => unreachable!(),
        }
    }

    /// Classify a move between two hex-grid cells
    pub fn classify_cube(prev: CubePoint, curr: CubePoint) -> StepKind {
        let dc = prev.distance_to(curr);
        let dk = (curr.layer() - prev.layer()).abs() as u32;
        assert!(
            dc <= 1 && dk <= 1,
            "cells {} and {} are not adjacent",
            prev,
            curr
        );
        match (dc, dk) {
            (0, 0) => StepKind::None,
            (1, 0) | (0, 1) => StepKind::Straight,
            (1, 1) => StepKind::Diagonal,
            _ => unreachable!(),
        }
    }

    /// Cost of one square-grid step, in grid moves
    pub fn step(&mut self, prev: SquareOffset, curr: SquareOffset) -> f64 {
        self.step_kind(Self::classify(prev, curr))
    }

    /// Cost of one hex-grid step, in grid moves
    pub fn step_cube(&mut self, prev: CubePoint, curr: CubePoint) -> f64 {
        self.step_kind(Self::classify_cube(prev, curr))
    }

    fn step_kind(&mut self, kind: StepKind) -> f64 {
        // Sorted per-axis deltas of a single step: the kind tells us how
        // many axes moved by one cell
        let deltas = match kind.axes() {
            0 => return 0.0,
            1 => [1.0, 0.0, 0.0],
            2 => [1.0, 1.0, 0.0],
            3 => [1.0, 1.0, 1.0],
            _ => unreachable!(),
        };
        if kind.axes() >= 2 {
            self.diagonals += 1;
        }
        match &mut self.tracker {
            Some(tracker) => tracker.step(deltas[0], deltas[1], deltas[2]),
            None => rule_distance(self.rule, deltas),
        }
    }
}
