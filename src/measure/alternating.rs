//! Stateful distance bookkeeping for the alternating diagonal rules.
//!
//! Under [DiagonalRule::Alternating1](crate::DiagonalRule::Alternating1)
//! and [Alternating2](crate::DiagonalRule::Alternating2), diagonal moves
//! cost 1 and 2 straights in alternation *across the entire path*, so the
//! cost of a segment depends on how much diagonal movement came before it.
//! The tracker holds that history: create one at the start of a
//! multi-segment walk, feed it every segment in order, and discard it when
//! the walk ends. Reusing a tracker across unrelated paths corrupts the
//! alternation parity, which is why this is an explicit owned value rather
//! than anything shared.

use crate::measure::rule::{approx_distance, DiagonalRule};
use derive_more::Display;

/// Running state for alternating-rule distance over one path.
///
/// The implementation keeps cumulative per-axis totals (sorted per
/// segment: largest, middle, smallest) and derives the cumulative cost
/// from scratch on every step; the per-segment cost is the difference
/// between consecutive cumulative values. That construction makes the
/// conservation property structural: summing the step outputs over any
/// segmentation of a path telescopes to the one-shot cumulative cost.
#[derive(Clone, Debug, Display, PartialEq)]
#[display(
    fmt = "[{} + {} + {} => {}]",
    prev_max,
    prev_mid,
    prev_min,
    l_prev
)]
pub struct AlternatingTracker {
    rule: DiagonalRule,
    /// Cumulative largest-axis movement, in cells
    prev_max: f64,
    /// Cumulative middle-axis movement, in cells
    prev_mid: f64,
    /// Cumulative smallest-axis movement, in cells
    prev_min: f64,
    /// Cumulative cost at the end of the previous segment. Always equals
    /// `cumulative()` of the stored totals.
    l_prev: f64,
}

impl AlternatingTracker {
    /// Create a tracker with no path history. `Alternating2` starts with
    /// one phantom diagonal already banked (`prev_max = prev_mid = 1`,
    /// cost 1): the next real diagonal then lands on the expensive side of
    /// the alternation, which is exactly what "starts expensive" means.
    ///
    /// Panics if the rule is not an alternating one; any other rule here
    /// is a programming error.
    pub fn new(rule: DiagonalRule) -> Self {
        assert!(
            rule.is_alternating(),
            "AlternatingTracker requires an alternating rule, got {:?}",
            rule
        );
        let mut tracker = Self {
            rule,
            prev_max: 0.0,
            prev_mid: 0.0,
            prev_min: 0.0,
            l_prev: 0.0,
        };
        if rule == DiagonalRule::Alternating2 {
            tracker.prev_max = 1.0;
            tracker.prev_mid = 1.0;
            tracker.l_prev = tracker.cumulative();
        }
        tracker
    }

    /// Create a tracker whose parity continues from a previous walk that
    /// already took `diagonals` diagonal moves. Each prior diagonal is
    /// banked as one cell of max- and mid-axis movement, which is how the
    /// offset-cost walk counts them.
    pub fn with_prior_diagonals(rule: DiagonalRule, diagonals: u32) -> Self {
        let mut tracker = Self::new(rule);
        tracker.prev_max += diagonals as f64;
        tracker.prev_mid += diagonals as f64;
        tracker.l_prev = tracker.cumulative();
        tracker
    }

    /// Forget all path history, as if freshly constructed. Useful for tests
    /// that replay the same tracker over several scenarios.
    pub fn reset(&mut self) {
        *self = Self::new(self.rule);
    }

    /// Measure the next segment of the path. The inputs are the segment's
    /// per-axis deltas in cells, sorted from largest to smallest (hex
    /// callers pass `(max, min, 0.0)`). Returns the cost of this segment
    /// alone, in cells; the alternation with everything fed in previously
    /// is already accounted for.
    pub fn step(&mut self, max: f64, mid: f64, min: f64) -> f64 {
        debug_assert!(
            max >= mid && mid >= min && min >= 0.0,
            "axis deltas must be sorted descending and non-negative: ({}, {}, {})",
            max,
            mid,
            min
        );
        self.prev_max += max;
        self.prev_mid += mid;
        self.prev_min += min;
        let l_curr = self.cumulative();
        let cost = l_curr - self.l_prev;
        self.l_prev = l_curr;
        cost
    }

    /// Cumulative cost of all movement fed in so far, in cells.
    ///
    /// For whole-cell totals this is `floor(max + mid/2 + min/4)`, which
    /// makes consecutive diagonals cost 1, 2, 1, 2, ... and consecutive
    /// triple diagonals 1, 2, 2, 2, ... The fractional parts of the totals
    /// are blended in linearly, each billed at the marginal rate of the
    /// move it is partway through: the breakpoints below are the cumulative
    /// costs after finishing the next straight (`b`), upgrading it to a
    /// diagonal (`c`), and to a triple diagonal (`d`).
    fn cumulative(&self) -> f64 {
        let whole_max = self.prev_max.floor();
        let whole_mid = self.prev_mid.floor();
        let whole_min = self.prev_min.floor();
        let frac_max = self.prev_max - whole_max;
        let frac_mid = self.prev_mid - whole_mid;
        let frac_min = self.prev_min - whole_min;

        let approx = approx_distance(whole_max, whole_mid, whole_min);
        let a = approx.floor();
        let b = (approx + 1.0).floor();
        let c = (approx + 1.5).floor();
        let d = (approx + 1.75).floor();
        a + (b - a) * frac_max + (c - b) * frac_mid + (d - c) * frac_min
    }
}
