//! Ordered consumption of grid positions
//!
//! Positions are handed out strictly in grid order and never reused. The
//! queue keeps the generated sequence immutable and only advances a cursor.

use super::grid::GridPosition;

/// Gap rule applied between passes so that the next pass starts on a
/// perforation boundary of the label stock.
///
/// After a pass, positions are discarded one by one while the remaining
/// count is neither a multiple of `block` nor has a remainder of at least
/// `threshold` modulo `block`; then while it is not a multiple of
/// `sub_block`. The remaining count only ever goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentRule {
    pub block: usize,
    pub threshold: usize,
    pub sub_block: usize,
}

impl Default for AlignmentRule {
    fn default() -> Self {
        Self {
            block: 15,
            threshold: 9,
            sub_block: 5,
        }
    }
}

impl AlignmentRule {
    pub fn new(block: usize, threshold: usize, sub_block: usize) -> Self {
        Self {
            block,
            threshold,
            sub_block,
        }
    }

    /// A rule that never discards anything
    pub fn none() -> Self {
        Self::new(1, 0, 1)
    }

    /// Number of positions to discard when `remaining` are left
    pub fn discard_count(&self, remaining: usize) -> usize {
        let mut left = remaining;
        if self.block > 0 {
            while left % self.block != 0 && left % self.block < self.threshold {
                left -= 1;
            }
        }
        if self.sub_block > 0 {
            while left % self.sub_block > 0 {
                left -= 1;
            }
        }
        remaining - left
    }
}

/// Cursor over an immutable sequence of grid positions
#[derive(Debug, Clone)]
pub struct PositionQueue {
    positions: Vec<GridPosition>,
    cursor: usize,
}

impl PositionQueue {
    pub fn new(positions: Vec<GridPosition>) -> Self {
        Self {
            positions,
            cursor: 0,
        }
    }

    /// Take the next position, if any is left
    pub fn pop(&mut self) -> Option<GridPosition> {
        let position = self.positions.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(position)
    }

    /// Discard the next `count` positions. Returns `false`, without
    /// discarding anything, when fewer than `count` are left.
    pub fn skip(&mut self, count: usize) -> bool {
        if count > self.remaining() {
            return false;
        }
        self.cursor += count;
        true
    }

    /// Discard positions according to `rule`, returning how many were dropped
    pub fn align(&mut self, rule: &AlignmentRule) -> usize {
        let count = rule.discard_count(self.remaining());
        self.cursor += count;
        count
    }

    /// Positions not yet handed out or discarded
    pub fn remaining(&self) -> usize {
        self.positions.len() - self.cursor
    }

    /// Positions handed out or discarded so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The positions not yet consumed, in order
    pub fn upcoming(&self) -> &[GridPosition] {
        &self.positions[self.cursor..]
    }
}
