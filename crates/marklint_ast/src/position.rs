//! Point and position types for source locations.
//!
//! These follow the unist conventions: lines and columns are 1-indexed,
//! offsets are 0-indexed byte offsets into the source text.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single place in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
    /// Byte offset (0-indexed).
    pub offset: u32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset
            .cmp(&other.offset)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
    }
}

/// The range of source text a node was parsed from.
///
/// Positions are totally ordered by `(start.offset, end.offset)`. Line and
/// column only break ties between positions that share both offsets, which
/// never happens for positions produced from the same source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Start point (inclusive).
    pub start: Point,
    /// End point (exclusive).
    pub end: Point,
}

impl Position {
    /// Creates a new position.
    ///
    /// `start` must not come after `end`.
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        debug_assert!(start.offset <= end.offset);
        Self { start, end }
    }

    /// Returns the length of the position in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.offset - self.start.offset
    }

    /// Returns true if the position covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Returns true if this position contains the given byte offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start.offset <= offset && offset < self.end.offset
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .offset
            .cmp(&other.start.offset)
            .then(self.end.offset.cmp(&other.end.offset))
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}
