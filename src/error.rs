//! Error types for puzzle input parsing

use thiserror::Error;

/// Lab grid parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    /// No rows at all
    #[error("Lab map is empty")]
    Empty,

    /// A row whose width differs from the first row
    #[error("Row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },

    /// A character outside `.#^>v<`
    #[error("Unexpected cell {ch:?} at row {row}, column {col}")]
    BadCell { ch: char, row: usize, col: usize },

    /// No guard glyph anywhere in the grid
    #[error("Guard not found on the map")]
    NoGuard,

    /// More than one guard glyph
    #[error("Second guard at row {row}, column {col}")]
    ExtraGuard { row: usize, col: usize },
}

/// Disk map parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiskError {
    /// Nothing left after trimming whitespace
    #[error("Disk map is empty")]
    Empty,

    /// A non-digit character
    #[error("Unexpected character {ch:?} at offset {offset}")]
    BadDigit { ch: char, offset: usize },
}
