//! Error types for field generation and polygon authoring.
use core::fmt;

/// Precondition failures detected before a field computation touches any cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Two grids that must share a shape do not.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A backing vector does not hold `width * height` cells.
    CellCount { expected: usize, found: usize },
    /// Propagation was asked for without any goal cell.
    NoGoals,
    /// A goal index lies outside the grid.
    GoalOutOfBounds { index: usize, area: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "grid dimensions differ: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::CellCount { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            Self::NoGoals => write!(f, "at least one goal cell is required"),
            Self::GoalOutOfBounds { index, area } => {
                write!(f, "goal index {index} is outside a grid of {area} cells")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Misuse of the island authoring protocol of [Polygon](crate::mesh::Polygon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolygonError {
    /// An island was started or inserted while another one is still being written.
    IslandInProgress,
    /// A vertex was pushed, or an island finished, without a matching `start_island`.
    NoIslandStarted,
    /// A ring index past the last ring.
    PartOutOfRange { part: usize, count: usize },
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IslandInProgress => write!(f, "another island is still being written"),
            Self::NoIslandStarted => write!(f, "no island has been started"),
            Self::PartOutOfRange { part, count } => {
                write!(f, "polygon part {part} requested, polygon has {count} parts")
            }
        }
    }
}

impl std::error::Error for PolygonError {}
