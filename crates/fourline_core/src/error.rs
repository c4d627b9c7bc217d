use thiserror::Error;

/// Recoverable placement failures.
///
/// Both variants leave the board untouched; callers (typically an input
/// prompt) are expected to retry with a different coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("coordinates ({row}, {col}) are outside the board")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },
}
