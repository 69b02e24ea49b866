use thiserror::Error;

use crate::cards::Rank;

/// Every way the engine can refuse an action.
///
/// All variants are recoverable: when an operation returns one of these the
/// session is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty: {0} (expected 1, 2 or 4 suits)")]
    InvalidDifficulty(String),
    #[error("Column {index} does not exist")]
    ColumnOutOfRange { index: usize },
    #[error("Source and target are the same column ({column})")]
    SameColumn { column: usize },
    #[error("Column {column} is empty")]
    EmptySource { column: usize },
    #[error("Card index {start} is past the end of column {column} (length {len})")]
    StartOutOfRange {
        column: usize,
        start: usize,
        len: usize,
    },
    #[error("Card {start} in column {column} is face down")]
    FaceDownCard { column: usize, start: usize },
    #[error("Cards from index {start} in column {column} do not form a movable run")]
    NotMovable { column: usize, start: usize },
    #[error("Cannot place {moving} on {target}")]
    IllegalPlacement { moving: Rank, target: Rank },
    #[error("Every column needs at least one card before dealing (column {column} is empty)")]
    EmptyColumnBlocksDeal { column: usize },
    #[error("Stock is empty")]
    StockEmpty,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Another action is still in progress")]
    Busy,
    #[error("Session lock poisoned")]
    SessionPoisoned,
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

impl GameError {
    /// Rejections of a move request, as opposed to deal or undo refusals.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::ColumnOutOfRange { .. }
                | GameError::SameColumn { .. }
                | GameError::EmptySource { .. }
                | GameError::StartOutOfRange { .. }
                | GameError::FaceDownCard { .. }
                | GameError::NotMovable { .. }
                | GameError::IllegalPlacement { .. }
        )
    }
}
