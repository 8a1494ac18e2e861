use thiserror::Error;

pub type Result<T> = std::result::Result<T, MoveError>;

/// Everything that can go wrong while applying a single turn.
///
/// None of these end the game: the turn loop shows the message and asks
/// for the next command, and the state is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid card ordinal {0}, expected 0..=51")]
    InvalidCard(u8),

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Could not read a source and a destination from \"{0}\", try something like M A3 SB")]
    MalformedMoveTokens(String),

    #[error("Unknown location {0}")]
    UnknownLocation(String),

    #[error("{0}")]
    RowOutOfRange(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Stock and waste are both empty")]
    EmptyStockAndWaste,

    #[error("There is nothing to revert")]
    NothingToRevert,
}

impl MoveError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        MoveError::IllegalMove(reason.into())
    }
}
