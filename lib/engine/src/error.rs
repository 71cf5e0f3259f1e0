use crate::board::{Coord, Side};
use crate::piece::Archetype;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error("no {0} king on the board")]
    MissingKing(Side),

    #[error("invalid promotion choice: {0}")]
    InvalidPromotionChoice(Archetype),

    #[error("promotion required for {from} -> {to}")]
    PromotionRequired { from: Coord, to: Coord },

    #[error("coordinate out of range: file {file}, rank {rank}")]
    OutOfRange { file: i32, rank: i32 },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
