use crate::piece::Archetype;

pub const BOARD_SIZE: i8 = 8;

pub const MATE: i32 = 100_000;
pub const MIN: i32 = -MATE - 1;
pub const MAX: i32 = MATE + 1;
pub const DEFAULT_DEPTH: u32 = 3;
pub const MAX_DEPTH: u32 = 6;

// Pawn=1, Knight=3, Bishop=3, Rook=5, Queen=9. Both kings are always on the
// board during play so the king term cancels out of every evaluation.
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 1000;

/// Back rank from file 0 to file 7, identical for both sides.
pub const BACK_RANK: [Archetype; 8] = [
    Archetype::Rook,
    Archetype::Knight,
    Archetype::Bishop,
    Archetype::Queen,
    Archetype::King,
    Archetype::Bishop,
    Archetype::Knight,
    Archetype::Rook,
];

pub const PROMOTION_CHOICES: [Archetype; 4] = [
    Archetype::Queen,
    Archetype::Rook,
    Archetype::Knight,
    Archetype::Bishop,
];

pub const KING_HOME_FILE: i8 = 4;
