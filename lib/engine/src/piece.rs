use std::fmt;

use crate::board::{Coord, Side};
use crate::constant::{BISHOP_VALUE, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, PROMOTION_CHOICES, QUEEN_VALUE, ROOK_VALUE};
use crate::movement::Movement;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Archetype {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Archetype {
    pub fn material_value(self) -> i32 {
        match self {
            Archetype::Pawn => PAWN_VALUE,
            Archetype::Knight => KNIGHT_VALUE,
            Archetype::Bishop => BISHOP_VALUE,
            Archetype::Rook => ROOK_VALUE,
            Archetype::Queen => QUEEN_VALUE,
            Archetype::King => KING_VALUE,
        }
    }

    /// Geometric capability families this archetype moves and attacks with.
    pub fn capabilities(self) -> &'static [Movement] {
        match self {
            Archetype::Pawn => &[Movement::PawnSpecial],
            Archetype::Knight => &[Movement::Leaping],
            Archetype::Bishop => &[Movement::Diagonal],
            Archetype::Rook => &[Movement::Orthogonal],
            Archetype::Queen => &[Movement::Orthogonal, Movement::Diagonal],
            Archetype::King => &[Movement::SingleStep],
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        PROMOTION_CHOICES.contains(&self)
    }

    pub fn symbol(self) -> char {
        match self {
            Archetype::Pawn => 'p',
            Archetype::Knight => 'n',
            Archetype::Bishop => 'b',
            Archetype::Rook => 'r',
            Archetype::Queen => 'q',
            Archetype::King => 'k',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Archetype> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(Archetype::Pawn),
            'n' => Some(Archetype::Knight),
            'b' => Some(Archetype::Bishop),
            'r' => Some(Archetype::Rook),
            'q' => Some(Archetype::Queen),
            'k' => Some(Archetype::King),
            _ => None,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Archetype::Pawn => "pawn",
            Archetype::Knight => "knight",
            Archetype::Bishop => "bishop",
            Archetype::Rook => "rook",
            Archetype::Queen => "queen",
            Archetype::King => "king",
        };
        f.write_str(name)
    }
}

/// A piece as owned by `Position`. Its coordinate mirrors the square it is stored
/// under and is only synchronized by the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    side: Side,
    archetype: Archetype,
    coord: Coord,
    has_moved: bool,
    en_passant_vulnerable: bool,
}

impl Piece {
    pub fn new(side: Side, archetype: Archetype, coord: Coord) -> Self {
        Piece {
            side,
            archetype,
            coord,
            has_moved: false,
            en_passant_vulnerable: false,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn en_passant_vulnerable(&self) -> bool {
        self.en_passant_vulnerable
    }

    pub fn capabilities(&self) -> &'static [Movement] {
        self.archetype.capabilities()
    }

    /// Uppercase for Light, lowercase for Dark.
    pub fn symbol(&self) -> char {
        match self.side {
            Side::Light => self.archetype.symbol().to_ascii_uppercase(),
            Side::Dark => self.archetype.symbol(),
        }
    }

    // Committed move bookkeeping. Only pawns ever open an en passant window.
    pub(crate) fn move_to(&mut self, to: Coord) {
        let from = self.coord;
        self.coord = to;
        self.has_moved = true;
        if self.archetype == Archetype::Pawn {
            self.en_passant_vulnerable = (to.rank() - from.rank()).abs() == 2;
        }
    }

    pub(crate) fn place(&mut self, coord: Coord) {
        self.coord = coord;
    }

    pub(crate) fn close_en_passant_window(&mut self) {
        self.en_passant_vulnerable = false;
    }

    pub(crate) fn promoted(&self, archetype: Archetype) -> Piece {
        Piece {
            archetype,
            has_moved: true,
            en_passant_vulnerable: false,
            ..*self
        }
    }
}
