/*
 * Board module: coordinates, sides and the occupancy map.
 *
 * - Coord is an immutable (file, rank) pair, both in 0..8. Light's back rank is rank 0.
 * - Position is indexed [rank][file] and is the only source of truth for where a piece
 *   stands. A piece's cached coordinate is written here and nowhere else.
 * - Scratch is the single speculative-mutation primitive. Legality filtering and the
 *   search both displace pieces through it; dropping the guard restores the board
 *   exactly, and hasMoved / enPassantVulnerable are never touched on the way.
 */

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::constant::{BACK_RANK, BOARD_SIZE};
use crate::error::{ChessError, Result};
use crate::piece::{Archetype, Piece};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Coord {
    file: i8,
    rank: i8,
}

impl Coord {
    /// Validating constructor for coordinates coming from outside the engine.
    pub fn new(file: i32, rank: i32) -> Result<Self> {
        if in_board(file, rank) {
            Ok(Coord {
                file: file as i8,
                rank: rank as i8,
            })
        } else {
            Err(ChessError::OutOfRange { file, rank })
        }
    }

    // Callers guarantee both values are already in range.
    pub(crate) const fn at(file: i8, rank: i8) -> Self {
        Coord { file, rank }
    }

    pub fn file(self) -> i8 {
        self.file
    }

    pub fn rank(self) -> i8 {
        self.rank
    }

    /// The coordinate `(df, dr)` away, or `None` once that leaves the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Coord> {
        let file = self.file as i32 + df as i32;
        let rank = self.rank as i32 + dr as i32;
        if in_board(file, rank) {
            Some(Coord::at(file as i8, rank as i8))
        } else {
            None
        }
    }

    /// Every square in canonical order: ascending file, then ascending rank.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|file| (0..BOARD_SIZE).map(move |rank| Coord::at(file, rank)))
    }
}

fn in_board(file: i32, rank: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&file) && (0..BOARD_SIZE as i32).contains(&rank)
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
    }
}

impl FromStr for Coord {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_owned()));
        }
        let file = bytes[0] as i32 - b'a' as i32;
        let rank = bytes[1] as i32 - b'1' as i32;
        Coord::new(file, rank).map_err(|_| ChessError::InvalidSquare(s.to_owned()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Rank delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Side::Light => 1,
            Side::Dark => -1,
        }
    }

    pub fn back_rank(self) -> i8 {
        match self {
            Side::Light => 0,
            Side::Dark => BOARD_SIZE - 1,
        }
    }

    pub fn pawn_rank(self) -> i8 {
        self.back_rank() + self.forward()
    }

    pub fn promotion_rank(self) -> i8 {
        self.opponent().back_rank()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Light => write!(f, "light"),
            Side::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Side {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" | "white" | "w" => Ok(Side::Light),
            "dark" | "black" | "b" => Ok(Side::Dark),
            _ => Err(ChessError::InvalidCommand(format!("unknown side {s}"))),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Occupancy side effects of moving `from -> to`, beyond the mover itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct MoveEffects {
    pub castle_rook: Option<(Coord, Coord)>,
    pub en_passant_victim: Option<Coord>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for Position {
    fn default() -> Self {
        Position::init()
    }
}

impl Position {
    // Standard opening arrangement: mirrored back ranks and full pawn ranks.
    pub fn init() -> Self {
        let mut position = Position::empty();
        for side in [Side::Light, Side::Dark] {
            for (file, archetype) in BACK_RANK.iter().enumerate() {
                position.put(side, *archetype, Coord::at(file as i8, side.back_rank()));
                position.put(side, Archetype::Pawn, Coord::at(file as i8, side.pawn_rank()));
            }
        }
        position
    }

    pub fn empty() -> Self {
        Position {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Puts an unmoved piece on `coord`, replacing whatever stood there.
    /// Meant for composing puzzle and test positions; real play goes through
    /// `apply_move`.
    pub fn put(&mut self, side: Side, archetype: Archetype, coord: Coord) -> &mut Self {
        self.set(coord, Some(Piece::new(side, archetype, coord)));
        self
    }

    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.squares[coord.rank as usize][coord.file as usize].as_ref()
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.piece_at(coord).is_none()
    }

    /// The side's pieces in canonical order (ascending file, then rank).
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        Coord::all()
            .filter_map(move |coord| self.piece_at(coord))
            .filter(move |piece| piece.side() == side)
    }

    pub fn king_coord(&self, side: Side) -> Result<Coord> {
        self.pieces(side)
            .find(|piece| piece.archetype() == Archetype::King)
            .map(|piece| piece.coord())
            .ok_or(ChessError::MissingKing(side))
    }

    pub(crate) fn take(&mut self, coord: Coord) -> Option<Piece> {
        self.squares[coord.rank as usize][coord.file as usize].take()
    }

    // The only place a piece's cached coordinate is written.
    pub(crate) fn set(&mut self, coord: Coord, piece: Option<Piece>) {
        self.squares[coord.rank as usize][coord.file as usize] = piece.map(|mut piece| {
            piece.place(coord);
            piece
        });
    }

    // Committed relocation: the piece's own bookkeeping runs. Returns the previous
    // occupant of `to`.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let captured = self.take(to);
        if let Some(mut piece) = self.take(from) {
            piece.move_to(to);
            self.set(to, Some(piece));
        }
        captured
    }

    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> + '_ {
        self.squares.iter_mut().flatten().filter_map(|square| square.as_mut())
    }

    pub(crate) fn move_effects(&self, from: Coord, to: Coord) -> MoveEffects {
        let mut effects = MoveEffects::default();
        let Some(piece) = self.piece_at(from) else {
            return effects;
        };
        match piece.archetype() {
            Archetype::King if (to.file - from.file).abs() == 2 => {
                let (rook_file, dir) = if to.file > from.file { (BOARD_SIZE - 1, 1) } else { (0, -1) };
                effects.castle_rook = Some((Coord::at(rook_file, from.rank), Coord::at(from.file + dir, from.rank)));
            }
            Archetype::Pawn if to.file != from.file && self.is_empty_at(to) => {
                effects.en_passant_victim = Some(Coord::at(to.file, from.rank));
            }
            _ => {}
        }
        effects
    }

    /// Speculatively displaces the piece on `from` to `to`, including the rook of a
    /// castle and the victim of an en passant capture. The board is restored when the
    /// returned guard drops.
    pub(crate) fn scratch(&mut self, from: Coord, to: Coord) -> Scratch<'_> {
        let effects = self.move_effects(from, to);
        let mover = self.take(from);
        let moved = mover.is_some();
        let captured = match effects.en_passant_victim {
            Some(victim) if moved => self.take(victim),
            _ if moved => self.take(to),
            _ => None,
        };
        if moved {
            self.set(to, mover);
            if let Some((rook_from, rook_to)) = effects.castle_rook {
                let rook = self.take(rook_from);
                self.set(rook_to, rook);
            }
        }
        Scratch {
            position: self,
            from,
            to,
            moved,
            captured,
            castle_rook: effects.castle_rook,
        }
    }
}

pub(crate) struct Scratch<'a> {
    position: &'a mut Position,
    from: Coord,
    to: Coord,
    moved: bool,
    captured: Option<Piece>,
    castle_rook: Option<(Coord, Coord)>,
}

impl Deref for Scratch<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        if !self.moved {
            return;
        }
        if let Some((rook_from, rook_to)) = self.castle_rook {
            let rook = self.position.take(rook_to);
            self.position.set(rook_from, rook);
        }
        let mover = self.position.take(self.to);
        self.position.set(self.from, mover);
        if let Some(captured) = self.captured.take() {
            self.position.set(captured.coord(), Some(captured));
        }
    }
}
