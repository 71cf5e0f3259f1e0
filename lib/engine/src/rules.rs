/*
 * Legality filter: raw reachability -> legal moves.
 *
 * Every candidate is tried on the board through a scratch displacement and survives
 * only if the mover's own king is not attacked afterwards. En passant and castling are
 * layered on top of the providers here. Castling consults `is_under_attack` directly
 * and never recurses into `legal_moves`.
 */

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::board::{Coord, Move, Position, Side};
use crate::constant::{BOARD_SIZE, KING_HOME_FILE};
use crate::error::{ChessError, Result};
use crate::movement::Movement;
use crate::piece::{Archetype, Piece};

/// What a committed move did to the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
    pub is_castle: bool,
    pub is_en_passant: bool,
    pub promotion: Option<Archetype>,
}

impl Position {
    /// Whether `coord`, treated as held by `side`, is attacked by any opposing piece.
    ///
    /// Each family is cast outward from `coord`; a hit counts when the opposing piece
    /// found there moves with that same family.
    pub fn is_under_attack(&self, coord: Coord, side: Side) -> bool {
        Movement::ALL.iter().any(|&family| {
            family.threatened(self, coord, side).into_iter().any(|target| {
                self.piece_at(target)
                    .is_some_and(|piece| piece.side() != side && piece.capabilities().contains(&family))
            })
        })
    }

    pub fn is_king_exposed(&self, side: Side) -> Result<bool> {
        Ok(self.is_under_attack(self.king_coord(side)?, side))
    }

    /// Legal targets of the piece on `from`, ascending by (file, rank). An empty
    /// square has no legal moves.
    pub fn legal_moves(&mut self, from: Coord) -> Result<BTreeSet<Coord>> {
        let mut legal = BTreeSet::new();
        let Some(piece) = self.piece_at(from).copied() else {
            return Ok(legal);
        };
        let side = piece.side();
        self.king_coord(side)?;

        let mut candidates = self.raw_candidates(&piece);
        candidates.extend(self.en_passant_targets(&piece));
        if piece.archetype() == Archetype::King {
            candidates.extend(self.castling_targets(&piece));
        }

        for to in candidates {
            if self.survives(from, to, side)? {
                legal.insert(to);
            }
        }
        Ok(legal)
    }

    /// Every legal move of `side` in canonical order: pieces by ascending (file, rank),
    /// then targets by ascending (file, rank).
    pub fn legal_move_list(&mut self, side: Side) -> Result<Vec<Move>> {
        let origins: Vec<Coord> = self.pieces(side).map(|piece| piece.coord()).collect();
        let mut moves = vec![];
        for from in origins {
            moves.extend(self.legal_moves(from)?.into_iter().map(|to| Move::new(from, to)));
        }
        Ok(moves)
    }

    /// Commits `from -> to`. Updates occupancy and bookkeeping, closes every other en
    /// passant window, moves the castling rook, removes an en passant victim and
    /// promotes. Nothing is mutated when an error is returned.
    pub fn apply_move(&mut self, from: Coord, to: Coord, promotion: Option<Archetype>) -> Result<MoveRecord> {
        if !self.legal_moves(from)?.contains(&to) {
            warn!("rejected illegal move {from}{to}");
            return Err(ChessError::IllegalMove { from, to });
        }
        let Some(piece) = self.piece_at(from).copied() else {
            return Err(ChessError::IllegalMove { from, to });
        };

        let promotes = piece.archetype() == Archetype::Pawn && to.rank() == piece.side().promotion_rank();
        let promotion = match (promotes, promotion) {
            (false, _) => None,
            (true, None) => return Err(ChessError::PromotionRequired { from, to }),
            (true, Some(choice)) if !choice.is_promotion_choice() => {
                return Err(ChessError::InvalidPromotionChoice(choice));
            }
            (true, Some(choice)) => Some(choice),
        };

        let effects = self.move_effects(from, to);
        for pawn in self.pieces_mut() {
            pawn.close_en_passant_window();
        }
        let mut captured = effects.en_passant_victim.and_then(|victim| self.take(victim));
        if let Some(taken) = self.relocate(from, to) {
            captured = Some(taken);
        }
        if let Some((rook_from, rook_to)) = effects.castle_rook {
            self.relocate(rook_from, rook_to);
        }
        if let Some(choice) = promotion {
            let promoted = self.piece_at(to).map(|pawn| pawn.promoted(choice));
            self.set(to, promoted);
        }

        let record = MoveRecord {
            from,
            to,
            captured,
            is_castle: effects.castle_rook.is_some(),
            is_en_passant: effects.en_passant_victim.is_some(),
            promotion,
        };
        info!(
            "{} {} {from}{to}{}",
            piece.side(),
            piece.archetype(),
            captured.map(|c| format!(" takes {}", c.archetype())).unwrap_or_default()
        );
        Ok(record)
    }

    fn raw_candidates(&self, piece: &Piece) -> Vec<Coord> {
        piece
            .capabilities()
            .iter()
            .flat_map(|family| family.reachable(self, piece.coord(), piece.side()))
            .collect()
    }

    // Candidate survives iff the mover's king is safe with the move on the board.
    fn survives(&mut self, from: Coord, to: Coord, side: Side) -> Result<bool> {
        let scratch = self.scratch(from, to);
        Ok(!scratch.is_king_exposed(side)?)
    }

    fn en_passant_targets(&self, piece: &Piece) -> Vec<Coord> {
        if piece.archetype() != Archetype::Pawn {
            return vec![];
        }
        let from = piece.coord();
        [-1, 1]
            .into_iter()
            .filter(|&df| {
                from.offset(df, 0)
                    .and_then(|beside| self.piece_at(beside))
                    .is_some_and(|other| {
                        other.side() != piece.side()
                            && other.archetype() == Archetype::Pawn
                            && other.en_passant_vulnerable()
                    })
            })
            .filter_map(|df| from.offset(df, piece.side().forward()))
            .filter(|&target| self.is_empty_at(target))
            .collect()
    }

    fn castling_targets(&self, king: &Piece) -> Vec<Coord> {
        let side = king.side();
        let home = Coord::at(KING_HOME_FILE, side.back_rank());
        if king.has_moved() || king.coord() != home || self.is_under_attack(home, side) {
            return vec![];
        }

        let mut targets = vec![];
        for (rook_file, dir) in [(BOARD_SIZE - 1, 1), (0, -1)] {
            let corner = Coord::at(rook_file, side.back_rank());
            let rook_ready = self.piece_at(corner).is_some_and(|rook| {
                rook.side() == side && rook.archetype() == Archetype::Rook && !rook.has_moved()
            });
            if !rook_ready {
                continue;
            }
            let lo = KING_HOME_FILE.min(rook_file) + 1;
            let hi = KING_HOME_FILE.max(rook_file);
            if (lo..hi).any(|file| !self.is_empty_at(Coord::at(file, side.back_rank()))) {
                continue;
            }
            let transit = Coord::at(KING_HOME_FILE + dir, side.back_rank());
            let destination = Coord::at(KING_HOME_FILE + 2 * dir, side.back_rank());
            if self.is_under_attack(transit, side) || self.is_under_attack(destination, side) {
                continue;
            }
            targets.push(destination);
        }
        targets
    }
}
