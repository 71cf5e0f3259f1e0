/*
 * Search module: fixed-depth minimax with alpha-beta pruning.
 *
 * - Scores are always from the searching (root) side's point of view: the root side
 *   maximizes, the opponent minimizes.
 * - Children are visited in canonical order (pieces by ascending file then rank, then
 *   targets by ascending file then rank) and the first move reaching the extremal
 *   value wins, so equal positions always produce equal results.
 * - Moves are tried through scratch displacement only. hasMoved and the en passant
 *   windows keep their committed values throughout the tree.
 * - A side with no legal moves scores as checkmate or stalemate, never by material.
 */

use tracing::debug;

use crate::board::{Move, Position, Side};
use crate::constant::{MATE, MAX, MIN};
use crate::error::Result;
use crate::state::GameState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
}

/// Material of `side` minus material of its opponent.
pub fn evaluate(position: &Position, side: Side) -> i32 {
    let material = |side| -> i32 { position.pieces(side).map(|piece| piece.archetype().material_value()).sum() };
    material(side) - material(side.opponent())
}

pub struct Searcher {
    /// Nodes visited by the last search.
    pub counter: u64,
    root: Side,
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            counter: 0,
            root: Side::Light,
        }
    }

    /// Best move for `side` looking `depth` plies ahead (at least one).
    pub fn best_move(&mut self, position: &mut Position, side: Side, depth: u32) -> Result<SearchResult> {
        self.counter = 0;
        self.root = side;
        let depth = depth.max(1);

        let moves = position.legal_move_list(side)?;
        if moves.is_empty() {
            let score = self.terminal_score(position, side, 0)?;
            debug!(%side, score, "no legal moves at root");
            return Ok(SearchResult { best_move: None, score });
        }

        let mut alpha = MIN;
        let mut best_move = None;
        let mut best_value = MIN;
        for m in moves {
            let value = {
                let mut scratch = position.scratch(m.from, m.to);
                self.alpha_beta(&mut scratch, side.opponent(), depth - 1, 1, alpha, MAX)?
            };
            if value > best_value {
                best_value = value;
                best_move = Some(m);
            }
            alpha = alpha.max(best_value);
        }

        debug!(
            %side,
            depth,
            nodes = self.counter,
            score = best_value,
            best = %best_move.map(|m| m.to_string()).unwrap_or_default(),
            "search finished"
        );
        Ok(SearchResult {
            best_move,
            score: best_value,
        })
    }

    fn alpha_beta(
        &mut self,
        position: &mut Position,
        to_move: Side,
        depth: u32,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32> {
        self.counter += 1;

        if depth == 0 {
            if !position.has_any_legal_move(to_move)? {
                return self.terminal_score(position, to_move, ply);
            }
            return Ok(evaluate(position, self.root));
        }

        let moves = position.legal_move_list(to_move)?;
        if moves.is_empty() {
            return self.terminal_score(position, to_move, ply);
        }

        let maximizing = to_move == self.root;
        let mut best = if maximizing { MIN } else { MAX };
        for m in moves {
            let value = {
                let mut scratch = position.scratch(m.from, m.to);
                self.alpha_beta(&mut scratch, to_move.opponent(), depth - 1, ply + 1, alpha, beta)?
            };
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }

    // `to_move` has no legal moves. Faster mates score further from zero.
    fn terminal_score(&self, position: &Position, to_move: Side, ply: i32) -> Result<i32> {
        match GameState::derive(position.is_king_exposed(to_move)?, false) {
            GameState::Checkmate if to_move == self.root => Ok(-(MATE - ply)),
            GameState::Checkmate => Ok(MATE - ply),
            _ => Ok(0),
        }
    }
}

impl Position {
    pub fn best_move(&mut self, side: Side, depth: u32) -> Result<SearchResult> {
        Searcher::new().best_move(self, side, depth)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;
    use crate::constant::MATE;
    use crate::piece::Archetype;
    use crate::search::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_evaluate() {
        let mut position = Position::init();
        assert_eq!(evaluate(&position, Side::Light), 0);
        position.put(Side::Light, Archetype::Queen, sq("d5"));
        assert_eq!(evaluate(&position, Side::Light), 9);
        assert_eq!(evaluate(&position, Side::Dark), -9);
        position.put(Side::Light, Archetype::Knight, sq("d7"));
        assert_eq!(evaluate(&position, Side::Light), 9 + 3 + 1);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut position = Position::empty();
        position
            .put(Side::Light, Archetype::King, sq("a1"))
            .put(Side::Light, Archetype::Rook, sq("d1"))
            .put(Side::Dark, Archetype::Queen, sq("d5"))
            .put(Side::Dark, Archetype::King, sq("h8"));
        let result = position.best_move(Side::Light, 2).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq("d1"), sq("d5"))));
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_finds_mate_in_one() {
        let mut position = Position::empty();
        position
            .put(Side::Light, Archetype::King, sq("g6"))
            .put(Side::Light, Archetype::Rook, sq("a1"))
            .put(Side::Dark, Archetype::King, sq("g8"));
        let result = position.best_move(Side::Light, 1).unwrap();
        assert_eq!(result.best_move, Some(Move::new(sq("a1"), sq("a8"))));
        assert_eq!(result.score, MATE - 1);
    }

    #[test]
    fn test_avoids_stalemate() {
        let mut position = Position::empty();
        position
            .put(Side::Light, Archetype::King, sq("f7"))
            .put(Side::Light, Archetype::Queen, sq("g1"))
            .put(Side::Dark, Archetype::King, sq("h8"));
        let result = position.best_move(Side::Light, 1).unwrap();
        let m = result.best_move.unwrap();
        assert_ne!(m, Move::new(sq("g1"), sq("g6")));
        let mut next = position.clone();
        next.apply_move(m.from, m.to, None).unwrap();
        assert!(next.has_any_legal_move(Side::Dark).unwrap() || next.is_king_exposed(Side::Dark).unwrap());
    }

    #[test]
    fn test_mated_root_has_no_move() {
        let mut position = Position::init();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            position.apply_move(sq(from), sq(to), None).unwrap();
        }
        let result = position.best_move(Side::Light, 3).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE);
    }

    #[test]
    fn test_search_is_deterministic_and_restores_board() {
        let mut position = Position::init();
        position.apply_move(sq("e2"), sq("e4"), None).unwrap();
        let before = position.clone();
        let first = position.best_move(Side::Dark, 3).unwrap();
        assert_eq!(position, before);
        let second = position.best_move(Side::Dark, 3).unwrap();
        assert_eq!(first, second);
        assert!(first.best_move.is_some());
        assert!(position.piece_at(sq("e4")).unwrap().en_passant_vulnerable());
    }
}
