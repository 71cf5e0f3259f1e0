use std::fmt;

use crate::board::{Position, Side};
use crate::error::Result;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameState {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameState {
    pub fn derive(king_exposed: bool, has_legal_move: bool) -> GameState {
        match (king_exposed, has_legal_move) {
            (false, true) => GameState::Normal,
            (true, true) => GameState::Check,
            (true, false) => GameState::Checkmate,
            (false, false) => GameState::Stalemate,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Normal => "normal",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

impl Position {
    pub fn has_any_legal_move(&mut self, side: Side) -> Result<bool> {
        let origins: Vec<_> = self.pieces(side).map(|piece| piece.coord()).collect();
        for from in origins {
            if !self.legal_moves(from)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // Recomputed from scratch on every call; a missing king is an error, not a state.
    pub fn classify(&mut self, side: Side) -> Result<GameState> {
        let king_exposed = self.is_king_exposed(side)?;
        Ok(GameState::derive(king_exposed, self.has_any_legal_move(side)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;
    use crate::error::ChessError;
    use crate::piece::Archetype;
    use crate::state::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_is_normal() {
        let mut position = Position::init();
        assert_eq!(position.classify(Side::Light), Ok(GameState::Normal));
        assert_eq!(position.classify(Side::Dark), Ok(GameState::Normal));
    }

    #[test]
    fn test_rook_check_on_file() {
        let mut position = Position::empty();
        position
            .put(Side::Light, Archetype::King, sq("e1"))
            .put(Side::Dark, Archetype::Rook, sq("e7"))
            .put(Side::Dark, Archetype::King, sq("a8"));
        assert_eq!(position.classify(Side::Light), Ok(GameState::Check));
    }

    #[test]
    fn test_fools_mate() {
        let mut position = Position::init();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            position.apply_move(sq(from), sq(to), None).unwrap();
        }
        assert_eq!(position.classify(Side::Light), Ok(GameState::Checkmate));
        assert!(position.classify(Side::Light).unwrap().is_terminal());
    }

    #[test]
    fn test_stalemate() {
        let mut position = Position::empty();
        position
            .put(Side::Dark, Archetype::King, sq("h8"))
            .put(Side::Light, Archetype::Queen, sq("g6"))
            .put(Side::Light, Archetype::King, sq("f7"));
        assert_eq!(position.classify(Side::Dark), Ok(GameState::Stalemate));
        assert_eq!(position.classify(Side::Light), Ok(GameState::Normal));
    }

    #[test]
    fn test_states_partition() {
        for exposed in [false, true] {
            for has_move in [false, true] {
                let state = GameState::derive(exposed, has_move);
                assert_eq!(state == GameState::Checkmate, exposed && !has_move);
                assert_eq!(state == GameState::Stalemate, !exposed && !has_move);
                assert!(!(state == GameState::Checkmate && state == GameState::Stalemate));
            }
        }
    }

    #[test]
    fn test_missing_king() {
        let mut position = Position::empty();
        position.put(Side::Light, Archetype::King, sq("e1"));
        assert_eq!(position.classify(Side::Dark), Err(ChessError::MissingKing(Side::Dark)));
    }
}
