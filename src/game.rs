use engine::{Archetype, ChessError, Coord, GameState, MoveRecord, Piece, Position, Side};
use tracing::info;

/// One game between two sides: whose turn it is and what each side has taken.
/// Legality, check and search all belong to the engine.
pub struct Match {
    pub position: Position,
    pub turn: Side,
    pub plies: u32,
    depth: u32,
    light_captures: Vec<Piece>,
    dark_captures: Vec<Piece>,
}

impl Match {
    pub fn new(depth: u32) -> Self {
        Match {
            position: Position::init(),
            turn: Side::Light,
            plies: 0,
            depth,
            light_captures: vec![],
            dark_captures: vec![],
        }
    }

    pub fn captured_by(&self, side: Side) -> &[Piece] {
        match side {
            Side::Light => &self.light_captures,
            Side::Dark => &self.dark_captures,
        }
    }

    // Moves the piece of the side to move; the turn passes only on success.
    pub fn play(&mut self, from: Coord, to: Coord, promotion: Option<Archetype>) -> engine::Result<MoveRecord> {
        if self.position.piece_at(from).map(|piece| piece.side()) != Some(self.turn) {
            return Err(ChessError::IllegalMove { from, to });
        }
        let record = self.position.apply_move(from, to, promotion)?;
        if let Some(captured) = record.captured {
            match self.turn {
                Side::Light => self.light_captures.push(captured),
                Side::Dark => self.dark_captures.push(captured),
            }
        }
        self.turn = self.turn.opponent();
        self.plies += 1;
        Ok(record)
    }

    /// Lets the engine move for the side to move. The engine always promotes to a queen.
    pub fn ai_move(&mut self) -> engine::Result<Option<MoveRecord>> {
        let result = self.position.best_move(self.turn, self.depth)?;
        let Some(m) = result.best_move else {
            return Ok(None);
        };
        info!("{} plays {m} (score {})", self.turn, result.score);
        self.play(m.from, m.to, Some(Archetype::Queen)).map(Some)
    }

    pub fn status(&mut self) -> engine::Result<GameState> {
        self.position.classify(self.turn)
    }
}
