/* Line protocol front end: drives Position and the search from text commands */
use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::board::{Coord, Position, Side};
use crate::constant::{DEFAULT_DEPTH, MAX_DEPTH};
use crate::error::{ChessError, Result};
use crate::piece::Archetype;

static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^startpos(?: moves (?P<moves>[a-h][1-8][a-h][1-8][qrbn]?(?: [a-h][1-8][a-h][1-8][qrbn]?)*))?$")
        .expect("position pattern")
});
static MOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<from>[a-h][1-8])(?P<to>[a-h][1-8])(?P<promotion>[qrbn])?$").expect("move pattern"));
static GO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:depth (?P<depth>\d+))?$").expect("go pattern"));

/// Parses `e2e4` or `e7e8q` into its squares and optional promotion choice.
pub fn parse_move(text: &str) -> Result<(Coord, Coord, Option<Archetype>)> {
    let captures = MOVE_RE
        .captures(text.trim())
        .ok_or_else(|| ChessError::InvalidCommand(format!("bad move {text}")))?;
    let from: Coord = captures["from"].parse()?;
    let to: Coord = captures["to"].parse()?;
    let promotion = captures
        .name("promotion")
        .and_then(|m| m.as_str().chars().next())
        .and_then(Archetype::from_symbol);
    Ok((from, to, promotion))
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

pub struct Engine {
    pub position: Position,
    pub turn: Side,
    pub depth: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            position: Position::init(),
            turn: Side::Light,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn start(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            match self.handle(&line?) {
                Ok(Reply::Text(text)) => writeln!(stdout, "{text}")?,
                Ok(Reply::Silent) => {}
                Ok(Reply::Quit) => break,
                Err(e) => {
                    warn!("{e}");
                    writeln!(stdout, "error {e}")?;
                }
            }
            stdout.flush()?;
        }
        Ok(())
    }

    pub fn handle(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        let (cmd, param) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "" => Ok(Reply::Silent),
            "isready" => Ok(Reply::Text("readyok".to_owned())),
            "quit" => Ok(Reply::Quit),
            "position" => {
                self.position(param)?;
                Ok(Reply::Silent)
            }
            "legal" => {
                let from: Coord = param.trim().parse()?;
                let targets: Vec<String> = self.position.legal_moves(from)?.iter().map(|c| c.to_string()).collect();
                Ok(Reply::Text(targets.join(" ")))
            }
            "state" => {
                let side: Side = if param.is_empty() { self.turn } else { param.trim().parse()? };
                Ok(Reply::Text(self.position.classify(side)?.to_string()))
            }
            "go" => self.go(param).map(Reply::Text),
            _ => Err(ChessError::InvalidCommand(line.to_owned())),
        }
    }

    // Resets to the opening and replays the move list. An illegal move stops the
    // replay with the earlier moves kept.
    fn position(&mut self, param: &str) -> Result<()> {
        let captures = POSITION_RE
            .captures(param.trim())
            .ok_or_else(|| ChessError::InvalidCommand(format!("position {param}")))?;
        self.position = Position::init();
        self.turn = Side::Light;
        if let Some(moves) = captures.name("moves") {
            for text in moves.as_str().split(' ') {
                let (from, to, promotion) = parse_move(text)?;
                if self.position.piece_at(from).map(|piece| piece.side()) != Some(self.turn) {
                    return Err(ChessError::IllegalMove { from, to });
                }
                self.position.apply_move(from, to, promotion)?;
                self.turn = self.turn.opponent();
            }
        }
        Ok(())
    }

    fn go(&mut self, param: &str) -> Result<String> {
        let captures = GO_RE
            .captures(param.trim())
            .ok_or_else(|| ChessError::InvalidCommand(format!("go {param}")))?;
        let depth = match captures.name("depth") {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .ok()
                .filter(|depth| (1..=MAX_DEPTH).contains(depth))
                .ok_or_else(|| ChessError::InvalidCommand(format!("go {param}: depth must be 1..={MAX_DEPTH}")))?,
            None => self.depth,
        };
        let result = self.position.best_move(self.turn, depth)?;
        Ok(match result.best_move {
            Some(m) => format!("bestmove {m} score {}", result.score),
            None => "nobestmove".to_owned(),
        })
    }
}
