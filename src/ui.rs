use std::io::{self, BufRead, Write};

use engine::engine::parse_move;
use engine::{Archetype, ChessError, Coord, GameState, Position, Side};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::game::Match;

pub fn render(position: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let symbol = Coord::new(file, rank)
                .ok()
                .and_then(|coord| position.piece_at(coord))
                .map_or('.', |piece| piece.symbol());
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> anyhow::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

pub fn ui(config: &AppConfig) -> anyhow::Result<()> {
    let mut game = Match::new(config.depth);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render(&game.position));
        let state = game.status()?;
        match state {
            GameState::Checkmate => {
                println!("Checkmate! {} wins.", game.turn.opponent());
                info!("checkmate after {} plies", game.plies);
                break;
            }
            GameState::Stalemate => {
                println!("Stalemate! No one wins.");
                info!("stalemate after {} plies", game.plies);
                break;
            }
            GameState::Check => println!("{} is in check.", game.turn),
            GameState::Normal => {}
        }
        if game.plies >= config.max_plies {
            println!("Stopped after {} plies.", game.plies);
            break;
        }

        if config.human != Some(game.turn) {
            game.ai_move()?;
            continue;
        }

        let Some(line) = prompt(&mut lines, &format!("{} to move> ", game.turn))? else {
            break;
        };
        let line = line.trim();
        if line == "quit" {
            break;
        }
        if let Some(square) = line.strip_prefix("moves ") {
            match square.parse::<Coord>().and_then(|from| game.position.legal_moves(from)) {
                Ok(targets) => println!("{}", targets.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")),
                Err(e) => println!("{e}"),
            }
            continue;
        }

        let (from, to, mut promotion) = match parse_move(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{e}");
                println!("{e}");
                continue;
            }
        };
        loop {
            match game.play(from, to, promotion) {
                Ok(_) => break,
                Err(ChessError::PromotionRequired { .. }) | Err(ChessError::InvalidPromotionChoice(_)) => {
                    let Some(choice) = prompt(&mut lines, "promote to (q/r/b/n)> ")? else {
                        return Ok(());
                    };
                    promotion = choice.trim().chars().next().and_then(Archetype::from_symbol);
                }
                Err(e) => {
                    warn!("{e}");
                    println!("{e}");
                    break;
                }
            }
        }
    }

    let taken = |side| game.captured_by(side).iter().map(|p| p.symbol()).collect::<String>();
    println!("Captured by light: {}", taken(Side::Light));
    println!("Captured by dark: {}", taken(Side::Dark));
    Ok(())
}
