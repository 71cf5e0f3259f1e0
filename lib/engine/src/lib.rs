/*
 * Engine library entry
 *
 * - board: coordinates, sides, the occupancy map and scratch displacement
 * - piece / movement: archetypes and their geometric capability providers
 * - rules: legality filter and committed moves
 * - state: NORMAL / CHECK / CHECKMATE / STALEMATE classification
 * - search: alpha-beta move selection for the automated opponent
 * - engine: line protocol front end over all of the above
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod error;
pub mod movement;
pub mod piece;
pub mod rules;
pub mod search;
pub mod state;

pub use board::{Coord, Move, Position, Side};
pub use error::{ChessError, Result};
pub use piece::{Archetype, Piece};
pub use rules::MoveRecord;
pub use search::{SearchResult, Searcher};
pub use state::GameState;
