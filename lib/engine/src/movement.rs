/*
 * Capability providers: pure geometric reachability per piece family.
 *
 * Providers only know about occupancy. They never ask whether the mover's king ends
 * up exposed and they never mutate the board.
 */

use crate::board::{Coord, Position, Side};

const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
const KING_OFFSETS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Movement {
    Orthogonal,
    Diagonal,
    Leaping,
    SingleStep,
    PawnSpecial,
}

impl Movement {
    pub const ALL: [Movement; 5] = [
        Movement::Orthogonal,
        Movement::Diagonal,
        Movement::Leaping,
        Movement::SingleStep,
        Movement::PawnSpecial,
    ];

    /// Squares a piece of `side` standing on `from` can reach with this family.
    pub fn reachable(self, position: &Position, from: Coord, side: Side) -> Vec<Coord> {
        match self {
            Movement::Orthogonal => slide(position, from, side, &ORTHOGONAL_RAYS),
            Movement::Diagonal => slide(position, from, side, &DIAGONAL_RAYS),
            Movement::Leaping => step(position, from, side, &KNIGHT_OFFSETS),
            Movement::SingleStep => step(position, from, side, &KING_OFFSETS),
            Movement::PawnSpecial => {
                let mut targets = pawn_advances(position, from, side);
                targets.extend(pawn_captures(position, from, side));
                targets
            }
        }
    }

    /// The part of `reachable` that threatens a square. Pawn pushes never do.
    pub fn threatened(self, position: &Position, from: Coord, side: Side) -> Vec<Coord> {
        match self {
            Movement::PawnSpecial => pawn_captures(position, from, side),
            _ => self.reachable(position, from, side),
        }
    }
}

fn open_to(position: &Position, coord: Coord, side: Side) -> bool {
    position.piece_at(coord).map_or(true, |piece| piece.side() != side)
}

// Walk each ray until the first occupied square, keeping it only when it holds an
// opposing piece.
pub fn slide(position: &Position, from: Coord, side: Side, rays: &[(i8, i8)]) -> Vec<Coord> {
    let mut targets = vec![];
    for &(df, dr) in rays {
        let mut cursor = from.offset(df, dr);
        while let Some(coord) = cursor {
            match position.piece_at(coord) {
                None => targets.push(coord),
                Some(piece) => {
                    if piece.side() != side {
                        targets.push(coord);
                    }
                    break;
                }
            }
            cursor = coord.offset(df, dr);
        }
    }
    targets
}

pub fn step(position: &Position, from: Coord, side: Side, offsets: &[(i8, i8)]) -> Vec<Coord> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&coord| open_to(position, coord, side))
        .collect()
}

// Forward pushes onto empty squares; the double step only from the starting rank.
pub fn pawn_advances(position: &Position, from: Coord, side: Side) -> Vec<Coord> {
    let mut targets = vec![];
    let forward = side.forward();
    if let Some(one) = from.offset(0, forward).filter(|&c| position.is_empty_at(c)) {
        targets.push(one);
        if from.rank() == side.pawn_rank() {
            if let Some(two) = from.offset(0, 2 * forward).filter(|&c| position.is_empty_at(c)) {
                targets.push(two);
            }
        }
    }
    targets
}

pub fn pawn_captures(position: &Position, from: Coord, side: Side) -> Vec<Coord> {
    [-1, 1]
        .into_iter()
        .filter_map(|df| from.offset(df, side.forward()))
        .filter(|&coord| position.piece_at(coord).is_some_and(|piece| piece.side() != side))
        .collect()
}
