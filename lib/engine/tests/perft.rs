//! Perft node counts against published values. A mismatch points at move
//! generation, the legality filter or committed-move side effects.

use engine::{Archetype, Coord, Position, Side};

// Piece placement in FEN order (rank 8 first). Every piece starts unmoved.
fn setup(placement: &str) -> Position {
    let mut position = Position::empty();
    for (row, text) in placement.split('/').enumerate() {
        let rank = 7 - row as i32;
        let mut file = 0;
        for symbol in text.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                file += skip as i32;
                continue;
            }
            let side = if symbol.is_ascii_uppercase() { Side::Light } else { Side::Dark };
            let archetype = Archetype::from_symbol(symbol).unwrap();
            position.put(side, archetype, Coord::new(file, rank).unwrap());
            file += 1;
        }
    }
    position
}

fn perft(position: &Position, side: Side, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    let moves = position.clone().legal_move_list(side).unwrap();
    for m in moves {
        let promotes = position.piece_at(m.from).unwrap().archetype() == Archetype::Pawn
            && m.to.rank() == side.promotion_rank();
        let choices: Vec<Option<Archetype>> = if promotes {
            [Archetype::Queen, Archetype::Rook, Archetype::Bishop, Archetype::Knight].map(Some).to_vec()
        } else {
            vec![None]
        };
        for choice in choices {
            let mut next = position.clone();
            next.apply_move(m.from, m.to, choice).unwrap();
            nodes += perft(&next, side.opponent(), depth - 1);
        }
    }
    nodes
}

#[test]
fn perft_initial_position() {
    let position = Position::init();
    assert_eq!(perft(&position, Side::Light, 1), 20);
    assert_eq!(perft(&position, Side::Light, 2), 400);
    assert_eq!(perft(&position, Side::Light, 3), 8902);
}

#[test]
fn perft_kiwipete() {
    let position = setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
    assert_eq!(perft(&position, Side::Light, 1), 48);
    assert_eq!(perft(&position, Side::Light, 2), 2039);
}

#[test]
fn perft_promotions() {
    // Light starts in check; Dark's replies include pawn promotions with capture.
    let position = setup("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1");
    assert_eq!(perft(&position, Side::Light, 1), 6);
    assert_eq!(perft(&position, Side::Light, 2), 264);
}
