use engine::{Archetype, Coord, GameState, Position, Side};

fn sq(s: &str) -> Coord {
    s.parse().unwrap()
}

fn play(position: &mut Position, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        position.apply_move(sq(from), sq(to), None).unwrap();
    }
}

#[test]
fn opening_pawn_has_one_and_two_step_pushes() {
    let mut position = Position::init();
    let from = Coord::new(4, Side::Light.pawn_rank() as i32).unwrap();
    let targets: Vec<Coord> = position.legal_moves(from).unwrap().into_iter().collect();
    assert_eq!(targets, vec![sq("e3"), sq("e4")]);
}

#[test]
fn rook_on_open_file_gives_check() {
    let mut position = Position::empty();
    position
        .put(Side::Light, Archetype::King, sq("e2"))
        .put(Side::Dark, Archetype::Rook, sq("e6"));
    assert_eq!(position.classify(Side::Light), Ok(GameState::Check));
}

#[test]
fn queen_mates_king_boxed_by_own_pawns() {
    let mut position = Position::empty();
    position
        .put(Side::Light, Archetype::King, sq("h1"))
        .put(Side::Light, Archetype::Pawn, sq("g2"))
        .put(Side::Light, Archetype::Pawn, sq("h2"))
        .put(Side::Dark, Archetype::Queen, sq("g1"))
        .put(Side::Dark, Archetype::Knight, sq("e2"))
        .put(Side::Dark, Archetype::King, sq("a8"));
    assert_eq!(position.classify(Side::Light), Ok(GameState::Checkmate));
}

#[test]
fn kingside_castle_moves_the_rook() {
    let mut position = Position::init();
    play(&mut position, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert!(position.legal_moves(sq("e1")).unwrap().contains(&sq("g1")));

    let record = position.apply_move(sq("e1"), sq("g1"), None).unwrap();
    assert!(record.is_castle);
    let rook = position.piece_at(sq("f1")).unwrap();
    assert_eq!(rook.archetype(), Archetype::Rook);
    assert_eq!(rook.coord(), sq("f1"));
    assert!(rook.has_moved());
    assert!(position.is_empty_at(sq("h1")));
    assert!(position.piece_at(sq("g1")).unwrap().has_moved());
}

#[test]
fn en_passant_window_lasts_exactly_one_ply() {
    let mut position = Position::init();
    assert!(!position.piece_at(sq("c2")).unwrap().en_passant_vulnerable());
    play(&mut position, &["c2c4"]);
    assert!(position.piece_at(sq("c4")).unwrap().en_passant_vulnerable());
    play(&mut position, &["g8f6"]);
    assert!(!position.piece_at(sq("c4")).unwrap().en_passant_vulnerable());
    play(&mut position, &["c4c5"]);
    assert!(!position.piece_at(sq("c5")).unwrap().en_passant_vulnerable());
}

#[test]
fn self_play_stays_consistent() {
    let mut position = Position::init();
    let mut side = Side::Light;
    for _ in 0..12 {
        let state = position.classify(side).unwrap();
        if state.is_terminal() {
            break;
        }
        let before = position.clone();
        let result = position.best_move(side, 2).unwrap();
        assert_eq!(position, before);
        let m = result.best_move.unwrap();
        position.apply_move(m.from, m.to, Some(Archetype::Queen)).unwrap();
        assert!(!position.is_king_exposed(side).unwrap());
        side = side.opponent();
    }
    for coord in Coord::all() {
        if let Some(piece) = position.piece_at(coord) {
            assert_eq!(piece.coord(), coord);
        }
    }
}
