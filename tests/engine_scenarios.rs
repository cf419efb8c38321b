use blockfall::board::cells_at;
use blockfall::game::POINTS_PER_ROW;
use blockfall::{
    Board, Cell, Color, Command, GameEngine, GameState, PieceShape, Position, ScriptedSource,
    UniformSource,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

const GREY: Color = Color::rgb(128, 128, 128);

const COMMANDS: [Command; 6] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::SoftDrop,
    Command::Rotate,
    Command::HardDrop,
    Command::TogglePause,
];

/// Board with random garbage in the bottom half, top rows left clear for spawning
fn garbage_board(rng: &mut ChaCha8Rng) -> Board {
    let mut board = Board::new(10, 20);
    for y in 10..20 {
        for x in 0..10 {
            if rng.gen_bool(0.45) {
                board.set(x, y, Cell::Filled(GREY));
            }
        }
    }
    board
}

fn filled(board: &Board) -> usize {
    board.rows().iter().flatten().filter(|c| c.is_filled()).count()
}

#[test]
fn o_pieces_stack_until_spawn_is_blocked() {
    let mut game =
        GameEngine::with_source(10, 20, ScriptedSource::repeat(PieceShape::O)).unwrap();

    // Each O adds two rows to the column; nine fill rows 2..20
    for drop in 1..=9 {
        let outcome = game.hard_drop().expect("game still running");
        assert!(!outcome.game_over, "drop {drop} ended the game");
        assert_eq!(outcome.rows_cleared, 0);
        assert_eq!(filled(game.board()), drop * 4);
    }
    assert_eq!(game.state(), GameState::Running);

    // The tenth locks in the spawn rows and the next O has nowhere to go
    let outcome = game.hard_drop().unwrap();
    assert!(outcome.game_over);
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(filled(game.board()), 40);
    assert!(game.hard_drop().is_none());
}

#[test]
fn random_play_never_overlaps_the_board() {
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game =
            GameEngine::with_source(10, 20, UniformSource::with_seed(seed)).unwrap();
        let mut resets = 0;

        for _ in 0..3000 {
            if rng.gen_range(0..4) == 0 {
                game.tick();
            } else {
                game.apply(COMMANDS[rng.gen_range(0..COMMANDS.len())]);
            }

            let board = game.board();
            assert_eq!(board.rows().len(), 20);
            assert!(board.rows().iter().all(|row| row.len() == 10));
            assert_eq!(game.score() % POINTS_PER_ROW, 0);

            match game.state() {
                GameState::GameOver => {
                    resets += 1;
                    game.reset();
                }
                _ => assert!(!game.active().collides(game.board()), "seed {seed}"),
            }
        }
        assert!(resets > 0, "seed {seed} never topped out");
    }
}

#[test]
fn rotation_rejected_exactly_when_rotated_cells_are_blocked() {
    for shape in PieceShape::ALL {
        let matrix = shape.matrix();
        let spawn = Position::new(3, 0);
        let current: BTreeSet<_> = cells_at(&matrix, spawn).collect();
        let rotated: BTreeSet<_> = cells_at(&matrix.rotated_cw(), spawn).collect();
        let n = matrix.size() as i32;

        // One obstruction at a time, everywhere in and around the bounding box
        for y in 0..=n {
            for x in (spawn.x - 1)..=(spawn.x + n) {
                let obstruction = Position::new(x, y);
                if current.contains(&obstruction) {
                    continue;
                }
                let mut board = Board::new(10, 20);
                board.set(x, y, Cell::Filled(GREY));
                let mut game =
                    GameEngine::from_board(board, ScriptedSource::repeat(shape)).unwrap();
                assert_eq!(game.state(), GameState::Running);

                let applied = game.apply(Command::Rotate).applied;
                assert_eq!(
                    applied,
                    !rotated.contains(&obstruction),
                    "{} with obstruction at ({x}, {y})",
                    shape.name()
                );
                let expected = if applied { matrix.rotated_cw() } else { matrix };
                assert_eq!(game.active().matrix, expected);
                assert_eq!(game.active().anchor, spawn);
            }
        }
    }
}

#[test]
fn rotation_against_walls_follows_collision() {
    for shape in PieceShape::ALL {
        for command in [Command::MoveLeft, Command::MoveRight] {
            let mut game =
                GameEngine::with_source(10, 20, ScriptedSource::repeat(shape)).unwrap();
            // Rotate through every orientation pinned to the wall
            for _ in 0..4 {
                while game.apply(command).applied {}
                let before = *game.active();
                let legal = !game
                    .board()
                    .collides(&before.matrix.rotated_cw(), before.anchor);
                assert_eq!(game.apply(Command::Rotate).applied, legal, "{}", shape.name());
                if !legal {
                    assert_eq!(*game.active(), before);
                    break;
                }
            }
        }
    }
}

#[test]
fn hard_drop_lands_on_support_and_locks_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for round in 0..200 {
        let board = garbage_board(&mut rng);
        let mut game =
            GameEngine::from_board(board, UniformSource::with_seed(round)).unwrap();
        if game.state() != GameState::Running {
            continue;
        }
        for _ in 0..rng.gen_range(0..4u32) {
            game.apply(Command::Rotate);
        }
        let dx: i32 = rng.gen_range(-4..=4);
        for _ in 0..dx.abs() {
            game.apply(if dx < 0 { Command::MoveLeft } else { Command::MoveRight });
        }

        let piece = *game.active();
        let landed = piece.landing(game.board());
        assert!(!landed.collides(game.board()));
        assert!(landed.shifted(0, 1).collides(game.board()));
        assert_eq!(landed.anchor.x, piece.anchor.x);

        let filled_before = filled(game.board());
        let next = game.next_piece();
        let score_before = game.score();
        let outcome = game.apply(Command::HardDrop);
        assert!(outcome.applied);

        // Exactly one lock: the lookahead moved up once
        assert_eq!(game.active().shape, next);
        let cleared = (game.score() - score_before) / POINTS_PER_ROW;
        if cleared == 0 {
            assert_eq!(filled(game.board()), filled_before + 4);
            for pos in landed.cells() {
                assert!(game.board().get(pos.x, pos.y).unwrap().is_filled());
            }
        }
    }
}

#[test]
fn clear_full_rows_matches_reference_filter() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..200 {
        let mut board = Board::new(6, 12);
        for y in 0..12 {
            let full = rng.gen_bool(0.3);
            for x in 0..6 {
                if full || rng.gen_bool(0.5) {
                    board.set(x, y, Cell::Filled(GREY));
                }
            }
        }

        let full_rows = board
            .rows()
            .iter()
            .filter(|row| row.iter().all(Cell::is_filled))
            .count();
        let kept: Vec<_> = board
            .rows()
            .iter()
            .filter(|row| !row.iter().all(Cell::is_filled))
            .cloned()
            .collect();

        let (cleared_board, cleared) = board.clear_full_rows();
        assert_eq!(cleared as usize, full_rows);
        assert_eq!(cleared_board.rows().len(), 12);
        assert_eq!(&cleared_board.rows()[full_rows..], kept.as_slice());
        assert!(
            cleared_board.rows()[..full_rows]
                .iter()
                .all(|row| row.len() == 6 && row.iter().all(Cell::is_empty))
        );
    }
}

#[test]
fn snapshot_serializes_to_json() {
    let game = GameEngine::with_source(
        10,
        20,
        ScriptedSource::new([PieceShape::T, PieceShape::Z]),
    )
    .unwrap();
    let json = serde_json::to_value(game.snapshot()).unwrap();

    assert_eq!(json["score"], 0);
    assert_eq!(json["state"], "Running");
    assert_eq!(json["next_piece"], "Z");
    assert_eq!(json["cells"].as_array().unwrap().len(), 20);
    assert_eq!(json["cells"][0][4]["Filled"]["r"], 0xa0);
    assert_eq!(json["cells"][0][0], "Empty");
    assert_eq!(json["active_piece_cells"].as_array().unwrap().len(), 4);
}
