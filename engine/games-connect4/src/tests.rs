use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// 42 moves that fill the board without either side completing a line.
const DRAW_SEQUENCE: [u8; BOARD_SIZE] = [
    1, 0, 0, 0, 0, 0, 0, 1, 5, 1, 1, 2, 1, 1, 2, 3, 2, 2, 3, 2, 2, 3, 3, 4, 3, 3, 4, 5, 4, 4, 5,
    5, 5, 6, 6, 4, 6, 5, 6, 6, 4, 6,
];

fn play_all(moves: &[u8]) -> BitBoard {
    let mut board = BitBoard::new();
    for &m in moves {
        board.play(m);
    }
    board
}

#[test]
fn test_initial_state() {
    let board = BitBoard::new();
    assert_eq!(board.mover_bits(), 0);
    assert_eq!(board.occupied_bits(), 0);
    assert!(board.mover_is_first());
    assert_eq!(board.to_move(), Player::First);
    assert_eq!(board.outcome(), Outcome::InProgress);
    assert_eq!(board.moves_played(), 0);
    assert!(!board.is_done());
}

#[test]
fn test_legal_moves() {
    let board = BitBoard::new();
    assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(board.legal_mask(), 0x7F); // All 7 columns

    // After one move
    let board = board.after(3); // Center column
    let legal = board.legal_moves();
    assert_eq!(legal.len(), 7); // All columns still available
    assert!(legal.contains(&3));
}

#[test]
fn test_play_places_stone_for_previous_mover() {
    let board = BitBoard::new().after(3);

    // First player's stone sits at the bottom of column 3
    assert_eq!(board.absolute_cell(3, 0), 1);
    // From the new mover's point of view it is the opponent's stone
    assert_eq!(board.cell(3, 0), 2);
    assert_eq!(board.mover_bits(), 0);
    assert_eq!(board.opponent_bits(), board.occupied_bits());
    assert_eq!(board.to_move(), Player::Second);
}

#[test]
fn test_play_flips_mover_every_ply() {
    let mut board = BitBoard::new();
    for (ply, &col) in [3u8, 3, 2, 4, 4, 1].iter().enumerate() {
        let before = board.to_move();
        let mover_before = board.mover_bits();
        board.play(col);
        assert_eq!(board.to_move(), before.opponent(), "ply {ply}");
        // Old mover stones are now the opponent's, plus the new stone
        assert_eq!(board.opponent_bits() & mover_before, mover_before);
        assert_eq!(
            board.opponent_bits().count_ones(),
            mover_before.count_ones() + 1
        );
    }
}

#[test]
fn test_stacking_pieces() {
    let mut board = BitBoard::new();

    // Stack pieces in column 0
    for i in 0..ROWS {
        board.play(0);
        assert_eq!(board.moves_played(), (i + 1) as u32);
    }

    // Column 0 is now full
    assert!(!board.legal_moves().contains(&0));
    assert_eq!(board.legal_mask() & 1, 0);
    assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
#[should_panic(expected = "is full")]
fn test_play_full_column_panics() {
    let mut board = BitBoard::new();
    for _ in 0..=ROWS {
        board.play(0);
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn test_play_out_of_range_panics() {
    BitBoard::new().play(COLS as u8);
}

#[test]
fn test_try_play_rejects_bad_moves() {
    let mut board = BitBoard::new();
    assert_eq!(board.try_play(9), Err(MoveError::OutOfRange(9)));

    for _ in 0..ROWS {
        board.try_play(6).unwrap();
    }
    let before = board;
    assert_eq!(board.try_play(6), Err(MoveError::ColumnFull(6)));
    assert_eq!(board, before);

    let mut won = play_all(&[0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(won.try_play(3), Err(MoveError::GameOver));
}

#[test]
fn test_horizontal_win() {
    // First: 0, 1, 2, 3 (bottom row)
    // Second: 0, 1, 2 (second row)
    let board = play_all(&[0, 0, 1, 1, 2, 2, 3]);

    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.to_move(), Player::Second);
    assert_eq!(board.winner(), Some(Player::First));
    assert!(board.is_done());
}

#[test]
fn test_vertical_win() {
    // First stacks in column 0, second in column 1
    let board = play_all(&[0, 1, 0, 1, 0, 1, 0]);

    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.winner(), Some(Player::First));
}

#[test]
fn test_vertical_win_for_second_player() {
    // Second player stacks column 6 while first plays elsewhere
    let board = play_all(&[0, 6, 1, 6, 0, 6, 1, 6]);

    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.to_move(), Player::First);
    assert_eq!(board.winner(), Some(Player::Second));
    assert!((board.first_player_score() - 0.0).abs() < 1e-12);
}

#[test]
fn test_diagonal_win_ascending() {
    // First player builds (0,0), (1,1), (2,2), (3,3); second player
    // supplies the supporting stones underneath
    let board = play_all(&[0, 1, 1, 2, 6, 2, 2, 3, 3, 3, 3]);

    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.winner(), Some(Player::First));
}

#[test]
fn test_diagonal_win_descending() {
    // First player at: (3,0), (2,1), (1,2), (0,3)
    let board = play_all(&[3, 2, 2, 1, 1, 0, 1, 0, 0, 4, 0]);

    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.winner(), Some(Player::First));
}

#[test]
fn test_three_with_gap_is_not_a_win() {
    // First: columns 0, 1, 2 and 4 on the bottom row, column 3 empty
    let board = play_all(&[0, 0, 1, 1, 2, 2, 4]);

    assert_eq!(board.outcome(), Outcome::InProgress);
    assert!(!has_four(board.opponent_bits()));
}

#[test]
fn test_draw_game() {
    let mut board = BitBoard::new();
    for (ply, &col) in DRAW_SEQUENCE.iter().enumerate() {
        assert!(!board.is_done(), "game ended early at ply {ply}");
        board.play(col);
    }

    assert_eq!(board.outcome(), Outcome::Draw);
    assert_eq!(board.winner(), None);
    assert_eq!(board.legal_mask(), 0);
    assert!((board.first_player_score() - 0.5).abs() < 1e-12);
}

#[test]
fn test_from_rows_round_trips_display() {
    let rows = [
        "xxoxo..", //
        "oooxx.x", //
        "oxxxo.o", //
        "xooox.x", //
        "oxxxooo", //
        "xooxxxo",
    ];
    let board = BitBoard::from_rows(&rows, false).unwrap();

    assert_eq!(board.to_move(), Player::Second);
    assert_eq!(board.outcome(), Outcome::InProgress);
    assert_eq!(board.moves_played(), 37);
    assert_eq!(board.legal_moves(), vec![5, 6]);
    assert_eq!(board.absolute_cell(0, 0), 1);
    assert_eq!(board.cell(0, 0), 2); // x belongs to the opponent here

    let expected = format!("to move: o\n{}\n", rows.join("\n"));
    assert_eq!(board.to_string(), expected);
}

#[test]
fn test_from_rows_detects_finished_games() {
    let rows = [
        ".......", //
        ".......", //
        ".......", //
        ".......", //
        "ooo....", //
        "xxxx...",
    ];
    let board = BitBoard::from_rows(&rows, false).unwrap();
    assert_eq!(board.outcome(), Outcome::Lose);
    assert_eq!(board.winner(), Some(Player::First));
}

#[test]
fn test_from_rows_errors() {
    assert_eq!(
        BitBoard::from_rows(&["......."], true),
        Err(ParseError::RowCount {
            expected: ROWS,
            got: 1
        })
    );

    let short = [".......", ".......", ".......", ".......", ".......", "x.."];
    assert!(matches!(
        BitBoard::from_rows(&short, true),
        Err(ParseError::RowWidth { row: 0, .. })
    ));

    let bad = [".......", ".......", ".......", ".......", ".......", "x?....."];
    assert_eq!(
        BitBoard::from_rows(&bad, true),
        Err(ParseError::BadCell { row: 0, ch: '?' })
    );

    let floating = [".......", ".......", ".......", "x......", ".......", "o......"];
    assert_eq!(
        BitBoard::from_rows(&floating, true),
        Err(ParseError::FloatingStone { col: 0, row: 2 })
    );
}

#[test]
fn test_fill_board_layout() {
    let board = play_all(&[3, 3, 0]);
    let mut buf = [9u8; BOARD_SIZE];
    board.fill_board(&mut buf);

    // Row-major, bottom row first, seat tags
    assert_eq!(buf[3], 1);
    assert_eq!(buf[COLS + 3], 2);
    assert_eq!(buf[0], 1);
    assert_eq!(buf.iter().filter(|&&c| c != 0).count(), 3);
}

#[test]
fn test_relative_cells_follow_mover() {
    let board = play_all(&[3, 4]);
    // First player to move: its stone at column 3 is "mine"
    assert_eq!(board.cell(3, 0), 1);
    assert_eq!(board.cell(4, 0), 2);
    assert_eq!(board.cell(5, 0), 0);
}

#[test]
fn test_grid_conversion_matches_bitboard() {
    let mut grid = GridBoard::new();
    for &col in &[3u8, 3, 2, 4, 1] {
        grid.play(col);
    }
    let converted = BitBoard::from(&grid);
    assert_eq!(converted, play_all(&[3, 3, 2, 4, 1]));
}

#[test]
fn test_cross_check_against_grid_board() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for game in 0..200 {
        let mut bits = BitBoard::new();
        let mut grid = GridBoard::new();

        while !bits.is_done() {
            let legal = bits.legal_moves();
            assert!(!legal.is_empty(), "game {game}: no moves in a live game");
            assert_eq!(legal, grid.legal_moves(), "game {game}");

            let col = legal[rng.gen_range(0..legal.len())];
            bits.play(col);
            grid.play(col);

            assert_eq!(bits.outcome(), grid.outcome(), "game {game}\n{grid}");
            assert_eq!(bits.to_move(), grid.to_move());
            for c in 0..COLS {
                for r in 0..ROWS {
                    assert_eq!(bits.absolute_cell(c, r), grid.cell(c, r));
                }
            }
            assert_eq!(BitBoard::from(&grid), bits);
        }
        assert!(grid.is_done());
    }
}

#[test]
fn test_outcome_values() {
    assert_eq!(Outcome::InProgress.value(), None);
    assert_eq!(Outcome::Win.value(), Some(1.0));
    assert_eq!(Outcome::Lose.value(), Some(0.0));
    assert_eq!(Outcome::Draw.value(), Some(0.5));
}

#[test]
fn test_move_error_messages() {
    assert_eq!(
        MoveError::OutOfRange(8).to_string(),
        "column 8 is out of range (0-6)"
    );
    assert_eq!(MoveError::ColumnFull(2).to_string(), "column 2 is full");
}
