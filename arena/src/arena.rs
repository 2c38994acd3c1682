//! Paired self-play between two strategies.
//!
//! Each pair plays one game with strategy 0 moving first and one with it
//! moving second, so the first-move advantage cancels out. A game scores
//! 1 for a win, 0.5 for a draw and 0 for a loss from strategy 0's side.

use anyhow::{anyhow, Result};
use games_connect4::BitBoard;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::strategy::Strategy;

/// Aggregate result of an arena run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaReport {
    pub player0: String,
    pub player1: String,
    /// Games played (two per pair)
    pub games: u32,
    pub strategy0_wins: u32,
    pub strategy1_wins: u32,
    pub draws: u32,
    /// Sum of strategy 0's per-game scores
    pub strategy0_score: f64,
    /// `strategy0_score / games`
    pub win_rate: f64,
}

/// Play one game from `start` to completion.
///
/// `first` moves whenever the first player is to move, `second` otherwise.
/// Returns the final position. A strategy answering with an illegal column
/// is an error.
pub fn play_game(
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
    start: BitBoard,
) -> Result<BitBoard> {
    let mut board = start;
    while !board.is_done() {
        let strategy: &mut dyn Strategy = if board.mover_is_first() {
            &mut *first
        } else {
            &mut *second
        };
        let column = strategy.choose(&board);
        board
            .try_play(column)
            .map_err(|e| anyhow!("{} chose column {}: {}", strategy.name(), column, e))?;
    }
    Ok(board)
}

/// Play `pairs` game pairs between `strategies[0]` and `strategies[1]`,
/// swapping colours within each pair.
pub fn evaluate(strategies: &mut [Box<dyn Strategy>; 2], pairs: u32) -> Result<ArenaReport> {
    let [s0, s1] = strategies;
    let mut report = ArenaReport {
        player0: s0.name().to_string(),
        player1: s1.name().to_string(),
        games: 0,
        strategy0_wins: 0,
        strategy1_wins: 0,
        draws: 0,
        strategy0_score: 0.0,
        win_rate: 0.0,
    };

    for pair in 0..pairs {
        for seat in 0..2 {
            let board = if seat == 0 {
                play_game(&mut **s0, &mut **s1, BitBoard::new())?
            } else {
                play_game(&mut **s1, &mut **s0, BitBoard::new())?
            };

            let mut score = board.first_player_score();
            if seat == 1 {
                score = 1.0 - score;
            }
            debug!(pair, seat, score, moves = board.moves_played(), "Game finished\n{}", board);

            report.games += 1;
            report.strategy0_score += score;
            if score > 0.5 {
                report.strategy0_wins += 1;
            } else if score < 0.5 {
                report.strategy1_wins += 1;
            } else {
                report.draws += 1;
            }
        }

        report.win_rate = report.strategy0_score / report.games as f64;
        info!(
            pair,
            games = report.games,
            win_rate = format!("{:.3}", report.win_rate),
            "Pair complete"
        );
    }

    info!(
        player0 = %report.player0,
        player1 = %report.player1,
        games = report.games,
        wins = report.strategy0_wins,
        losses = report.strategy1_wins,
        draws = report.draws,
        "Winning rate of {} against {}: {:.3}",
        report.player0,
        report.player1,
        report.win_rate
    );

    Ok(report)
}

/// Write `report` as pretty JSON (write-then-rename).
pub fn write_report(report: &ArenaReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(anyhow!("failed to write report to {}: {}", path.display(), e));
    }

    info!("Wrote arena report to {}", path.display());
    Ok(())
}
