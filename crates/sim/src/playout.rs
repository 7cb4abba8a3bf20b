//! Random playouts - drive whole games through the engine and tally results.

use crush_core::Swap;
use crush_engine::{Level, LevelLayout, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Decorrelates the swap picker from the level's own draw stream.
const PICKER_SALT: u64 = 0x9e3779b97f4a7c15;

/// Result of one full game.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub turns: u32,
    pub score: u32,
    pub won: bool,
    /// Longest cascade observed in any single turn.
    pub deepest_cascade: usize,
}

/// Aggregate over many playouts.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct PlayoutStats {
    pub games: u32,
    pub wins: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub deepest_cascade: usize,
}

impl PlayoutStats {
    pub fn record(&mut self, summary: &GameSummary) {
        self.games += 1;
        if summary.won {
            self.wins += 1;
        }
        self.total_score += summary.score as u64;
        self.best_score = self.best_score.max(summary.score);
        self.deepest_cascade = self.deepest_cascade.max(summary.deepest_cascade);
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games as f64
    }
}

/// Play one game to its outcome, choosing uniformly among legal swaps each
/// turn. Deterministic per (layout, seed).
pub fn play_random_game(layout: &LevelLayout, seed: u64) -> GameSummary {
    let mut level = Level::with_seed(layout.clone(), seed);
    let mut picker = StdRng::seed_from_u64(seed ^ PICKER_SALT);
    level.shuffle();

    let mut turns = 0;
    let mut deepest_cascade = 0;
    let won = loop {
        if level.legal_swaps().is_empty() {
            // a settled board can dead-end; re-deal it, as the game does
            level.shuffle();
        }
        let swaps: Vec<Swap> = level.legal_swaps().iter().copied().collect();
        let swap = swaps[picker.random_range(0..swaps.len())];
        let report = level.play(&swap).expect("picked from the legal-move set");
        turns += 1;
        deepest_cascade = deepest_cascade.max(report.steps.len());
        match report.outcome {
            Some(Outcome::Won) => break true,
            Some(Outcome::OutOfMoves) => break false,
            None => {}
        }
    };

    GameSummary {
        seed,
        turns,
        score: level.score(),
        won,
        deepest_cascade,
    }
}

/// Play `games` seeded playouts and fold them into one stats record.
pub fn run_playouts(layout: &LevelLayout, base_seed: u64, games: u32) -> PlayoutStats {
    let mut stats = PlayoutStats::default();
    for index in 0..games {
        let summary = play_random_game(layout, base_seed.wrapping_add(index as u64));
        stats.record(&summary);
    }
    stats
}
