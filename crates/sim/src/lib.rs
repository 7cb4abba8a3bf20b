//! Crush sim crate - headless random playouts and aggregate stats.

mod playout;

pub use playout::{play_random_game, run_playouts, GameSummary, PlayoutStats};
