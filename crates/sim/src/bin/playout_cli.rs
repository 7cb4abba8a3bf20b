//! Run seeded random playouts against a level file and print the tally.
//!
//! Usage: playout_cli [LEVEL_JSON] [GAMES] [SEED]
//! Without a level file a fully playable 9x9 board is used.

use anyhow::{Context, Result};
use crush_core::TileMask;
use crush_engine::LevelLayout;
use crush_sim::run_playouts;
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let layout = match args.first() {
        Some(path) => LevelLayout::from_file(path)
            .with_context(|| format!("loading level file {}", path))?,
        None => LevelLayout::new(TileMask::full(9, 9), 1000, 15)
            .context("building the default layout")?,
    };
    let games: u32 = match args.get(1) {
        Some(raw) => raw.parse().context("GAMES must be an integer")?,
        None => 100,
    };
    let seed: u64 = match args.get(2) {
        Some(raw) => raw.parse().context("SEED must be an integer")?,
        None => 1,
    };

    let stats = run_playouts(&layout, seed, games);

    println!(
        "{} games on a {}x{} board (target {}, {} moves)",
        stats.games,
        layout.mask.width(),
        layout.mask.height(),
        layout.target_score,
        layout.moves
    );
    println!(
        "wins: {} ({:.1}%)",
        stats.wins,
        stats.win_rate() * 100.0
    );
    println!("mean score: {:.0}", stats.mean_score());
    println!("best score: {}", stats.best_score);
    println!("deepest cascade: {}", stats.deepest_cascade);
    println!("{}", serde_json::to_string(&stats).context("encoding stats")?);

    Ok(())
}
