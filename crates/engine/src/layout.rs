//! Level layout loading - tile mask, target score, and move budget.
//!
//! Level files are JSON: `{ "tiles": [[0|1, ...], ...], "targetScore": N,
//! "moves": N }`. The external encoding is top-down; rows are inverted on
//! load so row 0 is the bottom internally. Malformed input fails here, before
//! a board engine instance exists.

use crush_core::TileMask;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile matrix is empty")]
    EmptyTiles,

    #[error("tile matrix is ragged: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("tile matrix height {0} exceeds the supported maximum of {1}")]
    TooTall(usize, usize),

    #[error("target score must be positive")]
    ZeroTargetScore,

    #[error("move budget must be positive")]
    ZeroMoves,
}

/// On-disk shape of a level file.
#[derive(Debug, Deserialize)]
struct RawLayout {
    tiles: Vec<Vec<u8>>,
    #[serde(rename = "targetScore")]
    target_score: u32,
    moves: u32,
}

/// Everything the board engine needs to start a game.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub mask: TileMask,
    pub target_score: u32,
    pub moves: u32,
}

impl LevelLayout {
    pub fn new(mask: TileMask, target_score: u32, moves: u32) -> Result<Self, LayoutError> {
        if target_score == 0 {
            return Err(LayoutError::ZeroTargetScore);
        }
        if moves == 0 {
            return Err(LayoutError::ZeroMoves);
        }
        Ok(Self {
            mask,
            target_score,
            moves,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let raw: RawLayout = serde_json::from_str(text)?;
        if raw.tiles.is_empty() || raw.tiles[0].is_empty() {
            return Err(LayoutError::EmptyTiles);
        }
        if raw.tiles.len() > TileMask::MAX_HEIGHT {
            return Err(LayoutError::TooTall(raw.tiles.len(), TileMask::MAX_HEIGHT));
        }
        let width = raw.tiles[0].len();
        for (row, cells) in raw.tiles.iter().enumerate() {
            if cells.len() != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    got: cells.len(),
                    expected: width,
                });
            }
        }
        // external rows are top-down; flip so rows[0] is the bottom
        let rows: Vec<Vec<bool>> = raw
            .tiles
            .iter()
            .rev()
            .map(|cells| cells.iter().map(|&value| value != 0).collect())
            .collect();
        Self::new(TileMask::from_rows(&rows), raw.target_score, raw.moves)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
