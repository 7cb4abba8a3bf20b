//! Match detection - horizontal/vertical runs plus combo and super detonations.

use crush_core::{Blast, Chain, ChainKind, Grid, TileMask, Token, TokenKind};
use rustc_hash::FxHashSet;

/// Scan the occupancy grid for every chain the current board yields: plain
/// runs of three or more, whole-line combo detonations, and board-wide super
/// sweeps. Chains with identical token sequences collapse under set
/// semantics; nothing else is de-duplicated.
pub fn detect_chains(grid: &Grid<Token>, mask: &TileMask) -> FxHashSet<Chain> {
    let mut chains = FxHashSet::default();
    detect_horizontal(grid, mask, &mut chains);
    detect_vertical(grid, mask, &mut chains);
    detect_super_adjacent(grid, &mut chains);
    chains
}

/// Deterministic resolution order: board sweeps detonate first, then line
/// detonations, then plain runs; ties break by axis then anchor position.
pub(crate) fn resolution_rank(chain: &Chain) -> (u8, u8, usize, usize) {
    let class = match chain.blast {
        Blast::Board => 0,
        Blast::Line => 1,
        Blast::None => 2,
    };
    let axis = match chain.kind {
        ChainKind::Horizontal => 0,
        ChainKind::Vertical => 1,
    };
    let (column, row) = chain
        .first()
        .map(|token| (token.column, token.row))
        .unwrap_or((0, 0));
    (class, axis, row, column)
}

fn run_kind_at(grid: &Grid<Token>, column: usize, row: usize) -> Option<TokenKind> {
    grid.get(column, row).and_then(Token::run_kind)
}

fn detect_horizontal(grid: &Grid<Token>, mask: &TileMask, out: &mut FxHashSet<Chain>) {
    for row in 0..grid.height() {
        let mut column = 0;
        while column + 2 < grid.width() {
            let Some(kind) = run_kind_at(grid, column, row) else {
                column += 1;
                continue;
            };
            if run_kind_at(grid, column + 1, row) != Some(kind)
                || run_kind_at(grid, column + 2, row) != Some(kind)
            {
                column += 1;
                continue;
            }
            let mut chain = Chain::new(ChainKind::Horizontal);
            let mut has_combo = false;
            while column < grid.width() && run_kind_at(grid, column, row) == Some(kind) {
                if let Some(token) = grid.get(column, row) {
                    has_combo |= token.is_combo();
                    chain.push(*token);
                }
                column += 1;
            }
            if has_combo {
                // a combo in the run detonates the whole row
                out.insert(line_chain_row(grid, mask, row));
            } else {
                out.insert(chain);
            }
        }
    }
}

fn detect_vertical(grid: &Grid<Token>, mask: &TileMask, out: &mut FxHashSet<Chain>) {
    for column in 0..grid.width() {
        let mut row = 0;
        while row + 2 < grid.height() {
            let Some(kind) = run_kind_at(grid, column, row) else {
                row += 1;
                continue;
            };
            if run_kind_at(grid, column, row + 1) != Some(kind)
                || run_kind_at(grid, column, row + 2) != Some(kind)
            {
                row += 1;
                continue;
            }
            let mut chain = Chain::new(ChainKind::Vertical);
            let mut has_combo = false;
            while row < grid.height() && run_kind_at(grid, column, row) == Some(kind) {
                if let Some(token) = grid.get(column, row) {
                    has_combo |= token.is_combo();
                    chain.push(*token);
                }
                row += 1;
            }
            if has_combo {
                out.insert(line_chain_column(grid, mask, column));
            } else {
                out.insert(chain);
            }
        }
    }
}

fn line_chain_row(grid: &Grid<Token>, mask: &TileMask, row: usize) -> Chain {
    let mut chain = Chain::with_blast(ChainKind::Horizontal, Blast::Line);
    for column in 0..grid.width() {
        if mask.is_playable(column, row) {
            if let Some(token) = grid.get(column, row) {
                chain.push(*token);
            }
        }
    }
    chain
}

fn line_chain_column(grid: &Grid<Token>, mask: &TileMask, column: usize) -> Chain {
    let mut chain = Chain::with_blast(ChainKind::Vertical, Blast::Line);
    for row in 0..grid.height() {
        if mask.is_playable(column, row) {
            if let Some(token) = grid.get(column, row) {
                chain.push(*token);
            }
        }
    }
    chain
}

/// Every token adjacent to a super token triggers a board-wide sweep of the
/// neighbor's kind, once per discovered adjacency. Two adjacent supers sweep
/// the entire board.
fn detect_super_adjacent(grid: &Grid<Token>, out: &mut FxHashSet<Chain>) {
    for (column, row, token) in grid.iter() {
        if !token.is_super() {
            continue;
        }
        let neighbors = [
            (column.checked_sub(1), Some(row), ChainKind::Horizontal),
            (Some(column + 1), Some(row), ChainKind::Horizontal),
            (Some(column), row.checked_sub(1), ChainKind::Vertical),
            (Some(column), Some(row + 1), ChainKind::Vertical),
        ];
        for (nc, nr, axis) in neighbors {
            let (Some(nc), Some(nr)) = (nc, nr) else {
                continue;
            };
            if nc >= grid.width() || nr >= grid.height() {
                continue;
            }
            let Some(neighbor) = grid.get(nc, nr) else {
                continue;
            };
            let chain = if neighbor.is_super() {
                board_sweep_all(grid, axis)
            } else {
                board_sweep(grid, axis, *token, neighbor.kind)
            };
            out.insert(chain);
        }
    }
}

/// The triggering super followed by every non-super token of `kind`,
/// board-wide in row-major order.
fn board_sweep(grid: &Grid<Token>, axis: ChainKind, origin: Token, kind: TokenKind) -> Chain {
    let mut chain = Chain::with_blast(axis, Blast::Board);
    chain.push(origin);
    for (_, _, token) in grid.iter() {
        if !token.is_super() && token.kind == kind {
            chain.push(*token);
        }
    }
    chain
}

/// Super swapped against super: the sweep takes every token on the board.
fn board_sweep_all(grid: &Grid<Token>, axis: ChainKind) -> Chain {
    let mut chain = Chain::with_blast(axis, Blast::Board);
    for (_, _, token) in grid.iter() {
        chain.push(*token);
    }
    chain
}
