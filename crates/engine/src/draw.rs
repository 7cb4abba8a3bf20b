//! Random kind draws with the two rejection-sampling rules.
//! Both loops terminate because the kind enumeration has more than one member.

use crush_core::{Grid, Token, TokenKind};
use rand::Rng;

/// Draw a uniformly random base kind.
pub fn random_kind(rng: &mut impl Rng) -> TokenKind {
    TokenKind::ALL[rng.random_range(0..TokenKind::ALL.len())]
}

/// Draw a kind that differs from `previous`, redrawing until it does.
pub fn random_kind_excluding(rng: &mut impl Rng, previous: Option<TokenKind>) -> TokenKind {
    loop {
        let kind = random_kind(rng);
        if Some(kind) != previous {
            return kind;
        }
    }
}

/// Draw a kind for (column, row) that does not complete a run of three with
/// already-placed neighbors. Fill proceeds in increasing column/row order, so
/// only the two cells to the left and the two below need checking.
pub fn random_kind_no_run(
    rng: &mut impl Rng,
    grid: &Grid<Token>,
    column: usize,
    row: usize,
) -> TokenKind {
    loop {
        let kind = random_kind(rng);
        let left_pair = column >= 2
            && kind_at(grid, column - 1, row) == Some(kind)
            && kind_at(grid, column - 2, row) == Some(kind);
        let below_pair = row >= 2
            && kind_at(grid, column, row - 1) == Some(kind)
            && kind_at(grid, column, row - 2) == Some(kind);
        if !left_pair && !below_pair {
            return kind;
        }
    }
}

fn kind_at(grid: &Grid<Token>, column: usize, row: usize) -> Option<TokenKind> {
    grid.get(column, row).map(|token| token.kind)
}
