//! Legal-swap enumeration - hypothetical swap, match probe, undo.
//! The probe must leave the grid byte-for-byte identical to before.

use crush_core::{Grid, Swap, Token};
use rustc_hash::FxHashSet;

/// Enumerate every adjacent swap on the current board that would produce a
/// match. For each occupied cell only the right and up neighbors are probed;
/// the symmetric pair is covered when the scan reaches the neighbor.
pub fn find_legal_swaps(grid: &mut Grid<Token>) -> FxHashSet<Swap> {
    let mut swaps = FxHashSet::default();
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let Some(token) = grid.get(column, row).copied() else {
                continue;
            };
            if column + 1 < grid.width() {
                probe(grid, &mut swaps, token, column + 1, row);
            }
            if row + 1 < grid.height() {
                probe(grid, &mut swaps, token, column, row + 1);
            }
        }
    }
    swaps
}

/// Hypothetically exchange `token` with the occupant of (other_column,
/// other_row), record the swap if either position then anchors a run, undo.
fn probe(
    grid: &mut Grid<Token>,
    swaps: &mut FxHashSet<Swap>,
    token: Token,
    other_column: usize,
    other_row: usize,
) {
    let Some(other) = grid.get(other_column, other_row).copied() else {
        return;
    };
    // a super paired with anything always resolves
    if token.is_super() || other.is_super() {
        swaps.insert(Swap::new(token, other));
        return;
    }
    let (column, row) = (token.column, token.row);
    grid.swap_cells((column, row), (other_column, other_row));
    if has_run_at_least_3(grid, column, row) || has_run_at_least_3(grid, other_column, other_row) {
        swaps.insert(Swap::new(token, other));
    }
    grid.swap_cells((column, row), (other_column, other_row));
}

/// True when the token at (column, row) sits in a horizontal or vertical run
/// of three or more, under the run-kind equivalence (combo tokens count as
/// their base kind, super tokens never match).
pub fn has_run_at_least_3(grid: &Grid<Token>, column: usize, row: usize) -> bool {
    let Some(kind) = grid.get(column, row).and_then(Token::run_kind) else {
        return false;
    };
    let matches = |c: usize, r: usize| {
        grid.get(c, r).and_then(Token::run_kind) == Some(kind)
    };

    let mut horizontal = 1;
    let mut c = column;
    while c > 0 && matches(c - 1, row) {
        c -= 1;
        horizontal += 1;
    }
    c = column;
    while c + 1 < grid.width() && matches(c + 1, row) {
        c += 1;
        horizontal += 1;
    }
    if horizontal >= 3 {
        return true;
    }

    let mut vertical = 1;
    let mut r = row;
    while r > 0 && matches(column, r - 1) {
        r -= 1;
        vertical += 1;
    }
    r = row;
    while r + 1 < grid.height() && matches(column, r + 1) {
        r += 1;
        vertical += 1;
    }
    vertical >= 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crush_core::{Promotion, TokenKind};

    fn place(grid: &mut Grid<Token>, column: usize, row: usize, kind: TokenKind) {
        grid.set(column, row, Token::new(column, row, kind));
    }

    /// 3x3 board where swapping (0,0) with (1,0) lines up three Donuts in
    /// column 0.
    ///
    /// ```text
    /// row 2:  D  .  .
    /// row 1:  D  .  .
    /// row 0:  C  D  C
    /// ```
    fn swap_into_column_board() -> Grid<Token> {
        let mut grid = Grid::new(3, 3);
        place(&mut grid, 0, 0, TokenKind::Cupcake);
        place(&mut grid, 1, 0, TokenKind::Donut);
        place(&mut grid, 2, 0, TokenKind::Cupcake);
        place(&mut grid, 0, 1, TokenKind::Donut);
        place(&mut grid, 0, 2, TokenKind::Donut);
        grid
    }

    #[test]
    fn test_finds_the_one_legal_swap() {
        let mut grid = swap_into_column_board();
        let swaps = find_legal_swaps(&mut grid);
        let expected = Swap::new(
            Token::new(0, 0, TokenKind::Cupcake),
            Token::new(1, 0, TokenKind::Donut),
        );
        assert!(swaps.contains(&expected));
        assert_eq!(swaps.len(), 1);
    }

    #[test]
    fn test_probe_does_not_mutate_grid() {
        let mut grid = swap_into_column_board();
        let before = grid.clone();
        find_legal_swaps(&mut grid);
        assert_eq!(grid, before);
        // token payloads too, not just positional equality
        for (column, row, token) in before.iter() {
            let probed = grid.get(column, row).copied();
            assert_eq!(probed.map(|t| t.kind), Some(token.kind));
            assert_eq!(probed.map(|t| t.promotion), Some(token.promotion));
        }
    }

    #[test]
    fn test_no_legal_swaps_on_scattered_board() {
        // alternating kinds leave nothing to line up
        let mut grid = Grid::new(3, 3);
        let kinds = [TokenKind::Croissant, TokenKind::Danish, TokenKind::Macaroon];
        for row in 0..3 {
            for column in 0..3 {
                place(&mut grid, column, row, kinds[(column + 2 * row) % 3]);
            }
        }
        assert!(find_legal_swaps(&mut grid).is_empty());
    }

    #[test]
    fn test_super_swap_is_always_legal() {
        let mut grid = Grid::new(3, 3);
        place(&mut grid, 0, 0, TokenKind::Croissant);
        grid.set(
            1,
            0,
            Token::promoted(1, 0, TokenKind::Donut, Promotion::Super),
        );
        let swaps = find_legal_swaps(&mut grid);
        let expected = Swap::new(
            Token::new(0, 0, TokenKind::Croissant),
            Token::promoted(1, 0, TokenKind::Donut, Promotion::Super),
        );
        assert!(swaps.contains(&expected));
    }

    #[test]
    fn test_combo_counts_as_base_kind() {
        let mut grid = swap_into_column_board();
        // replace one column Donut with a combo Donut - swap stays legal
        grid.set(
            0,
            2,
            Token::promoted(0, 2, TokenKind::Donut, Promotion::Combo),
        );
        let swaps = find_legal_swaps(&mut grid);
        assert_eq!(swaps.len(), 1);
    }

    #[test]
    fn test_has_run_on_empty_cell_is_false() {
        let grid: Grid<Token> = Grid::new(3, 3);
        assert!(!has_run_at_least_3(&grid, 1, 1));
    }
}
