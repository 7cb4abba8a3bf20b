//! The board engine - owns the grid, mask, budgets, and the turn loop.

use crate::draw;
use crate::layout::LevelLayout;
use crate::matcher;
use crate::validator;
use crush_core::{Chain, Grid, Promotion, Swap, TileMask, Token, TokenKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points per matched token beyond the minimum run of two.
const SCORE_PER_EXTRA: u32 = 60;

/// A swap that is not in the current legal-move set. The board is untouched.
#[derive(Debug, Error, PartialEq)]
#[error("not a legal move: {0}")]
pub struct IllegalSwap(pub Swap);

/// Where the engine is within a player turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    AwaitingInput,
    Resolving,
    Settled,
}

/// How a settled turn ended the game, if it did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    OutOfMoves,
}

/// One detect/resolve/gravity/refill round of a cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Chains resolved this round, in resolution order, scores filled in.
    pub chains: Vec<Chain>,
    /// Per-column tokens that fell, in drop order. Columns without movement
    /// are omitted.
    pub falls: Vec<Vec<Token>>,
    /// Per-column tokens created by the refill, topmost first.
    pub spawns: Vec<Vec<Token>>,
}

/// Everything the presentation layer needs to animate one turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnReport {
    pub steps: Vec<CascadeStep>,
    pub score_gained: u32,
    pub score: u32,
    pub moves_left: u32,
    pub outcome: Option<Outcome>,
}

/// The central state machine. Owns every piece of board state exclusively;
/// collaborators receive values, never references into the grid.
#[derive(Clone, Debug)]
pub struct Level {
    mask: TileMask,
    tokens: Grid<Token>,
    possible_swaps: FxHashSet<Swap>,
    combo_multiplier: u32,
    target_score: u32,
    moves_left: u32,
    score: u32,
    phase: Phase,
    rng: StdRng,
}

impl Level {
    /// Board seeded from OS entropy.
    pub fn new(layout: LevelLayout) -> Self {
        Self::from_parts(layout, StdRng::from_os_rng())
    }

    /// Board with a fixed seed - playouts and tests are reproducible.
    pub fn with_seed(layout: LevelLayout, seed: u64) -> Self {
        Self::from_parts(layout, StdRng::seed_from_u64(seed))
    }

    fn from_parts(layout: LevelLayout, rng: StdRng) -> Self {
        let tokens = Grid::new(layout.mask.width(), layout.mask.height());
        Self {
            mask: layout.mask,
            tokens,
            possible_swaps: FxHashSet::default(),
            combo_multiplier: 1,
            target_score: layout.target_score,
            moves_left: layout.moves,
            score: 0,
            phase: Phase::AwaitingInput,
            rng,
        }
    }

    pub fn width(&self) -> usize {
        self.tokens.width()
    }

    pub fn height(&self) -> usize {
        self.tokens.height()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mask(&self) -> &TileMask {
        &self.mask
    }

    pub fn tokens(&self) -> &Grid<Token> {
        &self.tokens
    }

    pub fn token_at(&self, column: usize, row: usize) -> Option<&Token> {
        self.tokens.get(column, row)
    }

    pub fn is_playable(&self, column: usize, row: usize) -> bool {
        self.mask.is_playable(column, row)
    }

    /// The cached legal-move set for the current board.
    pub fn legal_swaps(&self) -> &FxHashSet<Swap> {
        &self.possible_swaps
    }

    /// Place a token directly, bypassing the draw rules. Tooling and test
    /// hook; panics when the cell is not playable.
    pub fn place(&mut self, column: usize, row: usize, kind: TokenKind, promotion: Promotion) {
        assert!(
            self.mask.is_playable(column, row),
            "cell ({}, {}) is not playable",
            column,
            row
        );
        self.tokens
            .set(column, row, Token::promoted(column, row, kind, promotion));
    }

    /// Deal a fresh board: fill every playable cell, rejecting draws that
    /// would complete a run, and repeat the whole deal until at least one
    /// legal swap exists. Returns the dealt tokens.
    pub fn shuffle(&mut self) -> Vec<Token> {
        loop {
            let created = self.initial_fill();
            self.recompute_legal_moves();
            if !self.possible_swaps.is_empty() {
                return created;
            }
        }
    }

    fn initial_fill(&mut self) -> Vec<Token> {
        self.tokens.clear();
        let mut created = Vec::new();
        for row in 0..self.tokens.height() {
            for column in 0..self.tokens.width() {
                if !self.mask.is_playable(column, row) {
                    continue;
                }
                let kind = draw::random_kind_no_run(&mut self.rng, &self.tokens, column, row);
                let token = Token::new(column, row, kind);
                self.tokens.set(column, row, token);
                created.push(token);
            }
        }
        created
    }

    pub fn recompute_legal_moves(&mut self) {
        self.possible_swaps = validator::find_legal_swaps(&mut self.tokens);
    }

    pub fn is_legal(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// Exchange the two tokens' cells and update each token's coordinates.
    /// Pure state mutation; callers gate on `is_legal` first.
    pub fn apply_swap(&mut self, swap: &Swap) {
        let (ca, ra) = (swap.a.column, swap.a.row);
        let (cb, rb) = (swap.b.column, swap.b.row);
        let a = self.tokens.take(ca, ra);
        let b = self.tokens.take(cb, rb);
        if let Some(mut b) = b {
            b.column = ca;
            b.row = ra;
            self.tokens.set(ca, ra, b);
        }
        if let Some(mut a) = a {
            a.column = cb;
            a.row = rb;
            self.tokens.set(cb, rb, a);
        }
    }

    /// One detect/resolve pass: find chains, apply removals and promotions,
    /// compute scores. Returns the resolved chains in resolution order; an
    /// empty result means the cascade has settled.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut chains: Vec<Chain> = matcher::detect_chains(&self.tokens, &self.mask)
            .into_iter()
            .collect();
        chains.sort_by_key(matcher::resolution_rank);
        for chain in &mut chains {
            self.resolve_chain(chain);
            chain.score = SCORE_PER_EXTRA * (chain.len() as u32).saturating_sub(2) * self.combo_multiplier;
            self.combo_multiplier += 1;
        }
        chains
    }

    /// Length 4 with no promoted member promotes the anchor to Combo, length
    /// 5+ to Super; everything else in the chain is cleared. A chain that
    /// already carries a promoted token clears outright regardless of length.
    fn resolve_chain(&mut self, chain: &Chain) {
        let promote_to = if chain.contains_promoted() {
            None
        } else if chain.len() == 4 {
            Some(Promotion::Combo)
        } else if chain.len() >= 5 {
            Some(Promotion::Super)
        } else {
            None
        };
        let mut tokens = chain.tokens().iter();
        if let Some(promotion) = promote_to {
            if let Some(anchor) = tokens.next() {
                // an earlier overlapping chain may have cleared the anchor
                // cell already; the promotion is then skipped
                if let Some(resident) = self.tokens.get_mut(anchor.column, anchor.row) {
                    resident.promotion = promotion;
                }
            }
        }
        for token in tokens {
            self.tokens.take(token.column, token.row);
        }
    }

    /// Gravity: per column, drop the nearest token above into each empty
    /// playable cell. Returns the moved tokens grouped per column, in drop
    /// order; columns without movement are omitted.
    pub fn fill_holes(&mut self) -> Vec<Vec<Token>> {
        let mut columns = Vec::new();
        for column in 0..self.tokens.width() {
            let mut moved = Vec::new();
            for row in 0..self.tokens.height() {
                if !self.mask.is_playable(column, row) || !self.tokens.is_empty_at(column, row) {
                    continue;
                }
                for lookup in row + 1..self.tokens.height() {
                    if let Some(mut token) = self.tokens.take(column, lookup) {
                        token.row = row;
                        self.tokens.set(column, row, token);
                        moved.push(token);
                        break;
                    }
                }
            }
            if !moved.is_empty() {
                columns.push(moved);
            }
        }
        columns
    }

    /// Refill: per column, create a token for every empty playable cell from
    /// the top down. Each draw must differ from the previous draw of the
    /// same pass; the constraint carries across columns. Returns the created
    /// tokens grouped per column, topmost first.
    pub fn top_up(&mut self) -> Vec<Vec<Token>> {
        let mut columns = Vec::new();
        let mut previous: Option<TokenKind> = None;
        for column in 0..self.tokens.width() {
            let mut created = Vec::new();
            for row in (0..self.tokens.height()).rev() {
                if !self.tokens.is_empty_at(column, row) {
                    break;
                }
                if !self.mask.is_playable(column, row) {
                    continue;
                }
                let kind = draw::random_kind_excluding(&mut self.rng, previous);
                previous = Some(kind);
                let token = Token::new(column, row, kind);
                self.tokens.set(column, row, token);
                created.push(token);
            }
            if !created.is_empty() {
                columns.push(created);
            }
        }
        columns
    }

    /// Settle the turn: spend a move, reset the combo multiplier, refresh
    /// the legal-move set, and report how the game ended, if it did. The
    /// won check takes precedence over running out of moves.
    pub fn begin_next_turn(&mut self) -> Option<Outcome> {
        self.combo_multiplier = 1;
        self.recompute_legal_moves();
        self.moves_left = self.moves_left.saturating_sub(1);
        self.phase = Phase::AwaitingInput;
        if self.score > self.target_score {
            Some(Outcome::Won)
        } else if self.moves_left == 0 {
            Some(Outcome::OutOfMoves)
        } else {
            None
        }
    }

    /// Run one whole player turn: validate the swap, apply it, cascade until
    /// no chains remain, settle. An illegal swap is rejected with the board
    /// untouched.
    pub fn play(&mut self, swap: &Swap) -> Result<TurnReport, IllegalSwap> {
        if !self.is_legal(swap) {
            return Err(IllegalSwap(*swap));
        }
        debug_assert_eq!(self.phase, Phase::AwaitingInput);
        self.phase = Phase::Resolving;
        self.apply_swap(swap);

        let score_before = self.score;
        let mut steps = Vec::new();
        loop {
            let chains = self.remove_matches();
            if chains.is_empty() {
                break;
            }
            for chain in &chains {
                self.score += chain.score;
            }
            let falls = self.fill_holes();
            let spawns = self.top_up();
            steps.push(CascadeStep {
                chains,
                falls,
                spawns,
            });
        }

        self.phase = Phase::Settled;
        let outcome = self.begin_next_turn();
        Ok(TurnReport {
            steps,
            score_gained: self.score - score_before,
            score: self.score,
            moves_left: self.moves_left,
            outcome,
        })
    }
}
