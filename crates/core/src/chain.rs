//! A group of tokens removed together in one match, with its computed score.

use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Axis the match was discovered on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum ChainKind {
    Horizontal,
    Vertical,
}

/// How far beyond the matched run the chain reaches.
/// `Line` is a combo detonation of a whole row or column; `Board` is a super
/// detonation sweeping the whole board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Blast {
    None,
    Line,
    Board,
}

/// An ordered sequence of matched tokens. Built once per resolution pass by
/// the match detector and discarded after the engine applies its effects.
///
/// Equality and hashing are by token sequence only, so chains discovered twice
/// collapse under set semantics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chain {
    pub kind: ChainKind,
    pub blast: Blast,
    pub score: u32,
    tokens: Vec<Token>,
}

impl Chain {
    pub fn new(kind: ChainKind) -> Self {
        Self::with_blast(kind, Blast::None)
    }

    pub fn with_blast(kind: ChainKind, blast: Blast) -> Self {
        Self {
            kind,
            blast,
            score: 0,
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn contains_promoted(&self) -> bool {
        self.tokens.iter().any(Token::is_promoted)
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // order-independent fold over positions, consistent with sequence
        // equality (equal sequences fold to the same value)
        let mut acc = 0u64;
        for token in &self.tokens {
            let cell = ((token.row as u64) << 32) | token.column as u64;
            acc ^= cell.wrapping_mul(0x9e3779b97f4a7c15);
        }
        acc.hash(state);
    }
}
