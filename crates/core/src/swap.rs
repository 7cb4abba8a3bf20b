//! A candidate exchange of two adjacent tokens.

use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An unordered pair of tokens to exchange: `{A, B} == {B, A}`.
/// Legal-move membership relies on this symmetric equality.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Swap {
    pub a: Token,
    pub b: Token,
}

impl Swap {
    pub fn new(a: Token, b: Token) -> Self {
        Self { a, b }
    }

    /// True when the endpoints sit at Manhattan distance 1.
    pub fn is_adjacent(&self) -> bool {
        let dc = self.a.column.abs_diff(self.b.column);
        let dr = self.a.row.abs_diff(self.b.row);
        dc + dr == 1
    }

    pub fn involves_super(&self) -> bool {
        self.a.is_super() || self.b.is_super()
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // hash endpoints in position order so {A,B} and {B,A} agree
        let ka = (self.a.column, self.a.row);
        let kb = (self.b.column, self.b.row);
        let (lo, hi) = if ka <= kb { (ka, kb) } else { (kb, ka) };
        lo.hash(state);
        hi.hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} with {}", self.a, self.b)
    }
}
