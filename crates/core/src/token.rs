//! Token kinds, promotion states, and the token value itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Closed enumeration of base token flavors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl TokenKind {
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Croissant,
        TokenKind::Cupcake,
        TokenKind::Danish,
        TokenKind::Donut,
        TokenKind::Macaroon,
        TokenKind::SugarCookie,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Croissant => "Croissant",
            TokenKind::Cupcake => "Cupcake",
            TokenKind::Danish => "Danish",
            TokenKind::Donut => "Donut",
            TokenKind::Macaroon => "Macaroon",
            TokenKind::SugarCookie => "SugarCookie",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Special state earned by larger matches, orthogonal to the base kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Promotion {
    #[default]
    None,
    Combo,
    Super,
}

/// A single matchable unit on the board.
///
/// Equality and hashing are positional: two tokens are equal when co-located,
/// regardless of kind or promotion. This matches swap and move-deduplication
/// semantics; compare `kind`/`promotion` explicitly where identity of the
/// piece itself matters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Token {
    pub column: usize,
    pub row: usize,
    pub kind: TokenKind,
    pub promotion: Promotion,
}

impl Token {
    pub fn new(column: usize, row: usize, kind: TokenKind) -> Self {
        Self {
            column,
            row,
            kind,
            promotion: Promotion::None,
        }
    }

    pub fn promoted(column: usize, row: usize, kind: TokenKind, promotion: Promotion) -> Self {
        Self {
            column,
            row,
            kind,
            promotion,
        }
    }

    pub fn is_combo(&self) -> bool {
        self.promotion == Promotion::Combo
    }

    pub fn is_super(&self) -> bool {
        self.promotion == Promotion::Super
    }

    pub fn is_promoted(&self) -> bool {
        self.promotion != Promotion::None
    }

    /// The kind this token contributes to run matching. Combo tokens match by
    /// their base kind; super tokens never join runs.
    pub fn run_kind(&self) -> Option<TokenKind> {
        (!self.is_super()).then_some(self.kind)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.row.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.kind, self.column, self.row)
    }
}
