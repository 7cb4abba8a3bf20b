//! Crush core crate - fundamental value types for the match-3 rules engine.

mod chain;
mod grid;
mod mask;
mod swap;
mod token;

pub use chain::{Blast, Chain, ChainKind};
pub use grid::Grid;
pub use mask::TileMask;
pub use swap::Swap;
pub use token::{Promotion, Token, TokenKind};
