//! crush-engine - match-3 game logic and simulation engine.
//!
//! Provides level layout loading, match detection, legal-swap enumeration,
//! and the board engine that drives the swap/cascade/refill turn loop.

pub mod draw;
pub mod layout;
pub mod level;
pub mod matcher;
pub mod validator;

pub use layout::{LayoutError, LevelLayout};
pub use level::{CascadeStep, IllegalSwap, Level, Outcome, Phase, TurnReport};
pub use matcher::detect_chains;
pub use validator::{find_legal_swaps, has_run_at_least_3};
