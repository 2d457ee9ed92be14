//! Pure darts match engine.
//!
//! Everything in here is a synchronous state transition over a
//! serializable [`MatchState`]: no I/O, no clock dependence in rule
//! logic, no shared mutable anything. Callers own ordering — commands
//! for one match must be applied serially against the latest snapshot
//! (the service layer guards this with a per-match mutex).

mod dart;
mod match_state;
mod player;
mod rules;

use thiserror::Error;

pub use dart::{BULL, DARTS_PER_TURN, Dart, MAX_SEGMENT};
pub use match_state::{CRICKET_TARGETS, GameMode, MatchState, ModeConfig, Turn};
pub use player::{Player, PlayerSeed, PlayerStats};

/// Errors surfaced by engine transitions. Every error leaves the input
/// snapshot exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The match cannot be opened as requested.
    #[error("invalid match configuration: {0}")]
    InvalidConfiguration(String),
    /// The dart does not exist on a board.
    #[error("impossible dart: segment {segment} with multiplier {multiplier}")]
    InvalidThrow {
        /// Offending segment value.
        segment: u8,
        /// Offending multiplier value.
        multiplier: u8,
    },
    /// The match already has a winner; only undo may touch it.
    #[error("match is already decided")]
    MatchOver,
}
