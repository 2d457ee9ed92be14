//! Mode-specific scoring rules, dispatched per throw and per undo.

mod clock;
mod cricket;
mod x01;

use crate::engine::{
    dart::Dart,
    match_state::{GameMode, MatchState},
};

/// Run the active mode's rules for a dart that has already been
/// appended to the player's history and the current turn.
pub(crate) fn apply(state: &mut MatchState, dart: Dart) {
    match state.mode {
        GameMode::X501 | GameMode::X301 => x01::apply(state, dart),
        GameMode::Cricket => cricket::apply(state, dart),
        GameMode::AroundTheClock => clock::apply(state, dart),
    }
}

/// Reverse the active mode's effect for a dart being taken back.
pub(crate) fn undo(state: &mut MatchState, dart: Dart) {
    match state.mode {
        GameMode::X501 | GameMode::X301 => x01::undo(state, dart),
        GameMode::Cricket => cricket::undo(state, dart),
        GameMode::AroundTheClock => clock::undo(state, dart),
    }
}
