//! Cricket rules: mark targets to three, score overflow on segments
//! opponents still have open, win by closing everything while leading.

use crate::engine::{dart::Dart, match_state::MatchState};

/// Marks needed to close a segment.
const CLOSED: u8 = 3;

/// Mark the hit segment and bank overflow points where they count.
///
/// Segments outside the target set are dead: the dart still counts in
/// the player's throw statistics but has no Cricket effect.
pub(super) fn apply(state: &mut MatchState, dart: Dart) {
    if !is_target(state, dart.segment) {
        return;
    }

    let seat = state.current_player_index;
    let current = state.players[seat].marks_on(dart.segment);
    let hits = current + dart.multiplier;
    let new_marks = hits.min(CLOSED);
    let overflow = hits.saturating_sub(CLOSED);

    if let Some(marks) = state.players[seat].cricket_marks.as_mut() {
        marks.insert(dart.segment, new_marks);
    }

    if new_marks == CLOSED && overflow > 0 && any_opponent_open(state, seat, dart.segment) {
        state.players[seat].score += i32::from(dart.segment) * i32::from(overflow);
    }

    maybe_declare_winner(state, seat);
}

/// Take the popped dart's marks back, floored at zero.
///
/// Points banked when a close overflowed are deliberately not
/// reclaimed; the score history cannot tell how much of the overflow
/// still applied at the time.
pub(super) fn undo(state: &mut MatchState, dart: Dart) {
    if !is_target(state, dart.segment) {
        return;
    }

    let seat = state.current_player_index;
    if let Some(marks) = state.players[seat].cricket_marks.as_mut()
        && let Some(entry) = marks.get_mut(&dart.segment)
    {
        *entry = entry.saturating_sub(dart.multiplier);
    }
}

fn is_target(state: &MatchState, segment: u8) -> bool {
    state
        .config
        .targets()
        .is_some_and(|targets| targets.contains(&segment))
}

/// Whether any other seat still has the segment open.
fn any_opponent_open(state: &MatchState, seat: usize, segment: u8) -> bool {
    state
        .players
        .iter()
        .enumerate()
        .any(|(other, player)| other != seat && !player.has_closed(segment))
}

/// Declare the win the instant the player has every target closed and
/// no opponent holds a strictly higher score. An equal score resolves
/// in favor of the player who just closed.
fn maybe_declare_winner(state: &mut MatchState, seat: usize) {
    let Some(targets) = state.config.targets() else {
        return;
    };
    let player = &state.players[seat];
    if !targets.iter().all(|&target| player.has_closed(target)) {
        return;
    }

    let leading = state
        .players
        .iter()
        .enumerate()
        .all(|(other, rival)| other == seat || rival.score <= player.score);
    if leading {
        state.winner = Some(player.id);
    }
}
