//! Countdown rules for 501 and 301: subtract, bust, double-out.

use crate::engine::{dart::Dart, match_state::MatchState};

/// Subtract the dart from the player's remaining score.
///
/// A remainder below zero, or exactly zero on a non-double, is a bust:
/// every dart of the turn is refunded and the turn closes on the spot.
/// Exactly zero on a double checks the leg out and decides the match.
pub(super) fn apply(state: &mut MatchState, dart: Dart) {
    let seat = state.current_player_index;
    let remaining = state.players[seat].score - dart.score;

    if remaining < 0 || (remaining == 0 && !dart.is_double()) {
        // The busting dart itself never scored; refund the earlier
        // darts of the turn.
        let refund: i32 = state
            .current_darts
            .iter()
            .take(state.current_darts.len().saturating_sub(1))
            .map(|d| d.score)
            .sum();
        state.players[seat].score += refund;
        state.end_turn_now();
        return;
    }

    if remaining == 0 {
        let turn_score: i32 = state.current_darts.iter().map(|d| d.score).sum();
        let player = &mut state.players[seat];
        player.score = 0;
        player.stats.highest_checkout = player.stats.highest_checkout.max(turn_score);
        state.winner = Some(state.players[seat].id);
        return;
    }

    state.players[seat].score = remaining;
}

/// Refund the popped dart. Busted turns have already rotated away and
/// can no longer reach this path.
pub(super) fn undo(state: &mut MatchState, dart: Dart) {
    let seat = state.current_player_index;
    state.players[seat].score += dart.score;
}
