//! Around-the-Clock rules: hit 1 through 20 in order, then the bull.

use crate::engine::{
    dart::{BULL, Dart, MAX_SEGMENT},
    match_state::MatchState,
};

/// Advance the player's target when the dart hits it; the multiplier
/// is irrelevant. Twenty hands over to the bull, and the bull at the
/// end of the sequence decides the match.
pub(super) fn apply(state: &mut MatchState, dart: Dart) {
    let seat = state.current_player_index;
    let player = &mut state.players[seat];
    let Some(target) = player.current_target else {
        return;
    };
    if dart.segment != target {
        return;
    }

    match target {
        MAX_SEGMENT => player.current_target = Some(BULL),
        BULL => state.winner = Some(state.players[seat].id),
        step => player.current_target = Some(step + 1),
    }
}

/// Rewind the target only when the popped dart is the hit that
/// produced the current one. A missed dart changed nothing and a
/// winning bull leaves the target parked on 25, so both stay as-is.
pub(super) fn undo(state: &mut MatchState, dart: Dart) {
    let seat = state.current_player_index;
    let player = &mut state.players[seat];
    let Some(target) = player.current_target else {
        return;
    };

    let advanced_to = match dart.segment {
        MAX_SEGMENT => BULL,
        BULL => return,
        step => step + 1,
    };
    if target == advanced_to {
        player.current_target = Some(dart.segment);
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{GameMode, MatchState, PlayerSeed};

    fn start(names: &[&str]) -> MatchState {
        let seeds = names
            .iter()
            .map(|name| PlayerSeed {
                id: None,
                name: (*name).to_string(),
            })
            .collect();
        MatchState::start(GameMode::AroundTheClock, seeds).unwrap()
    }

    #[test]
    fn hits_advance_through_the_sequence() {
        let state = start(&["a"]);
        let state = state.apply_throw(1, 1).unwrap();
        assert_eq!(state.players[0].current_target, Some(2));
        let state = state.apply_throw(2, 1).unwrap();
        assert_eq!(state.players[0].current_target, Some(3));
    }

    #[test]
    fn multiplier_does_not_matter_for_an_advance() {
        let state = start(&["a"]);
        let state = state.apply_throw(1, 3).unwrap();
        assert_eq!(state.players[0].current_target, Some(2));
    }

    #[test]
    fn misses_leave_the_target_alone() {
        let state = start(&["a"]);
        let state = state.apply_throw(7, 1).unwrap();
        assert_eq!(state.players[0].current_target, Some(1));
        assert_eq!(state.players[0].stats.darts_thrown, 1);
    }

    #[test]
    fn twenty_hands_over_to_the_bull() {
        let mut state = start(&["a"]);
        state.players[0].current_target = Some(20);
        let state = state.apply_throw(20, 1).unwrap();
        assert_eq!(state.players[0].current_target, Some(25));
    }

    #[test]
    fn bull_at_the_end_of_the_sequence_wins() {
        let mut state = start(&["a", "b"]);
        state.players[0].current_target = Some(25);
        let state = state.apply_throw(25, 1).unwrap();
        assert_eq!(state.winner, Some(state.players[0].id));
    }

    #[test]
    fn double_bull_wins_just_the_same() {
        let mut state = start(&["a"]);
        state.players[0].current_target = Some(25);
        let state = state.apply_throw(25, 2).unwrap();
        assert!(state.is_over());
    }

    #[test]
    fn undo_rewinds_the_advancing_hit() {
        let state = start(&["a"]);
        let state = state.apply_throw(1, 1).unwrap();
        let undone = state.undo_last_throw();
        assert_eq!(undone.players[0].current_target, Some(1));
    }

    #[test]
    fn undo_of_a_miss_leaves_the_target_alone() {
        let mut state = start(&["a"]);
        state.players[0].current_target = Some(5);
        let state = state.apply_throw(9, 1).unwrap();
        let undone = state.undo_last_throw();
        assert_eq!(undone.players[0].current_target, Some(5));
    }

    #[test]
    fn undo_of_the_winning_bull_keeps_the_target_parked() {
        let mut state = start(&["a", "b"]);
        state.players[0].current_target = Some(25);
        let decided = state.apply_throw(25, 1).unwrap();
        assert!(decided.is_over());

        let revived = decided.undo_last_throw();
        assert!(revived.winner.is_none());
        // Documented asymmetry: the target stays on the bull.
        assert_eq!(revived.players[0].current_target, Some(25));
    }
}
