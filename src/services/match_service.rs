//! Business logic powering the match REST routes. These helpers
//! coordinate input sanitation, the pure engine transitions, and the
//! registry's single-writer-per-match locking.

use std::{collections::HashSet, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::game::{CreateMatchRequest, MatchListItem, MatchSnapshot, PlayerInput, ThrowRequest},
    engine::{MatchState, PlayerSeed},
    error::ServiceError,
    state::{MatchEntry, SharedState},
};

/// Open a new match and register it.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MatchSnapshot, ServiceError> {
    let CreateMatchRequest { mode, players } = request;

    if state.open_matches() >= state.config().max_open_matches() {
        return Err(ServiceError::InvalidState(format!(
            "match registry is full ({} open matches)",
            state.open_matches()
        )));
    }

    let seeds = build_seeds(players, state.config().max_players_per_match())?;
    let match_state = MatchState::start(mode, seeds)?;

    let id = Uuid::new_v4();
    let entry = MatchEntry::new(match_state);
    let snapshot = MatchSnapshot::project(id, &entry);
    state.insert_match(id, entry);

    info!(match_id = %id, %mode, players = snapshot.players.len(), "match opened");
    Ok(snapshot)
}

/// Full snapshot of a registered match.
pub async fn get_match(state: &SharedState, id: Uuid) -> Result<MatchSnapshot, ServiceError> {
    let handle = require_match(state, id)?;
    let guard = handle.lock().await;
    Ok(MatchSnapshot::project(id, &guard))
}

/// Listing of every registered match.
pub async fn list_matches(state: &SharedState) -> Vec<MatchListItem> {
    let mut items = Vec::new();
    for (id, handle) in state.match_handles() {
        let guard = handle.lock().await;
        items.push(MatchListItem::project(id, &guard));
    }
    items.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).reverse());
    items
}

/// Record one dart against a match and return the committed snapshot.
pub async fn record_throw(
    state: &SharedState,
    id: Uuid,
    request: ThrowRequest,
) -> Result<MatchSnapshot, ServiceError> {
    let handle = require_match(state, id)?;
    let mut guard = handle.lock().await;

    let next = guard
        .state
        .apply_throw(request.segment, request.multiplier)?;
    guard.commit(next);

    debug!(
        match_id = %id,
        segment = request.segment,
        multiplier = request.multiplier,
        revision = guard.revision,
        "throw committed"
    );
    Ok(MatchSnapshot::project(id, &guard))
}

/// Take back the last dart of the active turn, if any.
pub async fn undo_throw(state: &SharedState, id: Uuid) -> Result<MatchSnapshot, ServiceError> {
    let handle = require_match(state, id)?;
    let mut guard = handle.lock().await;

    let next = guard.state.undo_last_throw();
    guard.commit(next);

    debug!(match_id = %id, revision = guard.revision, "undo committed");
    Ok(MatchSnapshot::project(id, &guard))
}

/// Drop a match from the registry.
pub async fn delete_match(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    if state.remove_match(id) {
        info!(match_id = %id, "match deleted");
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("match `{id}` not found")))
    }
}

fn require_match(state: &SharedState, id: Uuid) -> Result<Arc<Mutex<MatchEntry>>, ServiceError> {
    state
        .match_entry(id)
        .ok_or_else(|| ServiceError::NotFound(format!("match `{id}` not found")))
}

fn build_seeds(
    players: Vec<PlayerInput>,
    max_players: usize,
) -> Result<Vec<PlayerSeed>, ServiceError> {
    if players.is_empty() {
        return Err(ServiceError::InvalidInput(
            "a match requires at least one player".into(),
        ));
    }

    if players.len() > max_players {
        return Err(ServiceError::InvalidInput(format!(
            "a match allows at most {max_players} players (got {})",
            players.len()
        )));
    }

    let mut seen_ids = HashSet::new();
    players
        .into_iter()
        .map(|player| {
            let name = player.name.trim().to_string();
            if name.is_empty() {
                return Err(ServiceError::InvalidInput(
                    "player name must not be empty".into(),
                ));
            }

            if let Some(id) = player.id
                && !seen_ids.insert(id)
            {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate player id `{id}` detected"
                )));
            }

            Ok(PlayerSeed {
                id: player.id,
                name,
            })
        })
        .collect()
}
