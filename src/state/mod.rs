//! Shared application state: the loaded configuration and the
//! in-memory match registry.

use std::{sync::Arc, time::SystemTime};

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{config::AppConfig, engine::MatchState};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// A registered match: the engine snapshot plus registry bookkeeping.
///
/// Commands depend on reading then replacing the whole snapshot, so
/// each entry sits behind its own [`Mutex`]; the lock is the
/// single-writer-per-match discipline the engine requires of callers.
#[derive(Debug)]
pub struct MatchEntry {
    /// Latest committed engine snapshot.
    pub state: MatchState,
    /// When the match was opened.
    pub created_at: SystemTime,
    /// When the last command was committed.
    pub updated_at: SystemTime,
    /// Bumped on every committed command; lets clients detect stale reads.
    pub revision: u64,
}

impl MatchEntry {
    /// Wrap a freshly started match.
    pub fn new(state: MatchState) -> Self {
        let now = SystemTime::now();
        Self {
            state,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Replace the snapshot with the outcome of a committed command.
    pub fn commit(&mut self, next: MatchState) {
        self.state = next;
        self.updated_at = SystemTime::now();
        self.revision += 1;
    }
}

/// Central application state storing the match registry and configuration.
pub struct AppState {
    config: AppConfig,
    matches: DashMap<Uuid, Arc<Mutex<MatchEntry>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be
    /// cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            matches: DashMap::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a match under a fresh identifier.
    pub fn insert_match(&self, id: Uuid, entry: MatchEntry) {
        self.matches.insert(id, Arc::new(Mutex::new(entry)));
    }

    /// Handle to a registered match, if present. Callers lock the entry
    /// before reading or applying commands.
    pub fn match_entry(&self, id: Uuid) -> Option<Arc<Mutex<MatchEntry>>> {
        self.matches.get(&id).map(|entry| entry.value().clone())
    }

    /// Drop a match from the registry. Returns whether it existed.
    pub fn remove_match(&self, id: Uuid) -> bool {
        self.matches.remove(&id).is_some()
    }

    /// Number of matches currently registered.
    pub fn open_matches(&self) -> usize {
        self.matches.len()
    }

    /// Snapshot the registry's entry handles for iteration.
    ///
    /// Handles are collected first so no shard lock is held while a
    /// caller awaits the per-entry mutexes.
    pub fn match_handles(&self) -> Vec<(Uuid, Arc<Mutex<MatchEntry>>)> {
        self.matches
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameMode, PlayerSeed};

    fn sample_state() -> MatchState {
        MatchState::start(
            GameMode::X501,
            vec![PlayerSeed {
                id: None,
                name: "a".into(),
            }],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn registry_roundtrip() {
        let app = AppState::new(AppConfig::default());
        let id = Uuid::new_v4();
        app.insert_match(id, MatchEntry::new(sample_state()));

        assert_eq!(app.open_matches(), 1);
        let handle = app.match_entry(id).expect("registered");
        assert_eq!(handle.lock().await.revision, 0);

        assert!(app.remove_match(id));
        assert!(!app.remove_match(id));
        assert!(app.match_entry(id).is_none());
    }

    #[tokio::test]
    async fn commit_bumps_revision() {
        let app = AppState::new(AppConfig::default());
        let id = Uuid::new_v4();
        app.insert_match(id, MatchEntry::new(sample_state()));

        let handle = app.match_entry(id).unwrap();
        let mut guard = handle.lock().await;
        let next = guard.state.apply_throw(20, 3).unwrap();
        guard.commit(next);

        assert_eq!(guard.revision, 1);
        assert_eq!(guard.state.players[0].score, 441);
    }
}
