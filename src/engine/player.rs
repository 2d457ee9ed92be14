use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::dart::{DARTS_PER_TURN, Dart};

/// Identity supplied by the caller when opening a match.
///
/// Profiles live outside this crate; an id is minted here only when
/// the caller did not bring one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSeed {
    /// Externally managed identity, if any.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
}

/// Running counters derived from a player's dart history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Darts thrown over the whole match, busts included.
    pub darts_thrown: u32,
    /// Sum of every dart's face score, busts included.
    pub total_score: i32,
    /// Darts landed in the double ring (inner bull included).
    pub doubles: u32,
    /// Darts landed in the triple ring.
    pub triples: u32,
    /// Darts that hit the bull, single or double.
    pub bullseyes: u32,
    /// Best turn total that finished an x01 leg.
    pub highest_checkout: i32,
    /// Best single-dart score.
    pub highest_score: i32,
    /// `total_score / darts_thrown`.
    pub average_per_dart: f64,
    /// `total_score` over started three-dart rounds.
    pub average_per_round: f64,
}

impl PlayerStats {
    /// Fold one thrown dart into the counters.
    pub(crate) fn record(&mut self, dart: &Dart) {
        self.darts_thrown += 1;
        self.total_score += dart.score;
        if dart.is_double() {
            self.doubles += 1;
        }
        if dart.is_triple() {
            self.triples += 1;
        }
        if dart.is_bull() {
            self.bullseyes += 1;
        }
        self.highest_score = self.highest_score.max(dart.score);
        self.refresh_dart_average();
    }

    /// Remove one dart from the counters.
    ///
    /// `remaining` is the player's dart history after the pop;
    /// `highest_score` is recomputed from it because a maximum cannot
    /// be decremented blindly.
    pub(crate) fn unrecord(&mut self, dart: &Dart, remaining: &[Dart]) {
        self.darts_thrown = self.darts_thrown.saturating_sub(1);
        self.total_score -= dart.score;
        if dart.is_double() {
            self.doubles = self.doubles.saturating_sub(1);
        }
        if dart.is_triple() {
            self.triples = self.triples.saturating_sub(1);
        }
        if dart.is_bull() {
            self.bullseyes = self.bullseyes.saturating_sub(1);
        }
        self.highest_score = remaining.iter().map(|d| d.score).max().unwrap_or(0);
        self.refresh_dart_average();
        self.refresh_round_average();
    }

    fn refresh_dart_average(&mut self) {
        self.average_per_dart = if self.darts_thrown == 0 {
            0.0
        } else {
            f64::from(self.total_score) / f64::from(self.darts_thrown)
        };
    }

    /// Recompute the per-round average over started rounds.
    pub(crate) fn refresh_round_average(&mut self) {
        let rounds = self.darts_thrown.div_ceil(u32::from(DARTS_PER_TURN));
        self.average_per_round = if rounds == 0 {
            0.0
        } else {
            f64::from(self.total_score) / f64::from(rounds)
        };
    }
}

/// Per-player state threaded through the whole match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity for the duration of the match.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Remaining score (x01) or accumulated points (Cricket).
    pub score: i32,
    /// Every dart this player has thrown, in order.
    pub darts: Vec<Dart>,
    /// Derived counters, updated on every throw and undo.
    pub stats: PlayerStats,
    /// Cricket only: marks per target segment, 0 to 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cricket_marks: Option<IndexMap<u8, u8>>,
    /// Around-the-Clock only: next segment this player must hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_target: Option<u8>,
}

impl Player {
    /// Build a player from a seed with mode-neutral defaults; the mode
    /// setup then assigns score, marks, or target.
    pub(crate) fn from_seed(seed: PlayerSeed) -> Self {
        Self {
            id: seed.id.unwrap_or_else(Uuid::new_v4),
            name: seed.name,
            score: 0,
            darts: Vec::new(),
            stats: PlayerStats::default(),
            cricket_marks: None,
            current_target: None,
        }
    }

    /// Marks this player holds on a Cricket target; 0 when the map or
    /// the entry is absent.
    pub fn marks_on(&self, segment: u8) -> u8 {
        self.cricket_marks
            .as_ref()
            .and_then(|marks| marks.get(&segment).copied())
            .unwrap_or(0)
    }

    /// Whether this player has closed a Cricket target.
    pub fn has_closed(&self, segment: u8) -> bool {
        self.marks_on(segment) >= 3
    }
}
