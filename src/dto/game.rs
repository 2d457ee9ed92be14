use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{format_system_time, validation::validate_player_name},
    engine::{Dart, GameMode, MatchState, ModeConfig, Player, PlayerStats, Turn},
    state::MatchEntry,
};

/// Payload used to open a brand-new match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMatchRequest {
    /// Game mode the match is played under.
    pub mode: GameMode,
    /// Seating order; the first player throws first.
    #[validate(nested)]
    pub players: Vec<PlayerInput>,
}

/// Incoming player definition for the match bootstrap.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlayerInput {
    /// Externally managed identity. Minted server-side when omitted.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
}

impl Validate for PlayerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_player_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A dart reported from the board: segment plus ring multiplier.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ThrowRequest {
    /// Board segment hit: 1-20 or 25 for the bull.
    #[validate(range(min = 1, max = 25))]
    pub segment: u8,
    /// Ring multiplier: 1 single, 2 double, 3 triple.
    #[validate(range(min = 1, max = 3))]
    pub multiplier: u8,
}

/// Full match snapshot returned by every command and by the detail
/// route.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSnapshot {
    /// Registry identifier of the match.
    pub id: Uuid,
    /// Game mode the match is played under.
    pub mode: GameMode,
    /// When the match was opened (RFC3339).
    pub created_at: String,
    /// When the last command was committed (RFC3339).
    pub updated_at: String,
    /// Bumped on every committed command.
    pub revision: u64,
    /// Mode-derived ruleset.
    pub config: ModeConfigDto,
    /// Players in seating order.
    pub players: Vec<PlayerSummary>,
    /// Seat of the active thrower.
    pub current_player_index: usize,
    /// Current round, 1-based.
    pub current_round: u32,
    /// Darts already thrown in the active turn.
    pub current_dart_in_turn: u8,
    /// The darts of the active, unfinished turn.
    pub current_darts: Vec<DartDto>,
    /// Sealed turn history.
    pub turns: Vec<TurnSummary>,
    /// Winning player's id once the match is decided.
    pub winner: Option<Uuid>,
}

/// Condensed listing entry for the match registry.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchListItem {
    /// Registry identifier of the match.
    pub id: Uuid,
    /// Game mode the match is played under.
    pub mode: GameMode,
    /// Player names in seating order.
    pub players: Vec<PlayerBrief>,
    /// Current round, 1-based.
    pub current_round: u32,
    /// Winning player's id once the match is decided.
    pub winner: Option<Uuid>,
    /// When the last command was committed (RFC3339).
    pub updated_at: String,
}

/// Minimal player projection for listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerBrief {
    /// Stable identity for the duration of the match.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Public projection of a player's live match state.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerSummary {
    /// Stable identity for the duration of the match.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Remaining score (x01) or accumulated points (Cricket).
    pub score: i32,
    /// Derived throw counters.
    pub stats: PlayerStatsDto,
    /// Cricket only: marks per target, in board order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cricket_marks: Option<Vec<TargetMarks>>,
    /// Around-the-Clock only: next segment this player must hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_target: Option<u8>,
}

/// Marks a player holds on one Cricket target.
#[derive(Debug, Serialize, ToSchema)]
pub struct TargetMarks {
    /// Target segment.
    pub segment: u8,
    /// Marks held, 0 to 3.
    pub marks: u8,
}

/// Derived throw counters of one player.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerStatsDto {
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
    /// Average score per dart.
    pub average_per_dart: f64,
    /// Average score per started three-dart round.
    pub average_per_round: f64,
}

/// A single validated dart.
#[derive(Debug, Serialize, ToSchema)]
pub struct DartDto {
    /// Board segment hit.
    pub segment: u8,
    /// Ring multiplier.
    pub multiplier: u8,
    /// Points the dart scored.
    pub score: i32,
}

/// A sealed three-dart turn.
#[derive(Debug, Serialize, ToSchema)]
pub struct TurnSummary {
    /// Round the turn belongs to, 1-based.
    pub round: u32,
    /// Identity of the thrower.
    pub player_id: Uuid,
    /// Display name of the thrower.
    pub player_name: String,
    /// The darts of the turn, at most three.
    pub darts: Vec<DartDto>,
    /// Sum of the darts' face scores.
    pub total_score: i32,
    /// When the turn was sealed (RFC3339).
    pub timestamp: String,
}

/// Mode-derived ruleset as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModeConfigDto {
    /// Countdown rules shared by 501 and 301.
    X01 {
        /// Score each player counts down from.
        starting_score: i32,
        /// The finishing dart must be a double.
        require_double_out: bool,
        /// Carried for clients; not enforced by the engine.
        require_double_in: bool,
    },
    /// Mark-and-score rules over a fixed target set.
    Cricket {
        /// Segments that take marks, in display order.
        targets: Vec<u8>,
    },
    /// Sequential targets ending on the bull.
    AroundTheClock {
        /// The full target sequence, 1-20 then 25.
        targets: Vec<u8>,
    },
}

impl From<&Dart> for DartDto {
    fn from(dart: &Dart) -> Self {
        Self {
            segment: dart.segment,
            multiplier: dart.multiplier,
            score: dart.score,
        }
    }
}

impl From<&PlayerStats> for PlayerStatsDto {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            darts_thrown: stats.darts_thrown,
            total_score: stats.total_score,
            doubles: stats.doubles,
            triples: stats.triples,
            bullseyes: stats.bullseyes,
            highest_checkout: stats.highest_checkout,
            highest_score: stats.highest_score,
            average_per_dart: stats.average_per_dart,
            average_per_round: stats.average_per_round,
        }
    }
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            score: player.score,
            stats: (&player.stats).into(),
            cricket_marks: player.cricket_marks.as_ref().map(|marks| {
                marks
                    .iter()
                    .map(|(&segment, &marks)| TargetMarks { segment, marks })
                    .collect()
            }),
            current_target: player.current_target,
        }
    }
}

impl From<&Player> for PlayerBrief {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
        }
    }
}

impl From<&Turn> for TurnSummary {
    fn from(turn: &Turn) -> Self {
        Self {
            round: turn.round,
            player_id: turn.player_id,
            player_name: turn.player_name.clone(),
            darts: turn.darts.iter().map(Into::into).collect(),
            total_score: turn.total_score,
            timestamp: format_system_time(turn.timestamp),
        }
    }
}

impl From<&ModeConfig> for ModeConfigDto {
    fn from(config: &ModeConfig) -> Self {
        match config {
            ModeConfig::X01 {
                starting_score,
                require_double_out,
                require_double_in,
            } => ModeConfigDto::X01 {
                starting_score: *starting_score,
                require_double_out: *require_double_out,
                require_double_in: *require_double_in,
            },
            ModeConfig::Cricket { targets } => ModeConfigDto::Cricket {
                targets: targets.clone(),
            },
            ModeConfig::AroundTheClock { targets } => ModeConfigDto::AroundTheClock {
                targets: targets.clone(),
            },
        }
    }
}

impl MatchSnapshot {
    /// Project a registered match into its full wire representation.
    pub fn project(id: Uuid, entry: &MatchEntry) -> Self {
        let state: &MatchState = &entry.state;
        Self {
            id,
            mode: state.mode,
            created_at: format_system_time(entry.created_at),
            updated_at: format_system_time(entry.updated_at),
            revision: entry.revision,
            config: (&state.config).into(),
            players: state.players.iter().map(Into::into).collect(),
            current_player_index: state.current_player_index,
            current_round: state.current_round,
            current_dart_in_turn: state.current_dart_in_turn,
            current_darts: state.current_darts.iter().map(Into::into).collect(),
            turns: state.turns.iter().map(Into::into).collect(),
            winner: state.winner,
        }
    }
}

impl MatchListItem {
    /// Project a registered match into its listing representation.
    pub fn project(id: Uuid, entry: &MatchEntry) -> Self {
        Self {
            id,
            mode: entry.state.mode,
            players: entry.state.players.iter().map(Into::into).collect(),
            current_round: entry.state.current_round,
            winner: entry.state.winner,
            updated_at: format_system_time(entry.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PlayerSeed;

    #[test]
    fn snapshot_projects_cricket_marks_in_board_order() {
        let state = MatchState::start(
            GameMode::Cricket,
            vec![PlayerSeed {
                id: None,
                name: "a".into(),
            }],
        )
        .unwrap();
        let entry = MatchEntry::new(state);
        let snapshot = MatchSnapshot::project(Uuid::new_v4(), &entry);

        let marks = snapshot.players[0].cricket_marks.as_ref().unwrap();
        let segments: Vec<u8> = marks.iter().map(|m| m.segment).collect();
        assert_eq!(segments, vec![20, 19, 18, 17, 16, 15, 25]);
    }

    #[test]
    fn player_input_rejects_blank_names() {
        let input = PlayerInput {
            id: None,
            name: "  ".into(),
        };
        assert!(input.validate().is_err());

        let request = CreateMatchRequest {
            mode: GameMode::X501,
            players: vec![PlayerInput {
                id: None,
                name: "ok".into(),
            }],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn throw_request_bounds() {
        let ok = ThrowRequest {
            segment: 20,
            multiplier: 3,
        };
        assert!(ok.validate().is_ok());

        let bad = ThrowRequest {
            segment: 0,
            multiplier: 1,
        };
        assert!(bad.validate().is_err());

        let bad = ThrowRequest {
            segment: 20,
            multiplier: 4,
        };
        assert!(bad.validate().is_err());
    }
}
