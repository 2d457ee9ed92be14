use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Bullseye Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::create_match,
        crate::routes::game::list_matches,
        crate::routes::game::get_match,
        crate::routes::game::record_throw,
        crate::routes::game::undo_throw,
        crate::routes::game::delete_match,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::CreateMatchRequest,
            crate::dto::game::PlayerInput,
            crate::dto::game::ThrowRequest,
            crate::dto::game::MatchSnapshot,
            crate::dto::game::MatchListItem,
            crate::dto::game::PlayerBrief,
            crate::dto::game::PlayerSummary,
            crate::dto::game::PlayerStatsDto,
            crate::dto::game::TargetMarks,
            crate::dto::game::DartDto,
            crate::dto::game::TurnSummary,
            crate::dto::game::ModeConfigDto,
            crate::engine::GameMode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "match", description = "Match lifecycle and scoring operations"),
    )
)]
pub struct ApiDoc;
