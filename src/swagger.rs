use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::contest::create_contest,
        handlers::contest::get_contests,
        handlers::contest::get_active_contests,
        handlers::contest::get_contest,
        handlers::contest::update_contest,
        handlers::contest::delete_contest,
        handlers::prize::create_prize,
        handlers::prize::get_prizes,
        handlers::prize::get_prize,
        handlers::prize::update_prize,
        handlers::prize::delete_prize,
        handlers::prize::get_prizes_by_contest,
        handlers::prize::get_available_prizes,
        handlers::prize::get_prize_stats,
        handlers::participant::add_participant,
        handlers::participant::get_participant,
        handlers::participant::get_participant_by_token,
        handlers::participant::update_participant,
        handlers::participant::update_validation,
        handlers::participant::get_participants_by_contest,
        handlers::participant::get_validated_participants,
        handlers::participant::get_participant_stats,
        handlers::draw::execute_random_draw,
        handlers::draw::execute_manual_draw,
        handlers::draw::get_draw,
        handlers::draw::get_draws_by_contest,
        handlers::draw::get_winners_by_contest,
        handlers::draw::update_winner_notification,
        handlers::draw::update_winner_status,
        handlers::admin::create_admin,
        handlers::admin::get_admins,
        handlers::admin::login,
        handlers::admin::get_role_stats,
        handlers::admin::get_admin,
        handlers::admin::update_admin,
        handlers::admin::delete_admin,
        handlers::admin::get_admin_stats,
        handlers::admin::check_permissions,
        handlers::activity_log::get_activity_log,
        handlers::storage::get_storage_status,
        handlers::storage::ping_storage,
    ),
    components(
        schemas(
            ContestStatus,
            EntryRules,
            CreateContestRequest,
            UpdateContestRequest,
            ContestQuery,
            ContestResponse,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PrizeResponse,
            PrizeStatsResponse,
            AddParticipantRequest,
            UpdateParticipantRequest,
            UpdateValidationRequest,
            ParticipantResponse,
            ParticipantStatsResponse,
            DrawMode,
            PrizeStatus,
            RandomDrawRequest,
            ManualDrawRequest,
            UpdateNotificationRequest,
            UpdateWinnerStatusRequest,
            WinnerResponse,
            DrawResponse,
            AdminRole,
            CreateAdminRequest,
            UpdateAdminRequest,
            LoginRequest,
            AdminResponse,
            RoleStatsResponse,
            AdminStatsResponse,
            PermissionResponse,
            ActivityStatus,
            ActivityLogResponse,
            EntityStorageStatus,
            OverallStorageStatus,
            StorageStatusResponse,
            StoragePingResponse,
            ApiError,
        )
    ),
    tags(
        (name = "contests", description = "Contest management API"),
        (name = "prizes", description = "Prize management API"),
        (name = "participants", description = "Participant entry API"),
        (name = "draws", description = "Draw execution and winner tracking API"),
        (name = "admins", description = "Admin account API"),
        (name = "activity_log", description = "Admin activity log API"),
        (name = "storage", description = "Storage health API"),
    ),
    info(
        title = "Lucky Draw Backend API",
        version = "1.0.0",
        description = "Lucky draw contest administration REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
