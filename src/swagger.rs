use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::utils::PaginationInfo;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::roster::load_participants,
        handlers::roster::load_prizes,
        handlers::roster::get_tags,
        handlers::prizes::get_prizes,
        handlers::prizes::select_prize,
        handlers::draw::get_eligible,
        handlers::draw::draw,
        handlers::session::get_status,
        handlers::session::get_history,
        handlers::session::reset,
    ),
    components(
        schemas(
            ParticipantRecord,
            LoadParticipantsRequest,
            LoadParticipantsResponse,
            ParticipantResponse,
            PrizeRecord,
            LoadPrizesRequest,
            LoadPrizesResponse,
            PrizeState,
            PrizeResponse,
            PrizeListResponse,
            SelectPrizeRequest,
            DrawRequest,
            DrawResponse,
            EligibleQuery,
            EligiblePoolResponse,
            HistoryQuery,
            HistoryEntryResponse,
            PaginationInfo,
            SessionStatusResponse,
            TagResponse,
            TagListResponse,
            ApiError,
        )
    ),
    tags(
        (name = "roster", description = "Participant and prize import API"),
        (name = "prizes", description = "Prize listing and selection API"),
        (name = "draw", description = "Draw API"),
        (name = "session", description = "Session status, history and reset API"),
    ),
    info(
        title = "Prize Draw API",
        version = "0.1.0",
        description = "Tag-filtered prize draw REST API documentation"
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
