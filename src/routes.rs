use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    group::{
        group_dto::{CreateGroupRequest, UpdateGroupRequest},
        group_handlers,
        group_models::{Group, GroupMember},
    },
    response::ErrorResponse,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::group::group_handlers::create_group,
        crate::group::group_handlers::get_groups,
        crate::group::group_handlers::get_group,
        crate::group::group_handlers::update_group,
        crate::group::group_handlers::delete_group,
        crate::group::group_handlers::get_group_members,
        crate::group::group_handlers::add_user_to_group,
        crate::group::group_handlers::remove_user_from_group,
    ),
    components(
        schemas(
            CreateGroupRequest,
            UpdateGroupRequest,
            Group,
            GroupMember,
            ErrorResponse,
        )
    ),
    tags(
        (name = "groups", description = "Group and membership endpoints")
    )
)]
pub struct ApiDoc;

fn group_routes() -> Router<AppState> {
    let by_id = || {
        get(group_handlers::get_group)
            .put(group_handlers::update_group)
            .patch(group_handlers::update_group)
            .delete(group_handlers::delete_group)
    };
    let membership = || {
        put(group_handlers::add_user_to_group)
            .delete(group_handlers::remove_user_from_group)
    };

    // The trailing-slash routes match an empty id so the handler can answer 400.
    Router::new()
        .route(
            "/groups",
            get(group_handlers::get_groups).post(group_handlers::create_group),
        )
        .route("/groups/", by_id())
        .route("/groups/:group_id", by_id())
        .route("/groups/:group_id/members", get(group_handlers::get_group_members))
        .route("/groups/:group_id/members/", membership())
        .route("/groups/:group_id/members/:user_id", membership())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
}

pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(group_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
