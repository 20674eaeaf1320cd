//! Route definitions for the `/functions/v1` endpoints.

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    AUTHORIZATION, CONTENT_TYPE,
};
use axum::http::{HeaderName, Method, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::functions;
use crate::state::AppState;

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Function routes mounted at `/functions/v1`.
///
/// Callable from any origin. Every `OPTIONS` request, preflight or not,
/// gets `200 ok` with the CORS headers before it reaches the CORS layer.
///
/// ```text
/// POST /execute-sql   -> execute_sql (admin / super_admin)
/// POST /keep-alive    -> keep_alive
/// POST /ssl-check     -> ssl_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/execute-sql", post(functions::execute_sql))
        .route("/keep-alive", post(functions::keep_alive))
        .route("/ssl-check", post(functions::ssl_check))
        .layer(cors_layer())
        .layer(from_fn(answer_options))
}

async fn answer_options(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        ],
        "ok",
    )
        .into_response()
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}
