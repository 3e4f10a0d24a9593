//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Health
        .route("/", get(handlers::health_check))
        // MCO endpoints
        .route("/resume", get(handlers::get_resume))
        .route("/dernier_trans", get(handlers::get_dernier_trans))
        .route("/tx_recours", get(handlers::get_tx_recours))
        .route("/resume_prec_annee", get(handlers::get_resume_prec_annee))
        .route("/diag_assoc", get(handlers::get_diag_assoc))
        .route("/um", get(handlers::get_um))
        .route("/actes", get(handlers::get_actes))
        .route("/dmi_med", get(handlers::get_dmi_med))
        .layer(TraceLayer::new_for_http());

    // The analytics clients run from another origin.
    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}
