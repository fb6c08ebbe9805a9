//! HTTP API module
//!
//! Lets a room authority push snapshots and exposes the resulting ready
//! button state.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/room",
            get(get_room_handler)
                .put(put_room_handler)
                .delete(delete_room_handler),
        )
        .route("/button", get(button_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
