mod handlers;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        // Collection
        .route("/tasks", get(handlers::list_tasks))
        .route("/tasks", post(handlers::create_task))
        .route("/tasks/search", get(handlers::search_tasks))
        .route("/tasks/stats", get(handlers::get_stats))
        // Single task
        .route("/tasks/{id}", get(handlers::get_task))
        .route("/tasks/{id}", put(handlers::update_task))
        .route("/tasks/{id}", delete(handlers::delete_task))
        .route("/tasks/{id}/complete", patch(handlers::complete_task))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
