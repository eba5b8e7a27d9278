use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::Database;
use crate::models::*;
use crate::query::{SortKey, TaskQuery, TaskStats};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn bad_request(msg: &str) -> (StatusCode, String) {
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Task collection
// ============================================================

/// Query parameters for the filtered list view.
///
/// `status` and `priority` are typed: an unrecognized value is a client
/// error. `sort` is deliberately permissive; anything but the three known
/// keys falls back to the natural order.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub sort: Option<String>,
}

pub async fn list_tasks(
    State(db): State<Database>,
    Query(params): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let query = TaskQuery {
        status: params.status,
        priority: params.priority,
        term: None,
        sort: SortKey::parse(params.sort.as_deref()),
    };

    db.list_tasks(&query).map(Json).map_err(internal_error)
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchTasksQuery {
    pub term: Option<String>,
}

/// Full-collection substring search over title, description, and tags.
pub async fn search_tasks(
    State(db): State<Database>,
    Query(params): Query<SearchTasksQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let term = params.term.unwrap_or_default();
    if term.trim().is_empty() {
        return Err(bad_request("Search term required"));
    }

    db.search_tasks(&term).map(Json).map_err(internal_error)
}

pub async fn get_stats(
    State(db): State<Database>,
) -> Result<Json<TaskStats>, (StatusCode, String)> {
    db.task_stats(Utc::now()).map(Json).map_err(internal_error)
}

pub async fn create_task(
    State(db): State<Database>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    if input.title.trim().is_empty() {
        return Err(bad_request("Title must not be empty"));
    }

    db.create_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error)
}

// ============================================================
// Single task
// ============================================================

pub async fn get_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    db.get_task(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn update_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, (StatusCode, String)> {
    if input.title.trim().is_empty() {
        return Err(bad_request("Title must not be empty"));
    }

    db.update_task(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn complete_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    db.complete_task(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn delete_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_task(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Task not found".to_string()))
    }
}
