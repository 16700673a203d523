//! 课程路由

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use campus_common::DocumentId;
use campus_ports::{CollectionStats, Document};
use serde::Serialize;
use serde_json::Value;

use super::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub modified: u64,
}

pub async fn create_course(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let course = state.courses.create(body).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let course = state.courses.get(&DocumentId::new(id)).await?;
    Ok(Json(course))
}

pub async fn course_stats(State(state): State<AppState>) -> ApiResult<Json<CollectionStats>> {
    Ok(Json(state.courses.stats().await?))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let Json(body) = body?;
    let modified = state.courses.update(&DocumentId::new(id), body).await?;
    Ok(Json(UpdateResponse { modified }))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.courses.delete(&DocumentId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
