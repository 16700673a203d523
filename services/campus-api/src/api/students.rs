//! 学生路由

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use campus_common::DocumentId;
use campus_ports::Document;
use serde::Serialize;
use serde_json::Value;

use super::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let student = state.students.create(body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let student = state.students.get(&DocumentId::new(id)).await?;
    Ok(Json(student))
}

pub async fn enroll_in_course(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .students
        .enroll(&DocumentId::new(student_id), &DocumentId::new(course_id))
        .await?;

    Ok(Json(MessageResponse {
        message: "Successfully enrolled in course".to_string(),
    }))
}
