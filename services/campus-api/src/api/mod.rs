//! HTTP 接口

mod courses;
mod error;
mod health;
mod state;
mod students;

pub use error::*;
pub use state::*;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/courses", post(courses::create_course))
        .route("/courses/stats", get(courses::course_stats))
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/students", post(students::create_student))
        .route("/students/{id}", get(students::get_student))
        .route(
            "/students/{student_id}/enroll/{course_id}",
            post(students::enroll_in_course),
        )
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
