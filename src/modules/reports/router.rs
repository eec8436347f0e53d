use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_attendance_trend, get_student_report, get_subject_report};

pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/students/{student_id}", get(get_student_report))
        .route(
            "/students/{student_id}/subjects/{subject}",
            get(get_subject_report),
        )
        .route(
            "/students/{student_id}/attendance-trend",
            get(get_attendance_trend),
        )
}
