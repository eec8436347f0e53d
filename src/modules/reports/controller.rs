use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::{AppError, ErrorResponse};

use crate::modules::reports::model::{
    MonthlyAttendance, ReportQueryParams, StudentReportResponse, SubjectReport,
};
use crate::modules::reports::service::ReportService;
use crate::state::AppState;
use crate::validator::ApiQuery;

#[utoipa::path(
    get,
    path = "/api/reports/students/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ReportQueryParams
    ),
    responses(
        (status = 200, description = "Overall report for the student", body = StudentReportResponse),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_student_report(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    ApiQuery(params): ApiQuery<ReportQueryParams>,
) -> Result<Json<StudentReportResponse>, AppError> {
    let report =
        ReportService::get_student_report(state.report_store.as_ref(), student_id, params)
            .await?;

    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/students/{student_id}/subjects/{subject}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("subject" = String, Path, description = "Subject name"),
        ReportQueryParams
    ),
    responses(
        (status = 200, description = "Report for one subject", body = SubjectReport),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_subject_report(
    State(state): State<AppState>,
    Path((student_id, subject)): Path<(Uuid, String)>,
    ApiQuery(params): ApiQuery<ReportQueryParams>,
) -> Result<Json<SubjectReport>, AppError> {
    let report = ReportService::get_subject_report(
        state.report_store.as_ref(),
        student_id,
        subject,
        params,
    )
    .await?;

    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/students/{student_id}/attendance-trend",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ReportQueryParams
    ),
    responses(
        (status = 200, description = "Attendance per calendar month, oldest first", body = Vec<MonthlyAttendance>),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_attendance_trend(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    ApiQuery(params): ApiQuery<ReportQueryParams>,
) -> Result<Json<Vec<MonthlyAttendance>>, AppError> {
    let trend =
        ReportService::get_attendance_trend(state.report_store.as_ref(), student_id, params)
            .await?;

    Ok(Json(trend))
}
