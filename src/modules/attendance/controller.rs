use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::{AppError, ErrorResponse};

use crate::modules::attendance::model::{
    AttendanceQueryParams, AttendanceRecord, CreateAttendanceDto, PaginatedAttendanceResponse,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::validator::{ApiQuery, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Already recorded for this subject and date", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let record = AttendanceService::create_attendance(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQueryParams),
    responses(
        (status = 200, description = "Attendance records, newest first", body = PaginatedAttendanceResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<AttendanceQueryParams>,
) -> Result<Json<PaginatedAttendanceResponse>, AppError> {
    let records = AttendanceService::get_attendance(&state.db, filters).await?;
    Ok(Json(records))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id" = Uuid, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 204, description = "Attendance record deleted"),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AttendanceService::delete_attendance(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
