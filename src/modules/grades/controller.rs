use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::{AppError, ErrorResponse};

use crate::modules::grades::model::{
    CreateGradeDto, GradeQueryParams, GradeRecord, PaginatedGradesResponse,
};
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::validator::{ApiQuery, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = GradeRecord),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn create_grade(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(StatusCode, Json<GradeRecord>), AppError> {
    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    params(GradeQueryParams),
    responses(
        (status = 200, description = "Grades, newest first", body = PaginatedGradesResponse)
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grades(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<GradeQueryParams>,
) -> Result<Json<PaginatedGradesResponse>, AppError> {
    let grades = GradeService::get_grades(&state.db, filters).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade details", body = GradeRecord),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeRecord>, AppError> {
    let grade = GradeService::get_grade_by_id(&state.db, id).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(
        ("id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    GradeService::delete_grade(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
