use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{AppError, ErrorResponse};

use crate::modules::grade_configs::model::{GradeConfig, UpsertGradeConfigDto};
use crate::modules::grade_configs::service::GradeConfigService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    put,
    path = "/api/grade-configs/{subject}",
    params(
        ("subject" = String, Path, description = "Subject name")
    ),
    request_body = UpsertGradeConfigDto,
    responses(
        (status = 200, description = "Grade config saved", body = GradeConfig),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Invalid grading scale", body = ErrorResponse)
    ),
    tag = "Grade Configs"
)]
#[instrument(skip(state))]
pub async fn upsert_grade_config(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpsertGradeConfigDto>,
) -> Result<Json<GradeConfig>, AppError> {
    let config = GradeConfigService::upsert_grade_config(&state.db, &subject, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    get,
    path = "/api/grade-configs",
    responses(
        (status = 200, description = "All grade configs, by subject", body = Vec<GradeConfig>)
    ),
    tag = "Grade Configs"
)]
#[instrument(skip(state))]
pub async fn get_grade_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<GradeConfig>>, AppError> {
    let configs = GradeConfigService::get_grade_configs(&state.db).await?;
    Ok(Json(configs))
}

#[utoipa::path(
    get,
    path = "/api/grade-configs/{subject}",
    params(
        ("subject" = String, Path, description = "Subject name")
    ),
    responses(
        (status = 200, description = "Grade config for the subject", body = GradeConfig),
        (status = 404, description = "No config for the subject", body = ErrorResponse)
    ),
    tag = "Grade Configs"
)]
#[instrument(skip(state))]
pub async fn get_grade_config(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Result<Json<GradeConfig>, AppError> {
    let config = GradeConfigService::get_grade_config(&state.db, &subject).await?;
    Ok(Json(config))
}

#[utoipa::path(
    delete,
    path = "/api/grade-configs/{subject}",
    params(
        ("subject" = String, Path, description = "Subject name")
    ),
    responses(
        (status = 204, description = "Grade config removed"),
        (status = 404, description = "No config for the subject", body = ErrorResponse)
    ),
    tag = "Grade Configs"
)]
#[instrument(skip(state))]
pub async fn delete_grade_config(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Result<StatusCode, AppError> {
    GradeConfigService::delete_grade_config(&state.db, &subject).await?;
    Ok(StatusCode::NO_CONTENT)
}
