//! Scored assessments.

use chrono::{DateTime, Utc};
use schoolhub_core::pagination::{PaginationMeta, PaginationParams};
use schoolhub_core::serde::{
    deserialize_optional_datetime, deserialize_optional_end_datetime, deserialize_optional_uuid,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_WEIGHT: f64 = 1.0;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// One scored assessment for a student in a subject.
///
/// `max_score` is expected to be positive; that is enforced on write
/// ([`CreateGradeDto`] and the table's CHECK constraint), not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub date: DateTime<Utc>,
}

impl GradeRecord {
    /// Score as a percentage of `max_score`. Not finite when `max_score` is 0.
    pub fn percentage(&self) -> f64 {
        self.score / self.max_score * 100.0
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_score_within_max"))]
pub struct CreateGradeDto {
    pub student_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 50, message = "assessmentType must be 1-50 characters"))]
    pub assessment_type: String,
    #[validate(range(min = 0.0, message = "score must not be negative"))]
    pub score: f64,
    #[validate(range(exclusive_min = 0.0, message = "maxScore must be greater than 0"))]
    pub max_score: f64,
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: Option<f64>,
    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,
}

fn validate_score_within_max(dto: &CreateGradeDto) -> Result<(), ValidationError> {
    if dto.score > dto.max_score {
        let mut err = ValidationError::new("score_exceeds_max");
        err.message = Some("score must not exceed maxScore".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GradeQueryParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    pub subject: Option<String>,
    pub assessment_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_end_datetime")]
    pub to: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedGradesResponse {
    pub data: Vec<GradeRecord>,
    pub meta: PaginationMeta,
}
