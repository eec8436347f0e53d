use anyhow::Context;
use schoolhub_core::AppError;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, instrument};

use crate::modules::grade_configs::model::{GradeConfig, UpsertGradeConfigDto};

pub struct GradeConfigService;

impl GradeConfigService {
    /// Creates the config for `subject` or replaces its scale.
    #[instrument(skip(db))]
    pub async fn upsert_grade_config(
        db: &PgPool,
        subject: &str,
        dto: UpsertGradeConfigDto,
    ) -> Result<GradeConfig, AppError> {
        let subject = subject.trim();
        if subject.is_empty() || subject.chars().count() > 100 {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "subject must be 1-100 characters"
            )));
        }

        let config = sqlx::query_as::<_, GradeConfig>(
            r#"INSERT INTO grade_configs (subject, grading_scale)
               VALUES ($1, $2)
               ON CONFLICT (subject)
               DO UPDATE SET grading_scale = EXCLUDED.grading_scale, updated_at = NOW()
               RETURNING id, subject, grading_scale, created_at, updated_at"#,
        )
        .bind(subject)
        .bind(Json(&dto.grading_scale))
        .fetch_one(db)
        .await
        .context("Failed to save grade config")
        .map_err(AppError::database)?;

        info!(subject = %config.subject, thresholds = config.grading_scale.len(), "Grade config saved");
        Ok(config)
    }

    #[instrument(skip(db))]
    pub async fn get_grade_configs(db: &PgPool) -> Result<Vec<GradeConfig>, AppError> {
        let configs = sqlx::query_as::<_, GradeConfig>(
            "SELECT id, subject, grading_scale, created_at, updated_at FROM grade_configs ORDER BY subject",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch grade configs")
        .map_err(AppError::database)?;

        Ok(configs)
    }

    #[instrument(skip(db))]
    pub async fn get_grade_config(db: &PgPool, subject: &str) -> Result<GradeConfig, AppError> {
        sqlx::query_as::<_, GradeConfig>(
            "SELECT id, subject, grading_scale, created_at, updated_at FROM grade_configs WHERE subject = $1",
        )
        .bind(subject)
        .fetch_optional(db)
        .await
        .context("Failed to fetch grade config")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No grade config for {}", subject)))
    }

    /// Reports for the subject fall back to the standard scale afterwards.
    #[instrument(skip(db))]
    pub async fn delete_grade_config(db: &PgPool, subject: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grade_configs WHERE subject = $1")
            .bind(subject)
            .execute(db)
            .await
            .context("Failed to delete grade config")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "No grade config for {}",
                subject
            )));
        }

        Ok(())
    }
}
