use anyhow::Context;
use chrono::Utc;
use schoolhub_core::{AppError, PaginationMeta};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_grade_recorded;
use crate::modules::grades::model::{
    CreateGradeDto, DEFAULT_WEIGHT, GradeQueryParams, GradeRecord, PaginatedGradesResponse,
};

const GRADE_COLUMNS: &str =
    "id, student_id, subject, assessment_type, score, max_score, weight, date";

pub struct GradeService;

impl GradeService {
    fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &GradeQueryParams) {
        query.push(" WHERE 1 = 1");
        if let Some(student_id) = filters.student_id {
            query.push(" AND student_id = ").push_bind(student_id);
        }
        if let Some(subject) = &filters.subject {
            query.push(" AND subject = ").push_bind(subject.clone());
        }
        if let Some(assessment_type) = &filters.assessment_type {
            query
                .push(" AND assessment_type = ")
                .push_bind(assessment_type.clone());
        }
        if let Some(from) = filters.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filters.to {
            query.push(" AND date <= ").push_bind(to);
        }
    }

    #[instrument(skip(db))]
    pub async fn create_grade(db: &PgPool, dto: CreateGradeDto) -> Result<GradeRecord, AppError> {
        let grade = sqlx::query_as::<_, GradeRecord>(&format!(
            "INSERT INTO grades (student_id, subject, assessment_type, score, max_score, weight, date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {GRADE_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.subject.trim())
        .bind(dto.assessment_type.trim())
        .bind(dto.score)
        .bind(dto.max_score)
        .bind(dto.weight.unwrap_or(DEFAULT_WEIGHT))
        .bind(dto.date.unwrap_or_else(Utc::now))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Grade already exists", "Student not found"))?;

        track_grade_recorded(&grade.subject);
        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn get_grades(
        db: &PgPool,
        filters: GradeQueryParams,
    ) -> Result<PaginatedGradesResponse, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM grades");
        Self::push_filters(&mut count_query, &filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await
            .context("Failed to count grades")
            .map_err(AppError::database)?;

        let mut data_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {GRADE_COLUMNS} FROM grades"));
        Self::push_filters(&mut data_query, &filters);
        data_query
            .push(" ORDER BY date DESC, created_at DESC LIMIT ")
            .push_bind(filters.pagination.limit())
            .push(" OFFSET ")
            .push_bind(filters.pagination.offset());

        let grades = data_query
            .build_query_as::<GradeRecord>()
            .fetch_all(db)
            .await
            .context("Failed to fetch grades")
            .map_err(AppError::database)?;

        Ok(PaginatedGradesResponse {
            data: grades,
            meta: PaginationMeta::from_params(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_grade_by_id(db: &PgPool, id: Uuid) -> Result<GradeRecord, AppError> {
        sqlx::query_as::<_, GradeRecord>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch grade by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_grade(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete grade")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade not found")));
        }

        Ok(())
    }
}
