use anyhow::Context;
use schoolhub_core::{AppError, PaginationMeta};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentQueryParams, UpdateStudentDto,
};

const STUDENT_COLUMNS: &str =
    "id, first_name, last_name, email, grade_level, date_of_birth, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &StudentQueryParams) {
        query.push(" WHERE 1 = 1");
        if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            query
                .push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(grade_level) = &filters.grade_level {
            query.push(" AND grade_level = ").push_bind(grade_level.clone());
        }
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (first_name, last_name, email, grade_level, date_of_birth)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(&dto.grade_level)
        .bind(dto.date_of_birth)
        .fetch_one(db)
        .await
        .map_err(|e| {
            AppError::from_write(
                e,
                &format!("Student with email {} already exists", dto.email),
                "Student not found",
            )
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentQueryParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM students");
        Self::push_filters(&mut count_query, &filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        let mut data_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {STUDENT_COLUMNS} FROM students"));
        Self::push_filters(&mut data_query, &filters);
        data_query
            .push(" ORDER BY last_name, first_name LIMIT ")
            .push_bind(filters.pagination.limit())
            .push(" OFFSET ")
            .push_bind(filters.pagination.offset());

        let students = data_query
            .build_query_as::<Student>()
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta::from_params(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let email = dto
            .email
            .map(|e| e.trim().to_lowercase())
            .unwrap_or(existing.email);
        let grade_level = dto.grade_level.or(existing.grade_level);
        let date_of_birth = dto.date_of_birth.or(existing.date_of_birth);

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET first_name = $1, last_name = $2, email = $3, grade_level = $4,
                 date_of_birth = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(first_name.trim())
        .bind(last_name.trim())
        .bind(&email)
        .bind(&grade_level)
        .bind(date_of_birth)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            AppError::from_write(
                e,
                &format!("Student with email {} already exists", email),
                "Student not found",
            )
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    /// Grades and attendance cascade with the student.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
