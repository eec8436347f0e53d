use anyhow::Context;
use chrono::Utc;
use schoolhub_core::{AppError, PaginationMeta};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_attendance_recorded;
use crate::modules::attendance::model::{
    AttendanceQueryParams, AttendanceRecord, CreateAttendanceDto, PaginatedAttendanceResponse,
};

const ATTENDANCE_COLUMNS: &str = "id, student_id, subject, date, status, remarks";

pub struct AttendanceService;

impl AttendanceService {
    fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &AttendanceQueryParams) {
        query.push(" WHERE 1 = 1");
        if let Some(student_id) = filters.student_id {
            query.push(" AND student_id = ").push_bind(student_id);
        }
        if let Some(subject) = &filters.subject {
            query.push(" AND subject = ").push_bind(subject.clone());
        }
        if let Some(status) = filters.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(from) = filters.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filters.to {
            query.push(" AND date <= ").push_bind(to);
        }
    }

    #[instrument(skip(db))]
    pub async fn create_attendance(
        db: &PgPool,
        dto: CreateAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "INSERT INTO attendance_records (student_id, subject, date, status, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.subject.trim())
        .bind(dto.date.unwrap_or_else(Utc::now))
        .bind(dto.status)
        .bind(&dto.remarks)
        .fetch_one(db)
        .await
        .map_err(|e| {
            AppError::from_write(
                e,
                "Attendance already recorded for this student, subject and date",
                "Student not found",
            )
        })?;

        track_attendance_recorded(record.status.as_str());
        Ok(record)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        filters: AttendanceQueryParams,
    ) -> Result<PaginatedAttendanceResponse, AppError> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM attendance_records");
        Self::push_filters(&mut count_query, &filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await
            .context("Failed to count attendance records")
            .map_err(AppError::database)?;

        let mut data_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_records"
        ));
        Self::push_filters(&mut data_query, &filters);
        data_query
            .push(" ORDER BY date DESC, created_at DESC LIMIT ")
            .push_bind(filters.pagination.limit())
            .push(" OFFSET ")
            .push_bind(filters.pagination.offset());

        let records = data_query
            .build_query_as::<AttendanceRecord>()
            .fetch_all(db)
            .await
            .context("Failed to fetch attendance records")
            .map_err(AppError::database)?;

        Ok(PaginatedAttendanceResponse {
            data: records,
            meta: PaginationMeta::from_params(&filters.pagination, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_attendance(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete attendance record")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Attendance record not found"
            )));
        }

        Ok(())
    }
}
