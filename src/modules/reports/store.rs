//! Read access to the records a report is built from.
//!
//! The aggregator never talks to the database. Services go through
//! [`ReportStore`], which lets handlers run against Postgres in production
//! and against an in-memory store in tests.

use std::future::Future;
use std::pin::Pin;

use schoolhub_core::AppError;
use schoolhub_models::{AttendanceRecord, GradeConfig, GradeRecord, RecordFilter};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>;

/// Source of the records a report is built from.
///
/// Rows come back ordered by `date` ascending so that report output is
/// stable for the same data.
pub trait ReportStore: Send + Sync {
    fn student_exists<'a>(&'a self, student_id: Uuid) -> StoreFuture<'a, bool>;

    fn fetch_grades_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<GradeRecord>>;

    fn fetch_attendance_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<AttendanceRecord>>;

    /// All configs, or only those for `subjects` when given.
    fn fetch_grade_configs<'a>(
        &'a self,
        subjects: Option<&'a [String]>,
    ) -> StoreFuture<'a, Vec<GradeConfig>>;
}

#[derive(Clone, Debug)]
pub struct PgReportStore {
    db: PgPool,
}

impl PgReportStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Appends the subject and date constraints shared by grades and attendance.
fn push_record_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
    if let Some(subject) = &filter.subject {
        query.push(" AND subject = ").push_bind(subject.clone());
    }
    if let Some(range) = filter.date_range {
        if let Some(from) = range.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = range.to {
            query.push(" AND date <= ").push_bind(to);
        }
    }
}

impl ReportStore for PgReportStore {
    fn student_exists<'a>(&'a self, student_id: Uuid) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)",
            )
            .bind(student_id)
            .fetch_one(&self.db)
            .await?;
            Ok(exists)
        })
    }

    #[instrument(skip(self))]
    fn fetch_grades_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<GradeRecord>> {
        Box::pin(async move {
            let mut query = QueryBuilder::<Postgres>::new(
                "SELECT id, student_id, subject, assessment_type, score, max_score, weight, date \
                 FROM grades WHERE student_id = ",
            );
            query.push_bind(student_id);
            push_record_filter(&mut query, filter);
            query.push(" ORDER BY date ASC, created_at ASC");

            let grades = query
                .build_query_as::<GradeRecord>()
                .fetch_all(&self.db)
                .await?;
            Ok(grades)
        })
    }

    #[instrument(skip(self))]
    fn fetch_attendance_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<AttendanceRecord>> {
        Box::pin(async move {
            let mut query = QueryBuilder::<Postgres>::new(
                "SELECT id, student_id, subject, date, status, remarks \
                 FROM attendance_records WHERE student_id = ",
            );
            query.push_bind(student_id);
            push_record_filter(&mut query, filter);
            if let Some(status) = filter.status {
                query.push(" AND status = ").push_bind(status);
            }
            query.push(" ORDER BY date ASC, created_at ASC");

            let records = query
                .build_query_as::<AttendanceRecord>()
                .fetch_all(&self.db)
                .await?;
            Ok(records)
        })
    }

    #[instrument(skip(self))]
    fn fetch_grade_configs<'a>(
        &'a self,
        subjects: Option<&'a [String]>,
    ) -> StoreFuture<'a, Vec<GradeConfig>> {
        Box::pin(async move {
            let mut query = QueryBuilder::<Postgres>::new(
                "SELECT id, subject, grading_scale, created_at, updated_at FROM grade_configs",
            );
            if let Some(subjects) = subjects {
                query.push(" WHERE subject = ANY(").push_bind(subjects.to_vec()).push(")");
            }
            query.push(" ORDER BY subject ASC");

            let configs = query
                .build_query_as::<GradeConfig>()
                .fetch_all(&self.db)
                .await?;
            Ok(configs)
        })
    }
}

/// Store backed by plain vectors, applying [`RecordFilter`] in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryReportStore {
    pub student_ids: Vec<Uuid>,
    pub grades: Vec<GradeRecord>,
    pub attendance: Vec<AttendanceRecord>,
    pub configs: Vec<GradeConfig>,
}

impl ReportStore for InMemoryReportStore {
    fn student_exists<'a>(&'a self, student_id: Uuid) -> StoreFuture<'a, bool> {
        Box::pin(async move { Ok(self.student_ids.contains(&student_id)) })
    }

    fn fetch_grades_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<GradeRecord>> {
        Box::pin(async move {
            let mut grades: Vec<GradeRecord> = self
                .grades
                .iter()
                .filter(|g| g.student_id == student_id && filter.matches_grade(g))
                .cloned()
                .collect();
            grades.sort_by_key(|g| g.date);
            Ok(grades)
        })
    }

    fn fetch_attendance_for_student<'a>(
        &'a self,
        student_id: Uuid,
        filter: &'a RecordFilter,
    ) -> StoreFuture<'a, Vec<AttendanceRecord>> {
        Box::pin(async move {
            let mut records: Vec<AttendanceRecord> = self
                .attendance
                .iter()
                .filter(|r| r.student_id == student_id && filter.matches_attendance(r))
                .cloned()
                .collect();
            records.sort_by_key(|r| r.date);
            Ok(records)
        })
    }

    fn fetch_grade_configs<'a>(
        &'a self,
        subjects: Option<&'a [String]>,
    ) -> StoreFuture<'a, Vec<GradeConfig>> {
        Box::pin(async move {
            Ok(self
                .configs
                .iter()
                .filter(|c| subjects.is_none_or(|s| s.contains(&c.subject)))
                .cloned()
                .collect())
        })
    }
}
