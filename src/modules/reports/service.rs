use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use schoolhub_core::AppError;

use crate::metrics::track_report_generated;
use crate::modules::reports::aggregator::{
    compute_monthly_attendance_trend, compute_overall_report, compute_subject_report,
    distinct_subjects,
};
use crate::modules::reports::model::{
    MonthlyAttendance, RecordFilter, ReportQueryParams, StudentReportResponse, SubjectReport,
};
use crate::modules::reports::store::ReportStore;

pub struct ReportService;

impl ReportService {
    /// Builds and validates the record filter for one student's report.
    fn build_filter(
        student_id: Uuid,
        params: &ReportQueryParams,
        subject: Option<&str>,
    ) -> Result<RecordFilter, AppError> {
        let mut filter =
            RecordFilter::for_student(student_id).with_date_range(params.from, params.to);
        if let Some(subject) = subject.or(params.subject.as_deref()) {
            filter = filter.with_subject(subject.trim());
        }

        filter
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow::anyhow!("{}", errors)))?;
        Ok(filter)
    }

    async fn ensure_student_exists(
        store: &dyn ReportStore,
        student_id: Uuid,
    ) -> Result<(), AppError> {
        if !store.student_exists(student_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn get_student_report(
        store: &dyn ReportStore,
        student_id: Uuid,
        params: ReportQueryParams,
    ) -> Result<StudentReportResponse, AppError> {
        let filter = Self::build_filter(student_id, &params, None)?;
        Self::ensure_student_exists(store, student_id).await?;

        let grades = store.fetch_grades_for_student(student_id, &filter).await?;
        let attendance = store
            .fetch_attendance_for_student(student_id, &filter)
            .await?;

        let subjects: Vec<String> = distinct_subjects(&grades)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let configs = if subjects.is_empty() {
            Vec::new()
        } else {
            store.fetch_grade_configs(Some(subjects.as_slice())).await?
        };

        let report = compute_overall_report(&grades, &configs, &attendance);
        track_report_generated("overall");
        info!(
            student_id = %student_id,
            subjects = report.total_subjects,
            assessments = report.total_assessments,
            "Student report generated"
        );

        Ok(StudentReportResponse {
            student_id,
            from: params.from,
            to: params.to,
            report,
        })
    }

    #[instrument(skip(store))]
    pub async fn get_subject_report(
        store: &dyn ReportStore,
        student_id: Uuid,
        subject: String,
        params: ReportQueryParams,
    ) -> Result<SubjectReport, AppError> {
        let filter = Self::build_filter(student_id, &params, Some(&subject))?;
        Self::ensure_student_exists(store, student_id).await?;

        let grades = store.fetch_grades_for_student(student_id, &filter).await?;
        let subject = filter.subject.clone().unwrap_or(subject);
        let subjects = [subject.clone()];
        let configs = store.fetch_grade_configs(Some(subjects.as_slice())).await?;

        let report = compute_subject_report(&subject, &grades, configs.first());
        track_report_generated("subject");

        Ok(report)
    }

    #[instrument(skip(store))]
    pub async fn get_attendance_trend(
        store: &dyn ReportStore,
        student_id: Uuid,
        params: ReportQueryParams,
    ) -> Result<Vec<MonthlyAttendance>, AppError> {
        let filter = Self::build_filter(student_id, &params, None)?;
        Self::ensure_student_exists(store, student_id).await?;

        let attendance = store
            .fetch_attendance_for_student(student_id, &filter)
            .await?;
        track_report_generated("attendance_trend");

        Ok(compute_monthly_attendance_trend(&attendance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::reports::store::InMemoryReportStore;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use schoolhub_models::{GradeConfig, GradeRecord, GradingScale};

    fn grade(student_id: Uuid, subject: &str, score: f64, day: u32) -> GradeRecord {
        GradeRecord {
            id: Uuid::new_v4(),
            student_id,
            subject: subject.to_string(),
            assessment_type: "Test".to_string(),
            score,
            max_score: 100.0,
            weight: 1.0,
            date: Utc.with_ymd_and_hms(2024, 9, day, 9, 0, 0).unwrap(),
        }
    }

    fn store_for(student_id: Uuid) -> InMemoryReportStore {
        InMemoryReportStore {
            student_ids: vec![student_id],
            grades: vec![
                grade(student_id, "Maths", 90.0, 3),
                grade(student_id, "History", 50.0, 4),
                grade(student_id, "Maths", 70.0, 10),
            ],
            configs: vec![GradeConfig::new(
                "History",
                GradingScale::from_pairs([("Pass", 50.0), ("Fail", 0.0)]),
            )],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn student_report_uses_configured_scales() {
        let student = Uuid::new_v4();
        let store = store_for(student);

        let response =
            ReportService::get_student_report(&store, student, ReportQueryParams::default())
                .await
                .unwrap();

        assert_eq!(response.student_id, student);
        assert_eq!(response.report.total_subjects, 2);
        assert_eq!(response.report.subject_reports[0].subject, "Maths");
        assert_eq!(response.report.subject_reports[0].grade_letter, "B");
        assert_eq!(response.report.subject_reports[1].grade_letter, "Pass");
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let store = store_for(Uuid::new_v4());
        let err = ReportService::get_student_report(
            &store,
            Uuid::new_v4(),
            ReportQueryParams::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn inverted_range_is_unprocessable() {
        let student = Uuid::new_v4();
        let store = store_for(student);
        let params = ReportQueryParams {
            from: Some(Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
            subject: None,
        };
        let err = ReportService::get_student_report(&store, student, params)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn date_range_narrows_the_report() {
        let student = Uuid::new_v4();
        let store = store_for(student);
        let params = ReportQueryParams {
            from: Some(Utc.with_ymd_and_hms(2024, 9, 5, 0, 0, 0).unwrap()),
            to: None,
            subject: None,
        };

        let response = ReportService::get_student_report(&store, student, params)
            .await
            .unwrap();
        assert_eq!(response.report.total_assessments, 1);
        assert_eq!(response.report.subject_reports[0].average, 70.0);
    }

    #[tokio::test]
    async fn plain_to_date_includes_grades_on_that_day() {
        let student = Uuid::new_v4();
        let store = store_for(student);
        let params: ReportQueryParams =
            serde_json::from_str(r#"{"from": "2024-09-04", "to": "2024-09-10"}"#).unwrap();

        let response = ReportService::get_student_report(&store, student, params)
            .await
            .unwrap();
        assert_eq!(response.report.total_assessments, 2);
        assert_eq!(response.report.subject_reports[0].subject, "History");
        assert_eq!(response.report.subject_reports[1].average, 70.0);
    }

    #[tokio::test]
    async fn subject_report_without_grades_is_empty() {
        let student = Uuid::new_v4();
        let store = store_for(student);

        let report = ReportService::get_subject_report(
            &store,
            student,
            "Geography".to_string(),
            ReportQueryParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(report.total_assessments, 0);
        assert_eq!(report.average, 0.0);
        assert_eq!(report.grade_letter, "F");
        assert!(report.last_assessment_date.is_none());
    }
}
