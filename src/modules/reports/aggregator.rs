//! Grade and attendance report aggregation.
//!
//! Pure functions over records that were already fetched: no I/O, no shared
//! state, inputs are only borrowed. Output is deterministic for a given input
//! order, and empty inputs produce zeroed summaries rather than errors.
//!
//! Records are not validated here. A grade with `max_score == 0` yields a
//! non-finite percentage which flows into the subject average (and from
//! there into the overall average); its letter falls back to `F`. Write-side
//! validation is expected to keep such rows out of storage.

use std::collections::BTreeMap;

use chrono::Datelike;
use schoolhub_models::grade_configs::FALLBACK_LETTER;
use schoolhub_models::{
    AssessmentGroups, AttendanceRecord, AttendanceStatus, AttendanceSummary, GradeConfig,
    GradeRecord, GradingScale, MonthlyAttendance, OverallReport, SubjectReport,
};

/// Weighted mean of grade percentages. 0 when the weights sum to 0.
pub fn weighted_average<'a, I>(grades: I) -> f64
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let (total, weight_sum) = grades
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(total, weight_sum), grade| {
            (
                total + grade.percentage() * grade.weight,
                weight_sum + grade.weight,
            )
        });

    if weight_sum > 0.0 { total / weight_sum } else { 0.0 }
}

/// Letter for `average` using `scale` in declared order, then the standard
/// scale, then `F`.
pub fn resolve_grade_letter(average: f64, scale: Option<&GradingScale>) -> String {
    if let Some(letter) = scale.and_then(|s| s.first_match(average)) {
        return letter.to_owned();
    }

    GradingScale::standard()
        .first_match(average)
        .unwrap_or(FALLBACK_LETTER)
        .to_owned()
}

pub fn compute_subject_report(
    subject: &str,
    grades: &[GradeRecord],
    config: Option<&GradeConfig>,
) -> SubjectReport {
    let subject_grades: Vec<GradeRecord> = grades
        .iter()
        .filter(|g| g.subject == subject)
        .cloned()
        .collect();

    let grouped: AssessmentGroups = subject_grades.iter().collect();
    let average = weighted_average(&subject_grades);
    let grade_letter = resolve_grade_letter(average, config.map(|c| &c.grading_scale));
    let last_assessment_date = subject_grades.iter().map(|g| g.date).max();

    SubjectReport {
        subject: subject.to_string(),
        total_assessments: subject_grades.len(),
        grades: subject_grades,
        grouped_by_assessment_type: grouped,
        average,
        grade_letter,
        config: config.cloned(),
        last_assessment_date,
    }
}

/// Distinct subjects in first-seen order.
pub fn distinct_subjects(grades: &[GradeRecord]) -> Vec<&str> {
    let mut subjects: Vec<&str> = Vec::new();
    for grade in grades {
        if !subjects.contains(&grade.subject.as_str()) {
            subjects.push(&grade.subject);
        }
    }
    subjects
}

pub fn summarize_attendance<'a, I>(records: I) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summary = AttendanceSummary::default();
    for record in records {
        summary.total += 1;
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::Excused => summary.excused += 1,
        }
    }

    summary.attendance_rate = if summary.total > 0 {
        summary.present as f64 / summary.total as f64 * 100.0
    } else {
        0.0
    };
    summary
}

/// Attendance bucketed by calendar month (UTC), oldest month first.
pub fn compute_monthly_attendance_trend(records: &[AttendanceRecord]) -> Vec<MonthlyAttendance> {
    let mut by_month: BTreeMap<(i32, u32), Vec<&AttendanceRecord>> = BTreeMap::new();
    for record in records {
        by_month
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record);
    }

    by_month
        .into_iter()
        .map(|((year, month), rows)| MonthlyAttendance {
            month: format!("{year:04}-{month:02}"),
            summary: summarize_attendance(rows),
        })
        .collect()
}

/// Builds the full report from one student's records.
pub fn compute_overall_report(
    grades: &[GradeRecord],
    configs: &[GradeConfig],
    attendance: &[AttendanceRecord],
) -> OverallReport {
    let subject_reports: Vec<SubjectReport> = distinct_subjects(grades)
        .into_iter()
        .map(|subject| {
            let config = configs.iter().find(|c| c.subject == subject);
            compute_subject_report(subject, grades, config)
        })
        .collect();

    let overall_average = if subject_reports.is_empty() {
        0.0
    } else {
        subject_reports.iter().map(|r| r.average).sum::<f64>() / subject_reports.len() as f64
    };

    OverallReport {
        total_subjects: subject_reports.len(),
        total_assessments: grades.len(),
        subject_reports,
        overall_average,
        attendance_summary: summarize_attendance(attendance),
    }
}
