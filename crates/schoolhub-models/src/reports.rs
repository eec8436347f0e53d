//! Report output structures.

use chrono::{DateTime, Utc};
use schoolhub_core::serde::{deserialize_optional_datetime, deserialize_optional_end_datetime};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::grade_configs::GradeConfig;
use crate::grades::GradeRecord;

/// Grades keyed by assessment type.
///
/// Serialized as a JSON object whose keys appear in first-seen order, with
/// each group keeping the order its grades were pushed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentGroups(Vec<(String, Vec<GradeRecord>)>);

impl AssessmentGroups {
    pub fn push(&mut self, grade: GradeRecord) {
        match self
            .0
            .iter_mut()
            .find(|(kind, _)| *kind == grade.assessment_type)
        {
            Some((_, grades)) => grades.push(grade),
            None => self.0.push((grade.assessment_type.clone(), vec![grade])),
        }
    }

    pub fn get(&self, assessment_type: &str) -> Option<&[GradeRecord]> {
        self.0
            .iter()
            .find(|(kind, _)| kind == assessment_type)
            .map(|(_, grades)| grades.as_slice())
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(kind, _)| kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a GradeRecord> for AssessmentGroups {
    fn from_iter<I: IntoIterator<Item = &'a GradeRecord>>(iter: I) -> Self {
        let mut groups = Self::default();
        for grade in iter {
            groups.push(grade.clone());
        }
        groups
    }
}

impl Serialize for AssessmentGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, grades) in &self.0 {
            map.serialize_entry(kind, grades)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReport {
    pub subject: String,
    pub grades: Vec<GradeRecord>,
    #[schema(value_type = Object)]
    pub grouped_by_assessment_type: AssessmentGroups,
    pub average: f64,
    pub grade_letter: String,
    pub config: Option<GradeConfig>,
    pub total_assessments: usize,
    pub last_assessment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    /// Percentage of records marked Present, 0 when there are none
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub subject_reports: Vec<SubjectReport>,
    pub overall_average: f64,
    pub total_subjects: usize,
    pub total_assessments: usize,
    pub attendance_summary: AttendanceSummary,
}

/// Attendance counts for one calendar month (UTC), keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendance {
    pub month: String,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportResponse {
    pub student_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub report: OverallReport,
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQueryParams {
    /// Inclusive lower bound, RFC 3339 or YYYY-MM-DD
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound, RFC 3339 or YYYY-MM-DD (the whole day)
    #[serde(default, deserialize_with = "deserialize_optional_end_datetime")]
    pub to: Option<DateTime<Utc>>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn grade(kind: &str, score: f64) -> GradeRecord {
        GradeRecord {
            id: Uuid::new_v4(),
            student_id: Uuid::nil(),
            subject: "Biology".to_string(),
            assessment_type: kind.to_string(),
            score,
            max_score: 100.0,
            weight: 1.0,
            date: Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn groups_keep_first_seen_order_in_json() {
        let grades = [grade("Test", 1.0), grade("Homework", 2.0), grade("Test", 3.0)];
        let groups: AssessmentGroups = grades.iter().collect();

        assert_eq!(groups.types().collect::<Vec<_>>(), ["Test", "Homework"]);
        assert_eq!(groups.get("Test").map(|g| g.len()), Some(2));

        let json = serde_json::to_string(&groups).unwrap();
        let test_pos = json.find("\"Test\"").unwrap();
        let homework_pos = json.find("\"Homework\"").unwrap();
        assert!(test_pos < homework_pos);
    }

    #[test]
    fn plain_date_range_includes_records_on_the_last_day() {
        let params: ReportQueryParams =
            serde_json::from_str(r#"{"from": "2024-09-01", "to": "2024-09-30"}"#).unwrap();
        let filter = crate::filters::RecordFilter::for_student(Uuid::nil())
            .with_date_range(params.from, params.to);
        let range = filter.date_range.unwrap();

        assert!(range.contains(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 9, 30, 9, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 9, 30, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn monthly_attendance_flattens_summary() {
        let month = MonthlyAttendance {
            month: "2024-01".to_string(),
            summary: AttendanceSummary {
                total: 2,
                present: 1,
                absent: 1,
                late: 0,
                excused: 0,
                attendance_rate: 50.0,
            },
        };
        let json = serde_json::to_value(&month).unwrap();
        assert_eq!(json["month"], "2024-01");
        assert_eq!(json["attendanceRate"], 50.0);
        assert!(json.get("summary").is_none());
    }
}
