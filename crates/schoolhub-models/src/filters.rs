//! Typed filter for grade and attendance lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::grades::GradeRecord;

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Every field is optional; unset fields do not constrain the lookup.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_record_filter"))]
pub struct RecordFilter {
    pub student_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub subject: Option<String>,
    pub date_range: Option<DateRange>,
    pub status: Option<AttendanceStatus>,
}

fn validate_record_filter(filter: &RecordFilter) -> Result<(), ValidationError> {
    if let Some(DateRange {
        from: Some(from),
        to: Some(to),
    }) = filter.date_range
        && from > to
    {
        let mut err = ValidationError::new("inverted_date_range");
        err.message = Some("from must not be after to".into());
        return Err(err);
    }
    Ok(())
}

impl RecordFilter {
    pub fn for_student(student_id: Uuid) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_date_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        let range = DateRange::new(from, to);
        self.date_range = (!range.is_unbounded()).then_some(range);
        self
    }

    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn matches_common(&self, student_id: Uuid, subject: &str, date: DateTime<Utc>) -> bool {
        self.student_id.is_none_or(|id| id == student_id)
            && self.subject.as_deref().is_none_or(|s| s == subject)
            && self.date_range.is_none_or(|range| range.contains(date))
    }

    /// Status is ignored for grades.
    pub fn matches_grade(&self, grade: &GradeRecord) -> bool {
        self.matches_common(grade.student_id, &grade.subject, grade.date)
    }

    pub fn matches_attendance(&self, record: &AttendanceRecord) -> bool {
        self.matches_common(record.student_id, &record.subject, record.date)
            && self.status.is_none_or(|s| s == record.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn inverted_range_fails_validation() {
        let filter = RecordFilter::for_student(Uuid::new_v4()).with_date_range(Some(at(10)), Some(at(1)));
        assert!(filter.validate().is_err());
    }

    #[test]
    fn empty_subject_fails_validation() {
        let filter = RecordFilter::default().with_subject("");
        assert!(filter.validate().is_err());
    }

    #[test]
    fn open_ended_ranges_are_valid() {
        let filter = RecordFilter::default().with_date_range(Some(at(10)), None);
        assert!(filter.validate().is_ok());
        assert!(filter.date_range.unwrap().contains(at(20)));
        assert!(!filter.date_range.unwrap().contains(at(9)));
    }

    #[test]
    fn unbounded_range_is_dropped() {
        let filter = RecordFilter::default().with_date_range(None, None);
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new(Some(at(1)), Some(at(3)));
        assert!(range.contains(at(1)));
        assert!(range.contains(at(3)));
        assert!(!range.contains(at(4)));
    }

    #[test]
    fn attendance_matching_respects_status() {
        let student = Uuid::new_v4();
        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            student_id: student,
            subject: "Chemistry".to_string(),
            date: at(2),
            status: AttendanceStatus::Late,
            remarks: None,
        };

        let filter = RecordFilter::for_student(student);
        assert!(filter.matches_attendance(&record));
        assert!(!filter.clone().with_status(AttendanceStatus::Present).matches_attendance(&record));
        assert!(!filter.with_subject("Physics").matches_attendance(&record));
        assert!(!RecordFilter::for_student(Uuid::new_v4()).matches_attendance(&record));
    }
}
