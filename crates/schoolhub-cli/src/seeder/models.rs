//! Seed rows and seeding configuration.

use chrono::{DateTime, Utc};
use schoolhub_models::AttendanceStatus;
use uuid::Uuid;

/// Seeded students are recognised by this email domain when clearing.
pub const SEED_EMAIL_DOMAIN: &str = "seed.schoolhub.test";

pub const DEFAULT_SUBJECTS: [&str; 6] = [
    "Mathematics",
    "English",
    "Biology",
    "Chemistry",
    "History",
    "Geography",
];

pub const ASSESSMENT_TYPES: [(&str, f64, f64); 4] = [
    // (type, max score, weight)
    ("Quiz", 20.0, 1.0),
    ("Homework", 10.0, 0.5),
    ("Test", 50.0, 2.0),
    ("Exam", 100.0, 3.0),
];

pub struct StudentSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade_level: String,
}

pub struct GradeSeed {
    pub student_id: Uuid,
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub date: DateTime<Utc>,
}

pub struct AttendanceSeed {
    pub student_id: Uuid,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub num_students: usize,
    pub subjects: Vec<String>,
    pub grades_per_subject: usize,
    /// School days of attendance per student, counted back from today.
    pub attendance_days: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_students: 50,
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            grades_per_subject: 6,
            attendance_days: 60,
        }
    }
}

impl SeedConfig {
    pub fn new(num_students: usize) -> Self {
        Self {
            num_students,
            ..Default::default()
        }
    }

    pub fn with_grades_per_subject(mut self, grades_per_subject: usize) -> Self {
        self.grades_per_subject = grades_per_subject;
        self
    }

    pub fn with_attendance_days(mut self, attendance_days: usize) -> Self {
        self.attendance_days = attendance_days;
        self
    }

    pub fn total_grades(&self) -> usize {
        self.num_students * self.subjects.len() * self.grades_per_subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_follow_config() {
        let config = SeedConfig::new(10).with_grades_per_subject(4);
        assert_eq!(config.total_grades(), 10 * DEFAULT_SUBJECTS.len() * 4);
    }
}
