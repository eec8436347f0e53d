pub mod attendance;
pub mod grade_configs;
pub mod grades;
pub mod reports;
pub mod students;
