//! # SchoolHub Models
//!
//! Domain models and DTOs for the SchoolHub API: database rows, request
//! bodies with their validation rules, query parameters, and the report
//! structures produced by the aggregator.
//!
//! # Modules
//!
//! - [`attendance`]: Attendance records and statuses
//! - [`filters`]: Typed record filter shared by the report store
//! - [`grade_configs`]: Per-subject grading scales
//! - [`grades`]: Scored assessments
//! - [`reports`]: Subject and overall report output
//! - [`students`]: Student records
//!
//! All JSON field names are camelCase; timestamps are RFC 3339 in UTC.

pub mod attendance;
pub mod filters;
pub mod grade_configs;
pub mod grades;
pub mod reports;
pub mod students;

pub use attendance::{
    AttendanceQueryParams, AttendanceRecord, AttendanceStatus, CreateAttendanceDto,
    PaginatedAttendanceResponse,
};
pub use filters::{DateRange, RecordFilter};
pub use grade_configs::{GradeConfig, GradeThreshold, GradingScale, UpsertGradeConfigDto};
pub use grades::{CreateGradeDto, GradeQueryParams, GradeRecord, PaginatedGradesResponse};
pub use reports::{
    AssessmentGroups, AttendanceSummary, MonthlyAttendance, OverallReport, ReportQueryParams,
    StudentReportResponse, SubjectReport,
};
pub use students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentQueryParams, UpdateStudentDto,
};
