use utoipa::OpenApi;

use schoolhub_core::{ErrorResponse, PaginationMeta, PaginationParams};
use schoolhub_models::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, CreateAttendanceDto, CreateGradeDto,
    CreateStudentDto, GradeConfig, GradeRecord, GradeThreshold, GradingScale, MonthlyAttendance,
    OverallReport, PaginatedAttendanceResponse, PaginatedGradesResponse,
    PaginatedStudentsResponse, Student, StudentReportResponse, SubjectReport, UpdateStudentDto,
    UpsertGradeConfigDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::grade_configs::controller::upsert_grade_config,
        crate::modules::grade_configs::controller::get_grade_configs,
        crate::modules::grade_configs::controller::get_grade_config,
        crate::modules::grade_configs::controller::delete_grade_config,
        crate::modules::reports::controller::get_student_report,
        crate::modules::reports::controller::get_subject_report,
        crate::modules::reports::controller::get_attendance_trend,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            GradeRecord,
            CreateGradeDto,
            PaginatedGradesResponse,
            AttendanceStatus,
            AttendanceRecord,
            CreateAttendanceDto,
            PaginatedAttendanceResponse,
            GradeThreshold,
            GradingScale,
            GradeConfig,
            UpsertGradeConfigDto,
            SubjectReport,
            AttendanceSummary,
            OverallReport,
            MonthlyAttendance,
            StudentReportResponse,
        )
    ),
    tags(
        (name = "Students", description = "Student records"),
        (name = "Grades", description = "Scored assessments"),
        (name = "Attendance", description = "Attendance records"),
        (name = "Grade Configs", description = "Per-subject grading scales"),
        (name = "Reports", description = "Computed student reports")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "Student records, grades, attendance and computed report cards.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
