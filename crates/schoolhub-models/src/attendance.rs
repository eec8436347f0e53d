//! Attendance records.

use chrono::{DateTime, Utc};
use schoolhub_core::pagination::{PaginationMeta, PaginationParams};
use schoolhub_core::serde::{
    deserialize_optional_datetime, deserialize_optional_end_datetime, deserialize_optional_uuid,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Stored as the Postgres enum `attendance_status`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "attendance_status")]
pub enum AttendanceStatus {
    #[serde(alias = "PRESENT", alias = "present")]
    Present,
    #[serde(alias = "ABSENT", alias = "absent")]
    Absent,
    #[serde(alias = "LATE", alias = "late")]
    Late,
    #[serde(alias = "EXCUSED", alias = "excused")]
    Excused,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
            Self::Excused => "Excused",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown attendance status: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceDto {
    pub student_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub subject: String,
    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[validate(length(max = 500, message = "remarks must be at most 500 characters"))]
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceQueryParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    pub subject: Option<String>,
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_end_datetime")]
    pub to: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAttendanceResponse {
    pub data: Vec<AttendanceRecord>,
    pub meta: PaginationMeta,
}
