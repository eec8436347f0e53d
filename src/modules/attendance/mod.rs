//! Attendance records per student, subject and day.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_attendance_router;
