//! Database seeding for development and demos.
//!
//! Generation runs on Rayon; inserts are batched multi-row statements inside
//! a transaction per table.

pub mod attendance;
pub mod grade_configs;
pub mod grades;
pub mod models;
pub mod students;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;

/// Grades are spread over roughly the same window as attendance.
fn grade_span_days(config: &SeedConfig) -> i64 {
    (config.attendance_days as i64 * 7 / 5).max(1)
}

/// Seeds students, their grades and attendance, and sample grading scales.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...\n");

    let student_ids = students::seed_students(db, config.num_students).await?;
    grades::seed_grades(
        db,
        &student_ids,
        &config.subjects,
        config.grades_per_subject,
        grade_span_days(&config),
    )
    .await?;
    attendance::seed_attendance(db, &student_ids, config.attendance_days).await?;
    grade_configs::seed_grade_configs(db, &config.subjects).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes seeded students along with their grades and attendance.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = students::clear_students(db).await?;
    println!("\n✅ Cleared seeded data");
    Ok(deleted)
}
