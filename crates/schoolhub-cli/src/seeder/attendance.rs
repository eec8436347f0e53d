//! Attendance seeding.

use chrono::{Datelike, Duration, NaiveTime, Utc, Weekday};
use rand::Rng;
use rayon::prelude::*;
use schoolhub_models::AttendanceStatus;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::AttendanceSeed;

const HOMEROOM: &str = "Homeroom";

/// Picks a status with a realistic skew towards Present.
fn random_status(rng: &mut impl Rng) -> AttendanceStatus {
    match rng.gen_range(0..100) {
        0..=81 => AttendanceStatus::Present,
        82..=89 => AttendanceStatus::Late,
        90..=95 => AttendanceStatus::Absent,
        _ => AttendanceStatus::Excused,
    }
}

/// One homeroom record per student per weekday, for the last `days` weekdays.
pub fn generate_attendance(student_ids: &[Uuid], days: usize) -> Vec<AttendanceSeed> {
    let today = Utc::now().date_naive();
    let school_days: Vec<_> = (0..)
        .map(|offset| today - Duration::days(offset))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(days)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .collect();

    student_ids
        .par_iter()
        .flat_map(|&student_id| {
            let mut rng = rand::thread_rng();
            school_days
                .iter()
                .map(|&date| {
                    let status = random_status(&mut rng);
                    let remarks = match status {
                        AttendanceStatus::Excused => Some("Parent note on file".to_string()),
                        AttendanceStatus::Late => Some("Arrived after registration".to_string()),
                        _ => None,
                    };
                    AttendanceSeed {
                        student_id,
                        subject: HOMEROOM.to_string(),
                        date,
                        status,
                        remarks,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_attendance(
    db: &PgPool,
    student_ids: &[Uuid],
    days: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📅 Seeding {} days of attendance for {} students...",
        days,
        student_ids.len()
    );

    let records = generate_attendance(student_ids, days);
    let inserted = insert_attendance_batch(db, &records).await?;

    println!(
        "   ✓ Inserted {} attendance records in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn insert_attendance_batch(
    db: &PgPool,
    records: &[AttendanceSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 5000;
    let mut total = 0;

    for chunk in records.chunks(BATCH_SIZE) {
        total += insert_attendance_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(total)
}

async fn insert_attendance_chunk(
    tx: &mut Transaction<'_, Postgres>,
    records: &[AttendanceSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut query = sqlx::QueryBuilder::<Postgres>::new(
        "INSERT INTO attendance_records (student_id, subject, date, status, remarks) ",
    );
    query.push_values(records, |mut row, record| {
        row.push_bind(record.student_id)
            .push_bind(&record.subject)
            .push_bind(record.date)
            .push_bind(record.status)
            .push_bind(&record.remarks);
    });
    query.push(" ON CONFLICT (student_id, subject, date) DO NOTHING");

    let result = query.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn attendance_skips_weekends_and_is_unique_per_day() {
        let student = Uuid::new_v4();
        let records = generate_attendance(&[student], 15);

        assert_eq!(records.len(), 15);
        let days: HashSet<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(days.len(), 15);
        assert!(
            records
                .iter()
                .all(|r| !matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun))
        );
    }
}
