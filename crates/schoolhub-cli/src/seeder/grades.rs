//! Grade seeding.

use chrono::{Duration, Utc};
use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{ASSESSMENT_TYPES, GradeSeed};

/// Generates `grades_per_subject` assessments per student and subject,
/// spread over the last `span_days` days. Each student gets a baseline
/// ability so their grades cluster instead of being uniform noise.
pub fn generate_grades(
    student_ids: &[Uuid],
    subjects: &[String],
    grades_per_subject: usize,
    span_days: i64,
) -> Vec<GradeSeed> {
    let now = Utc::now();
    let span_days = span_days.max(1);

    student_ids
        .par_iter()
        .flat_map(|&student_id| {
            let mut rng = rand::thread_rng();
            let ability: f64 = rng.gen_range(0.45..0.95);
            let mut grades = Vec::with_capacity(subjects.len() * grades_per_subject);

            for subject in subjects {
                for idx in 0..grades_per_subject {
                    let (assessment_type, max_score, weight) =
                        ASSESSMENT_TYPES[idx % ASSESSMENT_TYPES.len()];
                    let ratio = (ability + rng.gen_range(-0.15..0.15)).clamp(0.0, 1.0);
                    let score = (max_score * ratio * 2.0).round() / 2.0;
                    let days_ago = rng.gen_range(0..span_days);

                    grades.push(GradeSeed {
                        student_id,
                        subject: subject.clone(),
                        assessment_type: assessment_type.to_string(),
                        score,
                        max_score,
                        weight,
                        date: now - Duration::days(days_ago),
                    });
                }
            }

            grades
        })
        .collect()
}

pub async fn seed_grades(
    db: &PgPool,
    student_ids: &[Uuid],
    subjects: &[String],
    grades_per_subject: usize,
    span_days: i64,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📝 Seeding {} grades per subject for {} students...",
        grades_per_subject,
        student_ids.len()
    );

    let grades = generate_grades(student_ids, subjects, grades_per_subject, span_days);
    let inserted = insert_grades_batch(db, &grades).await?;

    println!(
        "   ✓ Inserted {} grades in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn insert_grades_batch(
    db: &PgPool,
    grades: &[GradeSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 7 binds per row, under the 65535 parameter limit
    const BATCH_SIZE: usize = 5000;
    let mut total = 0;

    for chunk in grades.chunks(BATCH_SIZE) {
        total += insert_grades_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(total)
}

async fn insert_grades_chunk(
    tx: &mut Transaction<'_, Postgres>,
    grades: &[GradeSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if grades.is_empty() {
        return Ok(0);
    }

    let mut query = sqlx::QueryBuilder::<Postgres>::new(
        "INSERT INTO grades (student_id, subject, assessment_type, score, max_score, weight, date) ",
    );
    query.push_values(grades, |mut row, grade| {
        row.push_bind(grade.student_id)
            .push_bind(&grade.subject)
            .push_bind(&grade.assessment_type)
            .push_bind(grade.score)
            .push_bind(grade.max_score)
            .push_bind(grade.weight)
            .push_bind(grade.date);
    });

    let result = query.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_grades_respect_write_rules() {
        let students = vec![Uuid::new_v4(), Uuid::new_v4()];
        let subjects = vec!["Mathematics".to_string(), "Art".to_string()];
        let grades = generate_grades(&students, &subjects, 5, 30);

        assert_eq!(grades.len(), 2 * 2 * 5);
        for grade in &grades {
            assert!(grade.score >= 0.0);
            assert!(grade.max_score > 0.0);
            assert!(grade.score <= grade.max_score);
            assert!(grade.weight >= 0.0);
        }
    }
}
