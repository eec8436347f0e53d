//! Student seeding.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, StudentSeed};

const GRADE_LEVELS: [&str; 6] = ["JSS1", "JSS2", "JSS3", "SS1", "SS2", "SS3"];

/// Generates students in parallel. Emails embed the index so they stay unique.
pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                idx,
                SEED_EMAIL_DOMAIN
            );

            StudentSeed {
                first_name,
                last_name,
                email,
                grade_level: GRADE_LEVELS[idx % GRADE_LEVELS.len()].to_string(),
            }
        })
        .collect()
}

pub async fn seed_students(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count);
    let ids = insert_students_batch(db, &students).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_students_batch(
    db: &PgPool,
    students: &[StudentSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(students.len());

    for chunk in students.chunks(BATCH_SIZE) {
        let ids = insert_students_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = sqlx::QueryBuilder::<Postgres>::new(
        "INSERT INTO students (first_name, last_name, email, grade_level) ",
    );
    query.push_values(students, |mut row, student| {
        row.push_bind(&student.first_name)
            .push_bind(&student.last_name)
            .push_bind(&student.email)
            .push_bind(&student.grade_level);
    });
    query.push(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let ids = query
        .build_query_scalar::<Uuid>()
        .fetch_all(&mut **tx)
        .await?;
    Ok(ids)
}

/// Deletes seeded students. Their grades and attendance cascade.
pub async fn clear_students(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded students...");

    let result = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} students in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_emails_are_unique_and_marked() {
        let students = generate_students(200);
        let emails: HashSet<&str> = students.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails.len(), 200);
        assert!(students.iter().all(|s| s.email.ends_with(SEED_EMAIL_DOMAIN)));
    }
}
