//! Sample grading scales.

use schoolhub_models::GradingScale;
use sqlx::PgPool;
use sqlx::types::Json;

/// A stricter scale for the first subject and a pass/fail scale for the
/// last; the rest use the standard scale.
pub fn sample_scales(subjects: &[String]) -> Vec<(String, GradingScale)> {
    let mut scales = Vec::new();
    if let Some(first) = subjects.first() {
        scales.push((
            first.clone(),
            GradingScale::from_pairs([
                ("A", 93.0),
                ("B", 85.0),
                ("C", 75.0),
                ("D", 65.0),
                ("F", 0.0),
            ]),
        ));
    }
    if subjects.len() > 1
        && let Some(last) = subjects.last()
    {
        scales.push((
            last.clone(),
            GradingScale::from_pairs([("Pass", 50.0), ("Fail", 0.0)]),
        ));
    }
    scales
}

/// Upserts the sample scales. Existing configs for those subjects are replaced.
pub async fn seed_grade_configs(
    db: &PgPool,
    subjects: &[String],
) -> Result<usize, Box<dyn std::error::Error>> {
    println!("📏 Seeding grading scales...");

    let scales = sample_scales(subjects);
    for (subject, scale) in &scales {
        sqlx::query(
            r#"INSERT INTO grade_configs (subject, grading_scale)
               VALUES ($1, $2)
               ON CONFLICT (subject)
               DO UPDATE SET grading_scale = EXCLUDED.grading_scale, updated_at = NOW()"#,
        )
        .bind(subject)
        .bind(Json(scale))
        .execute(db)
        .await?;
    }

    println!("   ✓ Saved {} grading scales", scales.len());
    Ok(scales.len())
}
