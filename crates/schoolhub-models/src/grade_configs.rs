//! Per-subject grading scales.
//!
//! A [`GradingScale`] is an ordered list of `(letter, minPercentage)` pairs.
//! Letter resolution walks the list in declared order and takes the first
//! threshold the average reaches, so the order of entries matters: a scale
//! that lists `F: 0` before `A: 90` resolves every non-negative average to
//! `F`. The order is kept exactly as configured.
//!
//! On the wire the scale is an array of `{ "letter", "minPercentage" }`.
//! For compatibility it is also accepted as an object (`{"A": 90, "B": 80}`),
//! in which case the key order of the document is kept.
//! Letters are trimmed of surrounding whitespace on input.

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Letter returned when no threshold matches, even on the default scale.
pub const FALLBACK_LETTER: &str = "F";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeThreshold {
    pub letter: String,
    pub min_percentage: f64,
}

impl GradeThreshold {
    pub fn new(letter: impl Into<String>, min_percentage: f64) -> Self {
        Self {
            letter: letter.into(),
            min_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct GradingScale(pub Vec<GradeThreshold>);

impl GradingScale {
    /// A: 90, B: 80, C: 70, D: 60, F: 0.
    pub fn standard() -> Self {
        Self(vec![
            GradeThreshold::new("A", 90.0),
            GradeThreshold::new("B", 80.0),
            GradeThreshold::new("C", 70.0),
            GradeThreshold::new("D", 60.0),
            GradeThreshold::new("F", 0.0),
        ])
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(letter, min)| GradeThreshold::new(letter, min))
                .collect(),
        )
    }

    /// First letter, in declared order, whose threshold is at or below
    /// `average`. `None` when nothing matches (including a NaN average).
    pub fn first_match(&self, average: f64) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.min_percentage <= average)
            .map(|t| t.letter.as_str())
    }

    pub fn thresholds(&self) -> &[GradeThreshold] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for GradingScale {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for GradingScale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScaleVisitor;

        impl<'de> Visitor<'de> for ScaleVisitor {
            type Value = GradingScale;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of {letter, minPercentage} or a map of letter to threshold")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(5));
                while let Some(t) = seq.next_element::<GradeThreshold>()? {
                    out.push(GradeThreshold::new(t.letter.trim(), t.min_percentage));
                }
                Ok(GradingScale(out))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(5));
                while let Some((letter, min)) = map.next_entry::<String, f64>()? {
                    out.push(GradeThreshold::new(letter.trim(), min));
                }
                Ok(GradingScale(out))
            }
        }

        deserializer.deserialize_any(ScaleVisitor)
    }
}

/// Rules a stored scale must satisfy: at least one entry, non-empty unique
/// letters, finite thresholds within 0..=100, and one entry covering 0%.
pub fn validate_grading_scale(scale: &GradingScale) -> Result<(), ValidationError> {
    fn fail(code: &'static str, message: &'static str) -> Result<(), ValidationError> {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        Err(err)
    }

    if scale.is_empty() {
        return fail("empty_scale", "gradingScale must have at least one entry");
    }

    let mut seen = HashSet::new();
    for t in scale.thresholds() {
        let letter = t.letter.trim();
        if letter.is_empty() || letter.chars().count() > 5 {
            return fail("invalid_letter", "letters must be 1-5 characters");
        }
        if !seen.insert(letter.to_string()) {
            return fail("duplicate_letter", "letters must be unique");
        }
        if !t.min_percentage.is_finite() || !(0.0..=100.0).contains(&t.min_percentage) {
            return fail("invalid_threshold", "thresholds must be between 0 and 100");
        }
    }

    if !scale.thresholds().iter().any(|t| t.min_percentage == 0.0) {
        return fail("no_floor", "gradingScale must include a threshold of 0");
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeConfig {
    pub id: Uuid,
    pub subject: String,
    #[sqlx(json)]
    pub grading_scale: GradingScale,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GradeConfig {
    /// An unsaved config, handy for in-memory stores and tests.
    pub fn new(subject: impl Into<String>, grading_scale: GradingScale) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            grading_scale,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertGradeConfigDto {
    #[validate(custom(function = "validate_grading_scale"))]
    pub grading_scale: GradingScale,
}
