//! Matcher — ranks a collection of postings by textual similarity to a résumé.
//!
//! Scores are cosine similarity between tf-idf vectors, scaled to 0–100 and
//! rounded to two decimals. The résumé is vectorized exactly once per batch
//! and the sort is stable, so equal scores keep their catalog order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::PostingRecord;
use crate::vectorizer::TfidfVectorizer;

/// One scored comparison, carrying the posting display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub title: String,
    pub company: String,
    pub apply_link: String,
    /// 0–100, two-decimal precision.
    pub score: f64,
}

/// Cosine of the angle between two vectors. Defined as 0 when either vector
/// has zero norm, so empty or out-of-vocabulary text never divides by zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores `description` against an already-vectorized résumé.
fn score_vector(resume_vector: &[f64], description: &str, vectorizer: &TfidfVectorizer) -> f64 {
    let description_vector = vectorizer.vectorize(description);
    let similarity = cosine_similarity(resume_vector, &description_vector);
    ((similarity * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Scores a résumé against one free-text description. Public surface for the
/// custom-JD endpoint. Symmetric: `score(a, b) == score(b, a)`.
pub fn score(resume_text: &str, description: &str, vectorizer: &TfidfVectorizer) -> f64 {
    let resume_vector = vectorizer.vectorize(resume_text);
    score_vector(&resume_vector, description, vectorizer)
}

/// Ranks `postings` by similarity to `resume_text`, highest score first.
///
/// Empty or whitespace-only résumé text yields an empty result (a terminal
/// "no input" condition, not an error), as does an empty posting collection.
/// A posting with an empty description scores 0 but never aborts the batch.
/// The full ranked sequence is returned; truncation is the caller's concern.
pub fn rank_matches(
    resume_text: &str,
    postings: &[PostingRecord],
    vectorizer: &TfidfVectorizer,
) -> Vec<MatchResult> {
    if resume_text.trim().is_empty() {
        return Vec::new();
    }

    // Vectorize the résumé once, not per posting.
    let resume_vector = vectorizer.vectorize(resume_text);

    let mut results: Vec<MatchResult> = postings
        .iter()
        .map(|posting| MatchResult {
            title: posting.title.clone(),
            company: posting.company.clone(),
            apply_link: posting.apply_link.clone(),
            score: score_vector(&resume_vector, &posting.description, vectorizer),
        })
        .collect();

    // Stable sort: ties keep their input order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results
}
