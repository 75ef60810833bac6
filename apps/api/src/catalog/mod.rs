//! Posting catalog: CSV load and pre-match filtering.
//!
//! The catalog is a tabular file with normalized (trimmed, lowercased)
//! column names. It is loaded once at startup and shared read-only; no row
//! is ever mutated or deleted during a session.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("posting catalog not found at {0}")]
    Missing(String),

    #[error("posting catalog is malformed: {0}")]
    Malformed(String),
}

/// Whether a posting is a full job or an internship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingKind {
    Job,
    Internship,
}

impl PostingKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "job" => Some(PostingKind::Job),
            "internship" => Some(PostingKind::Internship),
            _ => None,
        }
    }
}

/// Experience bracket selected by the caller when matching jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Fresher,
    Experienced,
}

/// One job or internship listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRecord {
    pub title: String,
    pub company: String,
    pub description: String,
    pub apply_link: String,
    pub kind: PostingKind,
    /// `None` when the catalog has no experience column.
    pub experience: Option<String>,
}

/// Caller-selected filter applied before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    Job { experience: ExperienceLevel },
    Internship,
}

/// The full posting catalog, loaded once from CSV.
#[derive(Debug, Clone)]
pub struct Catalog {
    postings: Vec<PostingRecord>,
    has_experience: bool,
}

impl Catalog {
    /// Loads the catalog from a CSV file.
    ///
    /// Headers are trimmed and lowercased before lookup. Required columns:
    /// `title`, `company`, `type`, `description`, `apply_link`; the
    /// `experience` column is optional. Rows with an unrecognized `type`
    /// are skipped with a warning; one bad row never aborts the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
            csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CatalogError::Missing(path.display().to_string())
            }
            _ => CatalogError::Malformed(e.to_string()),
        })?;

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_lowercase(), index))
            .collect();

        let required = ["title", "company", "type", "description", "apply_link"];
        for name in required {
            if !columns.contains_key(name) {
                return Err(CatalogError::Malformed(format!(
                    "missing required column '{name}'"
                )));
            }
        }
        let experience_column = columns.get("experience").copied();

        let mut postings = Vec::new();
        for (row_index, row) in reader.records().enumerate() {
            // Header is line 1, so data rows start at line 2.
            let line = row_index + 2;
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    warn!(line, error = %e, "skipping unreadable catalog row");
                    continue;
                }
            };

            let field =
                |name: &str| record.get(columns[name]).unwrap_or("").trim().to_string();

            let raw_kind = field("type");
            let Some(kind) = PostingKind::parse(&raw_kind) else {
                warn!(line, kind = %raw_kind, "skipping posting with unrecognized type");
                continue;
            };

            postings.push(PostingRecord {
                title: field("title"),
                company: field("company"),
                description: field("description"),
                apply_link: field("apply_link"),
                kind,
                experience: experience_column
                    .map(|index| record.get(index).unwrap_or("").trim().to_string()),
            });
        }

        Ok(Catalog {
            postings,
            has_experience: experience_column.is_some(),
        })
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Selects the postings matching `filter`, preserving catalog order.
    ///
    /// The Job/Experienced branch deliberately catches every job whose
    /// experience value is not "fresher", including blank or unknown values.
    /// When the catalog has no experience column, job filtering does not
    /// narrow by experience at all.
    pub fn filter(&self, filter: &RoleFilter) -> Vec<PostingRecord> {
        self.postings
            .iter()
            .filter(|posting| match filter {
                RoleFilter::Internship => posting.kind == PostingKind::Internship,
                RoleFilter::Job { experience } => {
                    if posting.kind != PostingKind::Job {
                        return false;
                    }
                    if !self.has_experience {
                        return true;
                    }
                    let is_fresher = posting
                        .experience
                        .as_deref()
                        .map(|value| value.trim().eq_ignore_ascii_case("fresher"))
                        .unwrap_or(false);
                    match experience {
                        ExperienceLevel::Fresher => is_fresher,
                        ExperienceLevel::Experienced => !is_fresher,
                    }
                }
            })
            .cloned()
            .collect()
    }

    #[cfg(test)]
    fn from_parts(postings: Vec<PostingRecord>, has_experience: bool) -> Self {
        Catalog {
            postings,
            has_experience,
        }
    }
}
