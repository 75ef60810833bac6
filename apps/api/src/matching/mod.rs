// Matching engine: cosine-similarity scoring of a résumé against postings.
// All vector math lives in matcher.rs; handlers.rs is the HTTP surface.

pub mod handlers;
pub mod matcher;
