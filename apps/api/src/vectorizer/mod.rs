//! TF-IDF vectorizer adapter.
//!
//! Wraps a pre-trained model serialized as JSON: a `vocabulary` map from term
//! to vector dimension plus one `idf` weight per dimension. The model is
//! loaded once at startup and held read-only in `AppState` for every
//! subsequent `vectorize` call.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorizerError {
    #[error("vectorizer artifact not found at {0}")]
    ArtifactMissing(String),

    #[error("vectorizer artifact is corrupt: {0}")]
    ArtifactCorrupt(String),
}

/// A loaded TF-IDF model with a fixed vocabulary and idf weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Loads the model from a JSON artifact on disk.
    ///
    /// Fails with `ArtifactMissing` when the path does not resolve and
    /// `ArtifactCorrupt` when deserialization fails or the artifact is
    /// internally inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VectorizerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VectorizerError::ArtifactMissing(path.display().to_string())
            } else {
                VectorizerError::ArtifactCorrupt(e.to_string())
            }
        })?;

        let model: TfidfVectorizer = serde_json::from_str(&raw)
            .map_err(|e| VectorizerError::ArtifactCorrupt(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Builds a model from already-deserialized parts, with the same
    /// consistency checks as `load`.
    pub fn from_parts(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
    ) -> Result<Self, VectorizerError> {
        let model = TfidfVectorizer { vocabulary, idf };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), VectorizerError> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(VectorizerError::ArtifactCorrupt(format!(
                "idf has {} weights but vocabulary has {} terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        if let Some((term, &index)) = self
            .vocabulary
            .iter()
            .find(|&(_, &index)| index >= self.idf.len())
        {
            return Err(VectorizerError::ArtifactCorrupt(format!(
                "term '{term}' maps to out-of-range dimension {index}"
            )));
        }
        Ok(())
    }

    /// Number of vector dimensions (vocabulary size).
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// Produces the L2-normalized tf-idf vector for `text`.
    ///
    /// Total over any input: empty, whitespace-only, or fully
    /// out-of-vocabulary text yields the zero vector rather than an error.
    pub fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.idf.len()];

        for token in tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&token) {
                vector[column] += 1.0;
            }
        }

        for (value, weight) in vector.iter_mut().zip(&self.idf) {
            *value *= weight;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

/// Tokenization matching the pre-trained model: lowercase, maximal
/// alphanumeric runs, tokens shorter than two characters dropped.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_model() -> TfidfVectorizer {
        let vocabulary = HashMap::from([
            ("python".to_string(), 0),
            ("java".to_string(), 1),
            ("sql".to_string(), 2),
        ]);
        TfidfVectorizer::from_parts(vocabulary, vec![1.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_vectorize_known_terms() {
        let model = make_model();
        let vector = model.vectorize("python sql expert");
        assert!(vector[0] > 0.0);
        assert_eq!(vector[1], 0.0);
        assert!(vector[2] > 0.0);
    }

    #[test]
    fn test_vectorize_is_l2_normalized() {
        let model = make_model();
        let vector = model.vectorize("python java sql python");
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vectorize_empty_text_is_zero_vector() {
        let model = make_model();
        assert_eq!(model.vectorize(""), vec![0.0; 3]);
        assert_eq!(model.vectorize("   \n\t"), vec![0.0; 3]);
    }

    #[test]
    fn test_vectorize_out_of_vocabulary_is_zero_vector() {
        let model = make_model();
        assert_eq!(model.vectorize("haskell erlang"), vec![0.0; 3]);
    }

    #[test]
    fn test_vectorize_is_case_insensitive() {
        let model = make_model();
        assert_eq!(model.vectorize("PYTHON Sql"), model.vectorize("python sql"));
    }

    #[test]
    fn test_tokenize_drops_single_char_tokens() {
        let tokens: Vec<String> = tokenize("a c++ r python").collect();
        assert_eq!(tokens, vec!["python"]);
    }

    #[test]
    fn test_idf_weights_scale_dimensions() {
        let vocabulary =
            HashMap::from([("python".to_string(), 0), ("java".to_string(), 1)]);
        let model = TfidfVectorizer::from_parts(vocabulary, vec![2.0, 1.0]).unwrap();
        let vector = model.vectorize("python java");
        // Equal counts, but python carries twice the idf weight.
        assert!(vector[0] > vector[1]);
    }

    #[test]
    fn test_load_missing_artifact() {
        let err = TfidfVectorizer::load("/nonexistent/vectorizer.json").unwrap_err();
        assert!(matches!(err, VectorizerError::ArtifactMissing(_)));
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();
        let err = TfidfVectorizer::load(file.path()).unwrap_err();
        assert!(matches!(err, VectorizerError::ArtifactCorrupt(_)));
    }

    #[test]
    fn test_load_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"vocabulary": {"python": 0, "sql": 1}, "idf": [1.2, 3.4]}"#)
            .unwrap();
        let model = TfidfVectorizer::load(file.path()).unwrap();
        assert_eq!(model.dimensions(), 2);
    }

    #[test]
    fn test_mismatched_idf_length_is_corrupt() {
        let vocabulary = HashMap::from([("python".to_string(), 0)]);
        let err = TfidfVectorizer::from_parts(vocabulary, vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, VectorizerError::ArtifactCorrupt(_)));
    }

    #[test]
    fn test_out_of_range_index_is_corrupt() {
        let vocabulary =
            HashMap::from([("python".to_string(), 0), ("java".to_string(), 5)]);
        let err = TfidfVectorizer::from_parts(vocabulary, vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, VectorizerError::ArtifactCorrupt(_)));
    }
}
