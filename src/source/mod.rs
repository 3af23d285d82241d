//! Model-access sources.
//!
//! This module defines the service interface the mass calculator uses to
//! obtain an iteration, replacing the original tool's hidden global
//! command state with an explicitly injected collaborator.

pub mod json;

pub use json::JsonFileSource;

use crate::models::{EngineeringModel, Iteration};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors raised while looking up or loading model data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No engineering model with the given short name.
    #[error("engineering model '{short_name}' not found")]
    ModelNotFound { short_name: String },

    /// The model exists but has no iteration with the given number.
    #[error("iteration {number} not found for engineering model '{short_name}'")]
    IterationNotFound { short_name: String, number: u32 },

    /// The data file could not be read.
    #[error("failed to read model data file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid model document.
    #[error("failed to parse model data file: {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Provides read access to engineering-model iterations.
///
/// Lookup failures abort the caller's computation; sources do not retry.
pub trait ModelSource {
    /// Resets any display or output state the source holds.
    ///
    /// File- and memory-backed sources hold none, so this is a no-op for
    /// them; it exists so callers can reset interactive sources the same
    /// way.
    fn clear(&mut self) {}

    /// Retrieves the iteration of the engineering model matching the
    /// given short name and iteration number.
    ///
    /// Model short names compare case-insensitively; iteration numbers
    /// compare exactly.
    fn engineering_model_iteration(
        &self,
        model_short_name: &str,
        iteration_number: u32,
    ) -> Result<Iteration, SourceError>;
}

/// Shared lookup over a slice of models. Used by every concrete source.
fn find_iteration(
    models: &[EngineeringModel],
    model_short_name: &str,
    iteration_number: u32,
) -> Result<Iteration, SourceError> {
    let wanted = model_short_name.to_lowercase();

    let model = models
        .iter()
        .find(|m| m.short_name.to_lowercase() == wanted)
        .ok_or_else(|| SourceError::ModelNotFound {
            short_name: model_short_name.to_string(),
        })?;

    debug!(model = %model.short_name, "engineering model found");

    model
        .iteration(iteration_number)
        .cloned()
        .ok_or_else(|| SourceError::IterationNotFound {
            short_name: model.short_name.clone(),
            number: iteration_number,
        })
}

/// A source backed by models already held in memory.
///
/// Used by tests and by callers that build the model graph themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    models: Vec<EngineeringModel>,
}

impl InMemorySource {
    /// Creates a source over the given models.
    #[allow(dead_code)] // Used by tests and embedding callers
    pub fn new(models: Vec<EngineeringModel>) -> Self {
        Self { models }
    }

    /// The models held by this source.
    #[allow(dead_code)] // Accessor for embedding callers
    pub fn models(&self) -> &[EngineeringModel] {
        &self.models
    }
}

impl ModelSource for InMemorySource {
    fn engineering_model_iteration(
        &self,
        model_short_name: &str,
        iteration_number: u32,
    ) -> Result<Iteration, SourceError> {
        find_iteration(&self.models, model_short_name, iteration_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementDefinition, Iteration};

    fn make_source() -> InMemorySource {
        InMemorySource::new(vec![EngineeringModel {
            short_name: "LOFT".to_string(),
            iterations: vec![
                Iteration::new(1),
                Iteration {
                    number: 2,
                    elements: vec![ElementDefinition {
                        short_name: "BAT".to_string(),
                        parameters: Vec::new(),
                    }],
                },
            ],
        }])
    }

    #[test]
    fn test_lookup_found() {
        let source = make_source();
        let iteration = source.engineering_model_iteration("LOFT", 2).unwrap();
        assert_eq!(iteration.number, 2);
        assert_eq!(iteration.elements.len(), 1);
    }

    #[test]
    fn test_model_short_name_case_insensitive() {
        let source = make_source();
        assert!(source.engineering_model_iteration("loft", 1).is_ok());
        assert!(source.engineering_model_iteration("Loft", 1).is_ok());
    }

    #[test]
    fn test_model_not_found() {
        let source = make_source();
        let err = source
            .engineering_model_iteration("MISSING", 1)
            .unwrap_err();
        assert!(matches!(err, SourceError::ModelNotFound { .. }));
    }

    #[test]
    fn test_iteration_not_found() {
        let source = make_source();
        let err = source.engineering_model_iteration("LOFT", 9).unwrap_err();
        match err {
            SourceError::IterationNotFound { short_name, number } => {
                assert_eq!(short_name, "LOFT");
                assert_eq!(number, 9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_iteration_number_exact_match() {
        // Case-insensitivity applies to the model name only.
        let source = make_source();
        assert!(source.engineering_model_iteration("LOFT", 3).is_err());
    }
}
