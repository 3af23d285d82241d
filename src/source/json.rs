//! JSON file-backed model source.
//!
//! Loads a model document from disk: a JSON object with a `models` array
//! of engineering models. This is the concrete source the CLI uses.

use super::{find_iteration, ModelSource, SourceError};
use crate::models::{EngineeringModel, Iteration};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level shape of a model data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Engineering models contained in the document.
    #[serde(default)]
    pub models: Vec<EngineeringModel>,
}

/// A model source backed by a JSON document on disk.
///
/// The whole document is loaded eagerly; lookups afterwards never touch
/// the filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    document: ModelDocument,
}

impl JsonFileSource {
    /// Loads a model document from the given path.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document: ModelDocument =
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            models = document.models.len(),
            "model document loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The models in the loaded document.
    pub fn models(&self) -> &[EngineeringModel] {
        &self.document.models
    }
}

impl ModelSource for JsonFileSource {
    fn engineering_model_iteration(
        &self,
        model_short_name: &str,
        iteration_number: u32,
    ) -> Result<Iteration, SourceError> {
        find_iteration(&self.document.models, model_short_name, iteration_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT: &str = r#"
    {
      "models": [
        {
          "short_name": "LOFT",
          "iterations": [
            {
              "number": 1,
              "elements": [
                {
                  "short_name": "BAT",
                  "parameters": [
                    {
                      "short_name": "BAT.m",
                      "value_sets": [{ "published": ["7.5"] }]
                    }
                  ]
                }
              ]
            }
          ]
        }
      ]
    }
    "#;

    fn write_document(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_lookup() {
        let file = write_document(DOCUMENT);
        let source = JsonFileSource::load(file.path()).unwrap();

        assert_eq!(source.models().len(), 1);

        let iteration = source.engineering_model_iteration("loft", 1).unwrap();
        assert_eq!(iteration.elements[0].short_name, "BAT");
        assert_eq!(
            iteration.elements[0].parameters[0].value_sets[0].first_published(),
            Some("7.5")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFileSource::load(Path::new("/nonexistent/models.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let file = write_document("{ not json");
        let err = JsonFileSource::load(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
    }

    #[test]
    fn test_empty_document() {
        let file = write_document("{}");
        let source = JsonFileSource::load(file.path()).unwrap();
        assert!(source.models().is_empty());

        let err = source.engineering_model_iteration("LOFT", 1).unwrap_err();
        assert!(matches!(err, SourceError::ModelNotFound { .. }));
    }
}
