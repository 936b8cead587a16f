//! A model that always answers with the same text.

use std::path::Path;

use async_trait::async_trait;

use super::{LanguageModel, LlmError};
use crate::error::{PlannerError, Result};

/// Returns a fixed response for every prompt.
///
/// Used to replay a saved model response through the planner and as a
/// deterministic model in tests.
#[derive(Debug, Clone)]
pub struct StaticModel {
    response: String,
}

impl StaticModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Reads the response to replay from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let response = std::fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(response))
    }
}

#[async_trait]
impl LanguageModel for StaticModel {
    async fn invoke(&self, _prompt: &str) -> std::result::Result<String, LlmError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_model_ignores_prompt() {
        let model = StaticModel::new("1. HrAgent: Welcome the hire");
        assert_eq!(
            model.invoke("anything").await.unwrap(),
            "1. HrAgent: Welcome the hire"
        );
        assert_eq!(
            model.invoke("something else").await.unwrap(),
            "1. HrAgent: Welcome the hire"
        );
    }

    #[test]
    fn test_from_missing_file() {
        let err = StaticModel::from_file("/nonexistent/response.txt").unwrap_err();
        assert!(matches!(err, PlannerError::FileSystem { .. }));
    }
}
