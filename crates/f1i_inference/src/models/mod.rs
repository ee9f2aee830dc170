use std::sync::Arc;

use f1i_core::{InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Create an inference model from configuration. A model name of "dummy"
/// selects the offline model; anything else is treated as a Gemini model
/// id (with a default when unset).
pub fn create_model(config: Config) -> Result<Arc<dyn InferenceModel>> {
    match config.model_name.as_deref() {
        Some("dummy") => Ok(Arc::new(DummyModel::new())),
        _ => Ok(Arc::new(GeminiModel::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use f1i_core::Error;

    #[test]
    fn test_create_dummy_model() {
        let model = create_model(Config {
            api_key: None,
            model_name: Some("dummy".to_string()),
        })
        .unwrap();
        assert_eq!(model.name(), "Dummy");
    }

    #[test]
    fn test_create_gemini_without_key_fails() {
        let result = create_model(Config::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_create_gemini_with_key() {
        let model = create_model(Config {
            api_key: Some("test-key".to_string()),
            model_name: None,
        })
        .unwrap();
        assert_eq!(model.name(), "Gemini");
    }
}
