pub mod models;
pub mod prompts;

pub use models::{create_model, DummyModel, GeminiModel};

/// Gemini model id used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
}

impl Config {
    /// Read configuration from the environment, loading a local `.env`
    /// file first when one exists. `GOOGLE_API_KEY` carries the key,
    /// `F1I_MODEL` optionally overrides the model id.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model_name: std::env::var("F1I_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty()),
        }
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use f1i_core::{AnalysisResult, Article, Error, InferenceModel, Result, Sentiment};
}
