use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use f1i_core::{AnalysisResult, Article, Error, InferenceModel, Result};

use crate::{prompts, Config, DEFAULT_MODEL};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiModel {
    /// A missing key is a configuration error here, before any request is
    /// made: the analysis feature cannot work without it.
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "GOOGLE_API_KEY is not set; the analysis feature is unavailable".to_string(),
                )
            })?;
        Ok(Self {
            client: Client::new(),
            api_key,
            model: config
                .model_name
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Gemini generateContent via {}", self.model);
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Quota and auth problems land here; the body carries the
            // upstream explanation.
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("Gemini returned {}: {}", status, body)));
        }

        let response = response.json::<GenerateResponse>().await?;
        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Inference("Gemini returned no candidates".to_string()))
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        self.generate(&prompts::summary_prompt(article)).await
    }

    async fn analyze_article(&self, article: &Article) -> Result<AnalysisResult> {
        let text = self.generate(&prompts::analysis_prompt(article)).await?;
        Ok(prompts::parse_analysis(&text))
    }

    async fn compare_drivers(&self, report1: &str, report2: &str) -> Result<String> {
        self.generate(&prompts::comparison_prompt(report1, report2))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_a_config_error() {
        let result = GeminiModel::new(Config::default());
        assert!(matches!(result, Err(Error::Config(_))));

        let result = GeminiModel::new(Config {
            api_key: Some("   ".to_string()),
            model_name: None,
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_model_defaults() {
        let model = GeminiModel::new(Config {
            api_key: Some("test-key".to_string()),
            model_name: None,
        })
        .unwrap();
        assert_eq!(model.model, DEFAULT_MODEL);

        let model = GeminiModel::new(Config {
            api_key: Some("test-key".to_string()),
            model_name: Some("gemini-1.5-pro".to_string()),
        })
        .unwrap();
        assert_eq!(model.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_debug_redacts_key() {
        let model = GeminiModel::new(Config {
            api_key: Some("secret".to_string()),
            model_name: None,
        })
        .unwrap();
        assert!(!format!("{:?}", model).contains("secret"));
    }

    #[test]
    fn test_response_deserialization() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "A summary."}],
                "role": "model"}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.candidates[0].content.parts[0].text, "A summary.");
    }
}
