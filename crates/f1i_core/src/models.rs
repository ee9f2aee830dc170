use async_trait::async_trait;

use crate::types::{AnalysisResult, Article};
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Human-readable name of the backing model
    fn name(&self) -> &str;

    /// Send a raw prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Summarize an article
    async fn summarize_article(&self, article: &Article) -> Result<String>;

    /// Full analysis of an article: summary, sentiment and named entities
    async fn analyze_article(&self, article: &Article) -> Result<AnalysisResult>;

    /// Comparative analysis of two compiled driver reports
    async fn compare_drivers(&self, report1: &str, report2: &str) -> Result<String>;
}
