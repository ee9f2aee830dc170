use std::fmt;

use async_trait::async_trait;

use f1i_core::{AnalysisResult, Article, InferenceModel, Result, Sentiment};

/// Deterministic offline model for tests and keyless runs.
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

fn first_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().take(count).collect();
    words.join(" ")
}

fn capitalized_tokens(text: &str) -> Vec<String> {
    let mut entities = Vec::new();
    for word in text.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if word.len() > 3 && word.chars().next().is_some_and(|c| c.is_uppercase()) {
            let word = word.to_string();
            if !entities.contains(&word) {
                entities.push(word);
            }
        }
    }
    entities.truncate(10);
    entities
}

#[async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(first_words(prompt, 20))
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        Ok(first_words(&article.content, 20))
    }

    async fn analyze_article(&self, article: &Article) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            summary: first_words(&article.content, 20),
            sentiment: Sentiment::Neutral,
            entities: capitalized_tokens(&article.content),
        })
    }

    async fn compare_drivers(&self, report1: &str, report2: &str) -> Result<String> {
        Ok(format!(
            "Comparison based on the reported results.\n\n{}\n\n{}",
            first_words(report1, 30),
            first_words(report2, 30)
        ))
    }
}
