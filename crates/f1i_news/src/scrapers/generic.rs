use async_trait::async_trait;
use chrono::Utc;
use scraper::Html;

use f1i_core::{Article, Result};

use crate::jsonld;
use crate::scrapers::{fetch_page, utils, Scraper};

/// Fallback scraper for arbitrary news URLs. Extraction is structural:
/// the first selector tier that yields paragraphs wins.
pub struct GenericScraper;

const CONTENT_TIERS: &[&str] = &["article p", "main p", "p"];

impl GenericScraper {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericScraper {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn extract_article_text(document: &Html) -> Vec<String> {
    for tier in CONTENT_TIERS {
        let paragraphs = utils::extract_texts(document, tier);
        if !paragraphs.is_empty() {
            return paragraphs;
        }
    }
    Vec::new()
}

#[async_trait]
impl Scraper for GenericScraper {
    fn source(&self) -> &str {
        "web"
    }

    fn can_handle(&self, url: &str) -> bool {
        utils::parse_url(url).is_ok()
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let parsed = utils::parse_url(url)?;
        let html = fetch_page(url).await?;
        let document = Html::parse_document(&html);

        let title = jsonld::extract_headline(&document)
            .or_else(|| utils::extract_text(&document, "h1"))
            .or_else(|| utils::extract_text(&document, "title"))
            .unwrap_or_default();

        let content = extract_article_text(&document).join("\n\n");

        Ok(Article {
            url: url.to_string(),
            title,
            content,
            source: parsed.host_str().unwrap_or("web").to_string(),
            published_at: jsonld::extract_published(&document).unwrap_or_else(Utc::now),
            authors: jsonld::extract_authors(&document),
        })
    }

    async fn get_article_urls(&self) -> Result<Vec<String>> {
        // No index page for arbitrary sites.
        Ok(Vec::new())
    }
}
