use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};

use f1i_core::{Article, Result};

use crate::jsonld;
use crate::scrapers::{fetch_page, utils, Scraper};

pub struct AutosportScraper;

impl AutosportScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.autosport.com";
}

impl Default for AutosportScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for AutosportScraper {
    fn source(&self) -> &str {
        "Autosport"
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("autosport.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["autosport"]
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let html = fetch_page(url).await?;
        let document = Html::parse_document(&html);

        let title = utils::extract_text(&document, "h1").unwrap_or_default();

        // Body copy lives in the article tag; fall back to the generic
        // text container used on older pages.
        let mut paragraphs = utils::extract_texts(&document, "article p");
        if paragraphs.is_empty() {
            paragraphs = utils::extract_texts(&document, ".text-container p");
        }

        Ok(Article {
            url: url.to_string(),
            title,
            content: paragraphs.join("\n\n"),
            source: self.source().to_string(),
            published_at: jsonld::extract_published(&document).unwrap_or_else(Utc::now),
            authors: jsonld::extract_authors(&document),
        })
    }

    async fn get_article_urls(&self) -> Result<Vec<String>> {
        let html = fetch_page(&format!("{}/f1/news/", Self::BASE_URL)).await?;
        let document = Html::parse_document(&html);

        let mut urls = Vec::new();
        if let Ok(link_selector) = Selector::parse("a[href*='/f1/news/']") {
            urls.extend(
                document
                    .select(&link_selector)
                    .filter_map(|el| el.value().attr("href"))
                    .map(|href| utils::absolutize(Self::BASE_URL, href))
                    .filter(|url| !url.ends_with("/f1/news/")),
            );
        }

        urls.sort();
        urls.dedup();
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_handle() {
        let scraper = AutosportScraper::new();
        assert!(scraper.can_handle("https://www.autosport.com/f1/news/some-story"));
        assert!(!scraper.can_handle("https://www.formula1.com/en/latest/article/x"));
    }
}
