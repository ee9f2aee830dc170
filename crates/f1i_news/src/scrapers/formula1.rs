use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};

use f1i_core::{Article, Result};

use crate::jsonld;
use crate::scrapers::{fetch_page, utils, Scraper};

pub struct Formula1Scraper;

impl Formula1Scraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.formula1.com";
}

impl Default for Formula1Scraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for Formula1Scraper {
    fn source(&self) -> &str {
        "Formula1.com"
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("formula1.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["formula1", "f1"]
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let html = fetch_page(url).await?;
        let document = Html::parse_document(&html);

        let title = jsonld::extract_headline(&document)
            .or_else(|| utils::extract_text(&document, "h1"))
            .unwrap_or_default();

        let paragraphs = utils::extract_texts(&document, "article p");
        let content = paragraphs.join("\n\n");

        Ok(Article {
            url: url.to_string(),
            title,
            content,
            source: self.source().to_string(),
            published_at: jsonld::extract_published(&document).unwrap_or_else(Utc::now),
            authors: jsonld::extract_authors(&document),
        })
    }

    async fn get_article_urls(&self) -> Result<Vec<String>> {
        let html = fetch_page(&format!("{}/en/latest/all", Self::BASE_URL)).await?;
        let document = Html::parse_document(&html);

        let mut urls = Vec::new();
        if let Ok(link_selector) = Selector::parse("a[href*='/latest/article']") {
            urls.extend(
                document
                    .select(&link_selector)
                    .filter_map(|el| el.value().attr("href"))
                    .map(|href| utils::absolutize(Self::BASE_URL, href)),
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
        let scraper = Formula1Scraper::new();
        assert!(scraper.can_handle("https://www.formula1.com/en/latest/article/some-story"));
        assert!(!scraper.can_handle("https://www.autosport.com/f1/news/some-story"));
    }
}
