use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};

use f1i_core::{Article, Result};

use crate::jsonld;
use crate::scrapers::{fetch_page, utils, Scraper};

pub struct MotorsportScraper;

impl MotorsportScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.motorsport.com";
}

impl Default for MotorsportScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for MotorsportScraper {
    fn source(&self) -> &str {
        "Motorsport.com"
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("motorsport.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["motorsport"]
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let html = fetch_page(url).await?;
        let document = Html::parse_document(&html);

        let title = jsonld::extract_headline(&document)
            .or_else(|| utils::extract_text(&document, "h1"))
            .unwrap_or_default();

        let paragraphs = utils::extract_texts(&document, ".ms-article-content p");
        let content = if paragraphs.is_empty() {
            utils::extract_texts(&document, "article p").join("\n\n")
        } else {
            paragraphs.join("\n\n")
        };

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
        let html = fetch_page(&format!("{}/f1/news/", Self::BASE_URL)).await?;
        let document = Html::parse_document(&html);

        let mut urls = Vec::new();
        if let Ok(link_selector) = Selector::parse("a[href*='/f1/news/']") {
            urls.extend(
                document
                    .select(&link_selector)
                    .filter_map(|el| el.value().attr("href"))
                    .map(|href| utils::absolutize(Self::BASE_URL, href))
                    .filter(|url| url.contains("motorsport.com") && !url.ends_with("/f1/news/")),
            );
        }

        urls.sort();
        urls.dedup();
        Ok(urls)
    }
}
