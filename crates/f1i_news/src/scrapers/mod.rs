use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;

use f1i_core::{Article, Result};

pub mod autosport;
pub mod formula1;
pub mod generic;
pub mod motorsport;

pub use autosport::AutosportScraper;
pub use formula1::Formula1Scraper;
pub use generic::GenericScraper;
pub use motorsport::MotorsportScraper;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "f1-insights/0.1 (+https://github.com/f1-insights)";

lazy_static! {
    static ref HTTP: reqwest::Client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build HTTP client");
}

pub(crate) async fn fetch_page(url: &str) -> Result<String> {
    let response = HTTP.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(f1i_core::Error::Scraping(format!(
            "{} returned {}",
            url, status
        )));
    }
    Ok(response.text().await?)
}

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Scrapes an article from the given URL
    async fn scrape_article(&self, url: &str) -> Result<Article>;

    /// Returns a list of article URLs from the source's F1 news index
    async fn get_article_urls(&self) -> Result<Vec<String>>;

    /// Returns a list of CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }
}

pub type BoxedScraper = Box<dyn Scraper>;
pub type ScraperFactory = Box<dyn Fn() -> BoxedScraper + Send + Sync>;

/// The site-specific scrapers. The generic fallback is not listed here;
/// the manager reaches for it when nothing else matches.
pub fn get_scraper_factories() -> Vec<ScraperFactory> {
    vec![
        Box::new(|| Box::new(Formula1Scraper::new())),
        Box::new(|| Box::new(AutosportScraper::new())),
        Box::new(|| Box::new(MotorsportScraper::new())),
    ]
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{Html, Selector};
    use url::Url;

    use f1i_core::{Error, Result};

    pub fn parse_url(url: &str) -> Result<Url> {
        let parsed =
            Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(Error::InvalidUrl(format!(
                "unsupported scheme {}: {}",
                other, url
            ))),
        }
    }

    pub fn extract_text(document: &Html, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn split_into_sections(content: &str) -> Vec<String> {
        content
            .split("\n\n")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Absolutize an href against a base, keeping already-absolute URLs.
    pub fn absolutize(base: &str, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", base.trim_end_matches('/'), href)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
        assert!(utils::parse_url("ftp://example.com/file").is_err());
    }

    #[test]
    fn test_extract_text() {
        let html = r#"
            <div class="title">Test Title</div>
            <div class="content">Test Content</div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            utils::extract_text(&document, ".title").unwrap(),
            "Test Title"
        );
        assert!(utils::extract_text(&document, ".missing").is_none());
    }

    #[test]
    fn test_extract_texts() {
        let html = r#"
            <div class="item">Item 1</div>
            <div class="item">Item 2</div>
            <div class="item">   </div>
        "#;
        let document = Html::parse_document(html);

        let texts = utils::extract_texts(&document, ".item");
        assert_eq!(texts, vec!["Item 1", "Item 2"]);
    }

    #[test]
    fn test_split_into_sections() {
        let content = "Section 1\n\nSection 2\n\n\nSection 3";
        let sections = utils::split_into_sections(content);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], "Section 1");
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            utils::absolutize("https://www.formula1.com", "/en/latest/article/x"),
            "https://www.formula1.com/en/latest/article/x"
        );
        assert_eq!(
            utils::absolutize("https://www.formula1.com", "https://other.com/y"),
            "https://other.com/y"
        );
    }
}
