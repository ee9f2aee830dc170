use tracing::{debug, info};

use f1i_core::{Article, Error, Result};

use crate::scrapers::{
    get_scraper_factories, utils, BoxedScraper, GenericScraper, ScraperFactory,
};

/// Dispatches a URL to the first scraper that can handle it, falling back
/// to the structural-heuristic generic scraper.
pub struct NewsManager {
    factories: Vec<ScraperFactory>,
}

impl NewsManager {
    pub fn new() -> Self {
        Self {
            factories: get_scraper_factories(),
        }
    }

    pub fn add_scraper_factory(&mut self, factory: ScraperFactory) {
        self.factories.push(factory);
    }

    pub fn get_scraper_for_url(&self, url: &str) -> Result<BoxedScraper> {
        utils::parse_url(url)?;
        for factory in &self.factories {
            let scraper = factory();
            if scraper.can_handle(url) {
                return Ok(scraper);
            }
        }
        Ok(Box::new(GenericScraper::new()))
    }

    /// Fetch a page and extract its article. Empty extraction is an error:
    /// the page is paywalled, blocked, or not an article.
    pub async fn scrape_url(&self, url: &str) -> Result<Article> {
        let scraper = self.get_scraper_for_url(url)?;
        info!("📰 Fetching {} via {}", url, scraper.source());
        let article = scraper.scrape_article(url).await?;

        if article.content.trim().is_empty() {
            return Err(Error::Scraping(format!(
                "no article text extracted from {} (paywalled, blocked or empty page)",
                url
            )));
        }
        debug!(
            "extracted {} paragraphs from {}",
            utils::split_into_sections(&article.content).len(),
            url
        );
        Ok(article)
    }

    /// Source names of the registered scrapers.
    pub fn sources(&self) -> Vec<String> {
        self.factories
            .iter()
            .map(|factory| factory().source().to_string())
            .collect()
    }
}

impl Default for NewsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use f1i_core::Article;

    use crate::scrapers::Scraper;

    struct EmptyScraper;

    #[async_trait]
    impl Scraper for EmptyScraper {
        fn source(&self) -> &str {
            "empty"
        }

        fn can_handle(&self, url: &str) -> bool {
            url.contains("empty.example")
        }

        async fn scrape_article(&self, url: &str) -> Result<Article> {
            Ok(Article {
                url: url.to_string(),
                title: "Empty".to_string(),
                content: "   ".to_string(),
                source: self.source().to_string(),
                published_at: Utc::now(),
                authors: vec![],
            })
        }

        async fn get_article_urls(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_dispatch_to_site_scraper() {
        let manager = NewsManager::new();
        let scraper = manager
            .get_scraper_for_url("https://www.formula1.com/en/latest/article/x")
            .unwrap();
        assert_eq!(scraper.source(), "Formula1.com");
    }

    #[test]
    fn test_dispatch_falls_back_to_generic() {
        let manager = NewsManager::new();
        let scraper = manager
            .get_scraper_for_url("https://example.com/f1-story")
            .unwrap();
        assert_eq!(scraper.source(), "web");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let manager = NewsManager::new();
        assert!(manager.get_scraper_for_url("not a url").is_err());
    }

    #[test]
    fn test_sources() {
        let sources = NewsManager::new().sources();
        assert!(sources.contains(&"Formula1.com".to_string()));
        assert!(sources.contains(&"Autosport".to_string()));
        assert!(sources.contains(&"Motorsport.com".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_url_reports_fetch_error() {
        let manager = NewsManager::new();
        // Nothing listens on port 1; the pipeline must surface the fetch
        // failure instead of panicking.
        let result = manager.scrape_url("http://127.0.0.1:1/article").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_extraction_is_an_error() {
        let mut manager = NewsManager::new();
        manager.add_scraper_factory(Box::new(|| Box::new(EmptyScraper)));

        let result = manager.scrape_url("https://empty.example/article").await;
        assert!(matches!(result, Err(Error::Scraping(_))));
    }
}
