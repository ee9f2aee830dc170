use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

/// Extracts authors from JSON-LD metadata in the HTML document.
/// Returns a vector of author names.
pub fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors = Vec::new();

    for json in ld_json_blocks(document) {
        if let Some(author) = json.get("author") {
            match author {
                serde_json::Value::Array(arr) => {
                    for author_obj in arr {
                        if let Some(name) = author_obj.get("name").and_then(|n| n.as_str()) {
                            authors.push(name.trim().to_string());
                        }
                    }
                }
                serde_json::Value::Object(obj) => {
                    if let Some(name) = obj.get("name").and_then(|n| n.as_str()) {
                        authors.push(name.trim().to_string());
                    }
                }
                serde_json::Value::String(s) => {
                    authors.push(s.trim().to_string());
                }
                _ => {}
            }
        }
    }

    authors
}

/// The article headline from JSON-LD metadata, if present.
pub fn extract_headline(document: &Html) -> Option<String> {
    ld_json_blocks(document).into_iter().find_map(|json| {
        json.get("headline")
            .and_then(|h| h.as_str())
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
    })
}

/// The publication date from JSON-LD metadata, if present and parseable.
pub fn extract_published(document: &Html) -> Option<DateTime<Utc>> {
    ld_json_blocks(document).into_iter().find_map(|json| {
        json.get("datePublished")
            .and_then(|d| d.as_str())
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc))
    })
}

fn ld_json_blocks(document: &Html) -> Vec<serde_json::Value> {
    let mut blocks = Vec::new();
    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(
                script.text().collect::<String>().trim(),
            ) {
                blocks.push(json);
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
        <script type="application/ld+json">
        {
            "@type": "NewsArticle",
            "headline": "Verstappen takes pole in Bahrain",
            "datePublished": "2024-03-01T18:04:00+00:00",
            "author": [{"name": "Alex Kalinauckas"}, {"name": "Filip Cleeren"}]
        }
        </script>
        </head><body><h1>Something else</h1></body></html>
    "#;

    #[test]
    fn test_extract_authors() {
        let document = Html::parse_document(PAGE);
        assert_eq!(
            extract_authors(&document),
            vec!["Alex Kalinauckas", "Filip Cleeren"]
        );
    }

    #[test]
    fn test_extract_authors_object_and_string() {
        let document = Html::parse_document(
            r#"<script type="application/ld+json">
               {"author": {"name": "Solo Writer"}}
               </script>"#,
        );
        assert_eq!(extract_authors(&document), vec!["Solo Writer"]);

        let document = Html::parse_document(
            r#"<script type="application/ld+json">
               {"author": "Plain Name"}
               </script>"#,
        );
        assert_eq!(extract_authors(&document), vec!["Plain Name"]);
    }

    #[test]
    fn test_extract_headline_and_published() {
        let document = Html::parse_document(PAGE);
        assert_eq!(
            extract_headline(&document).unwrap(),
            "Verstappen takes pole in Bahrain"
        );
        let published = extract_published(&document).unwrap();
        assert_eq!(published.to_rfc3339(), "2024-03-01T18:04:00+00:00");
    }

    #[test]
    fn test_missing_metadata() {
        let document = Html::parse_document("<html><body><p>No metadata</p></body></html>");
        assert!(extract_authors(&document).is_empty());
        assert!(extract_headline(&document).is_none());
        assert!(extract_published(&document).is_none());
    }
}
