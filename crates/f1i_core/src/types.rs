use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A Formula 1 driver as served by the OpenF1 `/drivers` endpoint.
///
/// Records without a full name or car number are dropped at the client
/// boundary, so both are always present here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub full_name: String,
    pub driver_number: u32,
    pub nationality: Option<String>,
    pub team_name: Option<String>,
    pub broadcast_name: Option<String>,
    pub headshot_url: Option<String>,
}

/// A single session result for a driver. The upstream serves nulls freely,
/// so everything but the session key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverResult {
    pub session_key: i64,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub laps: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A session record from the OpenF1 `/sessions` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSession {
    pub session_key: i64,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub circuit_short_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

// The upstream mixes `Z` and `+00:00` suffixes and occasionally serves
// unparseable dates; a bad date must not reject the whole response.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }))
}

/// A calendar row: one race with its past/upcoming status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEvent {
    pub name: String,
    pub circuit: String,
    pub date_start: DateTime<Utc>,
    pub past: bool,
}

/// One point of a driver's position-by-race series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub race: String,
    pub date: DateTime<Utc>,
    pub position: u32,
}

/// An article extracted from a news page, or built from pasted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub content: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub authors: Vec<String>,
}

impl Article {
    /// Build an article from pasted text, for analysis without a source page.
    pub fn from_text(text: &str) -> Self {
        let title: String = text
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("Untitled")
            .trim()
            .chars()
            .take(80)
            .collect();
        Self {
            url: String::new(),
            title,
            content: text.trim().to_string(),
            source: "direct input".to_string(),
            published_at: Utc::now(),
            authors: Vec::new(),
        }
    }
}

/// The model's reading of an article. All three fields come from the
/// external model; nothing here is computed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub sentiment: Sentiment,
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    /// Map a free-form model label onto a sentiment. Anything unrecognized
    /// is neutral.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("mixed") {
            Sentiment::Mixed
        } else if label.contains("positive") {
            Sentiment::Positive
        } else if label.contains("negative") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Mixed => "mixed",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_from_text() {
        let article = Article::from_text("\nVerstappen wins again.\n\nMore detail here.");
        assert_eq!(article.title, "Verstappen wins again.");
        assert_eq!(article.source, "direct input");
        assert!(article.content.contains("More detail here."));
        assert!(article.url.is_empty());
    }

    #[test]
    fn test_article_from_text_truncates_title() {
        let text = "x".repeat(200);
        let article = Article::from_text(&text);
        assert_eq!(article.title.chars().count(), 80);
    }

    #[test]
    fn test_sentiment_from_label() {
        assert_eq!(Sentiment::from_label("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("very negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("Mixed feelings"), Sentiment::Mixed);
        assert_eq!(Sentiment::from_label("garbage"), Sentiment::Neutral);
    }

    #[test]
    fn test_session_date_is_lenient() {
        let session: RaceSession = serde_json::from_str(
            r#"{"session_key": 9158, "session_name": "Race", "date_start": "not-a-date"}"#,
        )
        .unwrap();
        assert!(session.date_start.is_none());

        let session: RaceSession = serde_json::from_str(
            r#"{"session_key": 9158, "date_start": "2024-03-02T15:00:00+00:00"}"#,
        )
        .unwrap();
        assert!(session.date_start.is_some());
    }
}
