use std::time::Duration;

use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use f1i_core::{Driver, DriverResult, Error, RaceSession, Result};

pub const BASE_URL: &str = "https://api.openf1.org/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
// The full sessions listing is slow on the upstream side.
const CALENDAR_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw `/drivers` record. The upstream serves partial records; only those
/// with both a name and a car number become a [`Driver`].
#[derive(Debug, Clone, Deserialize)]
struct DriverRecord {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    driver_number: Option<u32>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    broadcast_name: Option<String>,
    #[serde(default)]
    headshot_url: Option<String>,
}

impl DriverRecord {
    fn into_driver(self) -> Option<Driver> {
        Some(Driver {
            full_name: self.full_name.filter(|n| !n.trim().is_empty())?,
            driver_number: self.driver_number?,
            nationality: self.country_code,
            team_name: self.team_name,
            broadcast_name: self.broadcast_name,
            headshot_url: self.headshot_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OpenF1Client {
    client: reqwest::Client,
    base_url: String,
}

impl Default for OpenF1Client {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenF1Client {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T> {
        debug!("GET {}/{} {:?}", self.base_url, path, params);
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(params)
            .timeout(timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!("/{} returned {}", path, status)));
        }
        Ok(response.json::<T>().await?)
    }

    /// Fetch drivers, optionally filtered upstream by exact full name.
    /// Records missing a name or car number are dropped.
    pub async fn get_drivers(&self, full_name: Option<&str>) -> Result<Vec<Driver>> {
        let mut params = Vec::new();
        if let Some(name) = full_name {
            params.push(("full_name", name.to_string()));
        }
        let records: Vec<DriverRecord> =
            self.get_json("drivers", &params, REQUEST_TIMEOUT).await?;
        Ok(records
            .into_iter()
            .filter_map(DriverRecord::into_driver)
            .collect())
    }

    /// Resolve a car number or a (partial) name to a single driver.
    /// Returns `Ok(None)` when nothing matches.
    pub async fn find_driver(&self, query: &str) -> Result<Option<Driver>> {
        let drivers = self.get_drivers(None).await?;
        Ok(match_driver(drivers, query))
    }

    /// Fetch a driver's results, optionally restricted to a season.
    pub async fn get_driver_results(
        &self,
        driver_number: u32,
        year: Option<i32>,
    ) -> Result<Vec<DriverResult>> {
        let mut params = vec![("driver_number", driver_number.to_string())];
        if let Some(year) = year {
            params.push(("session_year", year.to_string()));
        }
        self.get_json("results", &params, REQUEST_TIMEOUT).await
    }

    /// Look up a single session by key.
    pub async fn get_session(&self, session_key: i64) -> Result<Option<RaceSession>> {
        let sessions: Vec<RaceSession> = self
            .get_json(
                "sessions",
                &[("session_key", session_key.to_string())],
                REQUEST_TIMEOUT,
            )
            .await?;
        Ok(sessions.into_iter().next())
    }

    /// Race sessions for one year, sorted by start date.
    ///
    /// The upstream ignores year filters on this endpoint, so all race
    /// sessions are fetched and filtered here.
    pub async fn get_race_calendar(&self, year: i32) -> Result<Vec<RaceSession>> {
        let sessions: Vec<RaceSession> = self
            .get_json(
                "sessions",
                &[("session_type", "Race".to_string())],
                CALENDAR_TIMEOUT,
            )
            .await?;
        Ok(races_for_year(sessions, year))
    }
}

fn match_driver(mut drivers: Vec<Driver>, query: &str) -> Option<Driver> {
    if let Ok(number) = query.trim().parse::<u32>() {
        return drivers.into_iter().find(|d| d.driver_number == number);
    }
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    if let Some(i) = drivers
        .iter()
        .position(|d| d.full_name.to_lowercase() == needle)
    {
        return Some(drivers.swap_remove(i));
    }
    drivers
        .into_iter()
        .find(|d| d.full_name.to_lowercase().contains(&needle))
}

fn races_for_year(sessions: Vec<RaceSession>, year: i32) -> Vec<RaceSession> {
    let mut races: Vec<RaceSession> = sessions
        .into_iter()
        .filter(|s| s.date_start.map(|d| d.year() == year).unwrap_or(false))
        .collect();
    races.sort_by_key(|s| s.date_start);
    races
}
