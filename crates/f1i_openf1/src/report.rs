use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::debug;

use f1i_core::{DriverResult, PerformancePoint, RaceEvent, RaceSession, Result};

use crate::OpenF1Client;

/// How many results go into a prompt-ready driver report.
pub const MAX_REPORT_RESULTS: usize = 10;

/// Compile a driver's latest results into the text block the inference
/// prompts are built from. Session lookups that fail degrade to
/// "Unknown Race" rather than aborting the report.
pub async fn driver_report(
    client: &OpenF1Client,
    driver_name: &str,
    results: &[DriverResult],
) -> String {
    if results.is_empty() {
        return format!("No recent result data available for {}.", driver_name);
    }

    let recent = &results[..results.len().min(MAX_REPORT_RESULTS)];
    let sessions = join_all(recent.iter().map(|r| client.get_session(r.session_key))).await;

    let mut lines = vec![format!(
        "Latest results for {} (limited to {}):",
        driver_name, MAX_REPORT_RESULTS
    )];
    for (result, session) in recent.iter().zip(sessions) {
        let session = session.ok().flatten();
        lines.push(format_result_line(session.as_ref(), result));
    }
    lines.join("\n")
}

fn format_result_line(session: Option<&RaceSession>, result: &DriverResult) -> String {
    let race_name = session
        .and_then(|s| s.session_name.clone())
        .unwrap_or_else(|| "Unknown Race".to_string());
    let race_date = session
        .and_then(|s| s.date_start)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "Unknown Date".to_string());
    let position = opt_field(result.position.map(|p| p.to_string()));
    let points = opt_field(result.points.map(|p| p.to_string()));
    let laps = opt_field(result.laps.map(|l| l.to_string()));
    let status = opt_field(result.status.clone());

    format!(
        "- {} ({}): Position {}, Points {}, Laps Completed {}, Status: {}",
        race_name, race_date, position, points, laps, status
    )
}

fn opt_field(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

/// A driver's finishing position per race of a season, in calendar order.
/// Only race-type sessions with a reported position count.
pub async fn performance_series(
    client: &OpenF1Client,
    driver_number: u32,
    year: i32,
) -> Result<Vec<PerformancePoint>> {
    let results = client.get_driver_results(driver_number, Some(year)).await?;
    let placed: Vec<&DriverResult> = results.iter().filter(|r| r.position.is_some()).collect();
    debug!(
        "{} of {} results carry a position",
        placed.len(),
        results.len()
    );

    let sessions = join_all(placed.iter().map(|r| client.get_session(r.session_key))).await;

    let mut points = Vec::new();
    for (result, session) in placed.iter().zip(sessions) {
        let Some(session) = session.ok().flatten() else {
            continue;
        };
        if session.session_type.as_deref() != Some("Race") {
            continue;
        }
        let Some(date) = session.date_start else {
            continue;
        };
        points.push(PerformancePoint {
            race: format!(
                "{} ({})",
                session
                    .session_name
                    .unwrap_or_else(|| "Unknown".to_string()),
                date.format("%Y-%m-%d")
            ),
            date,
            position: result.position.unwrap_or_default(),
        });
    }
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Turn race sessions into calendar rows with a past/upcoming flag.
/// Sessions without a start date are skipped.
pub fn calendar_events(races: &[RaceSession], now: DateTime<Utc>) -> Vec<RaceEvent> {
    races
        .iter()
        .filter_map(|race| {
            let date_start = race.date_start?;
            Some(RaceEvent {
                name: race
                    .session_name
                    .clone()
                    .unwrap_or_else(|| "Unknown Name".to_string()),
                circuit: race
                    .circuit_short_name
                    .clone()
                    .or_else(|| race.location.clone())
                    .unwrap_or_else(|| "Unknown Location".to_string()),
                date_start,
                past: date_start < now,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(name: &str, date: &str) -> RaceSession {
        RaceSession {
            session_key: 1,
            session_name: Some(name.to_string()),
            session_type: Some("Race".to_string()),
            date_start: Some(
                DateTime::parse_from_rfc3339(date)
                    .unwrap()
                    .with_timezone(&Utc),
            ),
            circuit_short_name: Some("Sakhir".to_string()),
            location: None,
        }
    }

    #[test]
    fn test_format_result_line() {
        let result = DriverResult {
            session_key: 9158,
            position: Some(2),
            points: Some(18.0),
            laps: Some(57),
            status: Some("Finished".to_string()),
        };
        let line = format_result_line(
            Some(&session("Bahrain Grand Prix", "2024-03-02T15:00:00+00:00")),
            &result,
        );
        assert_eq!(
            line,
            "- Bahrain Grand Prix (02/03/2024): Position 2, Points 18, Laps Completed 57, Status: Finished"
        );
    }

    #[test]
    fn test_format_result_line_missing_fields() {
        let result = DriverResult {
            session_key: 9158,
            position: None,
            points: None,
            laps: None,
            status: None,
        };
        let line = format_result_line(None, &result);
        assert_eq!(
            line,
            "- Unknown Race (Unknown Date): Position N/A, Points N/A, Laps Completed N/A, Status: N/A"
        );
    }

    #[tokio::test]
    async fn test_driver_report_without_results() {
        let client = OpenF1Client::new();
        let report = driver_report(&client, "Max Verstappen", &[]).await;
        assert_eq!(
            report,
            "No recent result data available for Max Verstappen."
        );
    }

    #[test]
    fn test_calendar_events_past_flag() {
        let races = vec![
            session("Bahrain Grand Prix", "2024-03-02T15:00:00+00:00"),
            session("Abu Dhabi Grand Prix", "2024-12-08T13:00:00+00:00"),
            RaceSession {
                session_key: 3,
                session_name: Some("No Date".to_string()),
                session_type: Some("Race".to_string()),
                date_start: None,
                circuit_short_name: None,
                location: None,
            },
        ];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let events = calendar_events(&races, now);
        assert_eq!(events.len(), 2);
        assert!(events[0].past);
        assert!(!events[1].past);
        assert_eq!(events[0].circuit, "Sakhir");
    }
}
