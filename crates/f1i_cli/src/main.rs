use chrono::{Datelike, Utc};
use clap::Parser;
use tracing::{error, info};

use f1i_core::{Article, InferenceModel, Result};
use f1i_inference::{create_model, Config};
use f1i_news::NewsManager;
use f1i_openf1::{report, OpenF1Client};
use f1i_web::AppState;

use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "f1i", author, version, about = "Formula 1 driver insights and news analysis", long_about = None)]
struct Cli {
    /// Inference backend: a Gemini model id, or "dummy" for offline runs
    #[arg(long, global = true)]
    model: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the local web server (the default when no command is given)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// List drivers, optionally filtered by (partial) name
    Drivers { query: Option<String> },
    /// Show a driver's recent results
    Results {
        /// Car number or driver name
        driver: String,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show the race calendar for a year
    Calendar { year: Option<i32> },
    /// Compare two drivers' recent form with the AI model
    Compare {
        driver1: String,
        driver2: String,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Summarize and analyze an F1 news article (URL or pasted text)
    Analyze { input: String },
}

fn model_config(cli_model: Option<String>) -> Config {
    let mut config = Config::from_env();
    if cli_model.is_some() {
        config.model_name = cli_model;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let openf1 = OpenF1Client::new();
    let news = NewsManager::new();
    let config = model_config(cli.model);

    match cli.command.unwrap_or(Commands::Serve {
        host: "127.0.0.1".to_string(),
        port: 8080,
    }) {
        Commands::Serve { host, port } => {
            // A missing key disables analysis but keeps the lookup
            // endpoints alive.
            let inference: Option<Arc<dyn InferenceModel>> = match create_model(config) {
                Ok(model) => {
                    info!("🧠 Inference model initialized ({})", model.name());
                    Some(model)
                }
                Err(e) => {
                    error!("{}; news analysis and driver comparison are disabled", e);
                    None
                }
            };
            info!(
                "🦗 News scrapers available: {}",
                news.sources().join(", ")
            );
            f1i_web::serve(
                AppState {
                    openf1,
                    news,
                    inference,
                },
                &host,
                port,
            )
            .await?;
        }
        Commands::Drivers { query } => {
            let mut drivers = openf1.get_drivers(None).await?;
            if let Some(query) = query {
                let needle = query.to_lowercase();
                drivers.retain(|d| d.full_name.to_lowercase().contains(&needle));
            }
            if drivers.is_empty() {
                println!("No drivers found.");
                return Ok(());
            }
            for driver in drivers {
                println!(
                    "{:>3}  {}  [{}] {}",
                    driver.driver_number,
                    driver.full_name,
                    driver.nationality.as_deref().unwrap_or("???"),
                    driver.team_name.as_deref().unwrap_or(""),
                );
            }
        }
        Commands::Results { driver, year } => {
            let Some(driver) = openf1.find_driver(&driver).await? else {
                println!("No driver matching '{}' found.", driver);
                return Ok(());
            };
            let results = openf1
                .get_driver_results(driver.driver_number, year)
                .await?;
            println!(
                "{}",
                report::driver_report(&openf1, &driver.full_name, &results).await
            );
        }
        Commands::Calendar { year } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            let races = openf1.get_race_calendar(year).await?;
            let events = report::calendar_events(&races, Utc::now());
            if events.is_empty() {
                println!("No races found for {}.", year);
                return Ok(());
            }
            for event in events {
                println!(
                    "{} {}  {}  ({})",
                    if event.past { "✅" } else { "🔜" },
                    event.date_start.format("%d/%m/%Y %H:%M"),
                    event.name,
                    event.circuit,
                );
            }
        }
        Commands::Compare {
            driver1,
            driver2,
            year,
        } => {
            let model = create_model(config)?;
            if driver1.trim().eq_ignore_ascii_case(driver2.trim()) {
                println!("Select two different drivers to compare.");
                return Ok(());
            }
            let Some(driver1) = openf1.find_driver(&driver1).await? else {
                println!("No driver matching '{}' found.", driver1);
                return Ok(());
            };
            let Some(driver2) = openf1.find_driver(&driver2).await? else {
                println!("No driver matching '{}' found.", driver2);
                return Ok(());
            };

            let year = year.unwrap_or_else(|| Utc::now().year());
            info!(
                "⚔️ Comparing {} vs {} for {}",
                driver1.full_name, driver2.full_name, year
            );
            let results1 = openf1
                .get_driver_results(driver1.driver_number, Some(year))
                .await?;
            let results2 = openf1
                .get_driver_results(driver2.driver_number, Some(year))
                .await?;
            let report1 = report::driver_report(&openf1, &driver1.full_name, &results1).await;
            let report2 = report::driver_report(&openf1, &driver2.full_name, &results2).await;

            let analysis = model.compare_drivers(&report1, &report2).await?;
            println!("{}", analysis);
        }
        Commands::Analyze { input } => {
            let model = create_model(config)?;
            let article = if input.starts_with("http://") || input.starts_with("https://") {
                news.scrape_url(&input).await?
            } else {
                Article::from_text(&input)
            };
            info!("📰 {} ({})", article.title, article.source);

            let analysis = model.analyze_article(&article).await?;
            println!("Summary:\n{}", analysis.summary);
            println!("\nSentiment: {}", analysis.sentiment);
            if !analysis.entities.is_empty() {
                println!("\nEntities: {}", analysis.entities.join(", "));
            }
        }
    }

    Ok(())
}
