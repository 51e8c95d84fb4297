use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use booking::wizard::controller::{FAILURE_FALLBACK, SUCCESS_FALLBACK};
use booking::wizard::{BookingBackend, BookingDraft, BookingRequest, VehicleId, WheelCount};
use booking::{ApiClient, BookingConfig, BookingError, ChannelNotifier};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod prompts;

#[derive(Parser, Debug)]
#[command(name = "booking", about = "Book a vehicle from the terminal", version)]
struct Cli {
    /// Base URL of the vehicle services, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// TOML file with service settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk through the booking wizard interactively.
    Book,
    /// Lists the vehicle categories for a wheel count.
    Categories {
        #[arg(long, value_parser = parse_wheels)]
        wheels: WheelCount,
        #[arg(long)]
        json: bool,
    },
    /// Lists the vehicle models in a category.
    Models {
        #[arg(long)]
        category: i64,
        #[arg(long)]
        json: bool,
    },
    /// Submits a booking without prompting.
    Submit {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        vehicle: i64,
        /// First day of the booking (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the booking (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
}

fn parse_wheels(raw: &str) -> Result<WheelCount, String> {
    let value: u8 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    WheelCount::try_from(value)
}

/// Applies the same presence checks the wizard does before anything is sent.
fn submit_request(
    first_name: String,
    last_name: String,
    vehicle: VehicleId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BookingRequest, BookingError> {
    let draft = BookingDraft {
        first_name,
        last_name,
        vehicle_id: Some(vehicle),
        start_date: Some(start),
        end_date: Some(end),
        ..Default::default()
    };
    BookingRequest::try_from(&draft)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "booking=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = BookingConfig::load(cli.config.as_deref())
        .context("failed to load booking configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }

    match cli.command.unwrap_or(Commands::Book) {
        Commands::Book => {
            let (notifier, notifications) = ChannelNotifier::new();
            let controller = booking::connect(&config, Arc::new(notifier));
            prompts::run_wizard(controller, notifications).await?;
        }
        Commands::Categories { wheels, json } => {
            let client = ApiClient::new(&config);
            let categories = client
                .categories(wheels)
                .await
                .with_context(|| format!("failed to load {}-wheel categories", wheels))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else if categories.is_empty() {
                println!("No categories offered for {}.", wheels.label());
            } else {
                println!("{:>6}  NAME", "ID");
                for category in &categories {
                    println!("{:>6}  {}", category.id, category.name);
                }
            }
        }
        Commands::Models { category, json } => {
            let client = ApiClient::new(&config);
            let models = client
                .models(category)
                .await
                .with_context(|| format!("failed to load models for category {category}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else if models.is_empty() {
                println!("No models in category {category}.");
            } else {
                println!("{:>6}  {:<24}  CATEGORY", "ID", "MODEL");
                for vehicle in &models {
                    println!(
                        "{:>6}  {:<24}  {}",
                        vehicle.id, vehicle.model_name, vehicle.category.name
                    );
                }
            }
        }
        Commands::Submit {
            first_name,
            last_name,
            vehicle,
            start,
            end,
        } => {
            let request = submit_request(first_name, last_name, vehicle, start, end)
                .context("refusing to submit booking")?;
            tracing::info!("Submitting booking for vehicle {}", request.vehicle_id);

            match ApiClient::new(&config).book(request).await {
                Ok(confirmation) => {
                    println!(
                        "✅ {}",
                        confirmation.message.as_deref().unwrap_or(SUCCESS_FALLBACK)
                    );
                }
                Err(e) => {
                    let text = e.user_message().unwrap_or(FAILURE_FALLBACK).to_string();
                    tracing::debug!("Booking failed: {}", e);
                    anyhow::bail!(text);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheels_argument() {
        assert_eq!(parse_wheels("2"), Ok(WheelCount::Two));
        assert_eq!(parse_wheels("4"), Ok(WheelCount::Four));
        assert!(parse_wheels("3").is_err());
        assert!(parse_wheels("four").is_err());
    }

    #[test]
    fn test_submit_requires_both_names() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();

        assert!(matches!(
            submit_request(String::new(), "Lovelace".to_string(), 10, start, end),
            Err(BookingError::MissingField("firstName"))
        ));
        assert!(matches!(
            submit_request("Ada".to_string(), String::new(), 10, start, end),
            Err(BookingError::MissingField("lastName"))
        ));

        let request = submit_request("Ada".to_string(), "Lovelace".to_string(), 10, start, end)
            .unwrap();
        assert_eq!(request.vehicle_id, 10);
        assert_eq!(request.end_date, end);
    }

    #[test]
    fn test_book_is_default_command() {
        let cli = Cli::try_parse_from(["booking", "--api-url", "http://example.test/api"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
    }

    #[test]
    fn test_submit_parses_dates() {
        let cli = Cli::try_parse_from([
            "booking",
            "submit",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--vehicle",
            "10",
            "--start",
            "2025-06-01",
            "--end",
            "2025-06-05",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Submit { vehicle, start, .. }) => {
                assert_eq!(vehicle, 10);
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }
}
