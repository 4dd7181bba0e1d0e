//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ridemart_types::{FuelType, OutputFormat, ShowroomId, TimeSlot, VehicleId, VehicleType};

#[derive(Parser)]
#[command(name = "ridemart")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Two-wheeler marketplace: browse, compare, finance and AI assistance")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Act as this user (favorites and price alerts are stored per user)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Log in as a dealer
    #[arg(long, global = true)]
    pub dealer: bool,

    /// Storage directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// AI backend to use (gemini, mock)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List vehicles matching the filters
    Browse {
        /// Case-insensitive match on the vehicle name
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Upper price limit (inclusive)
        #[arg(long)]
        max_price: Option<f64>,

        /// Restrict to brand (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,

        #[arg(long = "type", value_enum)]
        vehicle_type: Option<VehicleType>,

        #[arg(long, value_enum)]
        fuel: Option<FuelType>,
    },

    /// Show one vehicle with specs and reviews
    Show {
        id: VehicleId,
    },

    /// Side-by-side comparison of up to four vehicles
    Compare {
        #[arg(required = true)]
        ids: Vec<VehicleId>,
    },

    /// Monthly loan installment
    Emi {
        /// Loan amount; defaults to the vehicle's price with --vehicle
        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        vehicle: Option<VehicleId>,

        /// Annual interest rate in percent
        #[arg(long, default_value_t = 8.5)]
        rate: f64,

        /// Tenure in years
        #[arg(long, default_value_t = 3.0)]
        years: f64,
    },

    /// Petrol vs electric running cost
    Fuel {
        #[arg(long, default_value_t = 40.0)]
        daily_km: f64,

        /// Petrol price per litre
        #[arg(long, default_value_t = 105.0)]
        petrol_price: f64,

        /// Petrol mileage in km/l
        #[arg(long, default_value_t = 45.0)]
        mileage: f64,

        /// Electricity price per unit
        #[arg(long, default_value_t = 8.0)]
        electricity_price: f64,

        /// EV range in km per charge
        #[arg(long, default_value_t = 100.0)]
        ev_range: f64,
    },

    /// Submit a new listing
    AddListing {
        #[arg(long)]
        brand: String,

        #[arg(long)]
        name: String,

        #[arg(long, value_parser = parse_price)]
        price: f64,

        #[arg(long = "type", value_enum)]
        vehicle_type: VehicleType,

        #[arg(long, value_enum)]
        fuel: FuelType,

        #[arg(long, default_value = "")]
        image_url: String,

        #[arg(long, default_value = "")]
        mileage: String,

        #[arg(long, default_value = "")]
        engine: String,

        #[arg(long, default_value = "")]
        power: String,

        #[arg(long, default_value = "")]
        brakes: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Extra spec as KEY=VALUE (repeatable, order kept)
        #[arg(long = "spec", value_parser = parse_spec)]
        specs: Vec<(String, String)>,
    },

    /// Remove a listing submitted from this device
    RemoveListing {
        id: VehicleId,
    },

    /// Listings submitted from this device
    MyListings,

    /// Add a review (requires --user)
    Review {
        id: VehicleId,

        /// 1-5 stars
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Toggle a favorite (requires --user)
    Favorite {
        id: VehicleId,
    },

    /// Toggle a price alert at the current price (requires --user)
    Alert {
        id: VehicleId,
    },

    /// Price-drop notifications (requires --user)
    Notifications {
        /// Apply the demo 5% price drop first
        #[arg(long)]
        simulate_drop: bool,

        /// Acknowledge a notification
        #[arg(long)]
        dismiss: Option<VehicleId>,
    },

    /// Favorite vehicles (requires --user)
    Favorites,

    /// Dealer dashboard statistics (requires --user NAME --dealer)
    DealerStats,

    /// Showroom directory
    Showrooms {
        #[arg(long)]
        city: Option<String>,
    },

    /// Book a test ride
    TestRide {
        vehicle_id: VehicleId,

        #[arg(long)]
        showroom: ShowroomId,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        #[arg(long, value_enum, default_value_t = TimeSlot::Morning)]
        slot: TimeSlot,
    },

    /// AI generated pros and cons
    AiReview {
        id: VehicleId,
    },

    /// AI picks based on your favorites (requires --user)
    Recommend,

    /// AI maintenance triage
    Diagnose {
        /// What is wrong
        description: String,

        /// Photo of the problem
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set AI backend (gemini, mock)
        #[arg(long)]
        set_backend: Option<String>,

        /// Set model name
        #[arg(long)]
        set_model: Option<String>,

        /// Set environment variable that holds the API key
        #[arg(long)]
        set_api_key_env: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Set storage directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set how many recommendations to keep
        #[arg(long)]
        set_max_recommendations: Option<usize>,

        /// Load the seed catalog from this TOML file instead of the built-in one
        #[arg(long)]
        set_seed_catalog: Option<PathBuf>,

        /// Load showrooms from this CSV file instead of the built-in list
        #[arg(long)]
        set_showrooms_csv: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

fn parse_spec(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty spec key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_price(s: &str) -> Result<f64, String> {
    let price: f64 = s.trim().parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !ridemart_app::is_storable_price(price) {
        return Err(format!("price must be a finite, non-negative number, got '{}'", s));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spec() {
        assert_eq!(parse_spec("Range=150 km").unwrap(), ("Range".to_string(), "150 km".to_string()));
        assert!(parse_spec("Range").is_err());
        assert!(parse_spec("=x").is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ridemart", "favorite", "3", "--user", "Alice", "-f", "json"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("Alice"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Favorite { id: 3 }));
    }

    #[test]
    fn test_review_rating_range() {
        assert!(Cli::try_parse_from(["ridemart", "review", "1", "--rating", "6"]).is_err());
        assert!(Cli::try_parse_from(["ridemart", "review", "1", "--rating", "5"]).is_ok());
    }

    #[test]
    fn test_add_listing_specs_keep_order() {
        let cli = Cli::try_parse_from([
            "ridemart", "add-listing", "--brand", "Hero", "--name", "X1", "--price", "50000",
            "--type", "bike", "--fuel", "petrol", "--spec", "Tank=10 L", "--spec", "ABS=Single",
        ])
        .unwrap();
        match cli.command {
            Commands::AddListing { specs, vehicle_type, .. } => {
                assert_eq!(vehicle_type, VehicleType::Bike);
                assert_eq!(specs[0].0, "Tank");
                assert_eq!(specs[1].0, "ABS");
            }
            _ => panic!("expected add-listing"),
        }
    }

    #[test]
    fn test_add_listing_rejects_unstorable_price() {
        for bad in ["inf", "NaN", "-5", "abc"] {
            let parsed = Cli::try_parse_from([
                "ridemart", "add-listing", "--brand", "Hero", "--name", "X1", "--price", bad,
                "--type", "bike", "--fuel", "petrol",
            ]);
            assert!(parsed.is_err(), "price {} should be rejected", bad);
        }
        assert_eq!(parse_price("1000").unwrap(), 1000.0);
    }
}
