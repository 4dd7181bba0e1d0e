//! Command handlers

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use ridemart_ai::{attachment_from_bytes, build_gateway, AiGateway};
use ridemart_app::config::Config;
use ridemart_app::repository::open_marketplace;
use ridemart_app::{AiAssistant, AiOutcome, CompareToggle, Marketplace, MAX_COMPARE};
use ridemart_domain::service::{calculate_fuel_savings, emi_breakdown, CommuteProfile};
use ridemart_types::{
    Error, OutputFormat, Result, ReviewDraft, ServiceError, TestRideRequest, VehicleDraft,
};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::*;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Config edits start from the saved file; global overrides do not apply
    if let Commands::Config {
        show,
        set_backend,
        set_model,
        set_api_key_env,
        set_format,
        set_data_dir,
        set_max_recommendations,
        set_seed_catalog,
        set_showrooms_csv,
        reset,
    } = cli.command
    {
        return cmd_config(
            Config::load()?,
            show,
            set_backend,
            set_model,
            set_api_key_env,
            set_format,
            set_data_dir,
            set_max_recommendations,
            set_seed_catalog,
            set_showrooms_csv,
            reset,
        );
    }

    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref backend) = cli.backend {
        config.ai_backend = backend.clone();
    }
    if let Some(ref model) = cli.model {
        config.model = model.clone();
    }
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let format = cli.format.unwrap_or(config.output_format);

    let mut market = open_marketplace(&config)?;
    if let Some(ref user) = cli.user {
        if !market.login(user, cli.dealer) {
            return Err(Error::InvalidInput("--user must not be blank".to_string()));
        }
    }

    match cli.command {
        Commands::Browse {
            search,
            max_price,
            brands,
            vehicle_type,
            fuel,
        } => {
            let filters = market.filters_mut();
            if let Some(search) = search {
                filters.set_search(search);
            }
            if let Some(max_price) = max_price {
                filters.set_max_price(max_price);
            }
            for brand in &brands {
                filters.toggle_brand(brand);
            }
            if let Some(vehicle_type) = vehicle_type {
                filters.toggle_type(vehicle_type);
            }
            if let Some(fuel) = fuel {
                filters.toggle_fuel_type(fuel);
            }
            output_vehicles(format, &market.browse())
        }

        Commands::Show { id } => {
            let vehicle = market.vehicle(id).ok_or(Error::VehicleNotFound(id))?;
            output_vehicle_detail(format, vehicle, market.is_favorite(id), market.alert_price(id))
        }

        Commands::Compare { ids } => {
            for id in ids {
                match market.toggle_compare(id) {
                    CompareToggle::Added => {}
                    CompareToggle::Removed => eprintln!("Vehicle {} listed twice, removed from comparison", id),
                    CompareToggle::Rejected if market.vehicle(id).is_none() => {
                        eprintln!("Vehicle {} not found, skipped", id)
                    }
                    CompareToggle::Rejected => {
                        eprintln!("At most {} vehicles can be compared, skipped {}", MAX_COMPARE, id)
                    }
                }
            }
            output_comparison(format, &market.comparison_table())
        }

        Commands::Emi {
            amount,
            vehicle,
            rate,
            years,
        } => {
            let principal = match (amount, vehicle) {
                (Some(amount), _) => amount,
                (None, Some(id)) => market.vehicle(id).ok_or(Error::VehicleNotFound(id))?.price,
                (None, None) => {
                    return Err(Error::InvalidInput("give --amount or --vehicle".to_string()));
                }
            };
            output_emi(format, principal, rate, years, &emi_breakdown(principal, rate, years))
        }

        Commands::Fuel {
            daily_km,
            petrol_price,
            mileage,
            electricity_price,
            ev_range,
        } => {
            let profile = CommuteProfile {
                daily_km,
                petrol_price,
                petrol_mileage: mileage,
                electricity_price,
                ev_range,
            };
            output_fuel(format, &calculate_fuel_savings(&profile))
        }

        Commands::AddListing {
            brand,
            name,
            price,
            vehicle_type,
            fuel,
            image_url,
            mileage,
            engine,
            power,
            brakes,
            description,
            specs,
        } => {
            let mut draft = VehicleDraft::new(brand, name, price, vehicle_type, fuel);
            draft.image_url = image_url;
            draft.mileage = mileage;
            draft.engine = engine;
            draft.power = power;
            draft.brakes = brakes;
            draft.description = description;
            for (key, value) in specs {
                draft = draft.with_spec(key, value);
            }
            let vehicle = market
                .add_listing(draft)
                .ok_or_else(|| Error::InvalidInput("price must be a finite, non-negative number".to_string()))?;
            if format == OutputFormat::Json {
                output_json(&vehicle)
            } else {
                println!("Listed {} with id {}", vehicle.display_name(), vehicle.id);
                Ok(())
            }
        }

        Commands::RemoveListing { id } => {
            if market.remove_listing(id) {
                println!("Removed listing {}", id);
            } else {
                println!("Listing {} is not one of your listings; nothing removed", id);
            }
            Ok(())
        }

        Commands::MyListings => output_vehicles(format, &market.my_listings()),

        Commands::Review { id, rating, comment } => {
            let user = require_user(&market)?;
            if !market.add_review(id, ReviewDraft::new(user, rating, comment)) {
                return Err(Error::VehicleNotFound(id));
            }
            let vehicle = market.vehicle(id).ok_or(Error::VehicleNotFound(id))?;
            println!(
                "Review added to {}. Rating is now {:.1} ({} review(s))",
                vehicle.display_name(),
                vehicle.rating,
                vehicle.reviews.len()
            );
            Ok(())
        }

        Commands::Favorite { id } => {
            require_user(&market)?;
            let vehicle = market.vehicle(id).ok_or(Error::VehicleNotFound(id))?.display_name();
            if market.toggle_favorite(id) {
                println!("Added {} to favorites", vehicle);
            } else {
                println!("Removed {} from favorites", vehicle);
            }
            Ok(())
        }

        Commands::Alert { id } => {
            require_user(&market)?;
            let vehicle = market.vehicle(id).ok_or(Error::VehicleNotFound(id))?.display_name();
            if market.toggle_price_alert(id) {
                let price = market.alert_price(id).unwrap_or_default();
                println!("Price alert set for {} at {}", vehicle, ridemart_domain::service::format_inr(price));
            } else {
                println!("Price alert removed for {}", vehicle);
            }
            Ok(())
        }

        Commands::Notifications { simulate_drop, dismiss } => {
            require_user(&market)?;
            if simulate_drop {
                match market.simulate_price_drop() {
                    Some(price) => eprintln!("Simulated price drop: vehicle 1 now {}", ridemart_domain::service::format_inr(price)),
                    None => eprintln!("Price drop already simulated or vehicle 1 missing"),
                }
            }
            if let Some(id) = dismiss {
                market.dismiss_notification(id);
            }
            let notifications = market.notifications();
            if format == OutputFormat::Table {
                for v in &notifications {
                    let was = market.alert_price(v.id).unwrap_or(v.price);
                    println!(
                        "Price drop! {} is now {} (was {})",
                        v.display_name(),
                        ridemart_domain::service::format_inr(v.price),
                        ridemart_domain::service::format_inr(was)
                    );
                }
                if notifications.is_empty() {
                    println!("No price drops.");
                }
                Ok(())
            } else {
                output_vehicles(format, &notifications)
            }
        }

        Commands::Favorites => {
            require_user(&market)?;
            output_vehicles(format, &market.favorite_vehicles())
        }

        Commands::DealerStats => {
            let stats = market
                .dealer_stats()
                .ok_or_else(|| Error::InvalidInput("dealer statistics need --user NAME --dealer".to_string()))?;
            output_dealer_stats(format, &stats, &market.my_listings())
        }

        Commands::Showrooms { city } => match city {
            Some(city) => output_showrooms(format, &market.showrooms_in(&city)),
            None => output_showrooms(format, &market.showrooms().iter().collect::<Vec<_>>()),
        },

        Commands::TestRide {
            vehicle_id,
            showroom,
            name,
            email,
            phone,
            date,
            slot,
        } => {
            let request = TestRideRequest {
                name,
                email,
                phone,
                vehicle_id,
                showroom_id: showroom,
                date,
                time_slot: slot,
            };
            let confirmation = market.book_test_ride(&request)?;
            if format == OutputFormat::Json {
                output_json(&confirmation)
            } else {
                println!("{}", confirmation.message());
                Ok(())
            }
        }

        Commands::AiReview { id } => {
            let vehicle = market.vehicle(id).ok_or(Error::VehicleNotFound(id))?.clone();
            let assistant = AiAssistant::new(open_gateway(&config)?);
            let outcome = run_ai("Generating AI review...", assistant.generate_review(&vehicle))?;
            match outcome {
                AiOutcome::Applied(insight) => output_review_insight(format, &vehicle, &insight),
                AiOutcome::Superseded => Ok(()),
            }
        }

        Commands::Recommend => {
            require_user(&market)?;
            let (favorites, candidates) = market.recommendation_inputs();
            if favorites.is_empty() {
                println!("Add some favorites first to get recommendations.");
                return Ok(());
            }
            let assistant = AiAssistant::new(open_gateway(&config)?);
            let outcome = run_ai("Finding recommendations...", assistant.recommend(&favorites, &candidates))?;
            let ids = outcome.applied().unwrap_or_default();
            let picks: Vec<_> = ids.iter().filter_map(|id| market.vehicle(*id)).collect();
            output_vehicles(format, &picks)
        }

        Commands::Diagnose { description, image } => {
            let attachment = match image {
                Some(ref path) => Some(read_attachment(path)?),
                None => None,
            };
            let assistant = AiAssistant::new(open_gateway(&config)?);
            let outcome = run_ai(
                "Diagnosing...",
                assistant.diagnose(&description, attachment.as_ref()),
            )?;
            match outcome {
                AiOutcome::Applied(diagnosis) => output_diagnosis(format, &diagnosis),
                AiOutcome::Superseded => Ok(()),
            }
        }

        Commands::Config { .. } => Ok(()),
    }
}

fn require_user(market: &Marketplace) -> Result<String> {
    market
        .identity()
        .map(|identity| identity.name.clone())
        .ok_or_else(|| Error::InvalidInput("this command needs --user NAME".to_string()))
}

fn open_gateway(config: &Config) -> Result<Arc<dyn AiGateway>> {
    debug!(backend = config.effective_backend(), model = %config.model, "opening AI gateway");
    Ok(build_gateway(&config.ai_config())?)
}

fn read_attachment(path: &Path) -> Result<ridemart_types::ImageAttachment> {
    if !path.exists() {
        return Err(Error::InvalidInput(format!("image not found: {}", path.display())));
    }
    attachment_from_bytes(std::fs::read(path)?)
}

/// Drive one AI request to completion behind a spinner
fn run_ai<T>(
    message: &str,
    request: impl std::future::Future<Output = std::result::Result<T, ServiceError>>,
) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = runtime.block_on(request);
    pb.finish_and_clear();
    Ok(result?)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    show: bool,
    set_backend: Option<String>,
    set_model: Option<String>,
    set_api_key_env: Option<String>,
    set_format: Option<OutputFormat>,
    set_data_dir: Option<std::path::PathBuf>,
    set_max_recommendations: Option<usize>,
    set_seed_catalog: Option<std::path::PathBuf>,
    set_showrooms_csv: Option<std::path::PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut modified = false;

    if let Some(backend) = set_backend {
        config.ai_backend = backend;
        modified = true;
    }
    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }
    if let Some(env) = set_api_key_env {
        config.api_key_env = env;
        modified = true;
    }
    if let Some(format) = set_format {
        config.output_format = format;
        modified = true;
    }
    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }
    if let Some(max) = set_max_recommendations {
        config.max_recommendations = max.max(1);
        modified = true;
    }
    if let Some(path) = set_seed_catalog {
        config.seed_catalog = Some(path);
        modified = true;
    }
    if let Some(path) = set_showrooms_csv {
        config.showrooms_csv = Some(path);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
