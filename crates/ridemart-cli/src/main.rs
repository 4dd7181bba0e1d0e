//! RideMart - two-wheeler marketplace on the command line
//!
//! Browse and compare listings, run finance calculators, keep favorites and
//! price alerts, and ask the AI assistant for reviews and repair advice.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use ridemart_types::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        if let Error::Service(ref service) = e {
            eprintln!("{}", service.user_message());
        }
        std::process::exit(1);
    }
}
