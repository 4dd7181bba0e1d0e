//! Output formatting module

use ridemart_domain::service::comparison::ComparisonTable;
use ridemart_domain::service::currency::{format_inr, format_inr_whole};
use ridemart_domain::service::showroom::map_url;
use ridemart_domain::service::{DealerStats, EmiBreakdown, FuelSavings};
use ridemart_types::{Diagnosis, OutputFormat, Result, ReviewInsight, Showroom, Vehicle};
use serde::Serialize;

pub fn output_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let head: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

fn stars(rating: f64) -> String {
    if rating <= 0.0 {
        "-".to_string()
    } else {
        format!("{:.1}★", rating)
    }
}

pub fn output_vehicles(format: OutputFormat, vehicles: &[&Vehicle]) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles match.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<30} {:<8} {:<9} {:>12}  {:>6}",
        "ID", "Vehicle", "Type", "Fuel", "Price", "Rating"
    );
    println!("{}", "-".repeat(76));
    for v in vehicles {
        println!(
            "{:>4}  {:<30} {:<8} {:<9} {:>12}  {:>6}",
            v.id,
            truncate(&v.display_name(), 30),
            v.vehicle_type,
            v.fuel_type,
            format_inr_whole(v.price),
            stars(v.rating)
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_vehicle_detail(format: OutputFormat, vehicle: &Vehicle, favorite: bool, alert: Option<f64>) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(vehicle);
    }

    println!("\n{}", vehicle.display_name());
    println!("{}", "=".repeat(vehicle.display_name().chars().count()));
    println!("ID:          {}{}", vehicle.id, if vehicle.is_user_added { " (user listing)" } else { "" });
    println!("Price:       {}", format_inr(vehicle.price));
    println!("Type:        {} / {}", vehicle.vehicle_type, vehicle.fuel_type);
    println!("Mileage:     {}", vehicle.mileage);
    println!("Engine:      {}", vehicle.engine);
    println!("Power:       {}", vehicle.power);
    println!("Brakes:      {}", vehicle.brakes);
    println!("Rating:      {} ({} review(s))", stars(vehicle.rating), vehicle.reviews.len());
    if favorite {
        println!("Favorite:    yes");
    }
    if let Some(price) = alert {
        println!("Price alert: armed at {}", format_inr(price));
    }

    if !vehicle.description.is_empty() {
        println!("\n{}", vehicle.description);
    }

    if !vehicle.specs.is_empty() {
        println!("\n--- Specifications ---");
        for (key, value) in &vehicle.specs {
            println!("{:<20} {}", key, value);
        }
    }

    if !vehicle.reviews.is_empty() {
        println!("\n--- Reviews ---");
        for review in &vehicle.reviews {
            println!("{} {} ({})", "★".repeat(review.rating as usize), review.user_name, review.date);
            if !review.comment.is_empty() {
                println!("  {}", review.comment);
            }
        }
    }
    Ok(())
}

pub fn output_comparison(format: OutputFormat, table: &ComparisonTable) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(table);
    }

    if table.is_empty() {
        println!("Nothing selected for comparison.");
        return Ok(());
    }

    print!("{:<18}", "");
    for column in &table.columns {
        print!(" {:<22}", truncate(&column.title, 22));
    }
    println!();
    println!("{}", "-".repeat(18 + 23 * table.columns.len()));

    for row in table.base_rows.iter().chain(table.spec_rows.iter()) {
        print!("{:<18}", truncate(&row.label, 18));
        for cell in &row.cells {
            print!(" {:<22}", truncate(cell, 22));
        }
        println!();
    }
    Ok(())
}

pub fn output_emi(format: OutputFormat, principal: f64, rate: f64, years: f64, emi: &EmiBreakdown) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(emi);
    }

    println!("\nEMI Calculation");
    println!("===============");
    println!("Loan amount:     {}", format_inr(principal));
    println!("Interest rate:   {}% p.a.", rate);
    println!("Tenure:          {} year(s)", years);
    println!("Monthly EMI:     {}", format_inr(emi.emi));
    println!("Total payable:   {}", format_inr(emi.total_payable));
    println!("Total interest:  {}", format_inr(emi.total_interest));
    Ok(())
}

pub fn output_fuel(format: OutputFormat, savings: &FuelSavings) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(savings);
    }

    println!("\nPetrol vs Electric");
    println!("==================");
    println!("Monthly distance:   {:.0} km", savings.monthly_distance_km);
    println!("Petrol cost/month:  {}", format_inr(savings.petrol_monthly_cost));
    println!("EV cost/month:      {}", format_inr(savings.ev_monthly_cost));
    println!("Monthly saving:     {}", format_inr(savings.monthly_saving));
    println!("Yearly saving:      {}", format_inr(savings.yearly_saving));
    Ok(())
}

pub fn output_dealer_stats(format: OutputFormat, stats: &DealerStats, listings: &[&Vehicle]) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(stats);
    }

    println!("\nDealer Dashboard");
    println!("================");
    println!("Total listings:   {}", stats.total_listings);
    println!("Inventory value:  {}", format_inr_whole(stats.total_value));
    println!("Average rating:   {}", stars(stats.average_rating));
    if !stats.inventory_by_type.is_empty() {
        println!("\n--- Inventory by type ---");
        for (vehicle_type, count) in &stats.inventory_by_type {
            println!("{:<10} {}", vehicle_type, count);
        }
    }
    if !listings.is_empty() {
        println!();
        output_vehicles(OutputFormat::Table, listings)?;
    }
    Ok(())
}

pub fn output_showrooms(format: OutputFormat, showrooms: &[&Showroom]) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(showrooms);
    }

    if showrooms.is_empty() {
        println!("No showrooms found.");
        return Ok(());
    }

    let mut current_city = "";
    for showroom in showrooms {
        if showroom.city != current_city {
            current_city = &showroom.city;
            println!("\n{}", current_city);
            println!("{}", "-".repeat(current_city.chars().count()));
        }
        println!("[{}] {}", showroom.id, showroom.name);
        println!("    {}", showroom.address);
        println!("    Phone: {}", showroom.phone);
        println!("    Map:   {}", map_url(showroom));
    }
    Ok(())
}

pub fn output_review_insight(format: OutputFormat, vehicle: &Vehicle, insight: &ReviewInsight) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(insight);
    }

    println!("\nAI Review: {}", vehicle.display_name());
    println!("\nPros:");
    for pro in &insight.pros {
        println!("  + {}", pro);
    }
    println!("\nCons:");
    for con in &insight.cons {
        println!("  - {}", con);
    }
    Ok(())
}

pub fn output_diagnosis(format: OutputFormat, diagnosis: &Diagnosis) -> Result<()> {
    if format == OutputFormat::Json {
        return output_json(diagnosis);
    }

    println!("\nDiagnosis: {}", diagnosis.recommendation.label());
    println!("\nPotential causes:");
    for cause in &diagnosis.potential_causes {
        println!("  - {}", cause);
    }
    println!("\nSuggested steps:");
    for (i, step) in diagnosis.suggested_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    Ok(())
}
