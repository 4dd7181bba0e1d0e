//! Prompt builders
//!
//! Each prompt asks for JSON only; the response schema sent alongside it is
//! the authoritative shape.

use ridemart_types::Vehicle;

pub fn build_review_prompt(vehicle: &Vehicle) -> String {
    format!(
        "Analyze the following two-wheeler specifications and provide a balanced review.\n\
         Vehicle Name: {}\n\
         Price: INR {}\n\
         Key Specs:\n\
         - Mileage: {}\n\
         - Engine: {}\n\
         - Power: {}\n\
         - Brakes: {}\n\
         \n\
         Based on these specs, identify the main pros and cons for a potential buyer.\n\
         Return the result in the specified JSON format.",
        vehicle.display_name(),
        vehicle.price,
        or_unknown(&vehicle.mileage),
        or_unknown(&vehicle.engine),
        or_unknown(&vehicle.power),
        or_unknown(&vehicle.brakes),
    )
}

pub fn build_recommendation_prompt(favorites: &[Vehicle], candidates: &[Vehicle], max: usize) -> String {
    let mut prompt = String::from(
        "A buyer has shortlisted the following two-wheelers as favorites:\n",
    );
    for vehicle in favorites {
        prompt.push_str(&vehicle_line(vehicle));
    }
    prompt.push_str("\nChoose the best matches for this buyer from these candidates only:\n");
    for vehicle in candidates {
        prompt.push_str(&vehicle_line(vehicle));
    }
    prompt.push_str(&format!(
        "\nConsider type, fuel, price range and rating. \
         Return at most {} candidate ids, best first, as {{\"recommendations\": [id, ...]}}.",
        max
    ));
    prompt
}

pub fn build_diagnosis_prompt(description: &str, has_image: bool) -> String {
    let photo = if has_image {
        "A photo of the affected part is attached; use it together with the description.\n"
    } else {
        ""
    };
    format!(
        "You are an experienced two-wheeler mechanic.\n\
         The owner describes this problem:\n\"{}\"\n\
         {}\
         List the most likely causes and the steps the owner can take, in order.\n\
         Classify the repair as DIY_FRIENDLY, CAUTION_ADVISED or PROFESSIONAL_HELP_RECOMMENDED.\n\
         Return the result in the specified JSON format.",
        description.trim(),
        photo,
    )
}

fn vehicle_line(vehicle: &Vehicle) -> String {
    format!(
        "- id {}: {} ({}, {}), INR {}, rating {}\n",
        vehicle.id,
        vehicle.display_name(),
        vehicle.vehicle_type,
        vehicle.fuel_type,
        vehicle.price,
        vehicle.rating
    )
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "not specified"
    } else {
        value
    }
}
