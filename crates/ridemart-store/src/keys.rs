//! Storage key names

/// Global list of vehicles submitted from this device
pub const USER_ADDED_VEHICLES: &str = "userAddedVehicles";

/// Global list of ids this device may remove
pub const MY_VEHICLE_IDS: &str = "myVehicleIds";

pub fn favorites_key(identity_name: &str) -> String {
    format!("favorites_{}", identity_name)
}

pub fn price_alerts_key(identity_name: &str) -> String {
    format!("price_alerts_{}", identity_name)
}
