//! Side-by-side comparison table

use ridemart_types::{Vehicle, VehicleId};
use serde::Serialize;

use super::currency::format_inr;

/// Cell text for a spec the vehicle does not list
pub const MISSING_SPEC: &str = "-";

/// Fixed rows shown for every vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseField {
    Price,
    Mileage,
    Engine,
    Power,
    Brakes,
}

impl BaseField {
    pub const ALL: [BaseField; 5] = [
        BaseField::Price,
        BaseField::Mileage,
        BaseField::Engine,
        BaseField::Power,
        BaseField::Brakes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BaseField::Price => "Price",
            BaseField::Mileage => "Mileage",
            BaseField::Engine => "Engine",
            BaseField::Power => "Power",
            BaseField::Brakes => "Brakes",
        }
    }

    /// Price is rendered as currency, everything else verbatim
    pub fn render(&self, vehicle: &Vehicle) -> String {
        match self {
            BaseField::Price => format_inr(vehicle.price),
            BaseField::Mileage => vehicle.mileage.clone(),
            BaseField::Engine => vehicle.engine.clone(),
            BaseField::Power => vehicle.power.clone(),
            BaseField::Brakes => vehicle.brakes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
    pub vehicle_id: VehicleId,
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    /// One cell per column, in column order
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub base_rows: Vec<ComparisonRow>,
    /// One row per key in [`all_spec_keys`] order
    pub spec_rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Union of spec keys across the selection, in first-seen order
pub fn all_spec_keys(selection: &[Vehicle]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in selection.iter().flat_map(|v| v.specs.keys()) {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

pub fn build_comparison_table(selection: &[Vehicle]) -> ComparisonTable {
    let columns = selection
        .iter()
        .map(|v| ComparisonColumn {
            vehicle_id: v.id,
            title: v.display_name(),
            image_url: v.image_url.clone(),
        })
        .collect();

    let base_rows = BaseField::ALL
        .iter()
        .map(|field| ComparisonRow {
            label: field.label().to_string(),
            cells: selection.iter().map(|v| field.render(v)).collect(),
        })
        .collect();

    let spec_rows = all_spec_keys(selection)
        .into_iter()
        .map(|key| {
            let cells = selection
                .iter()
                .map(|v| match v.specs.get(&key) {
                    Some(value) if !value.is_empty() => value.clone(),
                    _ => MISSING_SPEC.to_string(),
                })
                .collect();
            ComparisonRow { label: key, cells }
        })
        .collect();

    ComparisonTable {
        columns,
        base_rows,
        spec_rows,
    }
}
