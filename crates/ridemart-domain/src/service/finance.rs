//! Loan EMI and EV running-cost calculators
//!
//! Both calculators return 0 instead of a non-finite value.

use serde::{Deserialize, Serialize};

/// Assumed battery energy per full charge (kWh)
pub const EV_BATTERY_KWH_PER_CHARGE: f64 = 3.0;

pub const DAYS_PER_MONTH: f64 = 30.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Monthly instalment on a reducing-balance loan.
///
/// # Formula
/// i = rate / 12 / 100, n = years * 12,
/// EMI = P * i * (1 + i)^n / ((1 + i)^n - 1)
///
/// Any non-positive input returns 0.
pub fn calculate_emi(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> f64 {
    if principal <= 0.0 || annual_rate_percent <= 0.0 || tenure_years <= 0.0 {
        return 0.0;
    }
    let monthly_rate = annual_rate_percent / MONTHS_PER_YEAR / 100.0;
    let payments = tenure_years * MONTHS_PER_YEAR;
    let growth = (1.0 + monthly_rate).powf(payments);
    finite_or_zero(principal * monthly_rate * growth / (growth - 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub emi: f64,
    pub total_payable: f64,
    pub total_interest: f64,
}

pub fn emi_breakdown(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> EmiBreakdown {
    let emi = calculate_emi(principal, annual_rate_percent, tenure_years);
    let total_payable = emi * tenure_years * MONTHS_PER_YEAR;
    EmiBreakdown {
        emi,
        total_payable,
        total_interest: total_payable - principal,
    }
}

/// Daily usage and prices for the petrol vs EV comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuteProfile {
    pub daily_km: f64,
    /// INR per litre
    pub petrol_price: f64,
    /// km per litre
    pub petrol_mileage: f64,
    /// INR per kWh
    pub electricity_price: f64,
    /// km per full charge
    pub ev_range: f64,
}

impl Default for CommuteProfile {
    fn default() -> Self {
        Self {
            daily_km: 40.0,
            petrol_price: 105.0,
            petrol_mileage: 45.0,
            electricity_price: 8.0,
            ev_range: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSavings {
    pub monthly_distance_km: f64,
    pub petrol_monthly_cost: f64,
    pub ev_monthly_cost: f64,
    pub monthly_saving: f64,
    pub yearly_saving: f64,
}

pub fn calculate_fuel_savings(profile: &CommuteProfile) -> FuelSavings {
    let monthly_distance_km = profile.daily_km * DAYS_PER_MONTH;
    let petrol_monthly_cost = (monthly_distance_km / profile.petrol_mileage) * profile.petrol_price;
    let ev_monthly_cost =
        (monthly_distance_km / profile.ev_range) * EV_BATTERY_KWH_PER_CHARGE * profile.electricity_price;
    let monthly_saving = finite_or_zero(petrol_monthly_cost - ev_monthly_cost);

    FuelSavings {
        monthly_distance_km: finite_or_zero(monthly_distance_km),
        petrol_monthly_cost: finite_or_zero(petrol_monthly_cost),
        ev_monthly_cost: finite_or_zero(ev_monthly_cost),
        monthly_saving,
        yearly_saving: monthly_saving * MONTHS_PER_YEAR,
    }
}
