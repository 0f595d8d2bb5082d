//! Simple-interest projection for staking commitments.
use crate::core::commodity::CommodityType;
use crate::core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual rate applied to commodity types missing from the rate table.
pub const FALLBACK_RATE: f64 = 0.10;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Annual percentage yields per commodity type, as decimal fractions.
///
/// A table is always replaced as a whole when refreshed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<CommodityType, f64>);

impl RateTable {
    pub fn new(rates: impl IntoIterator<Item = (CommodityType, f64)>) -> Self {
        RateTable(rates.into_iter().collect())
    }

    /// Rates used while the marketplace cannot be reached.
    pub fn default_table() -> Self {
        RateTable::new([
            (CommodityType::Sugarcane, 0.12),
            (CommodityType::Coffee, 0.15),
            (CommodityType::Soy, 0.18),
            (CommodityType::Livestock, 0.14),
            (CommodityType::Basket, 0.16),
        ])
    }

    pub fn rate_for(&self, commodity: &CommodityType) -> f64 {
        self.0.get(commodity).copied().unwrap_or(FALLBACK_RATE)
    }

    pub fn contains(&self, commodity: &CommodityType) -> bool {
        self.0.contains_key(commodity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CommodityType, f64)> {
        self.0.iter().map(|(commodity, rate)| (commodity, *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Projected outcome of staking `principal` for `duration_days`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakingQuote {
    pub principal: f64,
    pub rate: f64,
    pub duration_days: u32,
    pub projected_yield: f64,
    pub total_return: f64,
}

impl StakingQuote {
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Parses a stake amount typed by the user.
pub fn parse_principal(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("please enter an amount to stake"));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("'{trimmed}' is not a valid amount")))?;
    validate_principal(amount)?;
    Ok(amount)
}

fn validate_principal(principal: f64) -> Result<()> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(AppError::validation(format!(
            "amount must be a positive number, got {principal}"
        )));
    }
    Ok(())
}

/// Computes the yield of a stake with a linear, day-prorated rate over a 365-day
/// year. Values are returned unrounded.
pub fn compute_quote(
    principal: f64,
    commodity: &CommodityType,
    duration_days: u32,
    rates: &RateTable,
) -> Result<StakingQuote> {
    validate_principal(principal)?;

    let rate = rates.rate_for(commodity);
    let projected_yield = principal * rate * (f64::from(duration_days) / DAYS_PER_YEAR);

    Ok(StakingQuote {
        principal,
        rate,
        duration_days,
        projected_yield,
        total_return: principal + projected_yield,
    })
}
