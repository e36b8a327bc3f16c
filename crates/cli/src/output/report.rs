//! Human-readable rate reports (JSON and table).

use anyhow::{Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use vir_rs_sim::{Fixed, RateResult, RATE_DECIMALS};

/// One evaluation with its annualized view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateReport {
    /// Per-second rate scaled by 1e18, as a decimal string
    pub rate_per_second_scaled: String,
    /// Full utilization rate scaled by 1e18, as a decimal string
    pub full_utilization_rate_scaled: String,
    pub rate_per_second: Decimal,
    pub full_utilization_rate: Decimal,
    /// `rate_per_second * 31_536_000`
    pub annual_rate: Decimal,
    /// `full_utilization_rate * 31_536_000`
    pub annual_full_utilization_rate: Decimal,
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Rate")]
    name: &'static str,
    #[tabled(rename = "Per Second (1e18)")]
    scaled: String,
    #[tabled(rename = "Per Second")]
    per_second: String,
    #[tabled(rename = "Annual")]
    annual: String,
}

/// Converts a model rate to a `Decimal` at the 18-decimal output scale.
fn to_decimal(value: Fixed) -> Result<Decimal> {
    let scaled = value.to_scaled(RATE_DECIMALS)?;
    Decimal::from_scientific(&format!("{scaled}e-{RATE_DECIMALS}"))
        .map(|d| d.normalize())
        .with_context(|| format!("rate {value} does not fit in a decimal"))
}

fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.4}%")
}

impl RateReport {
    pub fn new(result: &RateResult) -> Result<Self> {
        let scaled = result.to_scaled()?;
        Ok(Self {
            rate_per_second_scaled: scaled.rate_per_second.to_string(),
            full_utilization_rate_scaled: scaled.full_utilization_rate.to_string(),
            rate_per_second: to_decimal(result.rate_per_second)?,
            full_utilization_rate: to_decimal(result.full_utilization_rate)?,
            annual_rate: to_decimal(result.annualized_rate()?)?,
            annual_full_utilization_rate: to_decimal(
                result.annualized_full_utilization_rate()?,
            )?,
        })
    }
}

pub fn format_json(report: &RateReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_table(report: &RateReport) -> String {
    let rows = vec![
        RateRow {
            name: "Rate",
            scaled: report.rate_per_second_scaled.clone(),
            per_second: report.rate_per_second.to_string(),
            annual: format_percent(report.annual_rate),
        },
        RateRow {
            name: "Full Utilization Rate",
            scaled: report.full_utilization_rate_scaled.clone(),
            per_second: report.full_utilization_rate.to_string(),
            annual: format_percent(report.annual_full_utilization_rate),
        },
    ];

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
