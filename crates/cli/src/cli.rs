//! CLI argument definitions using clap.

use alloy_primitives::U256;
use clap::{Args, Parser, ValueEnum};
use vir_rs_sim::{ScaledRateCurveConfig, ScaledRateInput};

/// Variable rate CLI - evaluate one step of the variable interest rate model
#[derive(Parser, Debug)]
#[command(name = "vir")]
#[command(
    about = "Compute the new per-second rate and full utilization rate for one time step",
    long_about = None
)]
pub struct Cli {
    /// Output format
    #[arg(long, default_value = "abi")]
    pub format: OutputFormat,

    /// Log filter directives, written to stderr (e.g. "debug", "vir_rs_sim=trace")
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log: String,

    #[command(flatten)]
    pub rate: RateArgs,
}

/// The thirteen positional scaled integers, in interface order.
#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    /// Seconds elapsed since the last update
    #[arg(value_parser = parse_uint)]
    pub delta_time: U256,

    /// Current utilization (1e5 = 100%)
    #[arg(value_parser = parse_uint)]
    pub utilization: U256,

    /// Full utilization rate from the last update (per second, 1e18 scaled)
    #[arg(value_parser = parse_uint)]
    pub previous_full_utilization_rate: U256,

    /// Utilization of the first vertex (1e5 = 100%)
    #[arg(value_parser = parse_uint)]
    pub vertex1_util: U256,

    /// Utilization of the second vertex (1e5 = 100%)
    #[arg(value_parser = parse_uint)]
    pub vertex2_util: U256,

    /// Share of the zero-to-full rate span at the first vertex (1e18 = 100%)
    #[arg(value_parser = parse_uint)]
    pub vertex1_rate_pct: U256,

    /// Share of the zero-to-full rate span at the second vertex (1e18 = 100%)
    #[arg(value_parser = parse_uint)]
    pub vertex2_rate_pct: U256,

    /// Lower bound of the target utilization band (1e5 = 100%)
    #[arg(value_parser = parse_uint)]
    pub min_target_util: U256,

    /// Upper bound of the target utilization band (1e5 = 100%)
    #[arg(value_parser = parse_uint)]
    pub max_target_util: U256,

    /// Rate at zero utilization (per second, 1e18 scaled)
    #[arg(value_parser = parse_uint)]
    pub zero_util_rate: U256,

    /// Minimum full utilization rate (per second, 1e18 scaled)
    #[arg(value_parser = parse_uint)]
    pub min_full_util_rate: U256,

    /// Maximum full utilization rate (per second, 1e18 scaled)
    #[arg(value_parser = parse_uint)]
    pub max_full_util_rate: U256,

    /// Rate half-life in seconds
    #[arg(value_parser = parse_uint)]
    pub rate_half_life: U256,
}

impl RateArgs {
    pub fn input(&self) -> ScaledRateInput {
        ScaledRateInput {
            delta_time: self.delta_time,
            utilization: self.utilization,
            previous_full_utilization_rate: self.previous_full_utilization_rate,
        }
    }

    pub fn config(&self) -> ScaledRateCurveConfig {
        ScaledRateCurveConfig {
            min_target_util: self.min_target_util,
            max_target_util: self.max_target_util,
            vertex1_util: self.vertex1_util,
            vertex2_util: self.vertex2_util,
            vertex1_rate_pct: self.vertex1_rate_pct,
            vertex2_rate_pct: self.vertex2_rate_pct,
            zero_util_rate: self.zero_util_rate,
            min_full_util_rate: self.min_full_util_rate,
            max_full_util_rate: self.max_full_util_rate,
            rate_half_life: self.rate_half_life,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ABI-encoded (uint256, uint256) tuple as one hex line
    #[default]
    Abi,
    Json,
    Table,
}

/// Parses a non-negative base-10 integer. Signs, prefixes and separators are rejected.
pub fn parse_uint(s: &str) -> Result<U256, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("not a non-negative decimal integer: {s:?}"));
    }
    U256::from_str_radix(s, 10).map_err(|_| format!("does not fit in uint256: {s}"))
}
