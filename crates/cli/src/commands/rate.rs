//! Rate step command implementation.

use anyhow::Result;
use tracing::debug;
use vir_rs_sim::{get_new_rate, RateCurveConfig, RateInput};

use crate::cli::{OutputFormat, RateArgs};
use crate::output::{format_abi, format_json, format_table, RateReport};

/// Evaluates one step and renders it. Nothing is printed unless every stage succeeds.
pub fn render_rate(args: &RateArgs, format: OutputFormat) -> Result<String> {
    let config = RateCurveConfig::from_scaled(&args.config())?;
    let input = RateInput::from_scaled(&args.input())?;
    debug!(?config, ?input, "parsed rate arguments");

    let result = get_new_rate(&input, &config)?;

    let rendered = match format {
        OutputFormat::Abi => format_abi(&result.to_scaled()?),
        OutputFormat::Json => format_json(&RateReport::new(&result)?)?,
        OutputFormat::Table => format_table(&RateReport::new(&result)?),
    };
    Ok(rendered)
}

pub fn run_rate(args: &RateArgs, format: OutputFormat) -> Result<()> {
    let rendered = render_rate(args, format)?;
    println!("{}", rendered);
    Ok(())
}
