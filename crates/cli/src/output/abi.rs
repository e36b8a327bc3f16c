//! ABI tuple encoding of a rate result.

use alloy::sol_types::SolValue;
use alloy_primitives::hex;
use vir_rs_sim::ScaledRateResult;

/// Encodes `(uint256 ratePerSecond, uint256 fullUtilizationRate)` as a
/// `0x`-prefixed hex string of 64 bytes.
pub fn format_abi(result: &ScaledRateResult) -> String {
    let encoded = (result.rate_per_second, result.full_utilization_rate).abi_encode_params();
    hex::encode_prefixed(encoded)
}
