//! End-to-end rate evaluation tests.

use alloy_primitives::{hex, U256};
use predicates::prelude::*;

use super::helpers::{args_with, vir_cmd, GOLDEN_ABI, GOLDEN_ARGS};

/// Decode the two ABI words printed on stdout.
fn decode_words(stdout: &[u8]) -> (U256, U256) {
    let line = String::from_utf8(stdout.to_vec()).unwrap();
    let bytes = hex::decode(line.trim_end()).unwrap();
    assert_eq!(bytes.len(), 64);
    (
        U256::from_be_slice(&bytes[0..32]),
        U256::from_be_slice(&bytes[32..64]),
    )
}

/// Arguments for the 10%/20% vertex share configuration.
fn model_args(
    delta_time: &'static str,
    utilization: &'static str,
    previous: &'static str,
) -> [&'static str; 13] {
    [
        delta_time,
        utilization,
        previous,
        "80000",
        "95000",
        "100000000000000000",
        "200000000000000000",
        "75000",
        "85000",
        "158247046",
        "158247046",
        "146248476607",
        "172800",
    ]
}

#[test]
fn test_golden_abi_output() {
    vir_cmd()
        .args(GOLDEN_ARGS)
        .assert()
        .success()
        .stdout(format!("{GOLDEN_ABI}\n"));
}

#[test]
fn test_explicit_abi_format_matches_default() {
    vir_cmd()
        .arg("--format")
        .arg("abi")
        .args(GOLDEN_ARGS)
        .assert()
        .success()
        .stdout(format!("{GOLDEN_ABI}\n"));
}

#[test]
fn test_decay_below_band() {
    // 50% utilization with the 10%/20% vertex shares used throughout the model tests
    let output = vir_cmd()
        .args(model_args("3600", "50000", "146090229566"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let (rate, full_rate) = decode_words(&output.stdout);
    assert_eq!(rate, U256::from(9_257_909_027u64));
    assert_eq!(full_rate, U256::from(145_752_838_736u64));
}

#[test]
fn test_quotient_rounding_near_half_unit() {
    let cases = [
        (["75795", "32975", "163723510024"], 6_083_317_414u64, 143_905_215_801u64),
        (["246963", "32469", "68334520096"], 2_051_967_144, 46_817_401_255),
        (["0", "83887", "96250534409"], 12_257_547_256, 96_250_534_409),
    ];
    for ([delta_time, utilization, previous], expected_rate, expected_full) in cases {
        let output = vir_cmd()
            .args(model_args(delta_time, utilization, previous))
            .output()
            .unwrap();
        assert!(output.status.success());

        let (rate, full_rate) = decode_words(&output.stdout);
        assert_eq!(rate, U256::from(expected_rate), "rate at {utilization}");
        assert_eq!(full_rate, U256::from(expected_full), "full rate at {utilization}");
    }
}

#[test]
fn test_zero_delta_time_keeps_rate() {
    let output = vir_cmd().args(args_with(0, "0")).output().unwrap();
    assert!(output.status.success());

    let (_, full_rate) = decode_words(&output.stdout);
    assert_eq!(full_rate, U256::from(146_090_229_566u64));
}

#[test]
fn test_long_growth_clamped_to_max() {
    let output = vir_cmd()
        .args(args_with(0, "31536000"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let (_, full_rate) = decode_words(&output.stdout);
    assert_eq!(full_rate, U256::from(146_248_476_607u64));
}

#[test]
fn test_zero_utilization_gives_zero_rate() {
    let output = vir_cmd()
        .args(args_with(1, "0"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let (rate, _) = decode_words(&output.stdout);
    assert_eq!(rate, U256::from(158_247_046u64));
}

#[test]
fn test_json_output() {
    let output = vir_cmd()
        .args(["--format", "json"])
        .args(GOLDEN_ARGS)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rate_per_second_scaled"], "12888683180");
    assert_eq!(json["full_utilization_rate_scaled"], "146104855121");
    assert_eq!(json["rate_per_second"], "0.00000001288868318");
    assert_eq!(json["full_utilization_rate"], "0.000000146104855121");
}

#[test]
fn test_table_output() {
    vir_cmd()
        .args(["--format", "table"])
        .args(GOLDEN_ARGS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Utilization Rate"))
        .stdout(predicate::str::contains("146104855121"));
}

#[test]
fn test_debug_logs_go_to_stderr() {
    vir_cmd()
        .args(["--log", "debug"])
        .args(GOLDEN_ARGS)
        .assert()
        .success()
        .stdout(format!("{GOLDEN_ABI}\n"))
        .stderr(predicate::str::contains("adjusted full utilization rate"));
}
