//! CLI argument validation tests.
//!
//! Every failure must exit non-zero and leave stdout empty.

use predicates::prelude::*;

use super::helpers::{args_with, vir_cmd, GOLDEN_ARGS};

#[test]
fn test_help_output() {
    vir_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vir"))
        .stdout(predicate::str::contains("DELTA_TIME"))
        .stdout(predicate::str::contains("RATE_HALF_LIFE"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_no_arguments() {
    vir_cmd()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_last_argument() {
    vir_cmd()
        .args(&GOLDEN_ARGS[..12])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("RATE_HALF_LIFE"));
}

#[test]
fn test_extra_argument() {
    vir_cmd()
        .args(GOLDEN_ARGS)
        .arg("1")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_non_numeric_argument() {
    vir_cmd()
        .args(args_with(1, "abc"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not a non-negative decimal integer"));
}

#[test]
fn test_fractional_argument() {
    vir_cmd()
        .args(args_with(2, "1.5"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_negative_argument() {
    vir_cmd()
        .args(args_with(0, "-1"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_output_format() {
    vir_cmd()
        .args(["--format", "xml"])
        .args(GOLDEN_ARGS)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_zero_min_target_utilization() {
    vir_cmd()
        .args(args_with(7, "0"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Minimum target utilization must be greater than zero",
        ));
}

#[test]
fn test_full_max_target_utilization() {
    vir_cmd()
        .args(args_with(8, "100000"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("below 100%"));
}

#[test]
fn test_coincident_vertices() {
    vir_cmd()
        .args(args_with(4, "80000"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("coincide"));
}

#[test]
fn test_inverted_vertices() {
    vir_cmd()
        .args(args_with(3, "96000"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid vertex order"));
}

#[test]
fn test_inverted_target_band() {
    vir_cmd()
        .args(args_with(8, "70000"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid target utilization band"));
}

#[test]
fn test_inverted_full_rate_bounds() {
    vir_cmd()
        .args(args_with(11, "1"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid full utilization rate bounds"));
}

#[test]
fn test_zero_half_life() {
    vir_cmd()
        .args(args_with(12, "0"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("half-life"));
}

#[test]
fn test_overflowing_input() {
    // Fits in uint256 but not in a signed 256-bit mantissa
    vir_cmd()
        .args(args_with(
            2,
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("overflow"));
}
