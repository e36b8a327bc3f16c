//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;

/// Scenario where utilization (86.542%) sits above the 85% band ceiling.
pub const GOLDEN_ARGS: [&str; 13] = [
    "1637",
    "86542",
    "146090229566",
    "80000",
    "95000",
    "10000",
    "200000000000000000",
    "75000",
    "85000",
    "158247046",
    "158247046",
    "146248476607",
    "172800",
];

/// ABI encoding of `(12888683180, 146104855121)`.
pub const GOLDEN_ABI: &str = "0x000000000000000000000000000000000000000000000000000000030039b2ac\
                              0000000000000000000000000000000000000000000000000000002204872a51";

/// Create a CLI command with logging pinned to the default level.
pub fn vir_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vir").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Golden arguments with one position replaced.
pub fn args_with(index: usize, value: &'static str) -> [&'static str; 13] {
    let mut args = GOLDEN_ARGS;
    args[index] = value;
    args
}
