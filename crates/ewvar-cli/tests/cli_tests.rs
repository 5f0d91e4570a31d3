//! End-to-end tests for the `ewvar` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Price file with 28 consecutive days for SPY and TLT ending 2024-06-28.
fn price_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ticker,date,adjusted_close").unwrap();
    for (ticker, k) in [("SPY", 0.0_f64), ("TLT", 1.0)] {
        let mut price = 100.0_f64;
        for day in 1..=28 {
            writeln!(file, "{ticker},2024-06-{day:02},{price}").unwrap();
            price *= (0.01 * (day as f64 * (0.7 + 0.2 * k) + k).sin()).exp();
        }
    }
    file.flush().unwrap();
    file
}

fn ewvar() -> Command {
    let mut cmd = Command::cargo_bin("ewvar").unwrap();
    cmd.env_remove("EWVAR_PRICES").env_remove("EWVAR_CONFIG");
    cmd
}

#[test]
fn test_var_minimal_prints_number() {
    let file = price_file();
    let output = ewvar()
        .args(["var", "--tickers", "SPY,TLT", "--as-of", "2024-06-28"])
        .args(["--samples", "20", "--confidence", "0.95", "--format", "minimal"])
        .arg("--prices")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let var: f64 = String::from_utf8(output.stdout).unwrap().trim().parse().unwrap();
    assert!(var > 0.0 && var < 0.1);
}

#[test]
fn test_var_json_report() {
    let file = price_file();
    ewvar()
        .args(["var", "--tickers", "SPY,TLT", "--as-of", "2024-06-28"])
        .args(["--samples", "20", "--weights", "0.6,0.4", "--format", "json"])
        .arg("--prices")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"component_var\""))
        .stdout(predicate::str::contains("\"window_end\": \"2024-06-28\""));
}

#[test]
fn test_unknown_ticker_fails_naming_it() {
    let file = price_file();
    ewvar()
        .args(["var", "--tickers", "SPY,QQQ", "--as-of", "2024-06-28", "--samples", "20"])
        .arg("--prices")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("QQQ"));
}

#[test]
fn test_weight_count_mismatch_fails() {
    let file = price_file();
    ewvar()
        .args(["var", "--tickers", "SPY,TLT", "--as-of", "2024-06-28"])
        .args(["--samples", "20", "--weights", "1.0"])
        .arg("--prices")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn test_inspect_lists_tickers() {
    let file = price_file();
    ewvar()
        .args(["inspect", "--format", "minimal"])
        .arg("--prices")
        .arg(file.path())
        .assert()
        .success()
        .stdout("SPY,TLT\n");
}
