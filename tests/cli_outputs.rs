use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn schedule_has_one_header_and_crosses_at_equilibrium() {
    let out = out_dir("cli_schedule");
    let status = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--demand-intercept", "12", "--demand-slope", "-2"])
        .args(["--price-step", "1", "--no-draw"])
        .arg("--out-dir")
        .arg(&out)
        .status()
        .expect("run supdem");
    assert!(status.success());

    let s = fs::read_to_string(out.join("schedule.csv")).unwrap();
    let header_count = s.lines().filter(|l| l.starts_with("price,")).count();
    assert_eq!(header_count, 1, "CSV must have exactly one header row");
    assert_eq!(
        s.lines().next().unwrap(),
        "price,quantity_demanded,quantity_supplied,excess_demand"
    );
    // prices 0..=12 in unit steps
    assert_eq!(s.lines().count(), 14);

    let at_four = s.lines().find(|l| l.starts_with("4.0,")).expect("row for p = 4");
    let fields: Vec<f64> = at_four.split(',').map(|f| f.parse().unwrap()).collect();
    assert_eq!(fields, vec![4.0, 4.0, 4.0, 0.0]);

    assert!(!out.join("equilibrium.png").exists());
}

#[test]
fn summary_reports_shifted_welfare() {
    let out = out_dir("cli_summary");
    let status = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--vertical-shift", "2", "--horizontal-shift", "3", "--no-draw"])
        .arg("--out-dir")
        .arg(&out)
        .status()
        .expect("run supdem");
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("equilibrium.json")).unwrap()).unwrap();
    assert_eq!(json["shifted_demand"]["role"], "demand");
    assert_eq!(json["shifted_demand"]["curve"]["intercept"], 20.0);
    assert_eq!(json["before"]["consumer_surplus"], 16.0);
    // P = 20 - 2Q meets P = Q at (20/3, 20/3)
    let q = json["after"]["equilibrium"]["quantity"].as_f64().unwrap();
    assert!((q - 20.0 / 3.0).abs() < 1e-12);
}

#[test]
fn flat_supply_leaves_blank_quantities() {
    let out = out_dir("cli_flat");
    let status = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--supply-intercept", "4", "--supply-slope", "0", "--price-step", "2", "--no-draw"])
        .arg("--out-dir")
        .arg(&out)
        .status()
        .expect("run supdem");
    assert!(status.success());

    let s = fs::read_to_string(out.join("schedule.csv")).unwrap();
    let row = s.lines().find(|l| l.starts_with("2.0,")).unwrap();
    assert_eq!(row, "2.0,5.0,,");
}

#[test]
fn parallel_market_exits_with_error() {
    let out = out_dir("cli_parallel");
    let output = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--supply-slope", "-2", "--no-draw"])
        .arg("--out-dir")
        .arg(&out)
        .output()
        .expect("run supdem");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("parallel curves"));
}

#[test]
fn rejects_non_positive_price_step() {
    let status = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--price-step", "0", "--no-draw", "--out-dir"])
        .arg(out_dir("cli_bad_step"))
        .status()
        .expect("run supdem");
    assert!(!status.success());
}

#[test]
fn rejects_price_step_that_would_flood_the_schedule() {
    let out = out_dir("cli_tiny_step");
    let output = Command::new(env!("CARGO_BIN_EXE_supdem"))
        .args(["--price-step", "1e-9", "--no-draw"])
        .arg("--out-dir")
        .arg(&out)
        .output()
        .expect("run supdem");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schedule rows"));
    assert!(!out.join("schedule.csv").exists());
}
