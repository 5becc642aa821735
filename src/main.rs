use supdem::curves::MarketCurve;
use supdem::plot::{render_equilibrium_png, render_shift_png};
use supdem::surplus::{welfare, Welfare};
use supdem::verifier::verify_market;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "supdem",
    version,
    about = "Linear supply/demand equilibrium, surplus and diagrams"
)]
struct Args {
    #[arg(long, default_value_t = 12.0, allow_hyphen_values = true)]
    demand_intercept: f64,
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    demand_slope: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    supply_intercept: f64,
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    supply_slope: f64,

    /// Applied to demand first, before the horizontal shift.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    vertical_shift: f64,
    /// Positive values move demand right.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    horizontal_shift: f64,

    /// Price increment between rows of schedule.csv.
    #[arg(long, default_value_t = 0.5)]
    price_step: f64,
    /// Integration slices for the numeric surplus check (--verbose).
    #[arg(long, default_value_t = 1000)]
    slices: usize,

    #[arg(long, default_value = "out")]
    out_dir: String,
    #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
    draw: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

const MAX_SCHEDULE_ROWS: f64 = 1_000_000.0;

#[derive(Serialize)]
struct Row {
    price: f64,
    quantity_demanded: Option<f64>,
    quantity_supplied: Option<f64>,
    excess_demand: Option<f64>,
}

#[derive(Serialize)]
struct Summary {
    demand: MarketCurve,
    shifted_demand: MarketCurve,
    supply: MarketCurve,
    before: Welfare,
    after: Welfare,
}

fn validate_inputs(args: &Args) -> Result<()> {
    let inputs = [
        ("demand_intercept", args.demand_intercept),
        ("demand_slope", args.demand_slope),
        ("supply_intercept", args.supply_intercept),
        ("supply_slope", args.supply_slope),
        ("vertical_shift", args.vertical_shift),
        ("horizontal_shift", args.horizontal_shift),
    ];
    for (name, v) in inputs {
        if !v.is_finite() {
            return Err(anyhow!("{} must be finite (got {})", name, v));
        }
    }
    if !args.price_step.is_finite() || args.price_step <= 0.0 {
        return Err(anyhow!("price_step must be finite and > 0 (got {})", args.price_step));
    }
    if args.slices < 1 {
        return Err(anyhow!("slices must be ≥ 1 (got {})", args.slices));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    log::debug!("Parsed arguments: {:?}", args);
    validate_inputs(&args)?;

    let demand = MarketCurve::demand(args.demand_intercept, args.demand_slope);
    let supply = MarketCurve::supply(args.supply_intercept, args.supply_slope);
    let shifted = demand
        .vertical_shift(args.vertical_shift)
        .horizontal_shift(args.horizontal_shift);

    let before = welfare(&demand, &supply)?;
    let after = welfare(&shifted, &supply)?;
    log::info!(
        "equilibrium {} (CS={:.3}, PS={:.3})",
        before.equilibrium,
        before.consumer_surplus,
        before.producer_surplus
    );
    if shifted != demand {
        log::info!(
            "after shift {} (CS={:.3}, PS={:.3})",
            after.equilibrium,
            after.consumer_surplus,
            after.producer_surplus
        );
    }

    if args.verbose {
        let rep = verify_market(&shifted, &supply, args.slices)?;
        println!(
            "[verify] slices={} residual={:.3e} cs={:.6}/{:.6} rel_err={:.3e} \
             ps={:.6}/{:.6} rel_err={:.3e}",
            rep.slices,
            rep.equilibrium_residual,
            rep.cs_closed,
            rep.cs_numeric,
            rep.rel_err_cs,
            rep.ps_closed,
            rep.ps_numeric,
            rep.rel_err_ps
        );
        println!(
            "  round-trip max err={:.3e}, first quadrant={}",
            rep.round_trip_max_err, rep.first_quadrant
        );
    }

    create_dir_all(&args.out_dir)?;
    let out = Path::new(&args.out_dir);
    write_schedule_csv(&out.join("schedule.csv"), &shifted, &supply, after, args.price_step)?;
    let summary = Summary { demand, shifted_demand: shifted, supply, before, after };
    serde_json::to_writer_pretty(File::create(out.join("equilibrium.json"))?, &summary)?;

    if args.draw {
        render_equilibrium_png(&demand, &supply, out.join("equilibrium.png"))?;
        render_shift_png(&demand, &shifted, &supply, out.join("shift.png"))?;
    }
    Ok(())
}

fn write_schedule_csv(
    path: &Path,
    demand: &MarketCurve,
    supply: &MarketCurve,
    at: Welfare,
    step: f64,
) -> Result<()> {
    let p_max = demand.intercept().max(supply.intercept()).max(at.equilibrium.price).max(0.0);
    let rows = (p_max / step).floor();
    if rows >= MAX_SCHEDULE_ROWS {
        return Err(anyhow!(
            "price_step {} needs {} schedule rows up to p={} (limit {})",
            step,
            rows + 1.0,
            p_max,
            MAX_SCHEDULE_ROWS
        ));
    }
    let rows = rows as usize;

    let mut wtr = csv::Writer::from_path(path)?;
    for i in 0..=rows {
        let price = i as f64 * step;
        let qd = demand.quantity(price).ok();
        let qs = supply.quantity(price).ok();
        wtr.serialize(Row {
            price,
            quantity_demanded: qd,
            quantity_supplied: qs,
            excess_demand: qd.zip(qs).map(|(d, s)| d - s),
        })?;
    }
    wtr.flush()?;
    log::debug!("wrote {} schedule rows to {}", rows + 1, path.display());
    Ok(())
}
