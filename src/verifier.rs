//! Analytic vs numeric checks for a demand/supply pair

use crate::curves::{Curve, MarketCurve, Point};
use crate::surplus::welfare;
use anyhow::{anyhow, Result};

/// Verification report for one market
#[derive(Debug)]
pub struct Report {
    /// Number of integration slices used for the numeric surplus
    pub slices: usize,
    /// Intersection of the two curves
    pub equilibrium: Point,
    /// |P_d(q*) - P_s(q*)|
    pub equilibrium_residual: f64,
    /// Closed-form consumer surplus
    pub cs_closed: f64,
    /// Midpoint-rule consumer surplus
    pub cs_numeric: f64,
    /// Relative error between the two consumer surplus values
    pub rel_err_cs: f64,
    /// Closed-form producer surplus
    pub ps_closed: f64,
    /// Midpoint-rule producer surplus
    pub ps_numeric: f64,
    /// Relative error between the two producer surplus values
    pub rel_err_ps: f64,
    /// Largest |Q(P(q)) - q| over the sampled quantities, flat curves skipped
    pub round_trip_max_err: f64,
    /// Whether price and quantity are both non-negative at equilibrium
    pub first_quadrant: bool,
}

/// Integrate `sign · (P(q) - price)` over `[0, q_end]` with compensated summation.
fn area_between(c: &Curve, price: f64, q_end: f64, sign: f64, slices: usize) -> f64 {
    let dq = q_end / slices as f64;
    let mut sum = 0.0_f64;
    let mut comp = 0.0_f64;
    for i in 0..slices {
        let q = (i as f64 + 0.5) * dq;
        let a = sign * (c.price(q) - price) * dq;
        let t = sum + a;
        if sum.abs() >= a.abs() { comp += (sum - t) + a; } else { comp += (a - t) + sum; }
        sum = t;
    }
    sum + comp
}

fn rel_err(numeric: f64, closed: f64) -> f64 {
    if closed.abs() > 0.0 { (numeric - closed).abs() / closed.abs() } else { 0.0 }
}

/// Check the equilibrium, both surpluses and price/quantity inversion of a market.
pub fn verify_market(demand: &MarketCurve, supply: &MarketCurve, slices: usize) -> Result<Report> {
    if slices == 0 {
        return Err(anyhow!("slices must be ≥ 1"));
    }
    let w = welfare(demand, supply)?;
    let e = w.equilibrium;

    let mut round_trip_max_err = 0.0_f64;
    for c in [&demand.curve, &supply.curve] {
        if c.slope == 0.0 { continue; }
        for i in 0..=slices {
            let q = e.quantity * i as f64 / slices as f64;
            let back = c.quantity(c.price(q))?;
            round_trip_max_err = round_trip_max_err.max((back - q).abs());
        }
    }

    let cs_numeric = area_between(&demand.curve, e.price, e.quantity, 1.0, slices);
    let ps_numeric = area_between(&supply.curve, e.price, e.quantity, -1.0, slices);

    Ok(Report {
        slices,
        equilibrium: e,
        equilibrium_residual: (demand.price(e.quantity) - supply.price(e.quantity)).abs(),
        cs_closed: w.consumer_surplus,
        cs_numeric,
        rel_err_cs: rel_err(cs_numeric, w.consumer_surplus),
        ps_closed: w.producer_surplus,
        ps_numeric,
        rel_err_ps: rel_err(ps_numeric, w.producer_surplus),
        round_trip_max_err,
        first_quadrant: e.price >= 0.0 && e.quantity >= 0.0,
    })
}
