//! Consumer and producer surplus on linear curves

use crate::curves::{Curve, MarketCurve, Point};
use crate::error::CurveResult;
use serde::{Deserialize, Serialize};

/// Surplus rule keyed by [`Role`](crate::curves::Role)
pub type SurplusFn = fn(&Curve, f64) -> CurveResult<f64>;

/// Triangle between the curve and the price line, above the line.
///
/// `CS = ½ · Q(p) · (intercept - p)`. Not clipped: a price above the choke
/// price gives the area of the mirrored triangle.
pub fn consumer_surplus(curve: &Curve, price: f64) -> CurveResult<f64> {
    Ok(0.5 * curve.quantity(price)? * (curve.intercept - price))
}

/// Triangle between the price line and the curve, below the line.
///
/// `PS = ½ · Q(p) · (p - intercept)`.
pub fn producer_surplus(curve: &Curve, price: f64) -> CurveResult<f64> {
    Ok(0.5 * curve.quantity(price)? * (price - curve.intercept))
}

/// Market outcome at the intersection of a demand and a supply curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Welfare {
    /// Equilibrium price and quantity
    pub equilibrium: Point,
    /// Area under demand, above the equilibrium price
    pub consumer_surplus: f64,
    /// Area above supply, below the equilibrium price
    pub producer_surplus: f64,
}

impl Welfare {
    /// Sum of consumer and producer surplus
    pub fn total(&self) -> f64 { self.consumer_surplus + self.producer_surplus }
}

/// Solves the market and evaluates both surpluses at the equilibrium.
///
/// The triangles are measured with the equilibrium quantity, so a flat curve
/// (perfectly elastic side) contributes zero instead of failing to invert.
pub fn welfare(demand: &MarketCurve, supply: &MarketCurve) -> CurveResult<Welfare> {
    let e = demand.equilibrium(supply)?;
    Ok(Welfare {
        equilibrium: e,
        consumer_surplus: 0.5 * e.quantity * (demand.intercept() - e.price),
        producer_surplus: 0.5 * e.quantity * (e.price - supply.intercept()),
    })
}
