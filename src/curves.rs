//! Linear price-quantity curves: evaluation, shifts and equilibrium

use crate::error::{CurveError, CurveResult};
use crate::surplus::SurplusFn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in price-quantity space: `P(Q) = intercept + slope * Q`.
///
/// Shifts take the curve by value and hand back the moved copy, so a curve
/// passed to several renders is never changed behind the caller's back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Price at zero quantity
    pub intercept: f64,
    /// Price change per unit of quantity (negative for demand, positive for supply)
    pub slope: f64,
}

impl Curve {
    /// Creates a curve from its price-axis intercept and slope
    pub fn new(intercept: f64, slope: f64) -> Self { Self { intercept, slope } }

    /// Builds a curve from the quantity form `Q(P) = intercept_q + slope_q * P`.
    pub fn from_quantity_form(intercept_q: f64, slope_q: f64) -> CurveResult<Self> {
        if slope_q == 0.0 {
            return Err(CurveError::DegenerateCurve);
        }
        Ok(Self::new(-intercept_q / slope_q, 1.0 / slope_q))
    }

    /// Quantity at which the curve crosses the quantity axis; NaN for a flat curve.
    pub fn quantity_intercept(&self) -> f64 {
        if self.slope == 0.0 { f64::NAN } else { -self.intercept / self.slope }
    }

    /// Price at a given quantity
    pub fn price(&self, quantity: f64) -> f64 { self.intercept + self.slope * quantity }

    /// Quantity demanded or supplied at a given price
    pub fn quantity(&self, price: f64) -> CurveResult<f64> {
        if self.slope == 0.0 {
            return Err(CurveError::DegenerateCurve);
        }
        Ok((price - self.intercept) / self.slope)
    }

    /// Moves the curve along the price axis by `delta`.
    #[must_use]
    pub fn vertical_shift(self, delta: f64) -> Self {
        Self { intercept: self.intercept + delta, ..self }
    }

    /// Moves the curve along the quantity axis; positive `delta` moves the
    /// quantity intercept right by exactly `delta` whatever the slope sign.
    #[must_use]
    pub fn horizontal_shift(self, delta: f64) -> Self { self.vertical_shift(delta * -self.slope) }

    /// Intersection of two curves.
    ///
    /// Solves `[[1, -a.slope], [1, -b.slope]] · [p, q]ᵀ = [a.intercept, b.intercept]ᵀ`.
    /// Negative prices or quantities are returned as computed.
    pub fn equilibrium(&self, other: &Curve) -> CurveResult<Point> {
        let det = self.slope - other.slope;
        if det == 0.0 {
            return Err(CurveError::ParallelCurves { slope: self.slope });
        }
        let quantity = (other.intercept - self.intercept) / det;
        Ok(Point { price: self.price(quantity), quantity })
    }
}

/// A price/quantity pair: an equilibrium or any sample on a curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Price coordinate (vertical axis)
    pub price: f64,
    /// Quantity coordinate (horizontal axis)
    pub quantity: f64,
}

impl Point {
    /// Creates a point from price and quantity
    pub fn new(price: f64, quantity: f64) -> Self { Self { price, quantity } }

    /// Rounds both coordinates to `precision` decimal digits, e.g. to turn 3.9999999 into 4.
    ///
    /// Negative `precision` rounds to tens, hundreds, ... A coordinate already
    /// finer than `precision` can express in an `f64` is returned unchanged.
    #[must_use]
    pub fn round(self, precision: i32) -> Self {
        let scale = 10f64.powi(precision);
        let r = |x: f64| {
            if scale == 0.0 {
                return 0.0_f64.copysign(x);
            }
            let scaled = x * scale;
            if !scale.is_finite() || !scaled.is_finite() {
                return x;
            }
            scaled.round() / scale
        };
        Self { price: r(self.price), quantity: r(self.quantity) }
    }

    /// Coordinates as `(price, quantity)`
    pub fn as_tuple(&self) -> (f64, f64) { (self.price, self.quantity) }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p = {:.1}, q = {:.1}", self.price, self.quantity)
    }
}

/// Economic side of a market a curve stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Buyers; area above the price line is consumer surplus
    Demand,
    /// Sellers; area below the price line is producer surplus
    Supply,
}

impl Role {
    /// Surplus rule for this side of the market
    pub fn surplus_fn(self) -> SurplusFn {
        match self {
            Role::Demand => crate::surplus::consumer_surplus,
            Role::Supply => crate::surplus::producer_surplus,
        }
    }
}

/// A curve tagged with its market role
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketCurve {
    /// Demand or supply
    pub role: Role,
    /// Underlying line
    pub curve: Curve,
}

impl MarketCurve {
    /// Demand curve `P(Q) = intercept + slope * Q`
    pub fn demand(intercept: f64, slope: f64) -> Self {
        Self { role: Role::Demand, curve: Curve::new(intercept, slope) }
    }

    /// Supply curve `P(Q) = intercept + slope * Q`
    pub fn supply(intercept: f64, slope: f64) -> Self {
        Self { role: Role::Supply, curve: Curve::new(intercept, slope) }
    }

    /// Price-axis intercept
    pub fn intercept(&self) -> f64 { self.curve.intercept }
    /// Slope of the underlying line
    pub fn slope(&self) -> f64 { self.curve.slope }
    /// See [`Curve::quantity_intercept`]
    pub fn quantity_intercept(&self) -> f64 { self.curve.quantity_intercept() }
    /// See [`Curve::price`]
    pub fn price(&self, quantity: f64) -> f64 { self.curve.price(quantity) }
    /// See [`Curve::quantity`]
    pub fn quantity(&self, price: f64) -> CurveResult<f64> { self.curve.quantity(price) }

    /// See [`Curve::vertical_shift`]
    #[must_use]
    pub fn vertical_shift(self, delta: f64) -> Self {
        Self { curve: self.curve.vertical_shift(delta), ..self }
    }

    /// See [`Curve::horizontal_shift`]
    #[must_use]
    pub fn horizontal_shift(self, delta: f64) -> Self {
        Self { curve: self.curve.horizontal_shift(delta), ..self }
    }

    /// Intersection with another market curve, computed on the underlying lines
    pub fn equilibrium(&self, other: &MarketCurve) -> CurveResult<Point> {
        self.curve.equilibrium(&other.curve)
    }

    /// Consumer surplus for demand, producer surplus for supply, at `price`
    pub fn surplus(&self, price: f64) -> CurveResult<f64> {
        (self.role.surplus_fn())(&self.curve, price)
    }
}
