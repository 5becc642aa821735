use supdem::curves::{Curve, MarketCurve, Point, Role};
use supdem::error::CurveError;

#[test]
fn textbook_equilibrium() {
    let demand = MarketCurve::demand(12.0, -2.0);
    let supply = MarketCurve::supply(0.0, 1.0);
    let x = demand.equilibrium(&supply).unwrap().round(4);
    assert_eq!(x.price, 4.0);
    assert_eq!(x.quantity, 4.0);
    assert_eq!(demand.price(x.quantity), 4.0);
    assert_eq!(supply.price(x.quantity), 4.0);
}

#[test]
fn demand_quantity_intercept() {
    assert_eq!(MarketCurve::demand(12.0, -2.0).quantity_intercept(), 6.0);
}

#[test]
fn vertical_then_horizontal_shift_composes_exactly() {
    let shifted = MarketCurve::demand(12.0, -2.0).vertical_shift(2.0).horizontal_shift(3.0);
    assert_eq!(shifted, MarketCurve::demand(20.0, -2.0));
}

#[test]
fn shifts_leave_the_original_untouched() {
    let d = MarketCurve::demand(12.0, -2.0);
    let _ = d.horizontal_shift(2.0);
    assert_eq!(d, MarketCurve::demand(12.0, -2.0));
}

#[test]
fn horizontal_shift_moves_right_for_both_slope_signs() {
    let d = Curve::new(12.0, -2.0).horizontal_shift(2.0);
    let s = Curve::new(-3.0, 1.5).horizontal_shift(2.0);
    assert_eq!(d.quantity_intercept(), 8.0);
    assert_eq!(s.quantity_intercept(), 4.0);
}

#[test]
fn consumer_surplus_at_equilibrium_price() {
    let demand = MarketCurve::demand(12.0, -2.0);
    assert_eq!(demand.role, Role::Demand);
    assert_eq!(demand.surplus(4.0), Ok(16.0));
}

#[test]
fn producer_surplus_dispatches_on_role() {
    let supply = MarketCurve::supply(2.0, 1.0);
    // same line as demand would report the mirrored area with opposite sign
    assert_eq!(supply.surplus(6.0), Ok(8.0));
    let as_demand = MarketCurve { role: Role::Demand, ..supply };
    assert_eq!(as_demand.surplus(6.0), Ok(-8.0));
}

#[test]
fn parallel_curves_fail() {
    let a = MarketCurve::demand(12.0, -2.0);
    let b = MarketCurve::demand(8.0, -2.0);
    assert_eq!(a.equilibrium(&b), Err(CurveError::ParallelCurves { slope: -2.0 }));
    // coincident lines are no better
    assert!(a.equilibrium(&a).is_err());
}

#[test]
fn negative_equilibrium_is_not_clipped() {
    // supply starts above the demand choke price
    let demand = Curve::new(5.0, -1.0);
    let supply = Curve::new(8.0, 0.5);
    let e = demand.equilibrium(&supply).unwrap();
    assert_eq!(e, Point::new(7.0, -2.0));
}

#[test]
fn flat_supply_still_meets_demand() {
    let e = Curve::new(12.0, -2.0).equilibrium(&Curve::new(6.0, 0.0)).unwrap();
    assert_eq!(e, Point::new(6.0, 3.0));
}

#[test]
fn zero_slope_inversion_is_degenerate() {
    assert_eq!(Curve::new(6.0, 0.0).quantity(1.0), Err(CurveError::DegenerateCurve));
    assert_eq!(Curve::from_quantity_form(3.0, 0.0), Err(CurveError::DegenerateCurve));
}

#[test]
fn quantity_form_construction() {
    // Q = 6 - 0.5 P  <=>  P = 12 - 2 Q
    assert_eq!(Curve::from_quantity_form(6.0, -0.5), Ok(Curve::new(12.0, -2.0)));
}

#[test]
fn errors_describe_the_failure() {
    let msg = CurveError::ParallelCurves { slope: 1.5 }.to_string();
    assert!(msg.contains("1.5"), "{msg}");
    assert!(CurveError::DegenerateCurve.to_string().contains("zero slope"));
}
