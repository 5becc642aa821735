//! Supply/demand diagrams
//!
//! The `draw_*` and `fill_*` functions draw onto a caller-owned chart and keep
//! no state. The `render_*` functions build a whole PNG around them.

use crate::curves::{Curve, MarketCurve, Point, Role};
use anyhow::Result;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Price-quantity chart with quantity on x and price on y
pub type Surface<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Extent used for a flat curve, which never reaches the quantity axis
pub const FLAT_CURVE_EXTENT: f64 = 1e6;

const ORANGE: RGBColor = RGBColor(255, 127, 14);
const SIZE: (u32, u32) = (1000, 700);

/// Fill colour of the surplus region for each side of the market
pub fn shading(role: Role) -> RGBColor {
    match role {
        Role::Demand => BLUE,
        Role::Supply => ORANGE,
    }
}

/// End point of the segment drawn for `curve`, starting from `(0, intercept)`.
pub fn draw_extent(curve: &Curve, extent: Option<f64>) -> Point {
    match extent {
        Some(q) => Point::new(curve.price(q), q),
        None => {
            let q = curve.quantity_intercept();
            if q.is_nan() {
                log::warn!(
                    "flat curve at p={}, drawing to q={}",
                    curve.intercept,
                    FLAT_CURVE_EXTENT
                );
                Point::new(curve.price(FLAT_CURVE_EXTENT), FLAT_CURVE_EXTENT)
            } else {
                Point::new(0.0, q)
            }
        }
    }
}

/// Draws a straight segment between two points
pub fn plot_line<DB>(
    chart: &mut Surface<'_, DB>,
    p1: Point,
    p2: Point,
    style: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    chart.draw_series(LineSeries::new(
        [(p1.quantity, p1.price), (p2.quantity, p2.price)],
        style,
    ))?;
    Ok(())
}

/// Draws `curve` from the price axis to `extent`, or to the quantity axis when none is given.
pub fn draw_curve<DB>(
    chart: &mut Surface<'_, DB>,
    curve: &Curve,
    extent: Option<f64>,
    style: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let start = Point::new(curve.intercept, 0.0);
    plot_line(chart, start, draw_extent(curve, extent), style)
}

/// Marks `point`, optionally with dashed guides to both axes and a text label.
pub fn draw_marker<DB>(
    chart: &mut Surface<'_, DB>,
    point: Point,
    with_guides: bool,
    with_label: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (p, q) = point.as_tuple();
    chart.draw_series(std::iter::once(Circle::new((q, p), 5, BLUE.filled())))?;

    if with_guides {
        let guide = BLUE.stroke_width(1);
        chart.draw_series(DashedLineSeries::new(vec![(0.0, p), (q, p)], 6, 4, guide))?;
        chart.draw_series(DashedLineSeries::new(vec![(q, 0.0), (q, p)], 6, 4, guide))?;
    }

    if with_label {
        let style = TextStyle::from(("sans-serif", 16).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(std::iter::once(Text::new(format!(" {point}"), (q, p), style)))?;
    }
    Ok(())
}

/// Draws both curves out to the larger quantity intercept and marks their intersection.
///
/// Parallel curves fail before anything is drawn.
pub fn draw_equilibrium<DB>(
    chart: &mut Surface<'_, DB>,
    a: &Curve,
    b: &Curve,
    style: ShapeStyle,
) -> Result<Point>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let e = a.equilibrium(b)?;
    let max_q = a.quantity_intercept().max(b.quantity_intercept());
    let extent = max_q.is_finite().then_some(max_q);
    for c in [a, b] {
        draw_curve(chart, c, extent, style)?;
    }
    draw_marker(chart, e, true, false)?;
    Ok(e)
}

/// Shades the surplus triangle between `curve` and the price line up to `Q(price)`.
pub fn fill_surplus<DB>(
    chart: &mut Surface<'_, DB>,
    curve: &MarketCurve,
    price: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let q = curve.quantity(price)?;
    let region = vec![(0.0, curve.intercept()), (q, price), (0.0, price)];
    let fill = shading(curve.role).mix(0.1).filled();
    chart.draw_series(std::iter::once(Polygon::new(region, fill)))?;
    Ok(())
}

/// Labels the axes and drops the grid, leaving plain price/quantity axes.
pub fn configure_axes<DB>(chart: &mut Surface<'_, DB>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    chart.configure_mesh().disable_mesh().x_desc("Quantity").y_desc("Price").draw()?;
    Ok(())
}

/// Plot bounds `(q_max, p_max)` enclosing the curves' axis crossings and the given points.
pub fn frame(curves: &[Curve], points: &[Point]) -> (f64, f64) {
    let positive = |x: f64| if x.is_finite() && x > 0.0 { x } else { 0.0 };
    let mut q_max = 0.0_f64;
    let mut p_max = 0.0_f64;
    for c in curves {
        q_max = q_max.max(positive(c.quantity_intercept()));
        p_max = p_max.max(positive(c.intercept));
    }
    for pt in points {
        q_max = q_max.max(positive(pt.quantity));
        p_max = p_max.max(positive(pt.price));
    }
    let pad = |x: f64| if x > 0.0 { x * 1.1 } else { 10.0 };
    (pad(q_max), pad(p_max))
}

fn draw_market<DB>(
    chart: &mut Surface<'_, DB>,
    demand: &MarketCurve,
    supply: &MarketCurve,
) -> Result<Point>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let e = draw_equilibrium(chart, &demand.curve, &supply.curve, BLACK.stroke_width(2))?;
    // a flat side has no surplus triangle
    for c in [demand, supply].into_iter().filter(|c| c.slope() != 0.0) {
        fill_surplus(chart, c, e.price)?;
    }
    Ok(e)
}

/// Writes a labelled equilibrium diagram with both surplus regions to `out_path`.
pub fn render_equilibrium_png<P: AsRef<Path>>(
    demand: &MarketCurve,
    supply: &MarketCurve,
    out_path: P,
) -> Result<Point> {
    let e = demand.equilibrium(supply)?;
    let (q_max, p_max) = frame(&[demand.curve, supply.curve], &[e]);

    let root = BitMapBackend::new(out_path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Market Equilibrium", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..q_max, 0.0..p_max)?;
    configure_axes(&mut chart)?;
    draw_market(&mut chart, demand, supply)?;
    draw_marker(&mut chart, e.round(2), false, true)?;
    root.present()?;
    log::debug!("wrote equilibrium diagram {} ({e})", out_path.as_ref().display());
    Ok(e)
}

/// Writes the market before and after `shifted` replaces `demand`, with surplus
/// shaded at the new equilibrium.
pub fn render_shift_png<P: AsRef<Path>>(
    demand: &MarketCurve,
    shifted: &MarketCurve,
    supply: &MarketCurve,
    out_path: P,
) -> Result<(Point, Point)> {
    let before = demand.equilibrium(supply)?;
    let after = shifted.equilibrium(supply)?;
    let (q_max, p_max) = frame(&[demand.curve, shifted.curve, supply.curve], &[before, after]);

    let root = BitMapBackend::new(out_path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Demand Shift", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..q_max, 0.0..p_max)?;
    configure_axes(&mut chart)?;
    let faded = BLACK.mix(0.4).stroke_width(2);
    draw_equilibrium(&mut chart, &demand.curve, &supply.curve, faded)?;
    draw_market(&mut chart, shifted, supply)?;
    draw_marker(&mut chart, after.round(2), false, true)?;
    root.present()?;
    log::debug!("wrote shift diagram {} ({before} -> {after})", out_path.as_ref().display());
    Ok((before, after))
}
