//! Scattered-data interpolation of implied volatility onto a regular
//! (moneyness, time-to-maturity) grid.
//!
//! The scatter is irregular (one point per quoted contract), so the grid is
//! filled by Delaunay triangulation plus barycentric linear interpolation
//! inside each triangle. There is no extrapolation: grid nodes outside the
//! convex hull of the scatter stay undefined.

use std::collections::HashMap;

use delaunator::{triangulate, Point};
use tracing::{debug, warn};

use super::VolatilitySurface;
use crate::chain::types::{OptionSide, Snapshot};
use crate::error::{EngineError, Result};

/// Tolerance for treating a grid node on a triangle edge as inside it.
const EDGE_EPS: f64 = 1e-9;

/// One usable scatter point: (moneyness, ttm) coordinates plus volatility.
#[derive(Debug, Clone, Copy)]
struct ScatterPoint {
    x: f64,
    y: f64,
    vol: f64,
}

/// Collect the usable scatter for one side: defined implied volatilities
/// only, duplicate coordinates averaged.
fn prepare_scatter(snapshot: &Snapshot, side: OptionSide) -> Vec<ScatterPoint> {
    // Group by coordinates at limited precision so duplicated contracts
    // (same strike and expiry quoted twice) collapse to one point.
    let mut grouped: HashMap<String, (f64, f64, Vec<f64>)> = HashMap::new();

    for quote in snapshot.quotes_for_side(side) {
        let Some(vol) = quote.implied_vol.value() else {
            continue;
        };
        let key = format!("{:.8}:{:.8}", quote.moneyness, quote.time_to_maturity);
        grouped
            .entry(key)
            .or_insert((quote.moneyness, quote.time_to_maturity, Vec::new()))
            .2
            .push(vol);
    }

    let mut scatter: Vec<ScatterPoint> = grouped
        .into_values()
        .map(|(x, y, vols)| ScatterPoint {
            x,
            y,
            vol: vols.iter().sum::<f64>() / vols.len() as f64,
        })
        .collect();

    // Sort for a deterministic triangulation independent of map iteration order.
    scatter.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap());
    scatter
}

/// Sorted unique coordinate values, collapsing near-identical floats.
fn axis_values(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
    values
}

/// Barycentric weights of `(px, py)` in the triangle `(a, b, c)`, or `None`
/// if the point lies outside it or the triangle is degenerate.
fn barycentric(
    a: &ScatterPoint,
    b: &ScatterPoint,
    c: &ScatterPoint,
    px: f64,
    py: f64,
) -> Option<(f64, f64, f64)> {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let w1 = ((b.y - c.y) * (px - c.x) + (c.x - b.x) * (py - c.y)) / denom;
    let w2 = ((c.y - a.y) * (px - c.x) + (a.x - c.x) * (py - c.y)) / denom;
    let w3 = 1.0 - w1 - w2;
    if w1 >= -EDGE_EPS && w2 >= -EDGE_EPS && w3 >= -EDGE_EPS {
        Some((w1, w2, w3))
    } else {
        None
    }
}

/// Linearly interpolate a grid node from the triangulation, or `None` when
/// the node falls outside the convex hull.
fn interpolate_node(
    scatter: &[ScatterPoint],
    triangles: &[usize],
    px: f64,
    py: f64,
) -> Option<f64> {
    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (&scatter[tri[0]], &scatter[tri[1]], &scatter[tri[2]]);
        if let Some((w1, w2, w3)) = barycentric(a, b, c, px, py) {
            return Some(w1 * a.vol + w2 * b.vol + w3 * c.vol);
        }
    }
    None
}

/// Build the interpolated surface for one side of a snapshot's chain.
///
/// Grid axes are the sorted unique moneyness and time-to-maturity values
/// observed in the usable scatter. Quotes with undefined implied volatility
/// never enter the scatter. Fewer than 3 points, or a fully collinear
/// scatter, yields [`EngineError::InsufficientSurfaceData`].
pub fn build_surface(snapshot: &Snapshot, side: OptionSide) -> Result<VolatilitySurface> {
    let scatter = prepare_scatter(snapshot, side);

    if scatter.len() < 3 {
        warn!(side = %side, usable = scatter.len(), "too few points for a surface");
        return Err(EngineError::InsufficientSurfaceData {
            usable: scatter.len(),
        });
    }

    let points: Vec<Point> = scatter.iter().map(|p| Point { x: p.x, y: p.y }).collect();
    let triangulation = triangulate(&points);

    // Collinear scatters triangulate to nothing; that is the same "surface
    // unavailable" condition as having too few points.
    if triangulation.triangles.is_empty() {
        warn!(side = %side, usable = scatter.len(), "scatter is collinear, no triangulation");
        return Err(EngineError::InsufficientSurfaceData {
            usable: scatter.len(),
        });
    }

    let moneyness_axis = axis_values(scatter.iter().map(|p| p.x).collect());
    let ttm_axis = axis_values(scatter.iter().map(|p| p.y).collect());

    let values: Vec<Vec<Option<f64>>> = ttm_axis
        .iter()
        .map(|&t| {
            moneyness_axis
                .iter()
                .map(|&m| interpolate_node(&scatter, &triangulation.triangles, m, t))
                .collect()
        })
        .collect();

    let surface = VolatilitySurface {
        side,
        moneyness_axis,
        ttm_axis,
        values,
    };
    debug!(
        side = %side,
        points = scatter.len(),
        defined = surface.defined_count(),
        rows = surface.ttm_axis.len(),
        cols = surface.moneyness_axis.len(),
        "surface built"
    );

    Ok(surface)
}
