//! Sampling a function over a display domain
//!
//! The sampled curve is plain data for a renderer: the finite points form the
//! plotted line, the undefined positions become discontinuity markers, and
//! [`SampledCurve::y_range`] gives an axis range padded by a fifth of the span
//! on each side.

use crate::evaluator::RealFunction;
use crate::model::Evaluation;
use crate::sampling::linspace;
use crate::search::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};

/// Default distance from the point to each edge of the display domain
pub const DEFAULT_HALF_WIDTH: f64 = 3.0;
/// Default number of curve samples
pub const DEFAULT_CURVE_POINTS: usize = 1200;

const Y_PADDING_RATIO: f64 = 0.2;

/// How the display curve is laid out around the point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Distance from the point to each edge of the domain
    pub half_width: f64,
    /// Number of samples
    pub points: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            points: DEFAULT_CURVE_POINTS,
        }
    }
}

impl CurveSettings {
    /// The display domain centred on `point`
    pub fn domain(&self, point: f64) -> QueryResult<DisplayDomain> {
        DisplayDomain::around(point, self.half_width)
    }
}

/// A closed x interval to plot over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayDomain {
    start: f64,
    end: f64,
}

impl DisplayDomain {
    /// Validate and build `[start, end]`
    pub fn new(start: f64, end: f64) -> QueryResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(QueryError::invalid_domain(format!(
                "display domain must be finite, got [{start}, {end}]"
            )));
        }
        if start >= end {
            return Err(QueryError::invalid_domain(format!(
                "display domain must have start < end, got [{start}, {end}]"
            )));
        }
        Ok(Self { start, end })
    }

    /// `[point - half_width, point + half_width]`
    pub fn around(point: f64, half_width: f64) -> QueryResult<Self> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(QueryError::invalid_domain(format!(
                "half width must be positive, got {half_width}"
            )));
        }
        Self::new(point - half_width, point + half_width)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

/// One sample of the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: Evaluation,
}

/// Samples ordered left to right
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledCurve {
    pub domain: DisplayDomain,
    pub points: Vec<CurvePoint>,
}

impl SampledCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points that evaluated finite, as `(x, y)` pairs
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.y.value().map(|y| (point.x, y)))
    }

    /// Positions where the function is undefined
    pub fn undefined_xs(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter(|point| point.y.is_undefined())
            .map(|point| point.x)
            .collect()
    }

    /// Mean of the finite values, the height at which undefined markers are drawn
    pub fn marker_level(&self) -> Option<f64> {
        let (sum, count) = self
            .finite_points()
            .fold((0.0, 0usize), |(sum, count), (_, y)| (sum + y, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Axis range over the finite values, widened by 20% of the span on each side.
    ///
    /// A flat curve has no span to pad, so it is widened by 1 instead. The
    /// range is clamped to finite values.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let (min, max) = self.finite_points().fold(None, |range, (_, y)| match range {
            None => Some((y, y)),
            Some((lo, hi)) => Some((f64::min(lo, y), f64::max(hi, y))),
        })?;
        let span = max - min;
        let pad = if span == 0.0 {
            1.0
        } else if span.is_finite() {
            span * Y_PADDING_RATIO
        } else {
            max * Y_PADDING_RATIO - min * Y_PADDING_RATIO
        };
        Some(((min - pad).max(f64::MIN), (max + pad).min(f64::MAX)))
    }
}

/// Sample `function` at `count` evenly spaced points of `domain`
pub fn sample_curve<F>(function: &F, domain: DisplayDomain, count: usize) -> SampledCurve
where
    F: RealFunction + ?Sized,
{
    let points: Vec<CurvePoint> = linspace(domain.start, domain.end, count)
        .map(|x| CurvePoint {
            x,
            y: function.evaluate(x),
        })
        .collect();
    log::debug!(
        "sampled {} points over [{}, {}]",
        points.len(),
        domain.start,
        domain.end
    );
    SampledCurve { domain, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::CompiledExpression;
    use pretty_assertions::assert_eq;

    fn curve(source: &str, start: f64, end: f64, count: usize) -> SampledCurve {
        let f = CompiledExpression::compile(source).unwrap();
        sample_curve(&f, DisplayDomain::new(start, end).unwrap(), count)
    }

    #[test]
    fn test_reciprocal_reports_the_pole() {
        let curve = curve("1/x", -3.0, 3.0, 7);
        assert_eq!(curve.len(), 7);
        assert_eq!(curve.undefined_xs(), vec![0.0]);
        assert_eq!(curve.finite_points().count(), 6);
        assert!(curve.marker_level().unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_y_range_is_padded() {
        let curve = curve("x", 0.0, 10.0, 11);
        assert_eq!(curve.y_range(), Some((-2.0, 12.0)));
    }

    #[test]
    fn test_flat_and_empty_ranges() {
        assert_eq!(curve("5", -1.0, 1.0, 3).y_range(), Some((4.0, 6.0)));
        let nowhere = curve("sqrt(x)", -2.0, -1.0, 4);
        assert_eq!(nowhere.y_range(), None);
        assert_eq!(nowhere.marker_level(), None);
        assert_eq!(nowhere.undefined_xs().len(), 4);
    }

    #[test]
    fn test_widest_domain_samples_finite_positions() {
        let curve = curve("x", -1e308, 1e308, 9);
        assert_eq!(curve.len(), 9);
        assert!(curve.points.iter().all(|p| p.x.is_finite()));
        assert!(curve.undefined_xs().is_empty());
        let (low, high) = curve.y_range().unwrap();
        assert!(low.is_finite() && high.is_finite());
        assert!(low <= -1e308 && high >= 1e308);
    }

    #[test]
    fn test_domain_validation() {
        assert!(DisplayDomain::new(1.0, 1.0).is_err());
        assert!(DisplayDomain::new(f64::NAN, 1.0).is_err());
        assert!(DisplayDomain::around(0.0, 0.0).is_err());
        let domain = DisplayDomain::around(1.0, DEFAULT_HALF_WIDTH).unwrap();
        assert_eq!((domain.start(), domain.end()), (-2.0, 4.0));
    }

    #[test]
    fn test_default_sampling_density() {
        let f = CompiledExpression::compile("x**2").unwrap();
        let domain = DisplayDomain::around(0.0, DEFAULT_HALF_WIDTH).unwrap();
        let curve = sample_curve(&f, domain, DEFAULT_CURVE_POINTS);
        assert_eq!(curve.len(), 1200);
        assert!(curve.points.windows(2).all(|w| w[0].x < w[1].x));
        assert!(curve.undefined_xs().is_empty());
    }
}
