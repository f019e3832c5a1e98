//! Evenly spaced sample grids

use std::iter::FusedIterator;

/// `count` evenly spaced values over `[start, stop]`, both endpoints included.
///
/// A count of zero yields nothing and a count of one yields only `start`.
/// The final value is exactly `stop`. Finite endpoints always give finite
/// values, even when `stop - start` overflows.
pub fn linspace(start: f64, stop: f64, count: usize) -> Linspace {
    let step = if count > 1 {
        (stop - start) / (count - 1) as f64
    } else {
        0.0
    };
    Linspace {
        start,
        stop,
        step,
        count,
        index: 0,
    }
}

/// Iterator returned by [`linspace`]
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    stop: f64,
    step: f64,
    count: usize,
    index: usize,
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index;
        self.index += 1;
        if i + 1 == self.count && self.count > 1 {
            Some(self.stop)
        } else if self.step.is_finite() {
            Some(self.start + i as f64 * self.step)
        } else {
            let t = i as f64 / (self.count - 1) as f64;
            Some(self.start * (1.0 - t) + self.stop * t)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Linspace {}

impl FusedIterator for Linspace {}
