//! Scalar history for graph overlays
//!
//! Bounded per-label FIFO fed from scalar readings. This is where long runs
//! get their retention policy: the model's own histories are never trimmed,
//! only what is kept here for display.

use std::collections::VecDeque;

/// Bounded history of labelled scalar readings, in first-seen label order
#[derive(Debug, Clone)]
pub struct ScalarHistory {
    max_points: usize,
    series: Vec<(&'static str, VecDeque<f64>)>,
}

impl ScalarHistory {
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(1),
            series: Vec::new(),
        }
    }

    /// Append one reading per label, dropping the oldest beyond capacity
    pub fn record(&mut self, readings: &[(&'static str, f64)]) {
        for &(label, value) in readings {
            let idx = match self.series.iter().position(|(l, _)| *l == label) {
                Some(idx) => idx,
                None => {
                    self.series
                        .push((label, VecDeque::with_capacity(self.max_points)));
                    self.series.len() - 1
                }
            };
            let points = &mut self.series[idx].1;
            if points.len() == self.max_points {
                points.pop_front();
            }
            points.push_back(value);
        }
    }

    /// Points kept for `label`, oldest first
    pub fn points(&self, label: &str) -> Option<&VecDeque<f64>> {
        self.series
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, points)| points)
    }

    pub fn latest(&self, label: &str) -> Option<f64> {
        self.points(label)?.back().copied()
    }

    /// Display range of `label`. A flat series is widened to ±0.5 so it can
    /// still be plotted. Non-finite points are skipped.
    pub fn bounds(&self, label: &str) -> Option<(f64, f64)> {
        let points = self.points(label)?;
        let (min, max) = points
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return None;
        }
        if (max - min).abs() < 1e-6 {
            return Some((min - 0.5, max + 0.5));
        }
        Some((min, max))
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.series.iter().map(|(l, _)| *l)
    }

    pub fn capacity(&self) -> usize {
        self.max_points
    }
}

impl Default for ScalarHistory {
    fn default() -> Self {
        Self::new(500)
    }
}
