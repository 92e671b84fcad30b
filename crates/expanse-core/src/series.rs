//! History-aware scalar
//!
//! A `TimeSeries` keeps every value it has ever taken together with the
//! simulation time it was recorded at. Consumers read it explicitly:
//! `get()` for the current value, `value_at(t)` for a time-resolved value.
//!
//! The history is reconstructed as a piecewise-linear function of time:
//! - between two samples: linear interpolation
//! - before the first sample: the first value (constant)
//! - after the last sample: the last value (no extrapolation)

use crate::{ExpanseError, ExpanseResult};

/// A single recorded value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Append-only, time-ordered history of a scalar.
/// INVARIANT: sample times are non-decreasing in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Value of the most recent sample (or the initial value)
    current: f64,
    /// Recorded samples, oldest first
    history: Vec<Sample>,
}

impl TimeSeries {
    /// Create a series holding `initial` with an empty history
    pub fn new(initial: f64) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Current value
    #[inline]
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Record `value` at `time`.
    ///
    /// Times earlier than the last recorded time are rejected and leave the
    /// series unchanged. Equal times are accepted.
    pub fn update(&mut self, value: f64, time: f64) -> ExpanseResult<()> {
        if time.is_nan() {
            return Err(ExpanseError::invalid("time", time, "sample time is NaN"));
        }
        if let Some(last) = self.history.last() {
            if time < last.time {
                return Err(ExpanseError::NonMonotonicSample {
                    last: last.time,
                    attempted: time,
                });
            }
        }
        self.history.push(Sample::new(time, value));
        self.current = value;
        Ok(())
    }

    /// Value of the piecewise-linear reconstruction at `query_time`
    pub fn value_at(&self, query_time: f64) -> f64 {
        let Some(first) = self.history.first() else {
            return self.current;
        };

        // Index of the first sample strictly after the query
        let after = self.history.partition_point(|s| s.time <= query_time);
        if after == 0 {
            // Query predates all history
            return first.value;
        }
        let before = &self.history[after - 1];
        match self.history.get(after) {
            None => before.value,
            Some(next) => {
                let t = (query_time - before.time) / (next.time - before.time);
                before.value + (next.value - before.value) * t
            }
        }
    }

    /// Definite integral over `[start_time, last recorded time]`.
    ///
    /// Trapezoidal sum over the samples after `start_time`, walking back from
    /// the most recent one; the boundary segment starts at
    /// `value_at(start_time)`. Zero when `start_time` is at or after the last
    /// sample.
    pub fn integrate(&self, start_time: f64) -> f64 {
        let Some(last) = self.history.last() else {
            return 0.0;
        };
        if start_time >= last.time {
            return 0.0;
        }

        let mut total = 0.0;
        let mut idx = self.history.len() - 1;
        while idx > 0 && self.history[idx - 1].time > start_time {
            total += trapezoid(&self.history[idx - 1], &self.history[idx]);
            idx -= 1;
        }

        let oldest = &self.history[idx];
        let boundary = Sample::new(start_time, self.value_at(start_time));
        total + trapezoid(&boundary, oldest)
    }

    /// Definite integral over an arbitrary `[start, end]`, using the same
    /// extrapolation policy as `value_at`. Reversed bounds give a negated area.
    pub fn integrate_between(&self, start: f64, end: f64) -> f64 {
        if end < start {
            return -self.integrate_between(end, start);
        }
        if self.history.is_empty() {
            return self.current * (end - start);
        }

        let first_inside = self.history.partition_point(|s| s.time <= start);
        let mut prev = Sample::new(start, self.value_at(start));
        let mut total = 0.0;
        for sample in self.history[first_inside..]
            .iter()
            .take_while(|s| s.time <= end)
        {
            total += trapezoid(&prev, sample);
            prev = *sample;
        }

        total + trapezoid(&prev, &Sample::new(end, self.value_at(end)))
    }

    /// Time-averaged value over `[start, end]`.
    /// An empty or inverted interval averages to `value_at(end)`.
    pub fn mean_between(&self, start: f64, end: f64) -> f64 {
        let span = end - start;
        if span > 0.0 {
            self.integrate_between(start, end) / span
        } else {
            self.value_at(end)
        }
    }

    /// Time of the most recent sample
    pub fn last_time(&self) -> Option<f64> {
        self.history.last().map(|s| s.time)
    }

    /// Recorded samples, oldest first
    pub fn samples(&self) -> &[Sample] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[inline]
fn trapezoid(a: &Sample, b: &Sample) -> f64 {
    (b.time - a.time) * (a.value + b.value) * 0.5
}
