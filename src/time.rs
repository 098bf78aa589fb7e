//! Discrete simulation timeline
//!
//! Time is always counted in seconds since the grid origin. Every
//! trajectory, visibility mask and interval list in the crate is indexed
//! against one of these grids.

use crate::error::{Error, Result};

/// Ordered, uniformly spaced sample instants of a simulation window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    end: f64,
    step: f64,
    len: usize,
}

impl TimeGrid {
    /// Create a grid covering `[start, end]` with spacing `step`
    ///
    /// Samples are `start + k * step`. The last sample is the first one at
    /// or beyond `end`, so `end` itself is included whenever the window is a
    /// whole number of steps.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(Error::InvalidTimeGrid(format!(
                "non-finite bounds (start={start}, end={end}, step={step})"
            )));
        }
        if step <= 0.0 {
            return Err(Error::InvalidTimeGrid(format!("step must be > 0, got {step}")));
        }
        if end < start {
            return Err(Error::InvalidTimeGrid(format!(
                "end ({end}) is before start ({start})"
            )));
        }

        let len = ((end + step - start) / step).ceil() as usize;

        Ok(Self {
            start,
            end,
            step,
            len: len.max(1),
        })
    }

    /// Grid starting at zero spanning `duration` seconds
    pub fn from_duration(duration: f64, step: f64) -> Result<Self> {
        Self::new(0.0, duration, step)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    /// Requested end of the window (not necessarily a sample)
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Instant of sample `k`
    pub fn time_at(&self, k: usize) -> f64 {
        self.start + k as f64 * self.step
    }

    /// Last sample instant
    pub fn last(&self) -> f64 {
        self.time_at(self.len - 1)
    }

    /// End of the analysis window: the last sample holds for one step
    pub fn window_end(&self) -> f64 {
        self.last() + self.step
    }

    /// Duration covered by all samples (`len * step`)
    pub fn window_duration(&self) -> f64 {
        self.window_end() - self.start
    }

    /// Iterate over sample instants
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |k| self.time_at(k))
    }
}
