#![forbid(unsafe_code)]

//! Release-velocity estimation from per-frame drag samples.
//!
//! [`VelocitySampler`] keeps a bounded history of instantaneous drag speeds
//! (`delta / dt` for each drag frame). On release the fling velocity is the
//! arithmetic mean of the retained samples, clamped to a maximum magnitude.
//!
//! # Invariants
//!
//! 1. At most `capacity` samples are retained; the oldest is evicted first.
//! 2. `mean()` of an empty sampler is `0.0`.
//! 3. Frames with a non-positive or non-finite duration are not sampled.

use std::collections::VecDeque;
use std::time::Duration;

/// Default number of retained drag samples.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 10;

/// Bounded moving window of drag speed samples.
#[derive(Debug, Clone)]
pub struct VelocitySampler {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl Default for VelocitySampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_CAPACITY)
    }
}

impl VelocitySampler {
    /// Create a sampler retaining up to `capacity` samples (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of retained samples.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record the speed of one drag frame that moved `delta` units in `dt`.
    ///
    /// Returns the recorded sample, or `None` if the frame was skipped.
    pub fn record(&mut self, delta: f64, dt: Duration) -> Option<f64> {
        let secs = dt.as_secs_f64();
        if secs <= 0.0 || !delta.is_finite() {
            return None;
        }
        let sample = delta / secs;
        self.push(sample);
        Some(sample)
    }

    /// Push a precomputed speed sample.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Arithmetic mean of the retained samples (0 when empty).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Mean speed clamped to `[-max_speed, max_speed]`.
    #[must_use]
    pub fn release_velocity(&self, max_speed: f64) -> f64 {
        let max_speed = max_speed.abs();
        self.mean().clamp(-max_speed, max_speed)
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_20: Duration = Duration::from_millis(20);

    #[test]
    fn empty_mean_is_zero() {
        let s = VelocitySampler::default();
        assert!(s.is_empty());
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.release_velocity(20.0), 0.0);
    }

    #[test]
    fn record_divides_by_frame_time() {
        let mut s = VelocitySampler::default();
        let sample = s.record(0.1, MS_20).unwrap();
        assert!((sample - 5.0).abs() < 1e-9);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn zero_dt_is_skipped() {
        let mut s = VelocitySampler::default();
        assert_eq!(s.record(1.0, Duration::ZERO), None);
        assert!(s.is_empty());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut s = VelocitySampler::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.push(v);
        }
        assert_eq!(s.samples().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
        assert_eq!(s.mean(), 3.0);
    }

    #[test]
    fn default_capacity_is_ten() {
        let mut s = VelocitySampler::default();
        for i in 0..25 {
            s.push(f64::from(i));
        }
        assert_eq!(s.len(), DEFAULT_SAMPLE_CAPACITY);
        assert_eq!(s.samples().next(), Some(15.0));
    }

    #[test]
    fn release_velocity_clamps_both_directions() {
        let mut s = VelocitySampler::default();
        s.push(100.0);
        assert_eq!(s.release_velocity(20.0), 20.0);
        s.clear();
        s.push(-100.0);
        assert_eq!(s.release_velocity(20.0), -20.0);
    }

    #[test]
    fn zero_capacity_becomes_one() {
        let mut s = VelocitySampler::new(0);
        s.push(1.0);
        s.push(2.0);
        assert_eq!(s.capacity(), 1);
        assert_eq!(s.mean(), 2.0);
    }
}
