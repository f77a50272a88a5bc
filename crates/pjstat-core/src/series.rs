//! Ordered bucket accumulators for chart series
//!
//! A report series is a fixed, insertion-ordered set of buckets (one per
//! x-axis slot) established up front, then folded over session records.
//! Pre-registering every bucket of the reporting window guarantees a
//! complete, gap-free axis: days with no practice still appear as zero
//! bars, and the caller never has to backfill missing slots.
//!
//! Two accumulators cover the report shapes:
//! - [`SumSeries`] accumulates a running sum per bucket plus a grand total
//!   and a count of buckets that ever became non-zero.
//! - [`MeanSeries`] accumulates a running incremental mean per bucket.
//!
//! Both treat unregistered keys as a silent no-op: sessions outside the
//! reporting window are dropped by never registering their buckets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered sum accumulator
///
/// # Examples
/// ```
/// use pjstat_core::series::SumSeries;
///
/// let mut series = SumSeries::new();
/// series.add_bucket(0u8, 0.0, "Mo");
/// series.add_bucket(1u8, 0.0, "Tu");
///
/// series.add(0, 30.0);
/// series.add(9, 30.0); // never registered, dropped
///
/// assert_eq!(series.value(&0), Some(30.0));
/// assert_eq!(series.total(), 30.0);
/// assert_eq!(series.active_buckets(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SumSeries<K> {
    order: Vec<K>,
    values: HashMap<K, f64>,
    labels: HashMap<K, String>,
    total: f64,
    active_buckets: usize,
}

impl<K: Copy + Eq + Hash> SumSeries<K> {
    /// Create an empty series
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
            labels: HashMap::new(),
            total: 0.0,
            active_buckets: 0,
        }
    }

    /// Register a bucket during the setup phase
    ///
    /// Buckets keep the order they were registered in. Callers are expected
    /// to register each key once; re-registering a key keeps its original
    /// position and replaces its value and label (last write wins).
    pub fn add_bucket(&mut self, key: K, initial: f64, label: impl Into<String>) {
        match self.values.insert(key, initial) {
            None => {
                self.order.push(key);
                self.total += initial;
            }
            Some(previous) => {
                self.total += initial - previous;
            }
        }
        self.labels.insert(key, label.into());
    }

    /// Fold a value into a bucket
    ///
    /// Unregistered keys are dropped without error: the setup phase only
    /// registers in-window buckets, so out-of-window sessions land here
    /// constantly and correctly.
    ///
    /// The active-bucket count bumps once per bucket, on its first
    /// transition from exactly 0 to non-zero, and never decrements — it
    /// measures "was anything ever logged here", not the current value.
    pub fn add(&mut self, key: K, delta: f64) {
        let Some(value) = self.values.get_mut(&key) else {
            return;
        };
        let updated = *value + delta;
        if *value == 0.0 && updated != 0.0 {
            self.active_buckets += 1;
        }
        *value = updated;
        self.total += delta;
    }

    /// Current value of a bucket, or `None` if it was never registered
    pub fn value(&self, key: &K) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Sum of all bucket values
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of buckets that have ever held a non-zero value
    pub fn active_buckets(&self) -> usize {
        self.active_buckets
    }

    /// Number of registered buckets
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no buckets are registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bucket values in registration order
    pub fn values(&self) -> Vec<f64> {
        self.order.iter().map(|key| self.values[key]).collect()
    }

    /// Bucket labels in registration order
    pub fn labels(&self) -> Vec<String> {
        self.order.iter().map(|key| self.labels[key].clone()).collect()
    }

    /// Flatten into chart-ready data, consuming the accumulator
    pub fn into_data(self) -> SumSeriesData {
        SumSeriesData {
            labels: self.labels(),
            values: self.values(),
            total: self.total,
            active_buckets: self.active_buckets,
        }
    }
}

impl<K: Copy + Eq + Hash> Default for SumSeries<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered incremental-mean accumulator
///
/// Buckets with no observations report `None` rather than a mean of 0,
/// so charts can distinguish "no sessions on Tuesdays" from "Tuesday
/// sessions average zero minutes".
///
/// The mean is updated incrementally, `(mean * n + value) / (n + 1)`,
/// keeping O(1) space per bucket. Sample counts here are small (sessions
/// per weekday over a few months), well inside the range where the
/// accumulated floating-point error is negligible.
#[derive(Debug, Clone)]
pub struct MeanSeries<K> {
    order: Vec<K>,
    buckets: HashMap<K, MeanBucket>,
    labels: HashMap<K, String>,
}

#[derive(Debug, Clone, Copy)]
struct MeanBucket {
    mean: f64,
    samples: u64,
}

impl<K: Copy + Eq + Hash> MeanSeries<K> {
    /// Create an empty series
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            buckets: HashMap::new(),
            labels: HashMap::new(),
        }
    }

    /// Register a bucket with zero samples
    pub fn add_bucket(&mut self, key: K, label: impl Into<String>) {
        if self
            .buckets
            .insert(key, MeanBucket { mean: 0.0, samples: 0 })
            .is_none()
        {
            self.order.push(key);
        }
        self.labels.insert(key, label.into());
    }

    /// Fold an observation into a bucket; unregistered keys are dropped
    pub fn observe(&mut self, key: K, value: f64) {
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return;
        };
        if bucket.samples == 0 {
            bucket.mean = value;
            bucket.samples = 1;
        } else {
            let count = bucket.samples as f64;
            bucket.mean = (bucket.mean * count + value) / (count + 1.0);
            bucket.samples += 1;
        }
    }

    /// Current mean of a bucket
    ///
    /// `None` for both unregistered keys and registered buckets that have
    /// received no observations yet.
    pub fn mean(&self, key: &K) -> Option<f64> {
        self.buckets
            .get(key)
            .and_then(|bucket| (bucket.samples > 0).then_some(bucket.mean))
    }

    /// Observations folded into a bucket so far
    pub fn samples(&self, key: &K) -> u64 {
        self.buckets.get(key).map_or(0, |bucket| bucket.samples)
    }

    /// Number of registered buckets
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no buckets are registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bucket means in registration order, `None` where no data exists
    pub fn values(&self) -> Vec<Option<f64>> {
        self.order.iter().map(|key| self.mean(key)).collect()
    }

    /// Bucket labels in registration order
    pub fn labels(&self) -> Vec<String> {
        self.order.iter().map(|key| self.labels[key].clone()).collect()
    }

    /// Flatten into chart-ready data, consuming the accumulator
    pub fn into_data(self) -> MeanSeriesData {
        MeanSeriesData {
            labels: self.labels(),
            values: self.values(),
        }
    }
}

impl<K: Copy + Eq + Hash> Default for MeanSeries<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Chart-ready sum series
///
/// `labels` and `values` are parallel vectors in bucket order. `total` is
/// the sum over all buckets and `active_buckets` the number of buckets
/// that ever became non-zero (the divisor for "average per active day"
/// metrics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumSeriesData {
    /// Display labels, one per bucket
    pub labels: Vec<String>,
    /// Accumulated values, one per bucket
    pub values: Vec<f64>,
    /// Sum over all buckets
    pub total: f64,
    /// Buckets that ever held a non-zero value
    pub active_buckets: usize,
}

impl SumSeriesData {
    /// Average value over active buckets, `None` when nothing was logged
    pub fn average_per_active_bucket(&self) -> Option<f64> {
        (self.active_buckets > 0).then(|| self.total / self.active_buckets as f64)
    }
}

/// Chart-ready mean series
///
/// `labels` and `values` are parallel vectors in bucket order; a `None`
/// value marks a bucket with no observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanSeriesData {
    /// Display labels, one per bucket
    pub labels: Vec<String>,
    /// Bucket means, `None` where no data exists
    pub values: Vec<Option<f64>>,
}
