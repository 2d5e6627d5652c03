//! Validated collections of named numeric groups.
//!
//! Validation happens at insertion: a group that is too small, contains a
//! non-finite value, or reuses a name never enters the set. Rejected
//! names are recorded so callers can report what was excluded. Member
//! order is insertion order, which drives labeling only, never test
//! outcomes.

use serde::Serialize;
use tracing::warn;

/// A group needs at least this many values to be analyzable.
pub const MIN_GROUP_SIZE: usize = 3;

/// An analysis needs at least this many groups.
pub const MIN_GROUP_COUNT: usize = 2;

/// A named, validated group of observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    name: String,
    values: Vec<f64>,
}

impl Sample {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Insertion-ordered set of samples plus the names it refused.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
    dropped: Vec<String>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(name, values)` pairs, validating each group.
    pub fn from_groups<N, I>(groups: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<f64>)>,
    {
        let mut set = Self::new();
        for (name, values) in groups {
            set.insert(name, values);
        }
        set
    }

    /// Insert a group. Returns `false` when the group is rejected; the
    /// rejection is recorded in [`dropped`](Self::dropped) and logged,
    /// never escalated.
    pub fn insert<N: Into<String>>(&mut self, name: N, values: Vec<f64>) -> bool {
        let name = name.into();
        let reject = |set: &mut Self, name: String, reason: &str| {
            warn!(group = %name, reason, "group excluded from analysis");
            set.dropped.push(name);
            false
        };

        if name.trim().is_empty() {
            return reject(self, "(unnamed)".to_string(), "empty name");
        }
        if self.samples.iter().any(|s| s.name == name) {
            return reject(self, name, "duplicate name");
        }
        if values.len() < MIN_GROUP_SIZE {
            return reject(self, name, "fewer than 3 values");
        }
        if values.iter().any(|v| !v.is_finite()) {
            return reject(self, name, "non-finite value");
        }

        self.samples.push(Sample { name, values });
        true
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Names of groups rejected at insertion, in rejection order.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether enough groups survived validation to run any analysis.
    pub fn is_analyzable(&self) -> bool {
        self.samples.len() >= MIN_GROUP_COUNT
    }

    /// Borrow the raw value slices in insertion order.
    pub fn value_groups(&self) -> Vec<&[f64]> {
        self.samples.iter().map(|s| s.values.as_slice()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accepts_valid_group() {
        let mut set = SampleSet::new();
        assert!(set.insert("Control", vec![1.0, 2.0, 3.0]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.samples()[0].name(), "Control");
        assert!(set.dropped().is_empty());
    }

    #[test]
    fn test_small_group_dropped_not_fatal() {
        let mut set = SampleSet::new();
        assert!(!set.insert("Tiny", vec![1.0, 2.0]));
        assert!(set.is_empty());
        assert_eq!(set.dropped(), ["Tiny"]);
    }

    #[test]
    fn test_duplicate_name_dropped() {
        let mut set = SampleSet::new();
        set.insert("A", vec![1.0, 2.0, 3.0]);
        assert!(!set.insert("A", vec![4.0, 5.0, 6.0]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped(), ["A"]);
        // The first insertion is untouched.
        assert_eq!(set.samples()[0].values(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_finite_values_dropped() {
        let mut set = SampleSet::new();
        assert!(!set.insert("Bad", vec![1.0, f64::NAN, 3.0]));
        assert!(!set.insert("AlsoBad", vec![1.0, f64::INFINITY, 3.0]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_name_dropped() {
        let mut set = SampleSet::new();
        assert!(!set.insert("  ", vec![1.0, 2.0, 3.0]));
        assert_eq!(set.dropped(), ["(unnamed)"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let set = SampleSet::from_groups([
            ("Z", vec![1.0, 2.0, 3.0]),
            ("A", vec![4.0, 5.0, 6.0]),
            ("M", vec![7.0, 8.0, 9.0]),
        ]);
        let names: Vec<&str> = set.samples().iter().map(Sample::name).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }

    #[test]
    fn test_analyzable_threshold() {
        let mut set = SampleSet::new();
        set.insert("A", vec![1.0, 2.0, 3.0]);
        assert!(!set.is_analyzable());
        set.insert("B", vec![4.0, 5.0, 6.0]);
        assert!(set.is_analyzable());
    }
}
