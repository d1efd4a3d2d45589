//! Declarative metric definitions and the per-cycle sample model.

use crate::registry::sanitize_identity;

/// A statically declared metric: its name, where to find it, and the label
/// keys it is emitted with.
///
/// Definitions are declared once per target domain as `static` tables and
/// never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Metric name before sanitization (e.g. `storageTotals.ram.total`).
    pub name: &'static str,
    /// Dot-separated path into the payload.
    pub path: &'static str,
    /// Ordered label keys; order is the emission order.
    pub label_keys: &'static [&'static str],
}

impl MetricDefinition {
    /// Declare a metric.
    pub const fn new(
        name: &'static str,
        path: &'static str,
        label_keys: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            path,
            label_keys,
        }
    }

    /// Declare a metric whose name doubles as its path.
    pub const fn at(path: &'static str, label_keys: &'static [&'static str]) -> Self {
        Self::new(path, path, label_keys)
    }

    /// The sanitized identity this definition registers under.
    pub fn identity(&self) -> String {
        sanitize_identity(self.name)
    }
}

/// An ordered set of label key/value pairs.
///
/// Keys are unique; emission order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a label value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut labels = LabelSet::new();
        for (k, v) in iter {
            labels.insert(k, v);
        }
        labels
    }
}

/// A single observation produced during one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Full exposition name of the metric.
    pub metric_name: String,
    /// Labels in emission order.
    pub labels: LabelSet,
    /// Observed value.
    pub value: f64,
}

impl Sample {
    pub fn new(metric_name: impl Into<String>, labels: LabelSet, value: f64) -> Self {
        Self {
            metric_name: metric_name.into(),
            labels,
            value,
        }
    }
}
