//! Metric identity registry.
//!
//! Deduplicates metric definitions into named families for the duration of
//! one poll cycle. The first definition registered under an identity fixes
//! the family's name and label schema; later observations under the same
//! identity only append samples.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{trace, warn};

use crate::definition::{LabelSet, MetricDefinition, Sample};
use crate::normalize::normalize;
use crate::path::resolve;

/// Sanitize a metric name into its identity.
///
/// Lowercases, replaces `.` with `_` and `+` with `_plus_`.
pub fn sanitize_identity(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        match c {
            '.' => result.push('_'),
            '+' => result.push_str("_plus_"),
            _ => result.extend(c.to_lowercase()),
        }
    }
    result
}

/// All samples sharing one identity within a cycle.
#[derive(Debug, Clone)]
pub struct MetricFamily {
    /// Sanitized identity (registry key).
    pub identity: String,
    /// Full exposition name, `{prefix}_{identity}`.
    pub name: String,
    /// Label keys fixed on first registration.
    pub label_schema: Vec<String>,
    /// Samples accumulated this cycle.
    pub samples: Vec<Sample>,
}

impl MetricFamily {
    fn new(identity: String, name: String, label_schema: Vec<String>) -> Self {
        Self {
            identity,
            name,
            label_schema,
            samples: Vec::new(),
        }
    }

    /// Help text emitted for the family.
    pub fn help(&self) -> &str {
        &self.identity
    }
}

/// Cycle-scoped map from identity to family.
///
/// A registry is built fresh by each poll cycle and never shared, so it needs
/// no locking.
#[derive(Debug, Default)]
pub struct Registry {
    families: HashMap<String, MetricFamily>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation for `definition`.
    ///
    /// `label_values` are matched positionally against the family's label
    /// schema. Returns `false` if the values do not fit the schema.
    pub fn observe(
        &mut self,
        prefix: &str,
        definition: &MetricDefinition,
        label_values: &[&str],
        value: f64,
    ) -> bool {
        let identity = definition.identity();

        let family = self
            .families
            .entry(identity.clone())
            .or_insert_with(|| {
                let name = if prefix.is_empty() {
                    identity.clone()
                } else {
                    format!("{}_{}", prefix, identity)
                };
                let schema = definition
                    .label_keys
                    .iter()
                    .map(|k| (*k).to_string())
                    .collect();
                trace!(%identity, %name, "Registered metric family");
                MetricFamily::new(identity, name, schema)
            });

        if family.label_schema.len() != label_values.len() {
            warn!(
                identity = %family.identity,
                expected = family.label_schema.len(),
                got = label_values.len(),
                "Label values do not match family schema, dropping sample"
            );
            return false;
        }

        let labels: LabelSet = family
            .label_schema
            .iter()
            .map(String::as_str)
            .zip(label_values.iter().copied())
            .collect();

        family
            .samples
            .push(Sample::new(family.name.clone(), labels, value));
        true
    }

    /// Resolve `definition` against `payload`, normalize the result and
    /// record it. Absent paths and non-numeric values produce no sample.
    pub fn record(
        &mut self,
        prefix: &str,
        definition: &MetricDefinition,
        label_values: &[&str],
        payload: &Value,
    ) -> bool {
        match normalize(resolve(payload, definition.path)) {
            Some(value) => self.observe(prefix, definition, label_values, value),
            None => {
                trace!(path = definition.path, "No value for metric path");
                false
            }
        }
    }

    /// Look up a family by identity.
    pub fn get(&self, identity: &str) -> Option<&MetricFamily> {
        self.families.get(identity)
    }

    /// Families sorted by exposition name.
    pub fn families(&self) -> Vec<&MetricFamily> {
        let mut families: Vec<_> = self.families.values().collect();
        families.sort_by(|a, b| a.name.cmp(&b.name));
        families
    }

    /// Every sample across all families, in no particular order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.families.values().flat_map(|f| f.samples.iter())
    }

    /// Total number of samples.
    pub fn sample_count(&self) -> usize {
        self.families.values().map(|f| f.samples.len()).sum()
    }

    /// Number of families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Drop every family.
    pub fn clear(&mut self) {
        self.families.clear();
    }
}
