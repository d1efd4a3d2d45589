//! Resource Health availability statuses as metrics.

use serde_json::Value;

use jsonstat_common::{LabelSet, MetricDefinition, resolve};

/// Metric name prefix.
pub const METRIC_PREFIX: &str = "azure_resource_health";

/// Legend emitted ahead of the samples.
pub const STATE_LEGEND: &str =
    "# State to Value mapping: 0-Healthy, 1-Degraded, 2-Unavailable, 3-Unknown, 4-Failed";

/// Per-resource availability state.
pub const STATE: MetricDefinition = MetricDefinition::new(
    "state",
    "properties.availabilityState",
    &["resourcegroup", "resourcetype", "resource", "region"],
);

/// Whether any health data could be collected.
pub const UP: MetricDefinition =
    MetricDefinition::new("up", "up", &["response_code", "response_message"]);

/// Positions of the label-bearing segments in a resource id split on `/`.
const RESOURCE_GROUP_SEGMENT: usize = 4;
const RESOURCE_TYPE_SEGMENT: usize = 7;
const RESOURCE_NAME_SEGMENT: usize = 8;

/// Availability state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Available,
    Degraded,
    Unavailable,
    Unknown,
    /// No state was reported.
    Failed,
}

impl HealthState {
    /// Map an `availabilityState` value. Unrecognized states are `Unknown`;
    /// an empty state counts as missing.
    pub fn from_availability(state: Option<&str>) -> Self {
        match state {
            Some("Available") => HealthState::Available,
            Some("Degraded") => HealthState::Degraded,
            Some("Unavailable") => HealthState::Unavailable,
            Some("") | None => HealthState::Failed,
            Some(_) => HealthState::Unknown,
        }
    }

    /// Numeric code exposed as the metric value.
    pub fn code(&self) -> u8 {
        match self {
            HealthState::Available => 0,
            HealthState::Degraded => 1,
            HealthState::Unavailable => 2,
            HealthState::Unknown => 3,
            HealthState::Failed => 4,
        }
    }
}

/// The labels and state extracted from one availability status entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceHealth {
    pub resource_group: String,
    pub resource_type: String,
    pub resource: String,
    pub region: String,
    pub state: HealthState,
}

impl ResourceHealth {
    /// Extract from an entry of the `value` array.
    ///
    /// Missing id segments and a missing location become empty labels.
    pub fn from_entry(entry: &Value) -> Self {
        let id = entry.get("id").and_then(Value::as_str).unwrap_or_default();
        let segments: Vec<&str> = id.split('/').collect();
        let segment = |i: usize| segments.get(i).copied().unwrap_or_default().to_string();

        let location = entry
            .get("location")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let state = resolve(entry, STATE.path).and_then(Value::as_str);

        Self {
            resource_group: segment(RESOURCE_GROUP_SEGMENT),
            resource_type: segment(RESOURCE_TYPE_SEGMENT),
            resource: segment(RESOURCE_NAME_SEGMENT),
            region: normalize_region(location),
            state: HealthState::from_availability(state),
        }
    }

    /// Label values in the order of [`STATE`]'s label keys.
    pub fn label_values(&self) -> [&str; 4] {
        [
            self.resource_group.as_str(),
            self.resource_type.as_str(),
            self.resource.as_str(),
            self.region.as_str(),
        ]
    }

    pub fn labels(&self) -> LabelSet {
        STATE
            .label_keys
            .iter()
            .copied()
            .zip(self.label_values())
            .collect()
    }
}

/// Entries of an availability status listing.
pub fn entries(listing: &Value) -> &[Value] {
    resolve(listing, "value")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Title-case a location and upper-case every literal `us`.
///
/// `eastus` becomes `EastUS`, `westeurope` becomes `Westeurope`.
pub fn normalize_region(location: &str) -> String {
    title_case(location).replace("us", "US")
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut previous_cased = false;

    for c in s.chars() {
        if previous_cased {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }

    result
}
