//! Resource Health poll cycle.
//!
//! One cycle acquires a managed-identity token, lists the availability
//! statuses of a subscription and turns each entry into a state sample.
//! Failures never abort the cycle: they degrade to an `up` sample of `0`
//! labelled with the last response code and message.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use jsonstat_common::{
    CyclePhase, FetchRequest, JsonClient, PollCycle, Registry, ResponseStatus, render_flat,
};

use crate::config::AzureExporterConfig;
use crate::health::{self, METRIC_PREFIX, ResourceHealth, STATE, STATE_LEGEND, UP};

/// Collects Resource Health metrics for a subscription.
#[derive(Debug)]
pub struct HealthCollector {
    client: JsonClient,
    config: AzureExporterConfig,
}

/// Create a shareable collector handle.
pub type SharedCollector = Arc<HealthCollector>;

impl HealthCollector {
    pub fn new(client: JsonClient, config: AzureExporterConfig) -> Self {
        Self { client, config }
    }

    /// Run one poll cycle for `target` and render the exposition text.
    pub async fn collect(&self, target: &str) -> String {
        let mut cycle = PollCycle::new("azure-resource-health");
        let mut last_status = ResponseStatus::default();

        cycle.enter(CyclePhase::Fetching);
        let listing = match self.fetch_token(&mut last_status).await {
            Some(token) => self.fetch_health(target, &token, &mut last_status).await,
            None => {
                warn!(subscription = target, "No usable metadata token, skipping health fetch");
                None
            }
        };

        let registry = cycle.registry_mut();
        if let Some(listing) = &listing {
            record_health(registry, listing);
        }
        record_up(registry, &last_status);

        info!(
            subscription = target,
            resources = registry.get(&STATE.identity()).map_or(0, |f| f.samples.len()),
            response_code = %last_status.code,
            "Collected resource health"
        );

        cycle.finish(|registry| render_flat(&[STATE_LEGEND], registry.samples()))
    }

    /// Request a bearer token from the instance metadata service.
    async fn fetch_token(&self, last_status: &mut ResponseStatus) -> Option<String> {
        let metadata = &self.config.metadata;
        let request = FetchRequest::new(&metadata.token_url)
            .query("api-version", &metadata.api_version)
            .query("resource", &metadata.resource)
            .header("Metadata", "true");

        let body = fetch_body(&self.client, request, last_status).await?;
        usable_token(&body)
    }

    /// List availability statuses of `target`.
    async fn fetch_health(
        &self,
        target: &str,
        token: &str,
        last_status: &mut ResponseStatus,
    ) -> Option<Value> {
        let management = &self.config.management;
        let request = FetchRequest::new(management.health_url(target))
            .query("api-version", &management.api_version)
            .bearer(token);

        fetch_body(&self.client, request, last_status).await
    }
}

/// Fetch a payload, keeping the diagnostic status of the exchange.
///
/// Empty objects count as no payload.
async fn fetch_body(
    client: &JsonClient,
    request: FetchRequest,
    last_status: &mut ResponseStatus,
) -> Option<Value> {
    match client.get(request).await {
        Ok(response) => {
            *last_status = response.response_status();
            match response.body {
                Value::Object(map) if map.is_empty() => None,
                body => Some(body),
            }
        }
        Err(err) => {
            *last_status = err.response_status();
            None
        }
    }
}

/// Extract a non-empty `access_token` from a token response.
pub fn usable_token(body: &Value) -> Option<String> {
    body.get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Record one state sample per availability status entry.
pub fn record_health(registry: &mut Registry, listing: &Value) -> usize {
    let mut recorded = 0;
    for entry in health::entries(listing) {
        let resource = ResourceHealth::from_entry(entry);
        debug!(
            resource = %resource.resource,
            state = resource.state.code(),
            "Resource health entry"
        );
        if registry.observe(
            METRIC_PREFIX,
            &STATE,
            &resource.label_values(),
            f64::from(resource.state.code()),
        ) {
            recorded += 1;
        }
    }
    recorded
}

/// Record the single `up` sample: 1 when any state sample exists.
pub fn record_up(registry: &mut Registry, last_status: &ResponseStatus) {
    let up = if registry.sample_count() > 0 { 1.0 } else { 0.0 };
    registry.observe(
        METRIC_PREFIX,
        &UP,
        &[last_status.code.as_str(), last_status.message.as_str()],
        up,
    );
}
