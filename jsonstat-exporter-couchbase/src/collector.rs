//! Couchbase statistics poll cycle.
//!
//! A cycle walks the REST API in a fixed order: cluster, nodes, then every
//! bucket with its detailed and replication statistics. Unlike a missing
//! metric path, a failed fetch or a payload without the fields needed to
//! navigate it aborts the whole cycle.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use jsonstat_common::{
    Credentials, CyclePhase, Error, FetchRequest, JsonClient, PollCycle, Registry, Result,
    normalize, render_families, resolve,
};

use crate::metrics::{
    BUCKET_METRICS, BUCKET_STATS_METRICS, BUCKET_XDCR_METRICS, CLUSTER_METRICS, NODE_METRICS,
};

pub const CLUSTER_PREFIX: &str = "couchbase_cluster";
pub const NODE_PREFIX: &str = "couchbase_node";
pub const BUCKET_PREFIX: &str = "couchbase_bucket";
pub const BUCKET_STATS_PREFIX: &str = "couchbase_bucket_stats";
pub const BUCKET_XDCR_PREFIX: &str = "couchbase_bucket_xdcr_stats";

pub const CLUSTER_PATH: &str = "/pools/default/";
pub const NODES_PATH: &str = "/pools/nodes/";
pub const BUCKETS_PATH: &str = "/pools/default/buckets/";

/// Location of the per-series sample map in stats responses.
const SAMPLES_PATH: &str = "op.samples";

/// Collects Couchbase metrics from one cluster.
#[derive(Debug)]
pub struct CouchbaseCollector {
    client: JsonClient,
    base_url: String,
    credentials: Option<Credentials>,
}

pub type SharedCollector = Arc<CouchbaseCollector>;

impl CouchbaseCollector {
    pub fn new(
        client: JsonClient,
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one poll cycle and render the exposition text.
    pub async fn collect(&self) -> Result<String> {
        let mut cycle = PollCycle::new("couchbase");

        let clusters = self.collect_cluster(&mut cycle).await?;
        let nodes = self.collect_nodes(&mut cycle).await?;
        let buckets = self.collect_buckets(&mut cycle).await?;

        info!(
            cluster_samples = clusters,
            nodes,
            buckets,
            samples = cycle.registry().sample_count(),
            "Collected couchbase stats"
        );

        Ok(cycle.finish(render_families))
    }

    async fn collect_cluster(&self, cycle: &mut PollCycle) -> Result<usize> {
        let payload = self.fetch(cycle, &self.url(CLUSTER_PATH)).await?;
        Ok(record_cluster(cycle.registry_mut(), &payload))
    }

    async fn collect_nodes(&self, cycle: &mut PollCycle) -> Result<usize> {
        let url = self.url(NODES_PATH);
        let payload = self.fetch(cycle, &url).await?;
        record_nodes(cycle.registry_mut(), &url, &payload)
    }

    async fn collect_buckets(&self, cycle: &mut PollCycle) -> Result<usize> {
        let url = self.url(BUCKETS_PATH);
        let payload = self.fetch(cycle, &url).await?;
        let buckets = payload
            .as_array()
            .ok_or_else(|| Error::unexpected_payload(&url, "bucket listing is not an array"))?;

        for bucket in buckets {
            let name = bucket_name(&url, bucket)?;
            let stats_uri = resolve(bucket, "stats.uri")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::unexpected_payload(&url, format!("bucket `{}` has no stats.uri", name))
                })?;

            record_bucket(cycle.registry_mut(), name, bucket);

            let stats = self.fetch(cycle, &self.url(stats_uri)).await?;
            record_bucket_stats(cycle.registry_mut(), name, &stats);

            let xdcr_url = self.url(&format!("{}@xdcr-{}/stats", BUCKETS_PATH, name));
            let xdcr = self.fetch(cycle, &xdcr_url).await?;
            record_bucket_xdcr(cycle.registry_mut(), name, &xdcr);

            debug!(bucket = name, "Collected bucket");
        }

        Ok(buckets.len())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch `url`, requiring `200 OK` and a JSON body.
    async fn fetch(&self, cycle: &mut PollCycle, url: &str) -> Result<Value> {
        cycle.enter(CyclePhase::Fetching);
        let request = FetchRequest::new(url).basic_auth(self.credentials.clone());
        let response = self.client.get(request).await?.require_ok(url)?;
        Ok(response.body)
    }
}

fn bucket_name<'a>(url: &str, bucket: &'a Value) -> Result<&'a str> {
    bucket
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::unexpected_payload(url, "bucket entry has no name"))
}

/// Record cluster-wide metrics from `/pools/default/`.
pub fn record_cluster(registry: &mut Registry, payload: &Value) -> usize {
    CLUSTER_METRICS
        .iter()
        .filter(|def| registry.record(CLUSTER_PREFIX, def, &[def.identity().as_str()], payload))
        .count()
}

/// Record per-node metrics from the `nodes` array of `/pools/nodes/`.
///
/// Returns the number of nodes seen.
pub fn record_nodes(registry: &mut Registry, url: &str, payload: &Value) -> Result<usize> {
    let nodes = payload
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::unexpected_payload(url, "missing `nodes` array"))?;

    for node in nodes {
        let hostname = node
            .get("hostname")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected_payload(url, "node entry has no hostname"))?;

        for def in NODE_METRICS {
            registry.record(NODE_PREFIX, def, &[def.identity().as_str(), hostname], node);
        }
    }

    Ok(nodes.len())
}

/// Record the summary metrics carried by a bucket listing entry.
pub fn record_bucket(registry: &mut Registry, bucket_name: &str, bucket: &Value) -> usize {
    BUCKET_METRICS
        .iter()
        .filter(|def| registry.record(BUCKET_PREFIX, def, &[def.identity().as_str(), bucket_name], bucket))
        .count()
}

/// Record detailed bucket statistics resolved under `op.samples`.
///
/// Series are lists of samples; their mean is the observation.
pub fn record_bucket_stats(registry: &mut Registry, bucket_name: &str, stats: &Value) -> usize {
    let Some(samples) = resolve(stats, SAMPLES_PATH) else {
        debug!(bucket = bucket_name, "Bucket stats have no samples");
        return 0;
    };

    BUCKET_STATS_METRICS
        .iter()
        .filter(|def| {
            registry.record(
                BUCKET_STATS_PREFIX,
                def,
                &[def.identity().as_str(), bucket_name],
                samples,
            )
        })
        .count()
}

/// Record replication statistics.
///
/// Replication series are keyed by long per-link names, so each metric is
/// located by substring through [`find_xdcr_sample`].
pub fn record_bucket_xdcr(registry: &mut Registry, bucket_name: &str, xdcr: &Value) -> usize {
    let Some(samples) = resolve(xdcr, SAMPLES_PATH).and_then(Value::as_object) else {
        debug!(bucket = bucket_name, "Replication stats have no samples");
        return 0;
    };

    let mut recorded = 0;
    for def in BUCKET_XDCR_METRICS {
        let Some(value) = normalize(find_xdcr_sample(samples, def.path)) else {
            continue;
        };
        if registry.observe(
            BUCKET_XDCR_PREFIX,
            def,
            &[def.identity().as_str(), bucket_name],
            value,
        ) {
            recorded += 1;
        }
    }
    recorded
}

/// First element of the first series (in document order) whose key contains
/// `id`.
///
/// When several replication links match, only the first is reported.
pub fn find_xdcr_sample<'a>(samples: &'a Map<String, Value>, id: &str) -> Option<&'a Value> {
    samples
        .iter()
        .find(|(key, _)| key.contains(id))
        .and_then(|(_, series)| series.as_array()?.first())
}
