//! Integration tests for the Couchbase exporter.
//!
//! A mock Couchbase REST API runs in-process and the collector is pointed at
//! it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};

use jsonstat_common::{Credentials, HttpServer, JsonClient};
use jsonstat_exporter_couchbase::http::create_router;
use jsonstat_exporter_couchbase::{CouchbaseCollector, SharedCollector};

/// "admin:secret" in base64.
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

/// Behaviour of the mock cluster.
#[derive(Clone)]
struct MockCluster {
    require_auth: bool,
    nodes: Value,
    buckets: Value,
    bucket_stats_status: StatusCode,
}

impl Default for MockCluster {
    fn default() -> Self {
        Self {
            require_auth: false,
            nodes: json!({
                "nodes": [
                    {
                        "hostname": "10.0.0.1:8091",
                        "systemStats": { "cpu_utilization_rate": 12.5, "mem_total": 8192 },
                        "interestingStats": { "curr_items": 42 }
                    }
                ]
            }),
            buckets: json!([
                {
                    "name": "default",
                    "basicStats": { "itemCount": 42, "quotaPercentUsed": 1.5 },
                    "stats": { "uri": "/pools/default/buckets/default/stats" }
                }
            ]),
            bucket_stats_status: StatusCode::OK,
        }
    }
}

fn authorized(mock: &MockCluster, headers: &HeaderMap) -> bool {
    !mock.require_auth
        || headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(BASIC_AUTH)
}

fn reply(mock: &MockCluster, headers: &HeaderMap, status: StatusCode, body: Value) -> Response {
    if !authorized(mock, headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    (status, axum::Json(body)).into_response()
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start the mock REST API.
async fn spawn_cluster(mock: MockCluster) -> SocketAddr {
    let cluster = mock.clone();
    let nodes = mock.clone();
    let buckets = mock.clone();
    let stats = mock.clone();

    let router = Router::new()
        .route(
            "/pools/default/",
            get(move |headers: HeaderMap| {
                let mock = cluster.clone();
                async move {
                    let body = json!({
                        "storageTotals": { "ram": { "total": 17179869184u64, "used": 1024 } },
                        "counters": { "rebalance_success": 2 }
                    });
                    reply(&mock, &headers, StatusCode::OK, body)
                }
            }),
        )
        .route(
            "/pools/nodes/",
            get(move |headers: HeaderMap| {
                let mock = nodes.clone();
                async move { reply(&mock, &headers, StatusCode::OK, mock.nodes.clone()) }
            }),
        )
        .route(
            "/pools/default/buckets/",
            get(move |headers: HeaderMap| {
                let mock = buckets.clone();
                async move { reply(&mock, &headers, StatusCode::OK, mock.buckets.clone()) }
            }),
        )
        .route(
            "/pools/default/buckets/:bucket/stats",
            get(move |Path(bucket): Path<String>, headers: HeaderMap| {
                let mock = stats.clone();
                async move {
                    if let Some(name) = bucket.strip_prefix("@xdcr-") {
                        let key = format!("replications/abc/{}/remote", name);
                        let body = json!({
                            "op": {
                                "samples": {
                                    format!("{}/percent_completeness", key): [100, 50],
                                    format!("{}/replication_changes_left", key): [7],
                                    format!("{}/other/percent_completeness", key): [0]
                                }
                            }
                        });
                        return reply(&mock, &headers, StatusCode::OK, body);
                    }
                    let body = json!({
                        "op": {
                            "samples": {
                                "cmd_get": [2, 4, 6],
                                "ep_bg_fetched": [0, 0],
                                "timestamp": [1000, 2000]
                            }
                        }
                    });
                    reply(&mock, &headers, mock.bucket_stats_status, body)
                }
            }),
        );

    spawn(router).await
}

fn collector_for(addr: SocketAddr, credentials: Option<Credentials>) -> SharedCollector {
    Arc::new(CouchbaseCollector::new(
        JsonClient::new("jsonstat-test").unwrap(),
        format!("http://{}/", addr),
        credentials,
    ))
}

#[tokio::test]
async fn test_full_cycle() {
    let addr = spawn_cluster(MockCluster::default()).await;
    let output = collector_for(addr, None).collect().await.unwrap();

    assert!(output.contains(
        "couchbase_bucket_basicstats_itemcount{name=\"basicstats_itemcount\",bucket=\"default\"} 42\n"
    ));
    assert!(output.contains(
        "couchbase_bucket_basicstats_quotapercentused{name=\"basicstats_quotapercentused\",bucket=\"default\"} 1.5\n"
    ));
    assert!(output.contains(
        "couchbase_cluster_storagetotals_ram_total{name=\"storagetotals_ram_total\"} 17179869184\n"
    ));
    assert!(output.contains(
        "couchbase_node_systemstats_cpu_utilization_rate{name=\"systemstats_cpu_utilization_rate\",hostname=\"10.0.0.1:8091\"} 12.5\n"
    ));
    assert!(output.contains(
        "couchbase_bucket_stats_cmd_get{name=\"cmd_get\",bucket=\"default\"} 4\n"
    ));
    assert!(output.contains(
        "couchbase_bucket_stats_timestamp{name=\"timestamp\",bucket=\"default\"} 1500\n"
    ));
    assert!(output.contains(
        "couchbase_bucket_xdcr_stats_replication_changes_left{name=\"replication_changes_left\",bucket=\"default\"} 7\n"
    ));
}

#[tokio::test]
async fn test_family_headers() {
    let addr = spawn_cluster(MockCluster::default()).await;
    let output = collector_for(addr, None).collect().await.unwrap();

    assert!(output.contains(
        "# HELP couchbase_bucket_basicstats_itemcount basicstats_itemcount\n# TYPE couchbase_bucket_basicstats_itemcount gauge\n"
    ));
}

#[tokio::test]
async fn test_xdcr_first_match_wins() {
    // Two series contain "percent_completeness"; the first in document order
    // is reported and the other is ignored.
    let addr = spawn_cluster(MockCluster::default()).await;
    let output = collector_for(addr, None).collect().await.unwrap();

    let lines: Vec<&str> = output
        .lines()
        .filter(|l| l.starts_with("couchbase_bucket_xdcr_stats_percent_completeness{"))
        .collect();
    assert_eq!(
        lines,
        vec!["couchbase_bucket_xdcr_stats_percent_completeness{name=\"percent_completeness\",bucket=\"default\"} 100"]
    );
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let addr = spawn_cluster(MockCluster::default()).await;
    let collector = collector_for(addr, None);

    let first = collector.collect().await.unwrap();
    let second = collector.collect().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_multiple_buckets_share_families() {
    let mock = MockCluster {
        buckets: json!([
            {
                "name": "beta",
                "basicStats": { "itemCount": 2 },
                "stats": { "uri": "/pools/default/buckets/beta/stats" }
            },
            {
                "name": "alpha",
                "basicStats": { "itemCount": 1 },
                "stats": { "uri": "/pools/default/buckets/alpha/stats" }
            }
        ]),
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;
    let output = collector_for(addr, None).collect().await.unwrap();

    let expected = "# HELP couchbase_bucket_basicstats_itemcount basicstats_itemcount\n\
                    # TYPE couchbase_bucket_basicstats_itemcount gauge\n\
                    couchbase_bucket_basicstats_itemcount{name=\"basicstats_itemcount\",bucket=\"alpha\"} 1\n\
                    couchbase_bucket_basicstats_itemcount{name=\"basicstats_itemcount\",bucket=\"beta\"} 2\n";
    assert!(output.contains(expected));
}

#[tokio::test]
async fn test_basic_auth_is_sent() {
    let mock = MockCluster {
        require_auth: true,
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;

    let output = collector_for(addr, Some(Credentials::new("admin", "secret")))
        .collect()
        .await
        .unwrap();
    assert!(output.contains("couchbase_bucket_basicstats_itemcount"));
}

#[tokio::test]
async fn test_missing_credentials_is_fatal() {
    let mock = MockCluster {
        require_auth: true,
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;

    let err = collector_for(addr, None).collect().await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_non_ok_status_is_fatal() {
    let mock = MockCluster {
        bucket_stats_status: StatusCode::ACCEPTED,
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;

    let err = collector_for(addr, None).collect().await.unwrap_err();
    assert!(err.to_string().contains("202"));
    assert!(err.to_string().contains("/pools/default/buckets/default/stats"));
}

#[tokio::test]
async fn test_missing_nodes_is_fatal() {
    let mock = MockCluster {
        nodes: json!({ "name": "default" }),
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;

    let err = collector_for(addr, None).collect().await.unwrap_err();
    assert!(err.to_string().contains("nodes"));
}

#[tokio::test]
async fn test_bucket_without_stats_uri_is_fatal() {
    let mock = MockCluster {
        buckets: json!([{ "name": "default", "basicStats": { "itemCount": 42 } }]),
        ..Default::default()
    };
    let addr = spawn_cluster(mock).await;

    let err = collector_for(addr, None).collect().await.unwrap_err();
    assert!(err.to_string().contains("stats.uri"));
}

#[tokio::test]
async fn test_unreachable_cluster_is_fatal() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = collector_for(addr, None).collect().await.unwrap_err();
    assert!(err.to_string().contains("Failed to get data"));
}

#[tokio::test]
async fn test_http_server_reports_fatal_cycle() {
    let mock = MockCluster {
        bucket_stats_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..Default::default()
    };
    let upstream_addr = spawn_cluster(mock).await;
    let collector = collector_for(upstream_addr, None);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(create_router(collector, "/metrics", fatal_tx), addr);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server_task = tokio::spawn(async move { server.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .expect("Failed to fetch metrics");
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let reason = tokio::time::timeout(Duration::from_secs(5), fatal_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(reason.contains("500"));

    shutdown_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), server_task).await;
}

#[tokio::test]
async fn test_http_server_serves_metrics() {
    let upstream_addr = spawn_cluster(MockCluster::default()).await;
    let collector = collector_for(upstream_addr, None);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(create_router(collector, "/metrics", fatal_tx), addr);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server_task = tokio::spawn(async move { server.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .expect("Failed to fetch metrics");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("couchbase_bucket_basicstats_itemcount"));
    assert!(fatal_rx.try_recv().is_err());

    shutdown_tx.send(true).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), server_task).await;
}
