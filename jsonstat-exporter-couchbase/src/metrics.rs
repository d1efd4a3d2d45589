//! Static metric tables for the Couchbase REST API.
//!
//! Every table entry is resolved by path against its category's payload; the
//! `name` label carries the metric identity and the node or bucket tables add
//! the entity's own identifier.

use jsonstat_common::MetricDefinition;

/// Label keys of cluster-level families.
const CLUSTER_LABELS: &[&str] = &["name"];

/// Label keys of node families.
const NODE_LABELS: &[&str] = &["name", "hostname"];

/// Label keys of bucket, bucket stats and XDCR families.
const BUCKET_LABELS: &[&str] = &["name", "bucket"];

/// Cluster-wide metrics from `/pools/default/`.
pub static CLUSTER_METRICS: &[MetricDefinition] = &[
    MetricDefinition::at("storageTotals.ram.total", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.used", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.usedByData", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.quotaTotal", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.quotaUsed", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.quotaUsedPerNode", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.ram.quotaTotalPerNode", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.total", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.used", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.usedByData", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.quotaTotal", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.free", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.quotaUsed", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.quotaUsedPerNode", CLUSTER_LABELS),
    MetricDefinition::at("storageTotals.hdd.quotaTotalPerNode", CLUSTER_LABELS),
    MetricDefinition::at("counters.rebalance_success", CLUSTER_LABELS),
    MetricDefinition::at("counters.rebalance_start", CLUSTER_LABELS),
    MetricDefinition::at("counters.rebalance_fail", CLUSTER_LABELS),
    MetricDefinition::at("counters.rebalance_node", CLUSTER_LABELS),
];

/// Per-node metrics, resolved against each entry of `nodes`.
pub static NODE_METRICS: &[MetricDefinition] = &[
    MetricDefinition::at("systemStats.cpu_utilization_rate", NODE_LABELS),
    MetricDefinition::at("systemStats.swap_total", NODE_LABELS),
    MetricDefinition::at("systemStats.swap_used", NODE_LABELS),
    MetricDefinition::at("systemStats.mem_total", NODE_LABELS),
    MetricDefinition::at("systemStats.mem_free", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_docs_actual_disk_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_docs_data_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_views_actual_disk_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_views_data_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.mem_used", NODE_LABELS),
    MetricDefinition::at("interestingStats.ops", NODE_LABELS),
    MetricDefinition::at("interestingStats.curr_items", NODE_LABELS),
    MetricDefinition::at("interestingStats.curr_items_tot", NODE_LABELS),
    MetricDefinition::at("interestingStats.vb_replica_curr_items", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_spatial_disk_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.couch_spatial_data_size", NODE_LABELS),
    MetricDefinition::at("interestingStats.cmd_get", NODE_LABELS),
    MetricDefinition::at("interestingStats.get_hits", NODE_LABELS),
    MetricDefinition::at("interestingStats.ep_bg_fetched", NODE_LABELS),
];

/// Per-bucket metrics, resolved against each bucket object.
pub static BUCKET_METRICS: &[MetricDefinition] = &[
    MetricDefinition::at("basicStats.quotaPercentUsed", BUCKET_LABELS),
    MetricDefinition::at("basicStats.opsPerSec", BUCKET_LABELS),
    MetricDefinition::at("basicStats.diskFetches", BUCKET_LABELS),
    MetricDefinition::at("basicStats.itemCount", BUCKET_LABELS),
    MetricDefinition::at("basicStats.diskUsed", BUCKET_LABELS),
    MetricDefinition::at("basicStats.dataUsed", BUCKET_LABELS),
    MetricDefinition::at("basicStats.memUsed", BUCKET_LABELS),
];

/// Per-bucket operational statistics, resolved under `op.samples`.
pub static BUCKET_STATS_METRICS: &[MetricDefinition] = &[
    MetricDefinition::at("avg_bg_wait_time", BUCKET_LABELS),
    MetricDefinition::at("avg_disk_commit_time", BUCKET_LABELS),
    MetricDefinition::at("avg_disk_update_time", BUCKET_LABELS),
    MetricDefinition::at("bg_wait_count", BUCKET_LABELS),
    MetricDefinition::at("bg_wait_total", BUCKET_LABELS),
    MetricDefinition::at("bytes_read", BUCKET_LABELS),
    MetricDefinition::at("bytes_written", BUCKET_LABELS),
    MetricDefinition::at("cas_badval", BUCKET_LABELS),
    MetricDefinition::at("cas_hits", BUCKET_LABELS),
    MetricDefinition::at("cas_misses", BUCKET_LABELS),
    MetricDefinition::at("cmd_get", BUCKET_LABELS),
    MetricDefinition::at("cmd_set", BUCKET_LABELS),
    MetricDefinition::at("couch_docs_data_size", BUCKET_LABELS),
    MetricDefinition::at("couch_docs_disk_size", BUCKET_LABELS),
    MetricDefinition::at("cpu_idle_ms", BUCKET_LABELS),
    MetricDefinition::at("cpu_local_ms", BUCKET_LABELS),
    MetricDefinition::at("cpu_utilization_rate", BUCKET_LABELS),
    MetricDefinition::at("curr_connections", BUCKET_LABELS),
    MetricDefinition::at("curr_items", BUCKET_LABELS),
    MetricDefinition::at("curr_items_tot", BUCKET_LABELS),
    MetricDefinition::at("decr_hits", BUCKET_LABELS),
    MetricDefinition::at("decr_misses", BUCKET_LABELS),
    MetricDefinition::at("delete_hits", BUCKET_LABELS),
    MetricDefinition::at("delete_misses", BUCKET_LABELS),
    MetricDefinition::at("disk_commit_count", BUCKET_LABELS),
    MetricDefinition::at("disk_commit_total", BUCKET_LABELS),
    MetricDefinition::at("disk_update_count", BUCKET_LABELS),
    MetricDefinition::at("disk_update_total", BUCKET_LABELS),
    MetricDefinition::at("disk_write_queue", BUCKET_LABELS),
    MetricDefinition::at("ep_bg_fetched", BUCKET_LABELS),
    MetricDefinition::at("ep_cache_miss_rate", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_items_remaining", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_items_sent", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_producer_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_2i_total_bytes", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_items_remaining", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_items_sent", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_producer_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_other_total_bytes", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_items_remaining", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_items_sent", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_producer_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_replica_total_bytes", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_items_remaining", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_items_sent", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_producer_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_views_total_bytes", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_items_remaining", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_items_sent", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_producer_count", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_dcp_xdcr_total_bytes", BUCKET_LABELS),
    MetricDefinition::at("ep_diskqueue_drain", BUCKET_LABELS),
    MetricDefinition::at("ep_diskqueue_fill", BUCKET_LABELS),
    MetricDefinition::at("ep_diskqueue_items", BUCKET_LABELS),
    MetricDefinition::at("ep_flusher_todo", BUCKET_LABELS),
    MetricDefinition::at("ep_item_commit_failed", BUCKET_LABELS),
    MetricDefinition::at("ep_kv_size", BUCKET_LABELS),
    MetricDefinition::at("ep_max_size", BUCKET_LABELS),
    MetricDefinition::at("ep_mem_high_wat", BUCKET_LABELS),
    MetricDefinition::at("ep_mem_low_wat", BUCKET_LABELS),
    MetricDefinition::at("ep_meta_data_memory", BUCKET_LABELS),
    MetricDefinition::at("ep_num_non_resident", BUCKET_LABELS),
    MetricDefinition::at("ep_num_ops_del_meta", BUCKET_LABELS),
    MetricDefinition::at("ep_num_ops_del_ret_meta", BUCKET_LABELS),
    MetricDefinition::at("ep_num_ops_get_meta", BUCKET_LABELS),
    MetricDefinition::at("ep_num_ops_set_meta", BUCKET_LABELS),
    MetricDefinition::at("ep_num_ops_set_ret_meta", BUCKET_LABELS),
    MetricDefinition::at("ep_num_value_ejects", BUCKET_LABELS),
    MetricDefinition::at("ep_oom_errors", BUCKET_LABELS),
    MetricDefinition::at("ep_ops_create", BUCKET_LABELS),
    MetricDefinition::at("ep_ops_update", BUCKET_LABELS),
    MetricDefinition::at("ep_overhead", BUCKET_LABELS),
    MetricDefinition::at("ep_queue_size", BUCKET_LABELS),
    MetricDefinition::at("ep_resident_items_rate", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_count", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_qlen", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_queue_backfillremaining", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_queue_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_queue_itemondisk", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_rebalance_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_count", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_qlen", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_queue_backfillremaining", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_queue_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_queue_itemondisk", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_replica_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_count", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_qlen", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_queue_backfillremaining", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_queue_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_queue_itemondisk", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_total_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_count", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_qlen", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_queue_backfillremaining", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_queue_backoff", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_queue_itemondisk", BUCKET_LABELS),
    MetricDefinition::at("ep_tap_user_total_backlog_size", BUCKET_LABELS),
    MetricDefinition::at("ep_tmp_oom_errors", BUCKET_LABELS),
    MetricDefinition::at("ep_vb_total", BUCKET_LABELS),
    MetricDefinition::at("evictions", BUCKET_LABELS),
    MetricDefinition::at("get_hits", BUCKET_LABELS),
    MetricDefinition::at("get_misses", BUCKET_LABELS),
    MetricDefinition::at("hibernated_requests", BUCKET_LABELS),
    MetricDefinition::at("hibernated_waked", BUCKET_LABELS),
    MetricDefinition::at("hit_ratio", BUCKET_LABELS),
    MetricDefinition::at("incr_hits", BUCKET_LABELS),
    MetricDefinition::at("incr_misses", BUCKET_LABELS),
    MetricDefinition::at("mem_actual_free", BUCKET_LABELS),
    MetricDefinition::at("mem_actual_used", BUCKET_LABELS),
    MetricDefinition::at("mem_free", BUCKET_LABELS),
    MetricDefinition::at("mem_total", BUCKET_LABELS),
    MetricDefinition::at("mem_used", BUCKET_LABELS),
    MetricDefinition::at("mem_used_sys", BUCKET_LABELS),
    MetricDefinition::at("misses", BUCKET_LABELS),
    MetricDefinition::at("ops", BUCKET_LABELS),
    MetricDefinition::at("rest_requests", BUCKET_LABELS),
    MetricDefinition::at("swap_total", BUCKET_LABELS),
    MetricDefinition::at("swap_used", BUCKET_LABELS),
    MetricDefinition::at("timestamp", BUCKET_LABELS),
    MetricDefinition::at("vb_active_eject", BUCKET_LABELS),
    MetricDefinition::at("vb_active_itm_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_active_meta_data_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_active_num", BUCKET_LABELS),
    MetricDefinition::at("vb_active_num_non_resident", BUCKET_LABELS),
    MetricDefinition::at("vb_active_ops_create", BUCKET_LABELS),
    MetricDefinition::at("vb_active_ops_update", BUCKET_LABELS),
    MetricDefinition::at("vb_active_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_active_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("vb_active_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("vb_active_queue_size", BUCKET_LABELS),
    MetricDefinition::at("vb_active_resident_items_ratio", BUCKET_LABELS),
    MetricDefinition::at("vb_avg_active_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_avg_pending_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_avg_replica_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_avg_total_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_curr_items", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_eject", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_itm_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_meta_data_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_num", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_num_non_resident", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_ops_create", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_ops_update", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_queue_size", BUCKET_LABELS),
    MetricDefinition::at("vb_pending_resident_items_ratio", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_curr_items", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_eject", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_itm_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_meta_data_memory", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_num", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_num_non_resident", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_ops_create", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_ops_update", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_queue_age", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_queue_drain", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_queue_fill", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_queue_size", BUCKET_LABELS),
    MetricDefinition::at("vb_replica_resident_items_ratio", BUCKET_LABELS),
    MetricDefinition::at("vb_total_queue_age", BUCKET_LABELS),
    MetricDefinition::at("xdc_ops", BUCKET_LABELS),
];

/// Per-bucket replication statistics, matched by substring against `op.samples` keys.
pub static BUCKET_XDCR_METRICS: &[MetricDefinition] = &[
    MetricDefinition::at("percent_completeness", BUCKET_LABELS),
    MetricDefinition::at("replication_changes_left", BUCKET_LABELS),
];
