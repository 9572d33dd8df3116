//! Request timing middleware and in-process performance metrics.
//!
//! `track_performance` wraps every routed request, records its method, matched route,
//! status and duration into the shared `PerformanceTracker`, and adds an
//! `x-response-time-ms` header. The tracker keeps per-endpoint aggregates in a `DashMap`
//! per-second buckets for windowed rate, error and latency metrics, and bounded rings
//! of recent and slow requests.

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    collections::{BTreeMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Instant,
};

use crate::server::model::monitoring::{
    EndpointStats, MetricsSnapshot, RequestSample, METRIC_AVG_RESPONSE_MS, METRIC_ERROR_RATE,
    METRIC_P95_RESPONSE_MS, METRIC_REQUESTS_PER_MINUTE, METRIC_TOTAL_REQUESTS,
};

pub const RESPONSE_TIME_HEADER: &str = "x-response-time-ms";

/// Requests at or above this duration are kept in the slow request list.
pub const SLOW_REQUEST_THRESHOLD_MS: u64 = 1000;
/// Length of the window behind the rate, error rate and latency metrics.
pub const WINDOW_SECONDS: i64 = 60;
const RECENT_CAPACITY: usize = 1000;
const SLOW_CAPACITY: usize = 100;

/// Requests completed within one wall-clock second.
#[derive(Debug, Default, Clone, Copy)]
struct SecondBucket {
    requests: u64,
    errors: u64,
    total_ms: u64,
}

#[derive(Default)]
struct TrackerInner {
    endpoints: DashMap<(String, String), EndpointStats>,
    /// Keyed by unix second; only the last `WINDOW_SECONDS` seconds are kept.
    buckets: Mutex<BTreeMap<i64, SecondBucket>>,
    recent: Mutex<VecDeque<RequestSample>>,
    slow: Mutex<VecDeque<RequestSample>>,
    total_requests: AtomicU64,
}

/// Shared, cheaply cloneable request metrics store.
#[derive(Clone, Default)]
pub struct PerformanceTracker {
    inner: Arc<TrackerInner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed request.
    ///
    /// # Arguments
    /// - `method` - HTTP method
    /// - `path` - Matched route template, or the raw path for unmatched requests
    /// - `status` - Response status code
    /// - `duration_ms` - Handler duration in milliseconds
    /// - `at` - Completion time
    pub fn record(&self, method: &str, path: &str, status: u16, duration_ms: u64, at: DateTime<Utc>) {
        let inner = &self.inner;

        inner.total_requests.fetch_add(1, Ordering::Relaxed);

        {
            let mut buckets = lock(&inner.buckets);
            let bucket = buckets.entry(at.timestamp()).or_default();
            bucket.requests += 1;
            bucket.total_ms += duration_ms;
            if status >= 500 {
                bucket.errors += 1;
            }

            if let Some(&newest) = buckets.keys().next_back() {
                buckets.retain(|&second, _| second > newest - WINDOW_SECONDS);
            }
        }

        inner
            .endpoints
            .entry((method.to_string(), path.to_string()))
            .or_insert_with(|| EndpointStats::new(method.to_string(), path.to_string()))
            .record(status, duration_ms);

        let sample = RequestSample {
            method: method.to_string(),
            path: path.to_string(),
            status,
            duration_ms,
            at,
        };

        if duration_ms >= SLOW_REQUEST_THRESHOLD_MS {
            tracing::warn!(method, path, status, duration_ms, "Slow request");
            let mut slow = lock(&inner.slow);
            if slow.len() == SLOW_CAPACITY {
                slow.pop_front();
            }
            slow.push_back(sample.clone());
        }

        let mut recent = lock(&inner.recent);
        if recent.len() == RECENT_CAPACITY {
            recent.pop_front();
        }
        recent.push_back(sample);
    }

    /// Computes the current request metrics.
    ///
    /// `total_requests` covers every request since startup. Every other value covers the
    /// last `WINDOW_SECONDS` seconds before `now`; p95 is taken over the samples of that
    /// window still held in the recent ring.
    pub fn snapshot(&self, now: DateTime<Utc>) -> MetricsSnapshot {
        let inner = &self.inner;
        let total = inner.total_requests.load(Ordering::Relaxed);

        let window = {
            let buckets = lock(&inner.buckets);
            let first_second = now.timestamp() - WINDOW_SECONDS + 1;
            buckets
                .range(first_second..=now.timestamp())
                .fold(SecondBucket::default(), |acc, (_, b)| SecondBucket {
                    requests: acc.requests + b.requests,
                    errors: acc.errors + b.errors,
                    total_ms: acc.total_ms + b.total_ms,
                })
        };

        let (error_rate, avg_ms) = if window.requests == 0 {
            (0.0, 0.0)
        } else {
            (
                window.errors as f64 / window.requests as f64 * 100.0,
                window.total_ms as f64 / window.requests as f64,
            )
        };

        let p95 = {
            let recent = lock(&inner.recent);
            let window_start = now - Duration::seconds(WINDOW_SECONDS);
            let durations: Vec<u64> = recent
                .iter()
                .filter(|s| s.at > window_start)
                .map(|s| s.duration_ms)
                .collect();
            percentile(durations, 95.0)
        };

        MetricsSnapshot::new(now)
            .with(METRIC_TOTAL_REQUESTS, total as f64)
            .with(METRIC_ERROR_RATE, error_rate)
            .with(METRIC_AVG_RESPONSE_MS, avg_ms)
            .with(METRIC_P95_RESPONSE_MS, p95)
            .with(METRIC_REQUESTS_PER_MINUTE, window.requests as f64)
    }

    /// Per-endpoint aggregates, busiest first.
    pub fn endpoint_stats(&self) -> Vec<EndpointStats> {
        let mut stats: Vec<EndpointStats> = self
            .inner
            .endpoints
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.path.cmp(&b.path))
                .then_with(|| a.method.cmp(&b.method))
        });
        stats
    }

    /// Slow requests, newest first.
    pub fn slow_requests(&self) -> Vec<RequestSample> {
        lock(&self.inner.slow).iter().rev().cloned().collect()
    }
}

/// Nearest-rank percentile; 0 for an empty set.
fn percentile(mut values: Vec<u64>, pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let rank = ((pct / 100.0) * values.len() as f64).ceil() as usize;
    let index = rank.clamp(1, values.len()) - 1;
    values[index] as f64
}

/// Axum middleware timing each request into the `PerformanceTracker`.
///
/// Installed with `route_layer` so the `MatchedPath` extension is present and metrics
/// group by route template instead of concrete IDs.
pub async fn track_performance(
    State(tracker): State<PerformanceTracker>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let start = Instant::now();

    let mut response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    tracker.record(&method, &path, status, duration_ms, Utc::now());

    if let Ok(value) = HeaderValue::from_str(&duration_ms.to_string()) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }

    response
}
