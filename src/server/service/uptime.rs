//! HTTP uptime probing for configured targets.
//!
//! Each probe result is appended to a bounded per-target history. A failing probe on a
//! healthy target opens an incident and the next successful probe closes it, so
//! incident durations come from probe timestamps.

use chrono::{DateTime, Utc};
use std::{collections::VecDeque, sync::Arc, time::Duration, time::Instant};
use tokio::{sync::RwLock, task::JoinSet};

use crate::server::{
    config::UptimeTarget,
    model::uptime::{CheckResult, Incident, TargetStatus},
};

/// Checks kept per target; one day at one check per minute.
pub const HISTORY_CAPACITY: usize = 1440;
const CLOSED_INCIDENT_CAPACITY: usize = 50;
const RECENT_INCIDENTS: usize = 10;
const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

struct TargetState {
    target: UptimeTarget,
    history: VecDeque<CheckResult>,
    open_incident: Option<Incident>,
    closed_incidents: VecDeque<Incident>,
}

impl TargetState {
    fn new(target: UptimeTarget) -> Self {
        Self {
            target,
            history: VecDeque::new(),
            open_incident: None,
            closed_incidents: VecDeque::new(),
        }
    }

    fn record(&mut self, result: CheckResult) {
        if result.up {
            if let Some(mut incident) = self.open_incident.take() {
                incident.ended_at = Some(result.checked_at);
                tracing::info!(
                    target_name = %self.target.name,
                    duration_seconds = incident.duration_seconds(),
                    "Uptime target recovered"
                );
                if self.closed_incidents.len() == CLOSED_INCIDENT_CAPACITY {
                    self.closed_incidents.pop_front();
                }
                self.closed_incidents.push_back(incident);
            }
        } else {
            match &mut self.open_incident {
                Some(incident) => incident.last_error = result.error.clone(),
                None => {
                    tracing::warn!(
                        target_name = %self.target.name,
                        url = %self.target.url,
                        error = ?result.error,
                        "Uptime target is down"
                    );
                    self.open_incident = Some(Incident {
                        started_at: result.checked_at,
                        ended_at: None,
                        last_error: result.error.clone(),
                    });
                }
            }
        }

        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(result);
    }

    fn status(&self) -> TargetStatus {
        let last = self.history.back();
        let checks = self.history.len();
        let (uptime_percentage, avg_response_ms) = if checks == 0 {
            (None, None)
        } else {
            let up = self.history.iter().filter(|c| c.up).count();
            let total_ms: u64 = self.history.iter().map(|c| c.response_ms).sum();
            (
                Some(up as f64 / checks as f64 * 100.0),
                Some(total_ms as f64 / checks as f64),
            )
        };

        TargetStatus {
            name: self.target.name.clone(),
            url: self.target.url.clone(),
            up: last.map(|c| c.up),
            last_checked_at: last.map(|c| c.checked_at),
            last_status_code: last.and_then(|c| c.status_code),
            last_response_ms: last.map(|c| c.response_ms),
            uptime_percentage,
            avg_response_ms,
            checks,
            open_incident: self.open_incident.clone(),
            recent_incidents: self
                .closed_incidents
                .iter()
                .rev()
                .take(RECENT_INCIDENTS)
                .cloned()
                .collect(),
        }
    }
}

/// Shared uptime monitor, cheap to clone.
#[derive(Clone)]
pub struct UptimeMonitoringService {
    client: reqwest::Client,
    targets: Arc<RwLock<Vec<TargetState>>>,
}

impl UptimeMonitoringService {
    pub fn new(client: reqwest::Client, targets: Vec<UptimeTarget>) -> Self {
        Self {
            client,
            targets: Arc::new(RwLock::new(
                targets.into_iter().map(TargetState::new).collect(),
            )),
        }
    }

    /// Probes every target concurrently and records the results.
    ///
    /// # Returns
    /// - `Vec<TargetStatus>` - Status of every target after this pass
    pub async fn check_all(&self) -> Vec<TargetStatus> {
        let targets: Vec<UptimeTarget> = self
            .targets
            .read()
            .await
            .iter()
            .map(|t| t.target.clone())
            .collect();

        let mut probes = JoinSet::new();
        for target in targets {
            let client = self.client.clone();
            probes.spawn(async move {
                let result = probe(&client, &target.url).await;
                (target.name, result)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!("Uptime probe task failed: {}", e),
            }
        }

        for (name, result) in results {
            self.record(&name, result).await;
        }

        self.status().await
    }

    /// Records one probe result for the target named `name`; unknown names are ignored.
    pub async fn record(&self, name: &str, result: CheckResult) {
        let mut targets = self.targets.write().await;
        match targets.iter_mut().find(|t| t.target.name == name) {
            Some(state) => state.record(result),
            None => tracing::debug!(target_name = name, "Ignoring result for unknown target"),
        }
    }

    /// Current status of every target in configuration order.
    pub async fn status(&self) -> Vec<TargetStatus> {
        self.targets
            .read()
            .await
            .iter()
            .map(TargetState::status)
            .collect()
    }

    /// Number of targets whose latest probe failed.
    pub async fn services_down(&self) -> usize {
        self.targets
            .read()
            .await
            .iter()
            .filter(|t| t.history.back().is_some_and(|c| !c.up))
            .count()
    }
}

/// Performs one GET request; 2xx and 3xx responses count as up.
async fn probe(client: &reqwest::Client, url: &str) -> CheckResult {
    let checked_at: DateTime<Utc> = Utc::now();
    let start = Instant::now();

    let response = client.get(url).timeout(CHECK_TIMEOUT).send().await;
    let response_ms = start.elapsed().as_millis() as u64;

    match response {
        Ok(response) => {
            let status = response.status();
            let up = status.is_success() || status.is_redirection();
            CheckResult {
                checked_at,
                up,
                status_code: Some(status.as_u16()),
                response_ms,
                error: (!up).then(|| format!("HTTP {}", status)),
            }
        }
        Err(e) => CheckResult {
            checked_at,
            up: false,
            status_code: e.status().map(|s| s.as_u16()),
            response_ms,
            error: Some(e.to_string()),
        },
    }
}
