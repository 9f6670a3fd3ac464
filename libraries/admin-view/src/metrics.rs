//! Registration metrics
//!
//! Counts users per relative time window. Windows overlap, so counts are
//! non-decreasing from the shortest window to the longest.

use crate::chart::ChartData;
use admin_core::{MetricWindow, UserRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Count for a single window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowCount {
    pub window: MetricWindow,
    pub count: usize,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    /// The single instant every window was measured against
    pub generated_at: DateTime<Utc>,

    /// One entry per window, shortest first
    pub windows: Vec<WindowCount>,

    /// Records considered
    pub total: usize,

    /// Records left out of every window because `createdAt` was missing or
    /// unparsable
    pub malformed: usize,
}

impl MetricsReport {
    /// Count for the window with this label
    pub fn count_for(&self, label: &str) -> Option<usize> {
        self.windows
            .iter()
            .find(|entry| entry.window.label == label)
            .map(|entry| entry.count)
    }

    pub fn counts(&self) -> Vec<usize> {
        self.windows.iter().map(|entry| entry.count).collect()
    }

    /// Labels and values for the registration chart
    pub fn chart(&self) -> ChartData {
        ChartData::from(self)
    }
}

/// Buckets a snapshot into metric windows
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    windows: Vec<MetricWindow>,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(MetricWindow::standard())
    }
}

impl MetricsAggregator {
    /// Create an aggregator over custom windows (reordered shortest first)
    pub fn new(mut windows: Vec<MetricWindow>) -> Self {
        windows.sort_by_key(|w| w.threshold_hours);
        Self { windows }
    }

    pub fn windows(&self) -> &[MetricWindow] {
        &self.windows
    }

    /// Aggregate against the current clock, read once for the whole pass
    pub fn aggregate_now(&self, records: &[UserRecord]) -> MetricsReport {
        self.aggregate(records, Utc::now())
    }

    /// Aggregate against a fixed instant
    ///
    /// Never fails: a record whose `createdAt` cannot be read is logged,
    /// counted in `malformed`, and left out of every window.
    pub fn aggregate(&self, records: &[UserRecord], now: DateTime<Utc>) -> MetricsReport {
        let mut counts = vec![0usize; self.windows.len()];
        let mut malformed = 0;

        for record in records {
            let created_at = match record.created_at_utc() {
                Ok(created_at) => created_at,
                Err(e) => {
                    warn!(
                        user_id = %record.id,
                        created_at = ?record.created_at,
                        error = %e,
                        "Excluding user from registration metrics"
                    );
                    malformed += 1;
                    continue;
                }
            };

            let age = now - created_at;
            for (count, window) in counts.iter_mut().zip(&self.windows) {
                if window.contains(age) {
                    *count += 1;
                }
            }
        }

        if malformed > 0 {
            warn!(
                malformed,
                total = records.len(),
                "Some users have unreadable creation timestamps"
            );
        }

        let windows = self
            .windows
            .iter()
            .cloned()
            .zip(counts)
            .map(|(window, count)| WindowCount { window, count })
            .collect();

        let report = MetricsReport {
            generated_at: now,
            windows,
            total: records.len(),
            malformed,
        };

        debug!(counts = ?report.counts(), "Computed registration metrics");
        report
    }
}
