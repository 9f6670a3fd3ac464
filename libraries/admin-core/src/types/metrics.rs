/// Registration metric windows
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A relative time window ending at the report instant
///
/// Windows overlap: a record that falls in the 24 hour window also falls in
/// every longer one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricWindow {
    pub label: String,
    pub threshold_hours: u32,
}

impl MetricWindow {
    pub fn new(label: impl Into<String>, threshold_hours: u32) -> Self {
        Self {
            label: label.into(),
            threshold_hours,
        }
    }

    /// The fixed report windows: 24h, 7d, 15d, 30d
    pub fn standard() -> Vec<MetricWindow> {
        vec![
            MetricWindow::new("Last 24 Hours", 24),
            MetricWindow::new("Last 7 Days", 7 * 24),
            MetricWindow::new("Last 15 Days", 15 * 24),
            MetricWindow::new("Last 30 Days", 30 * 24),
        ]
    }

    pub fn threshold(&self) -> Duration {
        Duration::hours(i64::from(self.threshold_hours))
    }

    /// Whether a record of this age belongs to the window
    ///
    /// Negative ages (timestamps ahead of the report clock) are inside
    /// every window.
    pub fn contains(&self, age: Duration) -> bool {
        age <= self.threshold()
    }
}
