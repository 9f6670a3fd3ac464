//! Chart data for the registration metrics.

use crate::metrics::MetricsReport;
use serde::Serialize;

/// Parallel labels/values, one pair per metric window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl ChartData {
    /// Bar lengths scaled so the largest value spans `width` cells
    ///
    /// Non-zero values always get at least one cell.
    pub fn bars(&self, width: usize) -> Vec<usize> {
        let max = self.values.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return vec![0; self.values.len()];
        }

        self.values
            .iter()
            .map(|&value| match value {
                0 => 0,
                v => (v * width / max).max(1),
            })
            .collect()
    }
}

impl From<&MetricsReport> for ChartData {
    fn from(report: &MetricsReport) -> Self {
        let (labels, values) = report
            .windows
            .iter()
            .map(|entry| (entry.window.label.clone(), entry.count))
            .unzip();
        Self { labels, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: &[usize]) -> ChartData {
        ChartData {
            labels: values.iter().map(|v| format!("w{v}")).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn bars_scale_to_largest_value() {
        assert_eq!(chart(&[1, 2, 4]).bars(40), vec![10, 20, 40]);
    }

    #[test]
    fn small_values_still_show() {
        assert_eq!(chart(&[1, 1000]).bars(10), vec![1, 10]);
    }

    #[test]
    fn all_zero_chart_has_no_bars() {
        assert_eq!(chart(&[0, 0]).bars(10), vec![0, 0]);
        assert!(ChartData::default().bars(10).is_empty());
    }
}
