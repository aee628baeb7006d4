//! Machine-readable sidecar written next to each chart.
//!
//! The PNG is for humans; the sidecar records the derived series that went
//! into it, plus the platform the report was generated on. Re-running a
//! chart must reproduce the series bit-for-bit even when the image bytes
//! differ.

use crate::platform::SystemInfo;
use crate::reduce::DerivedSeries;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// One reduced metric with its series per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    pub metric: String,
    pub unit: String,
    pub series: Vec<DerivedSeries>,
}

/// Complete sidecar for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    /// Report version for forward compatibility
    pub version: String,
    /// Chart name, matching the image file stem
    pub chart: String,
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Platform the report was generated on
    pub system: SystemInfo,
    /// Derived series, one set per plotted metric
    pub data: Vec<SeriesSet>,
}

impl ChartReport {
    pub fn new(chart: &str, system: SystemInfo) -> Self {
        Self {
            version: "1.0.0".to_string(),
            chart: chart.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            system,
            data: Vec::new(),
        }
    }

    pub fn push(&mut self, metric: &str, unit: &str, series: Vec<DerivedSeries>) {
        self.data.push(SeriesSet {
            metric: metric.to_string(),
            unit: unit.to_string(),
            series,
        });
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let report: ChartReport = serde_json::from_str(&content)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variant;

    fn sample_series() -> Vec<DerivedSeries> {
        Variant::ALL
            .iter()
            .map(|&variant| DerivedSeries {
                variant,
                points: vec![(512, 0.95), (4096, 2.7675)],
            })
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = ChartReport::new("test_chart", SystemInfo::detect());
        report.push("throughput", "Gbps", sample_series());
        report.write_json(&path).unwrap();

        let loaded = ChartReport::read_json(&path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.data[0].series, sample_series());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ChartReport::read_json("/nonexistent/report.json").is_err());
    }
}
