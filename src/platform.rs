//! Best-effort host probe for the chart annotation.
//!
//! Reads CPU model, total RAM, and kernel release from procfs. Any field
//! that cannot be read degrades to `"Unknown"`; the probe never fails the
//! run. The fallback policy lives entirely in [`SystemInfo::detect`] so
//! call sites never handle probe errors.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;

/// Fixed description of the reference benchmark host, stamped on every
/// chart after the probed lines.
pub const HOST_DESCRIPTION: &str =
    "Ubuntu 24.04.3 LTS (x86_64) | Intel i5-12450H (12th Gen) | 16 GB RAM | Intel UHD Graphics";

const UNKNOWN: &str = "Unknown";

/// Host information for the annotation box and the JSON sidecar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// CPU model name (e.g., "12th Gen Intel(R) Core(TM) i5-12450H")
    pub cpu_model: String,
    /// Number of logical cores
    pub logical_cores: usize,
    /// Total system memory, human readable
    pub total_ram: String,
    /// Kernel release string
    pub kernel: String,
}

impl SystemInfo {
    /// Probe the host, substituting `"Unknown"` for anything unreadable.
    pub fn detect() -> Self {
        Self {
            cpu_model: detect_cpu_model().unwrap_or_else(|| {
                debug!("cpu model probe failed, using fallback");
                UNKNOWN.to_string()
            }),
            logical_cores: num_cpus::get(),
            total_ram: detect_total_ram().unwrap_or_else(|| {
                debug!("memory probe failed, using fallback");
                UNKNOWN.to_string()
            }),
            kernel: detect_kernel().unwrap_or_else(|| {
                debug!("kernel probe failed, using fallback");
                UNKNOWN.to_string()
            }),
        }
    }

    /// The multi-line annotation text stamped on each chart: the probed
    /// fields followed by [`HOST_DESCRIPTION`].
    pub fn annotation(&self) -> String {
        format!(
            "CPU: {}\nRAM: {}\nKernel: {}\n{}",
            self.cpu_model, self.total_ram, self.kernel, HOST_DESCRIPTION
        )
    }
}

fn detect_cpu_model() -> Option<String> {
    let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok()?;
    cpuinfo
        .lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split(':').nth(1))
        .map(|s| s.trim().to_string())
}

fn detect_total_ram() -> Option<String> {
    let meminfo = fs::read_to_string("/proc/meminfo").ok()?;
    meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal:"))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|v| v.parse::<u64>().ok())
        .map(format_mem_kb)
}

fn detect_kernel() -> Option<String> {
    let version = fs::read_to_string("/proc/version").ok()?;
    version.split_whitespace().nth(2).map(|v| v.to_string())
}

fn format_mem_kb(kb: u64) -> String {
    format!("{:.1} GiB", kb as f64 / (1024.0 * 1024.0))
}
