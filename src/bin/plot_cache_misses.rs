//! Cache misses vs message size chart.
//!
//! Two panels side by side: L1 and last-level cache miss counts (in
//! millions), each averaged across all thread counts per message size.

use anyhow::{Context, Result};
use ipc_bench_plots::{data, mean_series, ChartConfig, ChartReport, PanelSpec, SystemInfo, Variant};

const CHART_NAME: &str = "cache_misses_vs_message_size";

/// Raw event counts are plotted in millions
const TO_MILLIONS: f64 = 1e-6;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    println!("{}", "=".repeat(60));
    println!("Plot 3: Cache Misses vs Message Size");
    println!("{}", "=".repeat(60));

    let l1 = data::l1_misses();
    let llc = data::llc_misses();
    l1.validate()?;
    llc.validate()?;

    println!();
    println!("Total experiments loaded: {}", l1.experiment_count());
    println!(
        "Implementations: {}",
        Variant::ALL.map(|v| v.label()).join(", ")
    );

    let l1_series = mean_series(&l1)?;
    let llc_series = mean_series(&llc)?;
    let system = SystemInfo::detect();

    println!("\nGenerating plot...");
    let config = ChartConfig::default();
    let left = PanelSpec {
        title: "L1 Cache Misses vs Message Size",
        x_label: "Message Size (KB)",
        y_label: "L1 Cache Misses (Millions)",
        series: &l1_series,
        axis: l1.axis(),
        y_scale: TO_MILLIONS,
    };
    let right = PanelSpec {
        title: "LLC Cache Misses vs Message Size",
        x_label: "Message Size (KB)",
        y_label: "LLC Cache Misses (Millions)",
        series: &llc_series,
        axis: llc.axis(),
        y_scale: TO_MILLIONS,
    };
    let path = ipc_bench_plots::render::render_dual_chart(
        &config,
        CHART_NAME,
        "Cache Misses vs Message Size (averaged across all thread counts)",
        &left,
        &right,
        &system.annotation(),
    )?;

    let mut report = ChartReport::new(CHART_NAME, system);
    report.push(l1.metric(), l1.unit(), l1_series);
    report.push(llc.metric(), llc.unit(), llc_series);
    let sidecar = config.output_dir.join(format!("{CHART_NAME}.json"));
    report
        .write_json(&sidecar)
        .with_context(|| format!("failed to write {}", sidecar.display()))?;

    println!("\nPlot saved: {}", path.display());
    Ok(())
}
