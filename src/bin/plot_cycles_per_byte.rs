//! CPU cycles per byte transferred vs message size chart.
//!
//! For each cell the per-observation ratio cycles/bytes is computed first
//! and then averaged across thread counts; the ratio of the averages would
//! be a different (and wrong) number.

use anyhow::{Context, Result};
use ipc_bench_plots::{
    data, ratio_series, ChartConfig, ChartReport, PanelSpec, SystemInfo, Variant,
};

const CHART_NAME: &str = "cycles_per_byte_vs_message_size";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    println!("{}", "=".repeat(60));
    println!("Plot 4: CPU Cycles per Byte Transferred");
    println!("{}", "=".repeat(60));

    let cycles = data::cpu_cycles();
    let bytes = data::total_bytes();
    cycles.validate()?;
    bytes.validate()?;

    println!();
    println!("Total experiments loaded: {}", cycles.experiment_count());
    println!(
        "Implementations: {}",
        Variant::ALL.map(|v| v.label()).join(", ")
    );

    let series = ratio_series(&cycles, &bytes)?;
    let system = SystemInfo::detect();

    println!("\nGenerating plot...");
    let config = ChartConfig::default();
    let panel = PanelSpec {
        title: "CPU Cycles per Byte Transferred vs Message Size (averaged across all thread counts)",
        x_label: "Message Size (KB)",
        y_label: "CPU Cycles per Byte",
        series: &series,
        axis: cycles.axis(),
        y_scale: 1.0,
    };
    let path = ipc_bench_plots::render::render_line_chart(
        &config,
        CHART_NAME,
        &panel,
        &system.annotation(),
    )?;

    let mut report = ChartReport::new(CHART_NAME, system);
    report.push("cycles_per_byte", "cycles/byte", series);
    let sidecar = config.output_dir.join(format!("{CHART_NAME}.json"));
    report
        .write_json(&sidecar)
        .with_context(|| format!("failed to write {}", sidecar.display()))?;

    println!("\nPlot saved: {}", path.display());
    Ok(())
}
