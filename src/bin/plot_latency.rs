//! Latency vs thread count chart.
//!
//! Averages round-trip latency across all message sizes for each thread
//! count and draws one line per implementation variant.

use anyhow::{Context, Result};
use ipc_bench_plots::{data, mean_series, ChartConfig, ChartReport, PanelSpec, SystemInfo, Variant};

const CHART_NAME: &str = "latency_vs_thread_count";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    println!("{}", "=".repeat(60));
    println!("Plot 2: Latency vs Thread Count");
    println!("{}", "=".repeat(60));

    let table = data::latency();
    table.validate()?;

    println!();
    println!("Total experiments loaded: {}", table.experiment_count());
    println!(
        "Implementations: {}",
        Variant::ALL.map(|v| v.label()).join(", ")
    );

    let series = mean_series(&table)?;
    let system = SystemInfo::detect();

    println!("\nGenerating plot...");
    let config = ChartConfig::default();
    let panel = PanelSpec {
        title: "Latency vs Thread Count (averaged across all message sizes)",
        x_label: "Thread Count",
        y_label: "Average Latency (us)",
        series: &series,
        axis: table.axis(),
        y_scale: 1.0,
    };
    let path = ipc_bench_plots::render::render_line_chart(
        &config,
        CHART_NAME,
        &panel,
        &system.annotation(),
    )?;

    let mut report = ChartReport::new(CHART_NAME, system);
    report.push(table.metric(), table.unit(), series);
    let sidecar = config.output_dir.join(format!("{CHART_NAME}.json"));
    report
        .write_json(&sidecar)
        .with_context(|| format!("failed to write {}", sidecar.display()))?;

    println!("\nPlot saved: {}", path.display());
    Ok(())
}
