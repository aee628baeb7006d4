//! Throughput vs message size chart.
//!
//! Averages throughput across all thread counts for each message size and
//! draws one line per implementation variant on a log-scale size axis.

use anyhow::{Context, Result};
use ipc_bench_plots::{data, mean_series, ChartConfig, ChartReport, PanelSpec, SystemInfo, Variant};

const CHART_NAME: &str = "throughput_vs_message_size";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    println!("{}", "=".repeat(60));
    println!("Plot 1: Throughput vs Message Size");
    println!("{}", "=".repeat(60));

    let table = data::throughput();
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
        title: "Throughput vs Message Size (averaged across all thread counts)",
        x_label: "Message Size (KB)",
        y_label: "Throughput (Gbps)",
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
