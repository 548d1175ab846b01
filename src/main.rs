use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::*;

use chartgen::dashboard::{Dashboard, MetricsFile};
use chartgen::script::render_script;
use chartgen::{assemble, TimeAxis};

#[derive(Debug, Parser)]
#[clap(version, about, long_about = None)]
pub struct Opts
{
    /// Metrics input file (JSON: timestamps plus named series)
    #[arg(short = 'm', long, value_name = "file")]
    metrics: PathBuf,
    /// Dashboard layout file (JSON), built-in layout when not set
    #[arg(short = 'd', long, value_name = "file")]
    dashboard: Option<PathBuf>,
    /// Output script file, stdout when not set
    #[arg(short = 'o', long, value_name = "file")]
    output: Option<PathBuf>,
}

fn main() -> Result<()>
{
    env_logger::init();
    let args = Opts::parse();

    let metrics_data = fs::read_to_string(&args.metrics)
        .with_context(|| format!("reading metrics file {}", args.metrics.display()))?;
    let metrics: MetricsFile = serde_json::from_str(&metrics_data)
        .with_context(|| format!("parsing metrics file {}", args.metrics.display()))?;

    let dashboard = match &args.dashboard {
        Some(path) => {
            let dashboard_data = fs::read_to_string(path)
                .with_context(|| format!("reading dashboard file {}", path.display()))?;
            serde_json::from_str(&dashboard_data)
                .with_context(|| format!("parsing dashboard file {}", path.display()))?
        },
        None => Dashboard::default(),
    };

    let time_axis = TimeAxis { timestamps: metrics.timestamps };
    let chart_inputs = dashboard.chart_inputs(&metrics.series)?;
    let charts = assemble(&time_axis, &chart_inputs, &dashboard.attributes)?;
    info!("assembled {} charts from {} timestamps", charts.len(), time_axis.len());

    let script = render_script(&dashboard, &charts)?;
    match &args.output {
        Some(path) => fs::write(path, script).with_context(|| format!("writing script file {}", path.display()))?,
        None => print!("{}", script),
    }
    Ok(())
}
