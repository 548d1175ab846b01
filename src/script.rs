use std::collections::BTreeMap;
use log::*;

use crate::chartjs::LineChart;
use crate::dashboard::Dashboard;
use crate::{ChartId, ChartSpec};

// variable names kept from the dashboard script this generator replaces
fn context_var(
    chart: ChartId,
) -> &'static str
{
    match chart {
        ChartId::Machines => "ctxLine",
        ChartId::Cpu => "ctxLineCPU",
        ChartId::Memory => "ctxLineMEM",
        ChartId::LoadIndex => "ctxLineIND",
        ChartId::Session => "ctxLineSESS",
    }
}

fn chart_var(
    chart: ChartId,
) -> &'static str
{
    match chart {
        ChartId::Machines => "myLineChart",
        ChartId::Cpu => "myLineChartCPU",
        ChartId::Memory => "myLineChartMEM",
        ChartId::LoadIndex => "myLineChartIND",
        ChartId::Session => "myLineChartSESS",
    }
}

/// Renders the dashboard bootstrap script: one canvas lookup and one
/// `new Chart(...)` call per chart, configurations encoded through serde_json.
pub fn render_script(
    dashboard: &Dashboard,
    charts: &BTreeMap<ChartId, ChartSpec>,
) -> Result<String, serde_json::Error>
{
    let mut script = String::new();
    for layout in &dashboard.charts
    {
        let Some(spec) = charts.get(&layout.chart) else {
            warn!("chart {} has a layout but no assembled configuration, skipping", layout.chart);
            continue;
        };
        let config = LineChart::from_spec(spec, &dashboard.time_format);
        script.push_str(&format!("var {} = document.getElementById(\"{}\");\n", context_var(layout.chart), layout.canvas_id));
        script.push_str(&format!("var {} = new Chart({}, {});\n\n", chart_var(layout.chart), context_var(layout.chart), serde_json::to_string_pretty(&config)?));
    }
    Ok(script)
}
