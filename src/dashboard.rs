use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AssembleError, ChartId, ChartInput, DatasetAttributes, Series};

/// One chart on the dashboard: the canvas it binds to and the series it draws,
/// in legend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout
{
    pub chart: ChartId,
    pub canvas_id: String,
    pub series_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard
{
    pub charts: Vec<ChartLayout>,
    pub attributes: BTreeMap<String, DatasetAttributes>,
    /// strftime format for the time axis labels
    pub time_format: String,
}

/// Metrics as delivered by the collector: one shared time axis plus named
/// value rows aligned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsFile
{
    pub timestamps: Vec<DateTime<Utc>>,
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}

impl Default for Dashboard
{
    fn default() -> Self
    {
        let layout = |chart, canvas_id: &str, series_names: &[&str]| ChartLayout {
            chart,
            canvas_id: canvas_id.to_string(),
            series_names: series_names.iter().map(|name| name.to_string()).collect(),
        };
        let attributes = |label: &str, border_color: &str| DatasetAttributes {
            label: label.to_string(),
            border_color: border_color.to_string(),
        };
        Dashboard {
            charts: vec![
                layout(ChartId::Machines, "myLine", &["machines_on", "machines_maintenance", "machines_excluded", "machines_scaled"]),
                layout(ChartId::Cpu, "myLineCPU", &["cpu"]),
                layout(ChartId::Memory, "myLineMemory", &["memory"]),
                layout(ChartId::LoadIndex, "myLineIndex", &["load_index"]),
                layout(ChartId::Session, "myLineSession", &["session"]),
            ],
            attributes: BTreeMap::from([
                ("machines_on".to_string(), attributes("Machines On", "#FFB266")),
                // label spelling taken over verbatim from the dashboard this replaces
                ("machines_maintenance".to_string(), attributes("Machines Maintenace", "#004C99")),
                ("machines_excluded".to_string(), attributes("Machines Excluded", "#3E751D")),
                ("machines_scaled".to_string(), attributes("Machines Scaled", "#FFFF33")),
                ("cpu".to_string(), attributes("CPU", "#FF0000")),
                ("memory".to_string(), attributes("Memory", "#009900")),
                ("load_index".to_string(), attributes("Load Index", "#9999FF")),
                ("session".to_string(), attributes("Session", "#FF007F")),
            ]),
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

impl Dashboard
{
    /// Pairs the collected series values with the charts that draw them,
    /// keeping the per chart series order of the layout.
    pub fn chart_inputs(
        &self,
        series: &BTreeMap<String, Vec<Option<f64>>>,
    ) -> Result<Vec<ChartInput>, AssembleError>
    {
        let mut chart_inputs = Vec::with_capacity(self.charts.len());
        for layout in &self.charts
        {
            let mut chart_series = Vec::with_capacity(layout.series_names.len());
            for name in &layout.series_names
            {
                let values = series
                    .get(name)
                    .ok_or_else(|| AssembleError::MissingSeries { chart: layout.chart, series: name.clone() })?;
                chart_series.push(Series { name: name.clone(), values: values.clone() });
            }
            chart_inputs.push(ChartInput { chart: layout.chart, series: chart_series });
        }
        Ok(chart_inputs)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn series_values(entries: &[(&str, &[f64])]) -> BTreeMap<String, Vec<Option<f64>>>
    {
        entries
            .iter()
            .map(|(name, values)| (name.to_string(), values.iter().copied().map(Some).collect()))
            .collect()
    }

    #[test]
    fn default_dashboard_matches_the_original_template()
    {
        let dashboard = Dashboard::default();

        let charts: Vec<_> = dashboard.charts.iter().map(|layout| layout.chart).collect();
        assert_eq!(charts, vec![ChartId::Machines, ChartId::Cpu, ChartId::Memory, ChartId::LoadIndex, ChartId::Session]);
        assert_eq!(dashboard.charts[0].canvas_id, "myLine");
        assert_eq!(
            dashboard.charts[0].series_names,
            vec!["machines_on", "machines_maintenance", "machines_excluded", "machines_scaled"]
        );
        assert_eq!(dashboard.attributes["cpu"].label, "CPU");
        assert_eq!(dashboard.attributes["cpu"].border_color, "#FF0000");
        assert_eq!(dashboard.attributes["session"].border_color, "#FF007F");
    }

    #[test]
    fn chart_inputs_keeps_layout_order()
    {
        let dashboard = Dashboard::default();
        let series = series_values(&[
            ("machines_on", &[1.]),
            ("machines_maintenance", &[0.]),
            ("machines_excluded", &[0.]),
            ("machines_scaled", &[2.]),
            ("cpu", &[10.]),
            ("memory", &[50.]),
            ("load_index", &[0.5]),
            ("session", &[3.]),
        ]);

        let chart_inputs = dashboard.chart_inputs(&series).unwrap();

        assert_eq!(chart_inputs.len(), 5);
        let machine_series: Vec<_> = chart_inputs[0].series.iter().map(|series| series.name.as_str()).collect();
        assert_eq!(machine_series, vec!["machines_on", "machines_maintenance", "machines_excluded", "machines_scaled"]);
        assert_eq!(chart_inputs[4].chart, ChartId::Session);
    }

    #[test]
    fn chart_inputs_fails_when_a_layout_series_is_absent()
    {
        let dashboard = Dashboard::default();
        let series = series_values(&[("cpu", &[10.])]);

        let error = dashboard.chart_inputs(&series).unwrap_err();

        assert_eq!(error, AssembleError::MissingSeries { chart: ChartId::Machines, series: "machines_on".to_string() });
    }

    #[test]
    fn dashboard_round_trips_through_json()
    {
        let dashboard = Dashboard::default();

        let encoded = serde_json::to_string(&dashboard).unwrap();
        let decoded: Dashboard = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, dashboard);
    }
}
