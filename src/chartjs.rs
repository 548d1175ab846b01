// Chart.js configuration schema. Field names are the external contract of the
// charting library and must not change; serde renames cover the casing.

use serde::Serialize;

use crate::ChartSpec;

pub const CHART_TYPE_LINE: &str = "line";

#[derive(Debug, Clone, Serialize)]
pub struct LineChart
{
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData
{
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset
{
    pub label: String,
    #[serde(rename = "borderColor")]
    pub border_color: String,
    // missing samples stay as explicit nulls, Chart.js renders those as gaps
    pub data: Vec<Option<f64>>,
    pub fill: bool,
}

impl LineChart
{
    pub fn from_spec(
        spec: &ChartSpec,
        time_format: &str,
    ) -> LineChart
    {
        LineChart {
            chart_type: CHART_TYPE_LINE.to_string(),
            data: ChartData {
                labels: spec.time_axis.timestamps.iter().map(|timestamp| timestamp.format(time_format).to_string()).collect(),
                datasets: spec.datasets
                    .iter()
                    .map(|dataset| ChartDataset {
                        label: dataset.attributes.label.clone(),
                        border_color: dataset.attributes.border_color.clone(),
                        data: dataset.series.values.clone(),
                        fill: false,
                    })
                    .collect(),
            },
        }
    }
}
