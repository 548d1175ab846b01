use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chartjs;
pub mod dashboard;
pub mod script;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId
{
    Machines,
    Cpu,
    Memory,
    LoadIndex,
    Session,
}

impl fmt::Display for ChartId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let name = match self {
            ChartId::Machines => "machines",
            ChartId::Cpu => "cpu",
            ChartId::Memory => "memory",
            ChartId::LoadIndex => "load-index",
            ChartId::Session => "session",
        };
        write!(f, "{}", name)
    }
}

/// Timestamps shared by every chart of one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis
{
    pub timestamps: Vec<DateTime<Utc>>,
}

impl TimeAxis
{
    pub fn len(&self) -> usize
    {
        self.timestamps.len()
    }
    pub fn is_empty(&self) -> bool
    {
        self.timestamps.is_empty()
    }
}

/// Values aligned position by position to the time axis; None marks a missing sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series
{
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Display metadata per series, taken from configuration and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAttributes
{
    pub label: String,
    pub border_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInput
{
    pub chart: ChartId,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset
{
    pub series: Series,
    pub attributes: DatasetAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec
{
    pub chart: ChartId,
    pub time_axis: TimeAxis,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError
{
    #[error("time axis contains no timestamps")]
    EmptyTimeAxis,
    #[error("time axis is not ordered: timestamp {position} is earlier than its predecessor")]
    UnorderedTimeAxis { position: usize },
    #[error("chart {chart}: series {series} has {actual} values, the time axis has {expected}")]
    LengthMismatch { chart: ChartId, series: String, expected: usize, actual: usize },
    #[error("chart {chart}: series {series} has no dataset attributes configured")]
    MissingAttributes { chart: ChartId, series: String },
    #[error("chart {chart}: series {series} is not present in the metrics input")]
    MissingSeries { chart: ChartId, series: String },
}

pub fn assemble(
    time_axis: &TimeAxis,
    chart_inputs: &[ChartInput],
    attributes: &BTreeMap<String, DatasetAttributes>,
) -> Result<BTreeMap<ChartId, ChartSpec>, AssembleError>
{
    if time_axis.is_empty()
    {
        return Err(AssembleError::EmptyTimeAxis);
    }
    if let Some((position, _)) = time_axis.timestamps.iter().tuple_windows().find_position(|(previous, current)| current < previous)
    {
        return Err(AssembleError::UnorderedTimeAxis { position: position + 1 });
    }

    let mut charts: BTreeMap<ChartId, ChartSpec> = BTreeMap::new();
    for input in chart_inputs
    {
        let mut datasets = Vec::with_capacity(input.series.len());
        for series in &input.series
        {
            if series.values.len() != time_axis.len()
            {
                return Err(AssembleError::LengthMismatch {
                    chart: input.chart,
                    series: series.name.clone(),
                    expected: time_axis.len(),
                    actual: series.values.len(),
                });
            }
            let attributes = attributes
                .get(&series.name)
                .ok_or_else(|| AssembleError::MissingAttributes { chart: input.chart, series: series.name.clone() })?;
            debug!("chart {}: series {}: {} values, label: {}, border color: {}", input.chart, series.name, series.values.len(), attributes.label, attributes.border_color);
            datasets.push(Dataset { series: series.clone(), attributes: attributes.clone() });
        }
        // a chart identifier declared more than once keeps appending datasets in declared order
        match charts.entry(input.chart)
        {
            Entry::Occupied(mut occupied) => occupied.get_mut().datasets.append(&mut datasets),
            Entry::Vacant(vacant) => {
                vacant.insert(ChartSpec { chart: input.chart, time_axis: time_axis.clone(), datasets });
            },
        }
    }
    Ok(charts)
}
