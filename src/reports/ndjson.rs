use crate::Result;
use crate::metrics::AggregateRecord;
use serde::Serialize;
use std::io::Write;

/// One NDJSON output row. Field declaration order is the wire order; do not
/// reorder without a rubric version bump.
///
/// Score fields are in `[0, 1]` or the `-1` sentinel for "not computed";
/// latency fields are seconds, with `-1` only when no timing boundary closed.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "NetScore")]
    pub net_score: f64,
    #[serde(rename = "NetScore_Latency")]
    pub net_score_latency: f64,

    #[serde(rename = "RampUp")]
    pub ramp_up: f64,
    #[serde(rename = "RampUp_Latency")]
    pub ramp_up_latency: f64,

    #[serde(rename = "Correctness")]
    pub correctness: f64,
    #[serde(rename = "Correctness_Latency")]
    pub correctness_latency: f64,

    #[serde(rename = "BusFactor")]
    pub bus_factor: f64,
    #[serde(rename = "BusFactor_Latency")]
    pub bus_factor_latency: f64,

    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,
    #[serde(rename = "ResponsiveMaintainer_Latency")]
    pub responsive_maintainer_latency: f64,

    #[serde(rename = "License")]
    pub license: f64,
    #[serde(rename = "License_Latency")]
    pub license_latency: f64,
}

impl From<&AggregateRecord> for ScoreRow {
    fn from(record: &AggregateRecord) -> Self {
        Self {
            url: record.url.clone(),
            net_score: record.net_score.score_field(),
            net_score_latency: record.net_score.latency_field(),
            ramp_up: record.ramp_up.score_field(),
            ramp_up_latency: record.ramp_up.latency_field(),
            correctness: record.correctness.score_field(),
            correctness_latency: record.correctness.latency_field(),
            bus_factor: record.bus_factor.score_field(),
            bus_factor_latency: record.bus_factor.latency_field(),
            responsive_maintainer: record.responsiveness.score_field(),
            responsive_maintainer_latency: record.responsiveness.latency_field(),
            license: record.license.score_field(),
            license_latency: record.license.latency_field(),
        }
    }
}

/// Write one record as a single NDJSON line.
pub fn write_record<W: Write>(writer: &mut W, record: &AggregateRecord) -> Result<()> {
    let row = ScoreRow::from(record);
    let line = serde_json::to_string(&row)?;
    writeln!(writer, "{line}")?;
    Ok(())
}
