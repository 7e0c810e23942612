use super::outcome::{MetricResult, measure};
use super::{bus_factor, correctness, license, responsiveness};
use crate::hosting::{Client, RepoSpec};
use core::time::Duration;
use std::time::Instant;

const LOG_TARGET: &str = "  aggregate";

/// Rubric weights, summing to 1.0 across the full rubric. Policy, not
/// protocol: adjust here, nowhere else.
///
/// RampUp carries a weight even though its probe is unimplemented; until an
/// algorithm exists its share is redistributed like any other non-computed
/// probe.
pub const RUBRIC_WEIGHTS: RubricWeights = RubricWeights {
    ramp_up: 0.15,
    correctness: 0.25,
    bus_factor: 0.20,
    responsiveness: 0.20,
    license: 0.20,
};

#[derive(Debug, Clone, Copy)]
pub struct RubricWeights {
    pub ramp_up: f64,
    pub correctness: f64,
    pub bus_factor: f64,
    pub responsiveness: f64,
    pub license: f64,
}

/// The complete scored output for one input URL: one result per rubric
/// dimension plus the weighted composite. Created once, serialized once.
#[derive(Debug, Clone)]
pub struct AggregateRecord {
    pub url: String,
    pub net_score: MetricResult,
    pub ramp_up: MetricResult,
    pub correctness: MetricResult,
    pub bus_factor: MetricResult,
    pub responsiveness: MetricResult,
    pub license: MetricResult,
}

/// Score one repository: fan out every probe, then combine.
///
/// The probes have no data dependency on each other and run concurrently
/// against the shared client. Each is failure-isolated behind [`measure`], so
/// one probe's sentinel never prevents another from contributing.
pub async fn aggregate(client: &Client, spec: &RepoSpec) -> AggregateRecord {
    log::info!(target: LOG_TARGET, "scoring repository {spec}");

    let (correctness, license, responsiveness, bus_factor) = tokio::join!(
        measure("correctness", correctness::compute(client, spec)),
        measure("license", license::compute(client, spec)),
        measure("responsiveness", responsiveness::compute(client, spec)),
        measure("bus_factor", bus_factor::compute(client, spec)),
    );
    let ramp_up = MetricResult::unimplemented();

    let combine_started = Instant::now();
    let weighted = [
        (RUBRIC_WEIGHTS.ramp_up, &ramp_up),
        (RUBRIC_WEIGHTS.correctness, &correctness),
        (RUBRIC_WEIGHTS.bus_factor, &bus_factor),
        (RUBRIC_WEIGHTS.responsiveness, &responsiveness),
        (RUBRIC_WEIGHTS.license, &license),
    ];

    let net = combine_net_score(&weighted);

    // NetScore latency is the cost actually incurred: every probe that ran is
    // counted, sentinel producers included, plus combination overhead.
    let spent: Duration = weighted.iter().filter_map(|(_, r)| r.latency).sum();
    let net_score = MetricResult {
        outcome: net,
        latency: Some(spent + combine_started.elapsed()),
    };

    AggregateRecord {
        url: spec.url().to_string(),
        net_score,
        ramp_up,
        correctness,
        bus_factor,
        responsiveness,
        license,
    }
}

/// Weighted composite over the computed probe scores.
///
/// Probes that produced no score are excluded and their weight redistributed
/// proportionally among the rest (dividing by the surviving weight mass). If
/// nothing computed, the composite itself is uncomputed.
#[must_use]
pub fn combine_net_score(weighted: &[(f64, &MetricResult)]) -> super::MetricOutcome {
    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;

    for (weight, result) in weighted {
        if let Some(score) = result.score() {
            total_weight += weight;
            weighted_sum += weight * score;
        }
    }

    if total_weight <= 0.0 {
        return super::MetricOutcome::Failed(std::sync::Arc::new(ohno::app_err!(
            "no metric produced a score; cannot combine"
        )));
    }

    super::MetricOutcome::Computed((weighted_sum / total_weight).clamp(0.0, 1.0))
}
