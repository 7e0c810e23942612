use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

const LOG_TARGET: &str = "   metrics";

/// Upper bound on a single probe's wall-clock time. Expiry is treated exactly
/// like a hard probe failure: the sibling probes and the run continue.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// What a metric probe concluded.
///
/// `Failed` and `Unimplemented` both serialize to the `-1` sentinel on the
/// wire, but stay distinct in-process so a transient fetch failure is never
/// mistaken for a dimension that simply has no algorithm yet.
#[derive(Debug, Clone)]
pub enum MetricOutcome {
    /// The probe produced a score in `[0, 1]`.
    Computed(f64),

    /// The probe failed internally (network error, malformed response,
    /// timeout) and no score could be produced.
    Failed(Arc<ohno::AppError>),

    /// The rubric declares this dimension but no algorithm exists for it.
    Unimplemented,
}

/// The value every probe invocation produces: an outcome plus the measured
/// wall-clock cost of producing it.
///
/// `latency` is `None` only when timing never started, which happens solely
/// for unimplemented dimensions; failed probes carry the latency that was
/// actually spent.
#[derive(Debug, Clone)]
pub struct MetricResult {
    pub outcome: MetricOutcome,
    pub latency: Option<Duration>,
}

impl MetricResult {
    /// Result for a rubric dimension that has no algorithm.
    #[must_use]
    pub const fn unimplemented() -> Self {
        Self {
            outcome: MetricOutcome::Unimplemented,
            latency: None,
        }
    }

    /// The computed score, or `None` for failed/unimplemented outcomes.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            MetricOutcome::Computed(score) => Some(score),
            MetricOutcome::Failed(_) | MetricOutcome::Unimplemented => None,
        }
    }

    /// The score as it appears on the wire: the value itself, or `-1`.
    #[must_use]
    pub fn score_field(&self) -> f64 {
        self.score().unwrap_or(-1.0)
    }

    /// The latency in seconds as it appears on the wire, or `-1` when no
    /// timing boundary ever closed.
    #[must_use]
    pub fn latency_field(&self) -> f64 {
        self.latency.map_or(-1.0, |d| d.as_secs_f64())
    }
}

/// Run a probe body under timing and a timeout, folding every exit path into
/// a `MetricResult`.
///
/// Timing starts before the body does any I/O and stops after it settles,
/// including on failure and timeout, so failed calls still report the time
/// they cost. Scores are clamped to `[0, 1]`.
pub async fn measure<F>(name: &'static str, body: F) -> MetricResult
where
    F: Future<Output = crate::Result<f64>>,
{
    let started = Instant::now();

    let outcome = match tokio::time::timeout(PROBE_TIMEOUT, body).await {
        Ok(Ok(score)) => MetricOutcome::Computed(score.clamp(0.0, 1.0)),
        Ok(Err(e)) => {
            log::debug!(target: LOG_TARGET, "{name} probe failed: {e:#}");
            MetricOutcome::Failed(Arc::new(e))
        }
        Err(_) => {
            log::debug!(target: LOG_TARGET, "{name} probe timed out after {PROBE_TIMEOUT:?}");
            MetricOutcome::Failed(Arc::new(ohno::app_err!("{name} probe timed out")))
        }
    };

    MetricResult {
        outcome,
        latency: Some(started.elapsed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;

    #[tokio::test]
    async fn test_measure_computed() {
        let result = measure("test", async { Ok(0.75) }).await;

        assert_eq!(result.score(), Some(0.75));
        assert_eq!(result.score_field(), 0.75);
        assert!(result.latency_field() >= 0.0);
    }

    #[tokio::test]
    async fn test_measure_clamps_out_of_range_scores() {
        let high = measure("test", async { Ok(1.5) }).await;
        let low = measure("test", async { Ok(-0.5) }).await;

        assert_eq!(high.score(), Some(1.0));
        assert_eq!(low.score(), Some(0.0));
    }

    #[tokio::test]
    async fn test_measure_failure_still_reports_latency() {
        let result = measure("test", async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(app_err!("boom"))
        })
        .await;

        assert!(result.score().is_none());
        assert_eq!(result.score_field(), -1.0);
        assert!(result.latency_field() >= 0.02);
        assert!(matches!(result.outcome, MetricOutcome::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_measure_timeout_is_a_failure_with_latency() {
        // The paused clock auto-advances past the timeout instead of waiting
        // out the real 30 seconds.
        let result = measure("test", std::future::pending::<crate::Result<f64>>()).await;

        assert!(matches!(result.outcome, MetricOutcome::Failed(_)));
        assert_eq!(result.score_field(), -1.0);
        assert!(result.latency.is_some());
    }

    #[test]
    fn test_unimplemented_has_no_latency() {
        let result = MetricResult::unimplemented();

        assert_eq!(result.score_field(), -1.0);
        assert_eq!(result.latency_field(), -1.0);
        assert!(matches!(result.outcome, MetricOutcome::Unimplemented));
    }

    #[test]
    fn test_score_field_never_below_sentinel() {
        let failed = MetricResult {
            outcome: MetricOutcome::Failed(Arc::new(app_err!("x"))),
            latency: Some(Duration::from_millis(5)),
        };

        assert_eq!(failed.score_field(), -1.0);
        assert!(failed.latency_field() > 0.0);
    }
}
