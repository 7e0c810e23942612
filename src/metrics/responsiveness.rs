use crate::hosting::{Client, Fetch, RepoSpec};
use chrono::Duration;
use ohno::bail;

const LOG_TARGET: &str = " responsive";

/// Closure time at or beyond which responsiveness scores zero.
const FULL_PENALTY_DAYS: f64 = 30.0;

/// Score when a repository has no closed issues to learn from.
const NO_HISTORY_SCORE: f64 = 0.5;

/// Maintainer responsiveness from closure timing on recent issues.
///
/// Takes the median time-to-close over the most recently updated page of
/// closed issues (pull requests excluded) and maps it linearly onto `[0, 1]`:
/// same-day closure is full credit, `FULL_PENALTY_DAYS` or slower is zero.
/// With no closed issues at all there is no evidence either way, so the score
/// is neutral.
pub async fn compute(client: &Client, spec: &RepoSpec) -> crate::Result<f64> {
    let issues = match client.closed_issues(spec).await {
        Fetch::Found(issues) => issues,
        Fetch::Missing => bail!("repository {spec} not found while fetching closed issues"),
        Fetch::Failed(e) => return Err(e),
    };

    let mut closure_days: Vec<f64> = issues
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .filter_map(|issue| issue.closed_at.map(|closed| closed - issue.created_at))
        .map(|age: Duration| age.num_seconds().max(0) as f64 / 86_400.0)
        .collect();

    if closure_days.is_empty() {
        log::debug!(target: LOG_TARGET, "no closed issues for {spec}, scoring neutral");
        return Ok(NO_HISTORY_SCORE);
    }

    let median = median(&mut closure_days);
    log::debug!(
        target: LOG_TARGET,
        "median time-to-close for {spec}: {median:.1} days over {} issues",
        closure_days.len()
    );

    Ok((1.0 - median / FULL_PENALTY_DAYS).clamp(0.0, 1.0))
}

/// Median of a non-empty slice; sorts in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_for_median(median_days: f64) -> f64 {
        (1.0 - median_days / FULL_PENALTY_DAYS).clamp(0.0, 1.0)
    }

    #[test]
    fn test_median_odd() {
        let mut values = vec![5.0, 1.0, 3.0];
        assert_eq!(median(&mut values), 3.0);
    }

    #[test]
    fn test_median_even() {
        let mut values = vec![4.0, 1.0, 2.0, 3.0];
        assert_eq!(median(&mut values), 2.5);
    }

    #[test]
    fn test_median_single() {
        let mut values = vec![7.0];
        assert_eq!(median(&mut values), 7.0);
    }

    #[test]
    fn test_same_day_closure_scores_full() {
        assert_eq!(score_for_median(0.0), 1.0);
    }

    #[test]
    fn test_fifteen_day_median_scores_half() {
        assert_eq!(score_for_median(15.0), 0.5);
    }

    #[test]
    fn test_slow_closure_clamps_to_zero() {
        assert_eq!(score_for_median(30.0), 0.0);
        assert_eq!(score_for_median(300.0), 0.0);
    }
}
