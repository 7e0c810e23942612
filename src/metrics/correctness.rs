use crate::hosting::{Client, Fetch, RepoSpec};
use ohno::bail;

const LOG_TARGET: &str = "correctness";

/// Conventional test directory names, probed in order. The first one that
/// exists with a non-empty listing earns the base credit.
const TEST_DIR_CANDIDATES: &[&str] = &["test", "tests", "spec", "__tests__", "Test", "Tests"];

/// Credit for having any recognized test directory.
const TEST_DIR_CREDIT: f64 = 1.0;

/// Open-issue penalty bands, highest threshold first. Only the first matching
/// band applies.
const ISSUE_PENALTY_BANDS: &[(usize, f64)] = &[(60, -0.8), (40, -0.6), (20, -0.4), (10, -0.2)];

/// Heuristic for "is this project tested and healthy": credit for a populated
/// conventional test directory, minus a penalty keyed to the open-issue count,
/// clamped at zero.
pub async fn compute(client: &Client, spec: &RepoSpec) -> crate::Result<f64> {
    let mut score = 0.0;

    let mut test_dir_found = false;
    for dir in TEST_DIR_CANDIDATES {
        match client.dir_listing(spec, dir).await {
            Fetch::Found(entries) if !entries.is_empty() => {
                log::debug!(target: LOG_TARGET, "found test directory '{dir}' in {spec}");
                score += TEST_DIR_CREDIT;
                test_dir_found = true;
                break;
            }
            // An empty listing is not a test suite; keep looking.
            Fetch::Found(_) | Fetch::Missing => {}
            // A fetch failure for one candidate just moves on to the next.
            Fetch::Failed(e) => {
                log::debug!(target: LOG_TARGET, "could not check directory '{dir}' in {spec}: {e:#}");
            }
        }
    }

    if !test_dir_found {
        log::debug!(target: LOG_TARGET, "no recognized test directory found in {spec}");
    }

    // A failure here is not the same as "0 open issues": without the count the
    // probe has no defensible score at all.
    let open_issues = match client.open_issue_count(spec).await {
        Fetch::Found(count) => count,
        Fetch::Missing => bail!("repository {spec} not found while counting open issues"),
        Fetch::Failed(e) => return Err(e),
    };

    score += issue_penalty(open_issues);

    Ok(score.max(0.0))
}

/// Single step-down penalty for the open-issue count, evaluated from the
/// highest band down.
fn issue_penalty(open_issues: usize) -> f64 {
    for &(threshold, penalty) in ISSUE_PENALTY_BANDS {
        if open_issues >= threshold {
            return penalty;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_penalty_bands() {
        assert_eq!(issue_penalty(0), 0.0);
        assert_eq!(issue_penalty(9), 0.0);
        assert_eq!(issue_penalty(10), -0.2);
        assert_eq!(issue_penalty(15), -0.2);
        assert_eq!(issue_penalty(20), -0.4);
        assert_eq!(issue_penalty(40), -0.6);
        assert_eq!(issue_penalty(59), -0.6);
        assert_eq!(issue_penalty(60), -0.8);
        assert_eq!(issue_penalty(65), -0.8);
        assert_eq!(issue_penalty(1000), -0.8);
    }

    #[test]
    fn test_only_one_band_applies() {
        // 65 issues crosses every threshold but only the top band counts.
        let score: f64 = TEST_DIR_CREDIT + issue_penalty(65);
        assert_eq!(score, 1.0 - 0.8);
    }

    #[test]
    fn test_score_clamped_at_zero_without_test_dir() {
        let score: f64 = 0.0 + issue_penalty(65);
        assert_eq!(score.max(0.0), 0.0);
    }

    #[test]
    fn test_expected_fixture_scores() {
        // Populated tests/ directory with 15 open issues.
        assert_eq!((TEST_DIR_CREDIT + issue_penalty(15)).max(0.0), 0.8);
        // No test directory with 65 open issues.
        assert_eq!((0.0 + issue_penalty(65)).max(0.0), 0.0);
    }
}
