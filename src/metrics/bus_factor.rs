use crate::hosting::{Client, Contributor, Fetch, RepoSpec};
use ohno::bail;

const LOG_TARGET: &str = "  busfactor";

/// Contributor concentration: how much the project depends on one person.
///
/// Over the top contributors by commit count, the score is one minus the top
/// author's share of commits. A single-author repository scores 0; commits
/// spread evenly across many authors approach 1. An empty contributor list
/// (brand-new or empty repository) also scores 0, since nobody else can pick
/// the project up.
pub async fn compute(client: &Client, spec: &RepoSpec) -> crate::Result<f64> {
    let contributors = match client.contributors(spec).await {
        Fetch::Found(contributors) => contributors,
        Fetch::Missing => bail!("repository {spec} not found while fetching contributors"),
        Fetch::Failed(e) => return Err(e),
    };

    let score = concentration_score(&contributors);
    log::debug!(
        target: LOG_TARGET,
        "{} contributors for {spec}, concentration score {score:.2}",
        contributors.len()
    );

    Ok(score)
}

fn concentration_score(contributors: &[Contributor]) -> f64 {
    let total: u64 = contributors.iter().map(|c| c.contributions).sum();
    if total == 0 {
        return 0.0;
    }

    let top = contributors.iter().map(|c| c.contributions).max().unwrap_or(0);

    (1.0 - top as f64 / total as f64).clamp(0.0, 1.0)
}
