use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

/// Hosts whose API the client knows how to talk to.
static SUPPORTED_HOSTS: &[&str] = &["github.com"];

/// A repository reference resolved once from an input URL.
///
/// Holds the original URL string alongside the owner and repository name so the
/// URL is never re-parsed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    url: Arc<str>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse a repository URL of the form `https://<host>/<owner>/<repo>`.
    ///
    /// Trailing `.git` on the repository name is stripped and any extra path
    /// segments are ignored. A URL without both an owner and a repository
    /// name, or on an unrecognized host, is an error; the driver treats that
    /// as fatal for the whole run.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).into_app_err("parsing repository URL")?;

        let host = url.host_str().unwrap_or_default();
        if !SUPPORTED_HOSTS.contains(&host) {
            bail!("unsupported hosting platform in URL: {raw}");
        }

        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 || path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL, expected .../<owner>/<repo>: {raw}");
        }

        let owner = path_segments[0];
        let repo = path_segments[1].trim_end_matches(".git");

        Ok(Self {
            url: Arc::from(raw),
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    /// The original URL string, exactly as it appeared in the input file.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let spec = RepoSpec::parse("https://github.com/tokio-rs/tokio").unwrap();

        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
        assert_eq!(spec.url(), "https://github.com/tokio-rs/tokio");
    }

    #[test]
    fn test_parse_url_with_git_extension() {
        let spec = RepoSpec::parse("https://github.com/serde-rs/serde.git").unwrap();

        assert_eq!(spec.owner(), "serde-rs");
        assert_eq!(spec.repo(), "serde"); // .git should be stripped
    }

    #[test]
    fn test_parse_url_with_additional_path_segments() {
        let spec = RepoSpec::parse("https://github.com/tokio-rs/tokio/tree/master/tokio-util").unwrap();

        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
    }

    #[test]
    fn test_original_url_is_preserved() {
        let raw = "https://github.com/tokio-rs/tokio/tree/master";
        let spec = RepoSpec::parse(raw).unwrap();

        assert_eq!(spec.url(), raw);
    }

    #[test]
    fn test_parse_unsupported_host() {
        let _ = RepoSpec::parse("https://gitlab.com/owner/repo").unwrap_err();
    }

    #[test]
    fn test_parse_not_a_url() {
        let _ = RepoSpec::parse("not a url at all").unwrap_err();
    }

    #[test]
    fn test_parse_invalid_url_only_owner() {
        let _ = RepoSpec::parse("https://github.com/tokio-rs").unwrap_err();
    }

    #[test]
    fn test_parse_invalid_url_empty_owner() {
        let _ = RepoSpec::parse("https://github.com//tokio").unwrap_err();
    }

    #[test]
    fn test_parse_invalid_url_empty_repo() {
        let _ = RepoSpec::parse("https://github.com/tokio-rs/").unwrap_err();
    }

    #[test]
    fn test_display_trait() {
        let spec = RepoSpec::parse("https://github.com/tokio-rs/tokio").unwrap();

        assert_eq!(spec.to_string(), "tokio-rs/tokio");
    }

    #[test]
    fn test_clone_and_equality() {
        let spec1 = RepoSpec::parse("https://github.com/tokio-rs/tokio").unwrap();
        let spec2 = spec1.clone();

        assert_eq!(spec1, spec2);
    }
}
