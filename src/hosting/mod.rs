//! Repository URL resolution and hosting platform access
//!
//! This module turns repository URLs into `(owner, repo)` pairs and exposes a
//! narrow client for the hosting platform's REST API. The client is the single
//! data-source handle shared read-only by every metric probe; each call is
//! classified into found / missing / failed so callers can distinguish an
//! absent resource from a transport problem.

mod client;
mod repo_spec;

pub use client::{Client, ContentEntry, Contributor, Fetch, Issue, PullRequestMarker};
pub use repo_spec::RepoSpec;
