//! Command-line interface and orchestration for repo-rank
//!
//! The `run` function parses command-line arguments with clap and routes to
//! the command handler. The `score` command is the driver described by the
//! scoring pipeline: it reads the URL file, resolves every URL to an
//! owner/repo pair up front, validates the credential once, then scores
//! repositories with bounded concurrency while emitting records in input
//! order.
//!
//! The [`Host`] trait abstracts stdout/stderr so the whole pipeline can run
//! under test against in-memory buffers.

mod host;
mod run;
mod score;

pub use host::Host;
pub use run::run;
pub use score::{LogLevel, ScoreArgs, process_score, read_url_file, score_repositories};

#[cfg(any(debug_assertions, test))]
pub use host::CapturingHost;
