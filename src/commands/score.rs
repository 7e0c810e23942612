//! The score command: the driver over the input URL list.

use super::Host;
use crate::Result;
use crate::hosting::{Client, RepoSpec};
use crate::metrics::aggregate;
use crate::reports::write_record;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use futures::StreamExt;
use futures::stream;
use ohno::IntoAppError;
use std::fs;

const LOG_TARGET: &str = "     driver";

/// Default hosting API endpoint. Overridable so tests can point the run at a
/// mock server.
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// How many repositories are scored at once. Emission order still follows
/// input order regardless of completion order.
const MAX_CONCURRENT_REPOS: usize = 4;

/// Verbosity of diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Informational messages
    Info,

    /// Detailed diagnostics, including per-probe failure reasons
    Debug,
}

/// Arguments for the score command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File containing one repository URL per line
    #[arg(value_name = "URL_FILE")]
    pub url_file: Utf8PathBuf,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Base URL of the hosting API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE_URL, hide = true)]
    pub api_base_url: String,
}

/// Score every repository listed in the URL file, emitting one NDJSON record
/// per URL in input order.
///
/// Fatal conditions (missing input file, malformed URL, rejected credential)
/// abort before any record is emitted, so output is all-or-nothing.
pub async fn process_score<H: Host>(host: &mut H, args: &ScoreArgs) -> Result<()> {
    init_logging(args.log_level);

    let urls = read_url_file(&args.url_file)?;

    // Resolve every URL before any scoring so a malformed entry fails the run
    // with no partial output. Row-for-row correspondence with the input file
    // is a correctness requirement for downstream tooling.
    let specs = urls.iter().map(|url| RepoSpec::parse(url)).collect::<Result<Vec<_>>>()?;

    let client = Client::new(args.github_token.as_deref(), &args.api_base_url)?;

    if args.github_token.is_some() {
        client.validate_credentials().await?;
    } else {
        log::warn!(target: LOG_TARGET, "no access token supplied, proceeding unauthenticated");
    }

    score_repositories(host, &client, &specs).await
}

/// Fan repositories out with bounded concurrency, emitting records in input
/// order as they become available.
pub async fn score_repositories<H: Host>(host: &mut H, client: &Client, specs: &[RepoSpec]) -> Result<()> {
    let mut records = stream::iter(specs.iter().map(|spec| aggregate(client, spec))).buffered(MAX_CONCURRENT_REPOS);

    while let Some(record) = records.next().await {
        write_record(&mut host.output(), &record)?;
    }

    Ok(())
}

/// Read the input file, one URL per line, skipping blank lines.
pub fn read_url_file(path: &Utf8PathBuf) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).into_app_err("reading URL file")?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // try_init: tests invoke the command repeatedly in one process.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(log_level == LogLevel::Debug)
        .try_init();
}
