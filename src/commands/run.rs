//! Command dispatch logic for repo-rank

use super::{ScoreArgs, process_score};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-rank", version, author, long_about = None)]
#[command(about = "Scores the trustworthiness of open-source repositories")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RankSubcommand,
}

#[derive(Subcommand, Debug)]
enum RankSubcommand {
    /// Score the repositories listed in a URL file, one NDJSON record per URL
    Score(Box<ScoreArgs>),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// Parses the given arguments and executes the corresponding subcommand.
/// Designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails;
/// the process then exits with a non-zero status.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        RankSubcommand::Score(score_args) => process_score(host, score_args).await,
    }
}
