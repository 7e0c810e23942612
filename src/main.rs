//! A tool to score the trustworthiness of open-source repositories.

use repo_rank::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that runs against the real OS environment.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
