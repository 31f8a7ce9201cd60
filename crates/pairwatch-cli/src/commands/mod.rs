mod analyze;
mod serve;

use std::sync::Arc;

use pairwatch_core::{PairAnalyzer, ReqwestHttpClient, YahooAdapter, YahooConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let analyzer = build_analyzer(cli);

    match &cli.command {
        Command::Serve(args) => serve::run(args, analyzer).await,
        Command::Analyze(args) => analyze::run(args, &analyzer).await,
    }
}

fn build_analyzer(cli: &Cli) -> PairAnalyzer {
    let adapter = YahooAdapter::new(
        Arc::new(ReqwestHttpClient::new()),
        YahooConfig {
            base_url: cli.yahoo_base_url.clone(),
            timeout_ms: cli.timeout_ms,
        },
    );
    PairAnalyzer::new(Arc::new(adapter))
}
