use pairwatch_core::{PairAnalyzer, PairRequest};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

/// Runs one analysis without retries and prints the result to stdout.
pub async fn run(args: &AnalyzeArgs, analyzer: &PairAnalyzer) -> Result<(), CliError> {
    let query = PairRequest::new(&args.ticker_a, &args.ticker_b)
        .with_window_days(args.window_days)
        .with_corr_threshold(args.corr_threshold)
        .validate()?;

    let result = analyzer.analyze(&query).await?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}
