use std::net::SocketAddr;
use std::time::Duration;

use pairwatch_cli::{router, AppState};
use pairwatch_core::{PairAnalyzer, RetryConfig};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn run(args: &ServeArgs, analyzer: PairAnalyzer) -> Result<(), CliError> {
    let address = format!("{}:{}", args.host, args.port);
    let addr: SocketAddr = address.parse().map_err(|error: std::net::AddrParseError| {
        CliError::Address {
            address: address.clone(),
            message: error.to_string(),
        }
    })?;

    let source = analyzer.source_id();
    let retry = RetryConfig::fixed(Duration::from_millis(args.retry_delay_ms), args.retry_attempts);
    let app = router(AppState::new(analyzer, retry));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        source,
        retry_attempts = args.retry_attempts,
        retry_delay_ms = args.retry_delay_ms,
        "pairwatch v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app).await?;
    Ok(())
}
