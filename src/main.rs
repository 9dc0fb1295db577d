mod analyzer;
mod config;
mod model;
mod normalizer;
mod parser;
mod presenter;
mod provider;
mod series;
mod utils;

use analyzer::{Analyzer, IndicatorEngine, RsiProvider};
use config::load_config;
use futures::future::join_all;
use model::{AnalysisResult, AppError, QuoteRequest};
use provider::{AlphaVantageProvider, QuoteProvider};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let provider = match AlphaVantageProvider::new(
        config.base_url.as_str(),
        config.api_key.clone().unwrap_or_default(),
    ) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to initialize quote provider: {}", e);
            return;
        }
    };
    let engine = IndicatorEngine::new();
    let rsi = config.rsi.build();
    let presenter = config.output.presenter();

    loop {
        info!("Symbols to process: {}", config.symbols.len());

        // Every symbol is independent, so all of them run concurrently
        let tasks = config.symbols.iter().map(|symbol| {
            let (provider, engine, rsi) = (&provider, &engine, rsi.as_ref());
            let interval = config.interval.as_str();
            async move {
                let outcome = process_symbol(symbol, interval, provider, engine, rsi).await;
                (symbol, outcome)
            }
        });

        for (symbol, outcome) in join_all(tasks).await {
            match outcome {
                Ok(result) => println!("{}\n", presenter.render(&result)),
                Err(e) => warn!("{}: analysis failed: {}", symbol, e),
            }
        }

        let Some(period) = config.check_interval_seconds else {
            break;
        };
        info!("Waiting for timer ({}s) or Ctrl-C...", period);
        tokio::select! {
            _ = sleep(Duration::from_secs(period)) => {
                info!("Timer triggered.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down.");
                break;
            }
        }
    }
}

/// Fetches one symbol's intraday series and runs the indicator engine over it.
async fn process_symbol(
    symbol: &str,
    interval: &str,
    provider: &dyn QuoteProvider,
    analyzer: &dyn Analyzer,
    rsi: &dyn RsiProvider,
) -> Result<AnalysisResult, AppError> {
    info!("Processing symbol: {}", symbol);
    let request = QuoteRequest {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
    };

    let series = provider.fetch_series(&request).await?;
    info!("{}: received {} observations", symbol, series.len());

    let result = analyzer.analyze(&series, rsi)?;
    info!("{}: {}", symbol, result.phase);
    Ok(result)
}
