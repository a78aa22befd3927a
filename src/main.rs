use clap::Parser;
use meta_description_generator::config::Cli;
use meta_description_generator::page::HttpFetcher;
use meta_description_generator::{run, GeneratorError};
use std::process::ExitCode;
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

async fn start(cli: Cli) -> Result<(), GeneratorError> {
    let source = cli.read_source().await?;
    run(
        &source,
        |config| HttpFetcher::new(config).map_err(GeneratorError::Client),
        &cli.build_config(),
        &cli.output_config(),
        &mut std::io::stdout(),
    )
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    match start(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
