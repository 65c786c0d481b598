use clap::Parser;
use dotenvy::dotenv;

use front_desk::cli::Cli;
use front_desk::config::Config;
use front_desk::desk::FrontDesk;
use front_desk::dispatch::drain_queue;
use front_desk::error::AppError;
use front_desk::logging::init_logging;
use front_desk::roster::Roster;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::resolve(&cli).map_err(AppError::Config)?;
    tracing::info!("Front desk started with config: {:?}", config);

    let roster = Roster::load(&config.roster_path)?;
    let desk = FrontDesk::new();

    let rejections = roster.seed(&desk).await;
    if !rejections.is_empty() {
        tracing::warn!("{} roster entries were rejected", rejections.len());
    }

    let report = drain_queue(&desk, config.requeue_unmatched).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
