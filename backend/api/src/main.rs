use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use common::context::Context;
use common::{logging, signal};
use tokio::signal::unix::SignalKind;
use tokio::task::JoinError;
use tokio::{select, time};

mod api;
mod config;
mod database;
mod global;
mod identifier;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = parse_config()?;

	logging::init(&config.logging.level, config.logging.mode)?;

	if let Some(file) = &config.config_file {
		tracing::info!(file = file, "loaded config from file");
	}

	tracing::debug!("config: {:#?}", config);

	let db = database::connect(&config.database)
		.await
		.context("failed to connect to database")?;

	db.migrate().await.context("failed to create tables")?;

	let (ctx, handler) = Context::new();

	let global = Arc::new(global::GlobalState::new(config, db.clone(), ctx));

	tracing::info!(name = %global.config.name, "starting");

	let api_future = tokio::spawn(api::run(global.clone()));

	// Listen on both sigint and sigterm and cancel the context when either is received
	let mut signal_handler = signal::SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.with_signal(SignalKind::terminate());

	let failure = select! {
		r = api_future => {
			tracing::error!("api stopped unexpectedly: {:?}", r);
			Some(api_stopped(r))
		}
		_ = signal_handler.recv() => {
			tracing::info!("shutting down");
			None
		}
	};

	// We cannot have a context in scope when we cancel the handler, otherwise it will deadlock.
	drop(global);

	tracing::info!("waiting for tasks to finish");

	select! {
		_ = time::sleep(Duration::from_secs(60)) => tracing::warn!("force shutting down"),
		_ = signal_handler.recv() => tracing::warn!("force shutting down"),
		_ = handler.cancel() => tracing::info!("shutting down"),
	}

	db.close().await;

	match failure {
		Some(err) => Err(err),
		None => Ok(()),
	}
}

fn parse_config() -> anyhow::Result<config::AppConfig> {
	config::AppConfig::parse()
		.map_err(|err| {
			// The config error is what gets reported, a logger is best effort here.
			let _ = logging::init("info", Default::default());
			err
		})
		.context("failed to parse config")
}

/// The api only returns once the context is cancelled, so any result seen
/// before a signal is a failure.
fn api_stopped(result: Result<anyhow::Result<()>, JoinError>) -> anyhow::Error {
	match result {
		Ok(Ok(())) => anyhow::anyhow!("api stopped unexpectedly"),
		Ok(Err(err)) => err.context("api stopped unexpectedly"),
		Err(err) => anyhow::Error::new(err).context("api task failed"),
	}
}
