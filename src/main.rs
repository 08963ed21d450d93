use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

mod calendar;
mod config;
mod schedule;
mod server;
mod service;
mod sources;
mod store;

use calendar::CalendarBuilder;
use config::Config;
use server::AppState;
use service::ScheduleService;
use sources::Aggregator;
use store::SnapshotStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    info!(
        "Tracking {} (Euroleague code {}, site token {})",
        config.team, config.team_code_euroleague, config.team_abbreviation
    );

    let store = SnapshotStore::new(&config.cache_path);
    info!("Schedule snapshots at {}", store.path().display());

    let service = ScheduleService::new(
        Aggregator::from_config(&config)?,
        store,
        config.cache_ttl(),
        &config.team,
        &config.site_competition,
    );

    // Periodic refresh; the first tick fires immediately so the service
    // fetches once at startup.
    let refresh_service = service.clone();
    let refresh_interval = config.refresh_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            refresh_service.refresh().await;
        }
    });

    let app = server::router(AppState {
        service,
        calendar: CalendarBuilder::new(
            &config.calendar_name(),
            &config.calendar_uid_domain,
            config.default_game_duration,
        ),
        team: config.team.clone(),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Schedule calendar server listening on http://{}", addr);
    info!("Calendar URL: http://localhost:{}/calendar.ics", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
