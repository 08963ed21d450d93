use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::schedule::Game;
use crate::sources::{mock_schedule, Aggregator};
use crate::store::{GameBook, SnapshotStore};

/// Glue between the feeds, the in-memory list and the snapshot file.
///
/// Refreshes are not serialised against each other: when two run at once
/// (timer and `/refresh`), whichever swaps last wins.
#[derive(Clone)]
pub struct ScheduleService {
    aggregator: Aggregator,
    book: GameBook,
    store: SnapshotStore,
    cache_ttl: Duration,
    team: String,
    site_competition: String,
}

impl ScheduleService {
    pub fn new(
        aggregator: Aggregator,
        store: SnapshotStore,
        cache_ttl: Duration,
        team: &str,
        site_competition: &str,
    ) -> Self {
        ScheduleService {
            aggregator,
            book: GameBook::new(),
            store,
            cache_ttl,
            team: team.to_string(),
            site_competition: site_competition.to_string(),
        }
    }

    /// Fetch every feed, swap the result in and persist it. Falls back to
    /// the mock schedule when nothing came back.
    pub async fn refresh(&self) -> Arc<Vec<Game>> {
        info!("Refreshing schedule...");
        let mut games = self.aggregator.fetch_all().await;

        if games.is_empty() {
            warn!("No games fetched from real sources, using mock data");
            games = mock_schedule(&self.team, &self.site_competition, Local::now().date_naive());
        }

        let games = Arc::new(games);
        self.book.set(Arc::clone(&games)).await;

        if let Err(e) = self.store.save(&games).await {
            warn!("Failed to persist schedule snapshot: {:#}", e);
        }

        info!("Schedule refreshed: {} games", games.len());
        games
    }

    /// Current games: memory first, then a fresh snapshot, then a refresh.
    pub async fn games(&self) -> Arc<Vec<Game>> {
        let current = self.book.get().await;
        if !current.is_empty() {
            return current;
        }

        if let Some(cached) = self.store.load(self.cache_ttl).await {
            if !cached.is_empty() {
                info!("Loaded {} games from snapshot", cached.len());
                let cached = Arc::new(cached);
                self.book.set(Arc::clone(&cached)).await;
                return cached;
            }
        }

        self.refresh().await
    }

    /// Games held in memory, without triggering any loading.
    pub async fn cached_count(&self) -> usize {
        self.book.len().await
    }
}
