pub mod euroleague;
pub mod flashscore;
pub mod mock;
pub mod provider;
pub mod venues;

pub use euroleague::EuroleagueFeed;
pub use flashscore::FlashscoreFeed;
pub use mock::mock_schedule;
pub use provider::ScheduleSource;

use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::schedule::Game;

pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Why a whole feed contributed nothing.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("feed returned no data (status {0:?})")]
    NoData(String),
    #[error("invalid feed URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Merges the API feed with the site feed pages into one chronological list.
#[derive(Clone)]
pub struct Aggregator {
    api: Arc<dyn ScheduleSource>,
    site_pages: Vec<Arc<dyn ScheduleSource>>,
}

impl Aggregator {
    pub fn new(api: Arc<dyn ScheduleSource>, site_pages: Vec<Arc<dyn ScheduleSource>>) -> Self {
        Aggregator { api, site_pages }
    }

    /// Euroleague API plus the Flashscore fixtures and results pages.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api = EuroleagueFeed::new(&config.euroleague_api_url, &config.team_code_euroleague)?;
        let page = |name: &str, url: &str| -> anyhow::Result<Arc<dyn ScheduleSource>> {
            Ok(Arc::new(FlashscoreFeed::new(
                name,
                url,
                &config.team,
                &config.team_abbreviation,
                &config.site_competition,
            )?))
        };
        Ok(Aggregator::new(
            Arc::new(api),
            vec![
                page("flashscore-fixtures", &config.flashscore_fixtures_url)?,
                page("flashscore-results", &config.flashscore_results_url)?,
            ],
        ))
    }

    /// Fetch every source. Never fails: an unavailable source counts as zero
    /// games, so the result may legitimately be empty.
    pub async fn fetch_all(&self) -> Vec<Game> {
        self.fetch_all_at(Local::now().naive_local()).await
    }

    async fn fetch_all_at(&self, now: NaiveDateTime) -> Vec<Game> {
        let (api_games, pages) = tokio::join!(
            fetch_or_empty(self.api.as_ref()),
            futures_util::future::join_all(self.site_pages.iter().map(|p| fetch_or_empty(p.as_ref()))),
        );

        let site_games = dedup(upcoming(pages.into_iter().flatten().collect(), now));
        info!(
            "Fetched {} API games and {} site games",
            api_games.len(),
            site_games.len()
        );

        let mut all = api_games;
        all.extend(site_games);
        sort_by_kickoff(&mut all);
        all
    }
}

async fn fetch_or_empty(source: &dyn ScheduleSource) -> Vec<Game> {
    match source.fetch_games().await {
        Ok(games) => games,
        Err(e) => {
            warn!("Source '{}' unavailable: {}", source.name(), e);
            vec![]
        }
    }
}

/// Games starting at or after `now`. Unparseable kickoffs are dropped.
pub fn upcoming(games: Vec<Game>, now: NaiveDateTime) -> Vec<Game> {
    games
        .into_iter()
        .filter(|g| g.kickoff().is_some_and(|at| at >= now))
        .collect()
}

/// Drop repeats of the same (date, time, home, away); first one seen wins and
/// input order is kept.
pub fn dedup(games: Vec<Game>) -> Vec<Game> {
    let mut seen = HashSet::new();
    games.into_iter().filter(|g| seen.insert(g.key())).collect()
}

/// Stable sort by kickoff. Games with an unparseable kickoff stay in their
/// slots; the parseable ones are sorted around them.
pub fn sort_by_kickoff(games: &mut [Game]) {
    let slots: Vec<(usize, NaiveDateTime)> = games
        .iter()
        .enumerate()
        .filter_map(|(i, g)| g.kickoff().map(|at| (i, at)))
        .collect();

    let mut timed: Vec<(NaiveDateTime, Game)> = slots
        .iter()
        .map(|&(i, at)| (at, games[i].clone()))
        .collect();
    timed.sort_by_key(|(at, _)| *at);

    for (&(slot, _), (_, game)) in slots.iter().zip(timed) {
        games[slot] = game;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameSource;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn game(home: &str, away: &str, date: &str, time: &str) -> Game {
        Game {
            competition: "ABA League".into(),
            home_team: home.into(),
            away_team: away.into(),
            date: date.into(),
            time: time.into(),
            venue: String::new(),
            location: String::new(),
            round: None,
            source: GameSource::Flashscore,
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        crate::schedule::kickoff::parse(date, time).unwrap()
    }

    enum Stub {
        Games(&'static str, Vec<Game>),
        Down(&'static str),
    }

    #[async_trait]
    impl ScheduleSource for Stub {
        fn name(&self) -> &str {
            match self {
                Stub::Games(name, _) | Stub::Down(name) => name,
            }
        }

        async fn fetch_games(&self) -> Result<Vec<Game>, FeedError> {
            match self {
                Stub::Games(_, games) => Ok(games.clone()),
                Stub::Down(_) => Err(FeedError::NoData("down".into())),
            }
        }
    }

    #[test]
    fn test_dedup_keeps_first_in_input_order() {
        let mut a = game("Partizan", "Cibona", "2026-11-01", "20:00");
        a.venue = "first".into();
        let mut b = a.clone();
        b.venue = "second".into();
        let c = game("Igokea", "Partizan", "2026-11-08", "18:00");

        let out = dedup(vec![c.clone(), a.clone(), b, c.clone()]);
        assert_eq!(out, vec![c, a]);
    }

    #[test]
    fn test_dedup_key_includes_time() {
        let a = game("Partizan", "Cibona", "2026-11-01", "20:00");
        let b = game("Partizan", "Cibona", "2026-11-01", "21:00");
        assert_eq!(dedup(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_upcoming_includes_now_and_drops_unparseable() {
        let now = at("2026-11-01", "20:00");
        let games = vec![
            game("A", "Partizan", "2026-11-01", "19:59"),
            game("B", "Partizan", "2026-11-01", "20:00"),
            game("C", "Partizan", "TBD", "20:00"),
            game("D", "Partizan", "2026-12-01", "20:00"),
        ];
        let homes: Vec<String> = upcoming(games, now).into_iter().map(|g| g.home_team).collect();
        assert_eq!(homes, vec!["B", "D"]);
    }

    #[test]
    fn test_sort_is_chronological_and_stable() {
        let mut games = vec![
            game("late", "x", "2026-12-01", "20:00"),
            game("tie-1", "x", "2026-11-01", "20:00"),
            game("early", "x", "2026-10-30", "09:00"),
            game("tie-2", "x", "2026-11-01", "20:00"),
        ];
        sort_by_kickoff(&mut games);
        let homes: Vec<&str> = games.iter().map(|g| g.home_team.as_str()).collect();
        assert_eq!(homes, vec!["early", "tie-1", "tie-2", "late"]);
    }

    #[test]
    fn test_sort_leaves_unparseable_in_place() {
        let mut games = vec![
            game("late", "x", "2026-12-01", "20:00"),
            game("bad-1", "x", "soon", "20:00"),
            game("early", "x", "2026-10-30", "09:00"),
            game("bad-2", "x", "2026-11-01", "later"),
        ];
        sort_by_kickoff(&mut games);
        let homes: Vec<&str> = games.iter().map(|g| g.home_team.as_str()).collect();
        assert_eq!(homes, vec!["early", "bad-1", "late", "bad-2"]);
    }

    #[tokio::test]
    async fn test_fetch_all_merges_filters_and_sorts() {
        let now = NaiveDate::from_ymd_opt(2026, 11, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let mut api_game = game("Partizan", "Real Madrid", "2026-11-20", "20:30");
        api_game.source = GameSource::EuroleagueApi;

        let fixture = game("Partizan", "Cibona", "2026-11-05", "19:00");
        let past = game("Mega", "Partizan", "2026-10-20", "19:00");

        let aggregator = Aggregator::new(
            Arc::new(Stub::Games("api", vec![api_game.clone()])),
            vec![
                Arc::new(Stub::Games("fixtures", vec![fixture.clone(), past])),
                Arc::new(Stub::Games("results", vec![fixture.clone()])),
            ],
        );

        let games = aggregator.fetch_all_at(now).await;
        assert_eq!(games, vec![fixture, api_game]);
    }

    #[tokio::test]
    async fn test_fetch_all_survives_failed_sources() {
        let now = NaiveDate::from_ymd_opt(2026, 11, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let fixture = game("Partizan", "Cibona", "2026-11-05", "19:00");

        let aggregator = Aggregator::new(
            Arc::new(Stub::Down("api")),
            vec![
                Arc::new(Stub::Down("fixtures")),
                Arc::new(Stub::Games("results", vec![fixture.clone()])),
            ],
        );
        assert_eq!(aggregator.fetch_all_at(now).await, vec![fixture]);

        let all_down = Aggregator::new(Arc::new(Stub::Down("api")), vec![Arc::new(Stub::Down("fixtures"))]);
        assert!(all_down.fetch_all_at(now).await.is_empty());
    }
}
