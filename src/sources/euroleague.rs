use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{venues, FeedError, ScheduleSource, BROWSER_USER_AGENT, HTTP_TIMEOUT};
use crate::schedule::{kickoff, Game, GameSource};

const COMPETITION: &str = "Euroleague";
const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    status: String,
    data: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    home: Option<ApiTeam>,
    #[serde(default)]
    away: Option<ApiTeam>,
    #[serde(default)]
    venue: Option<ApiVenue>,
    #[serde(default)]
    round: Option<ApiRound>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    abbreviated_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiVenue {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRound {
    #[serde(default)]
    name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ApiTeam {
    fn display_name(&self) -> String {
        non_empty(&self.abbreviated_name)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Unknown")
            .to_string()
    }

    fn full_name(&self) -> String {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.abbreviated_name))
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// Decode a Euroleague games response into upcoming games.
///
/// The whole response is rejected when `status` is not `"success"` or the
/// `data` list is missing. A malformed entry, one with a missing or
/// unparseable date, or one starting at or before `as_of` is dropped on its
/// own.
pub fn parse_api_feed(body: &str, as_of: DateTime<Utc>) -> Result<Vec<Game>, FeedError> {
    let resp: ApiResponse = serde_json::from_str(body)?;

    let entries = match resp.data {
        Some(entries) if resp.status == SUCCESS => entries,
        _ => return Err(FeedError::NoData(resp.status)),
    };

    let games = entries
        .into_iter()
        .filter_map(|raw| {
            let entry: ApiGame = match serde_json::from_value(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping malformed Euroleague entry: {}", e);
                    return None;
                }
            };
            let start = DateTime::parse_from_rfc3339(entry.date.as_deref()?).ok()?;
            if start.with_timezone(&Utc) <= as_of {
                return None;
            }
            let (date, time) = kickoff::format_in(&start);

            let home = entry.home.unwrap_or_default();
            let away = entry.away.unwrap_or_default();

            let venue_name = entry.venue.as_ref().and_then(|v| non_empty(&v.name));
            let venue_address = entry.venue.as_ref().and_then(|v| non_empty(&v.address));
            let venue = match (venue_name, venue_address) {
                (Some(name), Some(address)) => format!("{}, {}", name, address),
                (Some(name), None) => name.to_string(),
                _ => venues::resolve(&home.full_name()),
            };

            Some(Game {
                competition: COMPETITION.to_string(),
                home_team: home.display_name(),
                away_team: away.display_name(),
                date,
                time,
                location: venue.clone(),
                venue,
                round: entry
                    .round
                    .as_ref()
                    .and_then(|r| non_empty(&r.name))
                    .map(str::to_string),
                source: GameSource::EuroleagueApi,
            })
        })
        .collect();

    Ok(games)
}

/// Euroleague public games feed, filtered to one team.
pub struct EuroleagueFeed {
    http: Client,
    base_url: String,
    team_code: String,
}

impl EuroleagueFeed {
    pub fn new(base_url: &str, team_code: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EuroleagueFeed {
            http,
            base_url: base_url.to_string(),
            team_code: team_code.to_string(),
        })
    }
}

#[async_trait]
impl ScheduleSource for EuroleagueFeed {
    fn name(&self) -> &str {
        "euroleague-api"
    }

    async fn fetch_games(&self) -> Result<Vec<Game>, FeedError> {
        let url = url::Url::parse_with_params(&self.base_url, &[("teamCode", &self.team_code)])?;
        debug!("Fetching Euroleague games from {}", url);

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status()));
        }
        let body = resp.text().await?;

        let games = parse_api_feed(&body, Utc::now())?;
        debug!("euroleague-api: {} upcoming games", games.len());
        Ok(games)
    }
}
