//! Site feed: Flashscore fixtures/results pages.
//!
//! The pages embed their match list as a backtick-quoted string after a
//! `data:` marker. Inside it, `~AA÷` starts a record, `¬` separates fields and
//! `÷` separates a two-letter field code from its value:
//!
//! ```text
//! ~AA÷g_3_xyz¬AD÷1767295800¬AE÷Partizan¬AF÷Crvena zvezda¬ER÷Round 14¬
//! ```
//!
//! Venue text (`AM`) is stored on the record *after* the game it belongs to.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Local, TimeZone};
use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use super::{venues, FeedError, ScheduleSource, BROWSER_USER_AGENT, HTTP_TIMEOUT};
use crate::schedule::{kickoff, Game, GameSource};

static DATA_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:\s*`([^`]+)`").expect("valid data block pattern"));
static VENUE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AM÷([^¬]+)").expect("valid venue pattern"));

const RECORD_SEPARATOR: &str = "~AA÷";
const FIELD_SEPARATOR: char = '¬';
const VALUE_SEPARATOR: char = '÷';
const NEUTRAL_PREFIX: &str = "Neutral location - ";

const FIELD_TIMESTAMP: &str = "AD";
const FIELD_HOME: &str = "AE";
const FIELD_AWAY: &str = "AF";
const FIELD_ROUND: &str = "ER";
const FIELD_COMPETITION: &str = "ZA";

const DEFAULT_COMPETITION: &str = "Euroleague";
const UNKNOWN_TEAM: &str = "Unknown";

/// Extract the tracked team's games from a Flashscore page.
///
/// `team` is matched as a substring of the home/away names; `abbreviation` is
/// the short code the feed also uses to mark the team's records. Timestamps
/// are rendered in `tz`'s wall clock. Records that cannot be parsed are
/// skipped; a page without a data block yields no games.
pub fn parse_site_feed<Tz: TimeZone>(
    html: &str,
    team: &str,
    abbreviation: &str,
    tz: &Tz,
) -> Vec<Game> {
    let Some(data) = DATA_BLOCK.captures(html).and_then(|c| c.get(1)) else {
        return vec![];
    };

    let records: Vec<&str> = data.as_str().split(RECORD_SEPARATOR).collect();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.contains(abbreviation) || record.contains(team))
        .filter_map(|(i, record)| {
            let venue = records.get(i + 1).and_then(|next| trailing_venue(next));
            build_game(&parse_fields(record), venue, team, tz)
        })
        .collect()
}

fn parse_fields(record: &str) -> HashMap<&str, &str> {
    record
        .split(FIELD_SEPARATOR)
        .filter_map(|pair| {
            let mut parts = pair.split(VALUE_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(code), Some(value), None) => Some((code, value)),
                _ => None,
            }
        })
        .collect()
}

/// Venue text stored on the record following a game.
fn trailing_venue(next_record: &str) -> Option<String> {
    let raw = VENUE_FIELD.captures(next_record)?.get(1)?.as_str();
    let venue = raw.replacen(NEUTRAL_PREFIX, "", 1);
    Some(venue.strip_suffix('.').unwrap_or(&venue).to_string())
}

fn build_game<Tz: TimeZone>(
    fields: &HashMap<&str, &str>,
    venue: Option<String>,
    team: &str,
    tz: &Tz,
) -> Option<Game> {
    let field = |code: &str| fields.get(code).copied().unwrap_or_default();

    let home_team = field(FIELD_HOME);
    let away_team = field(FIELD_AWAY);
    if !home_team.contains(team) && !away_team.contains(team) {
        return None;
    }

    let timestamp: i64 = field(FIELD_TIMESTAMP).parse().ok()?;
    let start = tz.timestamp_opt(timestamp, 0).single()?;
    let (date, time) = kickoff::format_in(&start);

    let venue = match venue {
        Some(v) if !v.is_empty() && !v.contains("TBD") => v,
        _ => venues::resolve(home_team),
    };

    let or_default = |value: &str, default: &str| {
        let chosen = if value.is_empty() { default } else { value };
        chosen.to_string()
    };
    let round = field(FIELD_ROUND);

    Some(Game {
        competition: or_default(field(FIELD_COMPETITION), DEFAULT_COMPETITION),
        home_team: or_default(home_team, UNKNOWN_TEAM),
        away_team: or_default(away_team, UNKNOWN_TEAM),
        date,
        time,
        location: venue.clone(),
        venue,
        round: (!round.is_empty()).then(|| round.to_string()),
        source: GameSource::Flashscore,
    })
}

/// One Flashscore page (fixtures or results) for the tracked team.
pub struct FlashscoreFeed {
    http: Client,
    name: String,
    url: String,
    team: String,
    abbreviation: String,
    competition: String,
}

impl FlashscoreFeed {
    pub fn new(
        name: &str,
        url: &str,
        team: &str,
        abbreviation: &str,
        competition: &str,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FlashscoreFeed {
            http,
            name: name.to_string(),
            url: url.to_string(),
            team: team.to_string(),
            abbreviation: abbreviation.to_string(),
            competition: competition.to_string(),
        })
    }
}

#[async_trait]
impl ScheduleSource for FlashscoreFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_games(&self) -> Result<Vec<Game>, FeedError> {
        debug!("Fetching {} from {}", self.name, self.url);

        let resp = self.http.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status()));
        }
        let html = resp.text().await?;

        let mut games = parse_site_feed(&html, &self.team, &self.abbreviation, &Local);
        for game in &mut games {
            game.competition = self.competition.clone();
            game.source = GameSource::Flashscore;
        }
        debug!("{}: {} games for {}", self.name, games.len(), self.team);
        Ok(games)
    }
}
