use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::kickoff;

/// Where a game record came from. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSource {
    #[serde(rename = "flashscore")]
    Flashscore,
    #[serde(rename = "euroleague-api")]
    EuroleagueApi,
    #[serde(rename = "mock")]
    Mock,
}

/// One scheduled match.
///
/// `date` and `time` are kept in their fixed textual forms (`YYYY-MM-DD`,
/// `HH:MM`, wall-clock without a zone) because they are the contract shared
/// by the JSON feed, the snapshot file and the calendar builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    /// Preferred display field; `venue` is the fallback
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    pub source: GameSource,
}

/// Identity of a game: two records with equal keys are the same match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameKey {
    pub date: String,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
}

impl Game {
    /// Parsed start time, or `None` when `date`/`time` break the fixed format.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        kickoff::parse(&self.date, &self.time)
    }

    pub fn key(&self) -> GameKey {
        GameKey {
            date: self.date.clone(),
            time: self.time.clone(),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
        }
    }

    /// `location` if set, else `venue`, else `None`.
    pub fn display_location(&self) -> Option<&str> {
        [self.location.as_str(), self.venue.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    pub fn title(&self) -> String {
        format!("{} - {} vs {}", self.competition, self.home_team, self.away_team)
    }
}
