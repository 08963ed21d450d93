use clap::Parser;
use std::time::Duration;

pub const MAX_GAME_DURATION_HOURS: u32 = 24;

/// Team schedule scraper serving a JSON feed and an iCalendar subscription
#[derive(Parser, Debug, Clone)]
#[command(name = "partizan-ics", version, about)]
pub struct Config {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Tracked team name (substring matched against feed team names)
    #[arg(long, env = "TEAM", default_value = "Partizan")]
    pub team: String,

    /// Abbreviation token the site feed uses for the tracked team
    #[arg(long, env = "TEAM_ABBREVIATION", default_value = "PTZ")]
    pub team_abbreviation: String,

    /// Team code passed to the Euroleague API
    #[arg(long, env = "TEAM_CODE_EUROLEAGUE", default_value = "PAR")]
    pub team_code_euroleague: String,

    /// Competition label stamped onto games scraped from the site feed
    #[arg(long, env = "SITE_COMPETITION", default_value = "ABA League")]
    pub site_competition: String,

    /// Site feed fixtures page
    #[arg(
        long,
        env = "FLASHSCORE_FIXTURES_URL",
        default_value = "https://www.flashscore.com/basketball/europe/aba-league/fixtures/"
    )]
    pub flashscore_fixtures_url: String,

    /// Site feed results page
    #[arg(
        long,
        env = "FLASHSCORE_RESULTS_URL",
        default_value = "https://www.flashscore.com/basketball/europe/aba-league/results/"
    )]
    pub flashscore_results_url: String,

    /// Euroleague games endpoint
    #[arg(
        long,
        env = "EUROLEAGUE_API_URL",
        default_value = "https://feeds.incrowdsports.com/provider/euroleague-feeds/v2/competitions/E/seasons/E2025/games"
    )]
    pub euroleague_api_url: String,

    /// Snapshot file path
    #[arg(long, env = "CACHE_PATH", default_value = "data/cache.json")]
    pub cache_path: String,

    /// Snapshot time-to-live in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "172800")]
    pub cache_ttl_secs: u64,

    /// Seconds between scheduled refreshes
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "172800")]
    pub refresh_interval_secs: u64,

    /// Calendar event length in hours
    #[arg(long, env = "DEFAULT_GAME_DURATION", default_value = "2")]
    pub default_game_duration: u32,

    /// Domain suffix for calendar event UIDs
    #[arg(long, env = "CALENDAR_UID_DOMAIN", default_value = "partizan-ics")]
    pub calendar_uid_domain: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.team.trim().is_empty() {
            anyhow::bail!("team must not be empty");
        }
        if self.default_game_duration == 0 || self.default_game_duration > MAX_GAME_DURATION_HOURS {
            anyhow::bail!(
                "default_game_duration must be between 1 and {} hours",
                MAX_GAME_DURATION_HOURS
            );
        }
        if self.cache_ttl_secs == 0 {
            anyhow::bail!("cache_ttl_secs must be positive");
        }
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be positive");
        }
        for (name, value) in [
            ("flashscore_fixtures_url", &self.flashscore_fixtures_url),
            ("flashscore_results_url", &self.flashscore_results_url),
            ("euroleague_api_url", &self.euroleague_api_url),
        ] {
            if let Err(e) = url::Url::parse(value) {
                anyhow::bail!("{} is not a valid URL ({}): {}", name, e, value);
            }
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn calendar_name(&self) -> String {
        format!("{} Schedule", self.team)
    }
}
