use async_trait::async_trait;

use super::FeedError;
use crate::schedule::Game;

/// Trait that every schedule feed must implement.
///
/// `Err` means the feed as a whole was unavailable. Malformed individual
/// records are dropped inside the parser and never reach the caller.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch and normalise the feed's games.
    async fn fetch_games(&self) -> Result<Vec<Game>, FeedError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
