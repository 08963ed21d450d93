use std::sync::Arc;
use tokio::sync::RwLock;

use crate::schedule::Game;

/// The current game list, shared between request handlers and refreshes.
///
/// Readers get a cheap `Arc` clone of the whole list; a refresh replaces it
/// wholesale. The write lock is only held for the swap.
#[derive(Clone, Default)]
pub struct GameBook {
    inner: Arc<RwLock<Arc<Vec<Game>>>>,
}

impl GameBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Arc<Vec<Game>> {
        Arc::clone(&*self.inner.read().await)
    }

    pub async fn set(&self, games: impl Into<Arc<Vec<Game>>>) {
        *self.inner.write().await = games.into();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GameSource;

    fn game(home: &str) -> Game {
        Game {
            competition: "ABA League".into(),
            home_team: home.into(),
            away_team: "Partizan".into(),
            date: "2026-11-01".into(),
            time: "20:00".into(),
            venue: String::new(),
            location: String::new(),
            round: None,
            source: GameSource::Mock,
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let book = GameBook::new();
        assert!(book.get().await.is_empty());
        assert_eq!(book.len().await, 0);
    }

    #[tokio::test]
    async fn test_set_replaces_wholesale() {
        let book = GameBook::new();
        book.set(vec![game("A"), game("B")]).await;
        let before = book.get().await;

        book.set(vec![game("C")]).await;

        // Earlier readers keep their snapshot.
        assert_eq!(before.len(), 2);
        assert_eq!(book.get().await.as_slice(), &[game("C")]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let book = GameBook::new();
        let other = book.clone();
        other.set(vec![game("A")]).await;
        assert_eq!(book.len().await, 1);
    }
}
