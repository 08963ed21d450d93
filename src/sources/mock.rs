use chrono::{Days, NaiveDate};

use super::venues;
use crate::schedule::{kickoff::DATE_FORMAT, Game, GameSource};

const OPPONENTS: &[&str] = &[
    "Real Madrid",
    "Barcelona",
    "Olimpia Milano",
    "Fenerbahce",
    "Crvena Zvezda",
    "Maccabi",
    "Bayern Munich",
    "Zalgiris",
];

const MOCK_GAMES: u64 = 10;
const MOCK_TIME: &str = "20:00";

/// Placeholder schedule served when every real feed comes back empty:
/// one game a week starting `today`, alternating home and away.
pub fn mock_schedule(team: &str, league_competition: &str, today: NaiveDate) -> Vec<Game> {
    (0..MOCK_GAMES)
        .filter_map(|i| {
            let date = today.checked_add_days(Days::new(i * 7))?;
            let opponent = OPPONENTS[i as usize % OPPONENTS.len()];

            let (home_team, away_team, venue) = if i % 2 == 0 {
                (team.to_string(), opponent.to_string(), venues::resolve(team))
            } else {
                (opponent.to_string(), team.to_string(), format!("{} Arena", opponent))
            };

            let competition = if i % 3 == 0 { "Euroleague" } else { league_competition };

            Some(Game {
                competition: competition.to_string(),
                home_team,
                away_team,
                date: date.format(DATE_FORMAT).to_string(),
                time: MOCK_TIME.to_string(),
                location: venue.clone(),
                venue,
                round: None,
                source: GameSource::Mock,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_schedule_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let games = mock_schedule("Partizan", "ABA League", today);

        assert_eq!(games.len(), 10);
        assert!(games.iter().all(|g| g.source == GameSource::Mock));
        assert!(games.iter().all(|g| g.kickoff().is_some()));

        assert_eq!(games[0].date, "2026-10-19");
        assert_eq!(games[0].home_team, "Partizan");
        assert_eq!(games[0].venue, "Stark Arena, Belgrade, Serbia");
        assert_eq!(games[0].competition, "Euroleague");

        assert_eq!(games[1].date, "2026-10-26");
        assert_eq!(games[1].home_team, "Barcelona");
        assert_eq!(games[1].away_team, "Partizan");
        assert_eq!(games[1].venue, "Barcelona Arena");
        assert_eq!(games[1].competition, "ABA League");

        assert_eq!(games[8].away_team, "Real Madrid");
    }
}
