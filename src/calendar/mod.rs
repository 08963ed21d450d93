//! Turns the game list into calendar events.
//!
//! Event data is built here; [`ics`] writes it out as an iCalendar document.

pub mod ics;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::schedule::Game;

/// Minutes-before-start for each reminder attached to an event.
const REMINDER_MINUTES: [u32; 2] = [30, 5];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub minutes_before: u32,
    pub message: String,
}

/// Everything that goes into one VEVENT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Stable across rebuilds so subscribers update rather than duplicate
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: Option<String>,
    /// Wall-clock start, no zone
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Build time; used for DTSTAMP, CREATED and LAST-MODIFIED
    pub stamp: DateTime<Utc>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    name: String,
    uid_domain: String,
    duration: Duration,
}

impl CalendarBuilder {
    pub fn new(name: &str, uid_domain: &str, duration_hours: u32) -> Self {
        CalendarBuilder {
            name: name.to_string(),
            uid_domain: uid_domain.to_string(),
            duration: Duration::hours(i64::from(duration_hours)),
        }
    }

    /// Render the calendar document for `games`.
    pub fn build(&self, games: &[Game]) -> String {
        ics::render(&self.name, &self.events(games, Utc::now()))
    }

    /// One event per game with a parseable kickoff and a representable end;
    /// the rest are skipped.
    pub fn events(&self, games: &[Game], now: DateTime<Utc>) -> Vec<CalendarEvent> {
        games
            .iter()
            .filter_map(|game| self.event(game, now))
            .collect()
    }

    fn event(&self, game: &Game, now: DateTime<Utc>) -> Option<CalendarEvent> {
        let start = game.kickoff()?;
        let end = start.checked_add_signed(self.duration)?;
        let summary = game.title();

        let reminders = REMINDER_MINUTES
            .iter()
            .map(|&minutes| Reminder {
                minutes_before: minutes,
                message: format!("{} starts in {} minutes", summary, minutes),
            })
            .collect();

        Some(CalendarEvent {
            uid: format!(
                "{}-{}-{}@{}",
                game.date, game.home_team, game.away_team, self.uid_domain
            ),
            description: describe(game),
            location: game.display_location().map(str::to_string),
            start,
            end,
            stamp: now,
            reminders,
            summary,
        })
    }
}

fn describe(game: &Game) -> String {
    let mut lines = vec![
        game.competition.clone(),
        format!("{} vs {}", game.home_team, game.away_team),
    ];
    if let Some(round) = game.round.as_deref().filter(|r| !r.is_empty()) {
        lines.push(round.to_string());
    }
    if let Some(place) = game.display_location() {
        lines.push(format!("Venue: {}", place));
    }
    lines.join("\n")
}
