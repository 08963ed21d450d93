//! The fixed textual date/time format shared by every component.
//!
//! Games carry their start as two strings, `YYYY-MM-DD` and `HH:MM`, with no
//! zone attached. Everything that needs an instant (upcoming filter, sorting,
//! calendar events) goes through [`parse`], so a record that one component
//! treats as unparseable is unparseable everywhere.

use chrono::{DateTime, NaiveDateTime, TimeZone};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Split a wall-clock datetime into the `(date, time)` strings.
pub fn format(at: &NaiveDateTime) -> (String, String) {
    (
        at.format(DATE_FORMAT).to_string(),
        at.format(TIME_FORMAT).to_string(),
    )
}

/// Format an instant as seen in `tz`'s local wall clock.
pub fn format_in<Tz: TimeZone>(at: &DateTime<Tz>) -> (String, String) {
    format(&at.naive_local())
}

/// Parse `date` + `time` back into a wall-clock datetime.
pub fn parse(date: &str, time: &str) -> Option<NaiveDateTime> {
    if date.len() != 10 || time.len() != 5 {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), DATE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn test_format_parse_format_is_identity() {
        for (date, time) in [("2026-03-01", "20:00"), ("2025-12-31", "00:05"), ("2028-02-29", "23:59")] {
            let parsed = parse(date, time).expect("valid kickoff");
            let (d, t) = format(&parsed);
            assert_eq!((d.as_str(), t.as_str()), (date, time));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse("2026-3-1", "20:00").is_none());
        assert!(parse("2026-03-01", "8:00").is_none());
        assert!(parse("2026-02-30", "20:00").is_none());
        assert!(parse("2026-03-01", "25:00").is_none());
        assert!(parse("", "").is_none());
        assert!(parse("TBD", "20:00").is_none());
    }

    #[test]
    fn test_format_in_uses_local_wall_clock() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let at = NaiveDate::from_ymd_opt(2026, 1, 10)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap()
            .and_utc()
            .with_timezone(&cet);
        assert_eq!(format_in(&at), ("2026-01-10".to_string(), "20:30".to_string()));
    }
}
