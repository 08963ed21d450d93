use chrono::{DateTime, NaiveDateTime, Utc};
use ical::generator::Emitter;
use ical::parser::ical::component::{IcalAlarm, IcalCalendar, IcalEvent};
use ical::property::Property;

use super::CalendarEvent;

const PRODID: &str = "-//partizan-ics//Schedule Calendar//EN";
const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

fn property(name: &str, value: impl Into<String>) -> Property {
    Property {
        name: name.to_string(),
        params: None,
        value: Some(value.into()),
    }
}

fn text(name: &str, value: &str) -> Property {
    property(name, escape_text(value))
}

fn floating(at: &NaiveDateTime) -> String {
    at.format(FLOATING_FORMAT).to_string()
}

fn utc(at: &DateTime<Utc>) -> String {
    at.format(UTC_FORMAT).to_string()
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

fn vevent(event: &CalendarEvent) -> IcalEvent {
    let stamp = utc(&event.stamp);

    let mut vevent = IcalEvent::new();
    vevent.properties = vec![
        property("UID", event.uid.as_str()),
        property("DTSTAMP", stamp.as_str()),
        property("CREATED", stamp.as_str()),
        property("LAST-MODIFIED", stamp.as_str()),
        property("DTSTART", floating(&event.start)),
        property("DTEND", floating(&event.end)),
        text("SUMMARY", &event.summary),
        text("DESCRIPTION", &event.description),
    ];
    if let Some(location) = &event.location {
        vevent.properties.push(text("LOCATION", location));
    }
    vevent.properties.push(property("STATUS", "CONFIRMED"));

    vevent.alarms = event
        .reminders
        .iter()
        .map(|reminder| {
            let mut alarm = IcalAlarm::new();
            alarm.properties = vec![
                property("ACTION", "DISPLAY"),
                property("TRIGGER", format!("-PT{}M", reminder.minutes_before)),
                text("DESCRIPTION", &reminder.message),
            ];
            alarm
        })
        .collect();

    vevent
}

/// Serialize events into a VCALENDAR document.
pub fn render(name: &str, events: &[CalendarEvent]) -> String {
    let mut calendar = IcalCalendar::new();
    calendar.properties = vec![
        property("VERSION", "2.0"),
        property("PRODID", PRODID),
        property("CALSCALE", "GREGORIAN"),
        property("METHOD", "PUBLISH"),
        text("X-WR-CALNAME", name),
    ];
    calendar.events = events.iter().map(vevent).collect();
    calendar.generate()
}
