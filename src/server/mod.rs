use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::calendar::CalendarBuilder;
use crate::schedule::Game;
use crate::service::ScheduleService;

#[derive(Clone)]
pub struct AppState {
    pub service: ScheduleService,
    pub calendar: CalendarBuilder,
    pub team: String,
}

#[derive(Serialize)]
struct GamesResponse<'a> {
    count: usize,
    games: &'a [Game],
}

#[derive(Serialize)]
struct RefreshResponse {
    message: &'static str,
    count: usize,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    games_cached: usize,
}

/// Build the Axum router for the calendar service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/calendar.ics", get(calendar_handler))
        .route("/games", get(games_handler))
        .route("/refresh", get(refresh_handler).post(refresh_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Landing page with the subscription URL for this host.
async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|s| *s == "https")
        .unwrap_or("http");

    Html(
        INDEX_HTML
            .replace("{team}", &escape_html(&state.team))
            .replace(
                "{calendar_url}",
                &escape_html(&format!("{}://{}/calendar.ics", scheme, host)),
            ),
    )
}

/// Escape text for an HTML body or double-quoted attribute.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// GET /calendar.ics
async fn calendar_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let games = state.service.games().await;
    let body = state.calendar.build(&games);
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (header::CACHE_CONTROL, "max-age=3600"),
        ],
        body,
    )
}

/// GET /games
async fn games_handler(State(state): State<Arc<AppState>>) -> Response {
    let games = state.service.games().await;
    Json(GamesResponse {
        count: games.len(),
        games: &games,
    })
    .into_response()
}

/// GET|POST /refresh
async fn refresh_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let games = state.service.refresh().await;
    Json(RefreshResponse {
        message: "Schedule refreshed",
        count: games.len(),
    })
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        games_cached: state.service.cached_count().await,
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{team} Basketball Schedule</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px;">
  <h1>🏀 {team} Schedule Calendar</h1>
  <p>Subscribe to {team} basketball games across all competitions.</p>

  <h2>Calendar Subscription URL:</h2>
  <code style="background: #f4f4f4; padding: 10px; display: block; margin: 10px 0;">{calendar_url}</code>

  <h3>How to subscribe:</h3>
  <ul>
    <li><strong>Apple Calendar:</strong> File → New Calendar Subscription → Paste URL</li>
    <li><strong>Google Calendar:</strong> Settings → Add Calendar → From URL → Paste URL</li>
    <li><strong>Outlook:</strong> Add Calendar → Subscribe from web → Paste URL</li>
  </ul>

  <h3>Features:</h3>
  <ul>
    <li>Euroleague and regional league games in one feed</li>
    <li>Game title includes competition name and teams</li>
    <li>Venue location information</li>
    <li>Reminders 30 and 5 minutes before each game</li>
  </ul>

  <p><a href="/games">View upcoming games (JSON)</a> | <a href="/refresh">Force refresh</a></p>
</body>
</html>"#;
