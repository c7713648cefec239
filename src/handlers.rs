use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use reqwest::header::COOKIE;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{DashboardViewState, QuickLogEntry};
use crate::state::AppState;
use crate::ui::render_dashboard;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.dashboard.current_state();
    Html(render_dashboard(&view, Local::now().date_naive()))
}

pub async fn get_view(State(state): State<AppState>) -> Json<DashboardViewState> {
    Json(state.dashboard.current_state())
}

pub async fn refresh(State(state): State<AppState>) -> Redirect {
    state.dashboard.initiate_fetch();
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct QuickLogForm {
    pub date: String,
    pub hours: f64,
    pub notes: Option<String>,
}

/// Forwards a quick-log submission to the upstream logging endpoint, then
/// refetches so the page reflects the new entry. Validation stays minimal:
/// the date must parse and hours must fall in [0, 24].
pub async fn quick_log(
    State(state): State<AppState>,
    Form(form): Form<QuickLogForm>,
) -> Result<Redirect, AppError> {
    let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be formatted YYYY-MM-DD"))?;
    if !(0.0..=24.0).contains(&form.hours) {
        return Err(AppError::bad_request("hours must be between 0 and 24"));
    }
    let notes = form
        .notes
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let entry = QuickLogEntry {
        date,
        hours: form.hours,
        notes,
    };

    let mut request = state.client.post(state.upstream.log_url()).json(&entry);
    if let Some(cookie) = state.upstream.cookie_header() {
        request = request.header(COOKIE, cookie);
    }
    let response = request
        .send()
        .await
        .map_err(|err| AppError::bad_gateway(format!("could not reach logging service: {err}")))?;
    if !response.status().is_success() {
        return Err(AppError::bad_gateway(format!(
            "logging service returned status {}",
            response.status()
        )));
    }

    info!(%date, hours = entry.hours, "logged hours upstream");
    state.dashboard.initiate_fetch();
    Ok(Redirect::to("/"))
}
