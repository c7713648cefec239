use chrono::{Datelike, NaiveDate};

use crate::calendar::{self, DayKind};
use crate::metrics::{
    self, catch_up_per_day, daily_average, elapsed_year_fraction, pace_delta_hours, pace_status,
    percent_complete, remaining, Pace,
};
use crate::models::{DashboardSnapshot, DashboardViewState};

/// Renders the whole page for the current view state. Loading and failed
/// phases replace the dashboard entirely; stale and fresh data never mix.
pub fn render_dashboard(view: &DashboardViewState, today: NaiveDate) -> String {
    let body = match view {
        DashboardViewState::Loading => {
            r#"<section class="status"><p>Loading dashboard...</p></section>"#.to_string()
        }
        DashboardViewState::Failed { message, .. } => format!(
            r#"<section class="status error"><p>{}</p><form method="post" action="/refresh"><button type="submit">Retry</button></form></section>"#,
            escape(message)
        ),
        DashboardViewState::Ready { snapshot } => render_ready(snapshot, today),
    };
    PAGE_HTML.replace("{{BODY}}", &body)
}

fn render_ready(snapshot: &DashboardSnapshot, today: NaiveDate) -> String {
    format!(
        r#"<section class="cards">{cards}</section>
<section class="split">
  <div class="panel activity">{activity}</div>
  <div class="panel">{quick_log}</div>
</section>
<section class="split charts">{charts}</section>
<section class="panel">{calendar}</section>"#,
        cards = render_summary_cards(snapshot, today),
        activity = render_recent_activity(snapshot),
        quick_log = render_quick_log(today),
        charts = render_charts(),
        calendar = render_calendar(snapshot, today),
    )
}

fn render_summary_cards(snapshot: &DashboardSnapshot, today: NaiveDate) -> String {
    let year_pct = percent_complete(snapshot.year_actual, snapshot.year_target);
    let month_pct = percent_complete(snapshot.month_actual, snapshot.month_target);
    let month_left = remaining(snapshot.month_actual, snapshot.month_target);

    let mut cards = String::new();
    cards.push_str(&card(
        "Annual Goal",
        &format_hours(snapshot.annual_goal),
        "hours",
        Some(year_pct),
        &format!("{} complete", format_percent(year_pct)),
    ));
    cards.push_str(&card(
        "This Month",
        &format_hours(snapshot.month_actual),
        &format!("of {} hours", format_hours(snapshot.month_target)),
        Some(month_pct),
        &format!("{} hrs remaining", format_hours(month_left)),
    ));
    cards.push_str(&card(
        "Daily Average",
        &format_hours(daily_average(snapshot.month_actual, today.day())),
        "hours/day",
        None,
        "this month so far",
    ));
    cards.push_str(&pace_card(snapshot, today));
    cards
}

fn pace_card(snapshot: &DashboardSnapshot, today: NaiveDate) -> String {
    let elapsed = elapsed_year_fraction(today);
    let delta = pace_delta_hours(snapshot.year_actual, snapshot.year_target, elapsed);
    let pace = pace_status(
        snapshot.year_actual,
        snapshot.year_target,
        elapsed,
        metrics::DEFAULT_PACE_TOLERANCE,
    );

    let year_end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
    let days_left = (year_end - today).num_days().max(0) as u32;
    let catch_up = catch_up_per_day(remaining(snapshot.year_actual, snapshot.annual_goal), days_left);

    let (subvalue, detail) = match pace {
        Pace::Ahead => ("hours ahead".to_string(), "On track for annual goal".to_string()),
        Pace::OnTrack => ("on pace".to_string(), "On track for annual goal".to_string()),
        Pace::Behind => (
            "hours behind".to_string(),
            format!("Catch up at {} hrs/day", format_hours(catch_up)),
        ),
    };
    card(
        "Pace Status",
        &format_hours(delta.abs()),
        &subvalue,
        None,
        &detail,
    )
}

fn card(title: &str, value: &str, subvalue: &str, progress: Option<f64>, detail: &str) -> String {
    let bar = progress
        .map(|pct| {
            format!(
                r#"<div class="bar"><div class="bar-fill" style="width: {:.0}%"></div></div>"#,
                pct.clamp(0.0, 100.0)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<article class="card"><h3>{title}</h3><p class="value">{value} <span class="subvalue">{subvalue}</span></p>{bar}<p class="detail">{detail}</p></article>"#
    )
}

fn render_recent_activity(snapshot: &DashboardSnapshot) -> String {
    let mut html = String::from("<h3>Recent Activity</h3>");
    if snapshot.recent_days.is_empty() {
        html.push_str(r#"<p class="empty">No hours logged yet.</p>"#);
        return html;
    }
    for day in &snapshot.recent_days {
        html.push_str(&format!(
            r#"<div class="row"><div><div class="row-date">{date}</div><div class="row-target">Target: {target} hrs</div></div><span class="badge {class}">{logged} hrs</span></div>"#,
            date = day.date.format("%b %-d, %Y"),
            target = format_hours(day.target),
            class = day.status.css_class(),
            logged = format_hours(day.logged),
        ));
    }
    html
}

fn render_quick_log(today: NaiveDate) -> String {
    format!(
        r#"<h3>Quick Log Hours</h3>
<form class="quick-log" method="post" action="/log">
  <label>Date <input type="date" name="date" value="{today}" required></label>
  <label>Hours <input type="number" name="hours" step="0.1" min="0" max="24" required></label>
  <label>Notes (optional) <textarea name="notes" rows="2" placeholder="Client or matter reference..."></textarea></label>
  <button type="submit">Log Hours</button>
</form>"#
    )
}

fn render_charts() -> String {
    // Chart computation is out of scope; these panels only carry empty states.
    r#"<div class="panel chart"><h3>Monthly Progress</h3><p class="empty">No chart data yet.</p></div><div class="panel chart"><h3>Hours by Weekday</h3><p class="empty">No chart data yet.</p></div>"#
        .to_string()
}

fn render_calendar(snapshot: &DashboardSnapshot, today: NaiveDate) -> String {
    let year = today.year();
    let month = today.month();
    let by_day = calendar::logged_hours_by_day(&snapshot.recent_days, year, month);

    let mut html = format!("<h3>{}</h3><div class=\"grid\">", today.format("%B %Y"));
    for name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        html.push_str(&format!(r#"<div class="grid-head">{name}</div>"#));
    }
    for _ in 0..calendar::leading_blank_columns(year, month) {
        html.push_str(r#"<div class="day blank"></div>"#);
    }
    for cell in calendar::month_cells(year, month, today, |day| by_day.get(&day).copied()) {
        let class = match cell.classification {
            DayKind::Today => "today",
            DayKind::Weekend => "weekend",
            DayKind::Past => "past",
            DayKind::Future => "future",
        };
        let hours = cell
            .hours_logged
            .map(|hours| format!(r#"<div class="cell-hours">{}h</div>"#, format_hours(hours)))
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="day {class}"><div>{day}</div>{hours}</div>"#,
            day = cell.day_number
        ));
    }
    html.push_str("</div>");
    html
}

fn format_hours(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:.0}%")
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>BillableHours</title>
  <style>
    :root {
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #2563eb;
      --card: #ffffff;
      --bg: #f9fafb;
      --ok: #dcfce7;
      --ok-ink: #166534;
      --warn: #fef9c3;
      --warn-ink: #854d0e;
      --info: #dbeafe;
      --info-ink: #1e40af;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      padding: 24px;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
    }

    h1 { margin: 0 0 20px; font-size: 1.6rem; }
    h3 { margin: 0 0 12px; font-size: 1rem; color: var(--ink); }

    .status { display: grid; place-items: center; min-height: 60vh; font-size: 1.2rem; }
    .status.error { color: #b91c1c; }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
      margin-bottom: 20px;
    }

    .card, .panel {
      background: var(--card);
      border-radius: 12px;
      box-shadow: 0 1px 3px rgba(31, 41, 55, 0.12);
      padding: 20px;
    }

    .card h3 { color: var(--muted); font-size: 0.85rem; }
    .value { font-size: 1.6rem; font-weight: 700; margin: 0; }
    .subvalue { font-size: 0.9rem; font-weight: 400; color: var(--muted); }
    .detail { color: var(--muted); font-size: 0.85rem; margin: 8px 0 0; }

    .bar { background: #e5e7eb; border-radius: 999px; height: 8px; margin-top: 12px; }
    .bar-fill { background: var(--accent); border-radius: 999px; height: 8px; }

    .split {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 16px;
      margin-bottom: 20px;
    }
    .split.charts { grid-template-columns: 1fr 1fr; }

    .row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      border-bottom: 1px solid #f3f4f6;
      padding: 10px 0;
    }
    .row-date { font-weight: 600; }
    .row-target { color: var(--muted); font-size: 0.85rem; }

    .badge { border-radius: 8px; padding: 4px 12px; font-size: 0.85rem; font-weight: 600; }
    .badge.success { background: var(--ok); color: var(--ok-ink); }
    .badge.warning { background: var(--warn); color: var(--warn-ink); }
    .badge.info { background: var(--info); color: var(--info-ink); }

    .quick-log { display: grid; gap: 12px; }
    .quick-log label { display: grid; gap: 4px; font-size: 0.9rem; color: var(--muted); }
    .quick-log input, .quick-log textarea {
      border: 1px solid #d1d5db;
      border-radius: 8px;
      padding: 8px;
      font: inherit;
    }
    .quick-log button, .status button {
      background: var(--accent);
      border: none;
      border-radius: 8px;
      color: #fff;
      cursor: pointer;
      font-weight: 600;
      padding: 10px;
    }

    .empty { color: var(--muted); }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
    }
    .grid-head { color: var(--muted); font-size: 0.8rem; padding: 6px 0; }
    .day { border-radius: 8px; padding: 6px 2px; font-size: 0.85rem; min-height: 44px; }
    .day.blank { visibility: hidden; }
    .day.today { background: var(--accent); color: #fff; }
    .day.weekend { background: #f3f4f6; color: #9ca3af; }
    .day.past { background: #f0fdf4; border: 1px solid #bbf7d0; }
    .day.future { border: 1px solid #e5e7eb; }
    .cell-hours { font-size: 0.7rem; margin-top: 2px; }
  </style>
</head>
<body>
  <h1>Dashboard</h1>
  {{BODY}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureCause;
    use crate::models::{DayEntry, DayStatus};

    fn sample_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            year_progress: 42.0,
            month_progress: 97.0,
            recent_days: vec![DayEntry {
                date: NaiveDate::from_ymd_opt(2025, 4, 16).unwrap(),
                target: 8.0,
                logged: 8.0,
                status: DayStatus::Success,
            }],
            annual_goal: 1800.0,
            month_actual: 145.0,
            month_target: 150.0,
            year_actual: 756.0,
            year_target: 1800.0,
        }
    }

    #[test]
    fn ready_page_shows_activity_badge_and_remaining_hours() {
        let view = DashboardViewState::Ready {
            snapshot: sample_snapshot(),
        };
        let page = render_dashboard(&view, NaiveDate::from_ymd_opt(2025, 4, 17).unwrap());

        assert!(page.contains("8 hrs"));
        assert!(page.contains("badge success"));
        assert!(page.contains("5 hrs remaining"));
        assert!(page.contains("April 2025"));
        assert!(page.contains("Apr 16, 2025"));
    }

    #[test]
    fn ready_page_without_activity_shows_empty_state() {
        let mut snapshot = sample_snapshot();
        snapshot.recent_days.clear();
        let view = DashboardViewState::Ready { snapshot };
        let page = render_dashboard(&view, NaiveDate::from_ymd_opt(2025, 4, 17).unwrap());
        assert!(page.contains("No hours logged yet."));
    }

    #[test]
    fn loading_page_shows_indicator_only() {
        let page = render_dashboard(
            &DashboardViewState::Loading,
            NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
        );
        assert!(page.contains("Loading dashboard..."));
        assert!(!page.contains("Recent Activity"));
    }

    #[test]
    fn failed_page_escapes_the_message() {
        let view = DashboardViewState::Failed {
            message: "<script>alert(1)</script>".to_string(),
            cause: FailureCause::Shape,
        };
        let page = render_dashboard(&view, NaiveDate::from_ymd_opt(2025, 4, 17).unwrap());
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
    }

    #[test]
    fn hours_format_drops_trailing_zero() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(f64::NAN), "0");
    }
}
