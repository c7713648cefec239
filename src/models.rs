use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FailureCause;

/// Point-in-time copy of the user's progress data as served by the upstream
/// planner. Field names follow the wire contract (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub year_progress: f64,
    pub month_progress: f64,
    /// Most-recent-first. Absent on the wire means no recent activity.
    #[serde(default)]
    pub recent_days: Vec<DayEntry>,
    pub annual_goal: f64,
    pub month_actual: f64,
    pub month_target: f64,
    pub year_actual: f64,
    pub year_target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: NaiveDate,
    pub target: f64,
    pub logged: f64,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Success,
    Warning,
    Info,
}

impl DayStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            DayStatus::Success => "success",
            DayStatus::Warning => "warning",
            DayStatus::Info => "info",
        }
    }
}

/// Lifecycle of the dashboard fetch. Exactly one variant holds at a time, so a
/// snapshot and an error message can never coexist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum DashboardViewState {
    Loading,
    Ready {
        snapshot: DashboardSnapshot,
    },
    Failed {
        message: String,
        cause: FailureCause,
    },
}

impl DashboardViewState {
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            DashboardViewState::Ready { snapshot } => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardViewState::Loading)
    }
}

/// Shape of a quick-log submission forwarded to the upstream logging endpoint.
/// `hours` is expected in `[0, 24]`; `notes` is a free-form client or matter
/// reference. The dashboard forwards this unchanged beyond the range check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickLogEntry {
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
