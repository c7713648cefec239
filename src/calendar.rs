use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::models::DayEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Today,
    Weekend,
    Past,
    Future,
}

/// One day of the month preview grid. Built fresh on every render and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub day_number: u32,
    pub classification: DayKind,
    pub hours_logged: Option<f64>,
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Cells for `(year, month)` in ascending day order, classified relative to
/// `today`. Weekend wins over today/past/future; logged hours only appear on
/// weekdays that have already occurred and have an entry in the lookup. An
/// invalid year/month yields an empty sequence.
///
/// The result is recomputed on each call; padding the grid out to seven
/// columns is the renderer's concern, not done here.
pub fn month_cells<F>(
    year: i32,
    month: u32,
    today: NaiveDate,
    logged_hours: F,
) -> impl Iterator<Item = CalendarCell>
where
    F: Fn(u32) -> Option<f64>,
{
    let days = days_in_month(year, month).unwrap_or(0);
    (1..=days)
        .filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
        .map(move |date| {
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let classification = if weekend {
                DayKind::Weekend
            } else if date == today {
                DayKind::Today
            } else if date < today {
                DayKind::Past
            } else {
                DayKind::Future
            };
            let hours_logged = if weekend || date > today {
                None
            } else {
                logged_hours(date.day())
            };
            CalendarCell {
                day_number: date.day(),
                classification,
                hours_logged,
            }
        })
}

/// Day-of-month → logged hours for the given month, taken from the snapshot's
/// recent activity. This is the deterministic source behind the calendar's
/// per-day hour labels.
pub fn logged_hours_by_day(entries: &[DayEntry], year: i32, month: u32) -> BTreeMap<u32, f64> {
    entries
        .iter()
        .filter(|entry| entry.date.year() == year && entry.date.month() == month)
        .map(|entry| (entry.date.day(), entry.logged))
        .collect()
}

/// Column index (0 = Sunday) of the first day of the month, for grid padding.
pub fn leading_blank_columns(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayStatus;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn no_hours(_day: u32) -> Option<f64> {
        None
    }

    #[test]
    fn leap_february_has_29_cells() {
        let cells: Vec<_> = month_cells(2024, 2, date(2024, 2, 17), no_hours).collect();
        assert_eq!(cells.len(), 29);
        assert_eq!(cells.first().unwrap().day_number, 1);
        assert_eq!(cells.last().unwrap().day_number, 29);
    }

    #[test]
    fn common_february_has_28_cells() {
        let cells: Vec<_> = month_cells(2025, 2, date(2025, 2, 17), no_hours).collect();
        assert_eq!(cells.len(), 28);
    }

    #[test]
    fn invalid_month_yields_nothing() {
        assert_eq!(month_cells(2025, 13, date(2025, 4, 17), no_hours).count(), 0);
    }

    #[test]
    fn future_days_never_show_hours() {
        let today = date(2025, 4, 17);
        let cells: Vec<_> = month_cells(2025, 4, today, |_| Some(7.5)).collect();
        for cell in cells.iter().filter(|cell| cell.day_number > 17) {
            assert!(cell.hours_logged.is_none(), "day {}", cell.day_number);
        }
        // Today itself still shows its entry.
        assert_eq!(cells[16].classification, DayKind::Today);
        assert_eq!(cells[16].hours_logged, Some(7.5));
    }

    #[test]
    fn weekends_suppress_hours_even_with_entries() {
        let today = date(2025, 4, 30);
        // 2025-04-05 is a Saturday, 2025-04-06 a Sunday.
        let cells: Vec<_> = month_cells(2025, 4, today, |_| Some(8.0)).collect();
        for cell in cells {
            if cell.classification == DayKind::Weekend {
                assert!(cell.hours_logged.is_none(), "day {}", cell.day_number);
            }
        }
    }

    #[test]
    fn weekend_wins_over_today() {
        // 2025-04-19 is a Saturday.
        let today = date(2025, 4, 19);
        let cells: Vec<_> = month_cells(2025, 4, today, no_hours).collect();
        assert_eq!(cells[18].classification, DayKind::Weekend);
    }

    #[test]
    fn other_months_classify_by_full_date() {
        // Viewing March while today is in April: every weekday is Past.
        let today = date(2025, 4, 17);
        let cells: Vec<_> = month_cells(2025, 3, today, no_hours).collect();
        assert!(cells
            .iter()
            .all(|cell| matches!(cell.classification, DayKind::Past | DayKind::Weekend)));
    }

    #[test]
    fn lookup_built_from_recent_days() {
        let entries = vec![
            DayEntry {
                date: date(2025, 4, 16),
                target: 8.0,
                logged: 8.0,
                status: DayStatus::Success,
            },
            DayEntry {
                date: date(2025, 3, 31),
                target: 8.0,
                logged: 6.0,
                status: DayStatus::Warning,
            },
        ];
        let by_day = logged_hours_by_day(&entries, 2025, 4);
        assert_eq!(by_day.get(&16), Some(&8.0));
        assert_eq!(by_day.get(&31), None);
    }

    #[test]
    fn leading_blanks_match_weekday_of_first() {
        // April 2025 starts on a Tuesday.
        assert_eq!(leading_blank_columns(2025, 4), 2);
        assert_eq!(leading_blank_columns(2025, 13), 0);
    }
}
