//! Report statistics: date windows and per-status shares.

use crate::DomainError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl std::str::FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(DomainError::Validation(format!("Unknown period: {}", other))),
        }
    }
}

/// Inclusive date range; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, DomainError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(DomainError::Validation(format!(
                    "Invalid date range: {} is after {}",
                    f, t
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Calendar-aligned window containing `reference`. Weeks start on Monday.
    pub fn for_period(period: Period, reference: NaiveDate) -> Self {
        let (from, to) = match period {
            Period::Day => (reference, reference),
            Period::Week => {
                let from = reference
                    - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
                (from, from + Duration::days(6))
            }
            Period::Month => {
                let from = reference.with_day(1).unwrap_or(reference);
                let next_month = if from.month() == 12 {
                    NaiveDate::from_ymd_opt(from.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(from.year(), from.month() + 1, 1)
                };
                let to = next_month
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(reference);
                (from, to)
            }
            Period::Year => (
                NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference),
                NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference),
            ),
        };
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|f| date >= f) && self.to.is_none_or(|t| date <= t)
    }
}

/// Raw grouped count as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub estado: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub estado: String,
    pub count: u64,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total: u64,
    pub statuses: Vec<StatusShare>,
}

/// `count / total * 100` rounded to two decimals, with a trailing `%`.
pub fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    let pct = (count as f64 / total as f64 * 100.0 * 100.0).round() / 100.0;
    format!("{:.2}%", pct)
}

/// Turns grouped counts into the response shape. Groups are ordered by count
/// (descending) then name; status strings are kept verbatim, so case variants
/// stay separate groups.
pub fn summarize(window: DateWindow, counts: Vec<StatusCount>) -> StatisticsSummary {
    let total: u64 = counts.iter().map(|c| c.count).sum();

    let mut statuses: Vec<StatusShare> = counts
        .into_iter()
        .map(|c| StatusShare {
            percentage: format_percentage(c.count, total),
            estado: c.estado,
            count: c.count,
        })
        .collect();
    statuses.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.estado.cmp(&b.estado)));

    StatisticsSummary {
        from: window.from,
        to: window.to,
        total,
        statuses,
    }
}
