use chrono::{NaiveDate, Utc};
use domain::DomainError;
use domain::report::ReportRepository;
use domain::statistics::{DateWindow, Period, StatisticsSummary, summarize};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Either an explicit `from`/`to` range or a `period` around `date`
/// (today when absent). A period takes precedence over explicit bounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub period: Option<String>,
    pub date: Option<NaiveDate>,
}

impl StatisticsQuery {
    pub fn window(&self, today: NaiveDate) -> Result<DateWindow, DomainError> {
        match self.period.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => {
                let period: Period = raw.parse()?;
                Ok(DateWindow::for_period(period, self.date.unwrap_or(today)))
            }
            None => DateWindow::new(self.from, self.to),
        }
    }
}

pub struct StatisticsService {
    reports: Arc<dyn ReportRepository>,
}

impl StatisticsService {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    pub async fn summary(&self, query: &StatisticsQuery) -> Result<StatisticsSummary, DomainError> {
        let window = query.window(Utc::now().date_naive())?;
        let counts = self.reports.count_by_status(&window).await?;
        debug!(from = ?window.from, to = ?window.to, groups = counts.len(), "Computed status counts");
        Ok(summarize(window, counts))
    }
}
