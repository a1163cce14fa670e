pub mod csv;
pub mod html;
pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::error::AppError;
use crate::store::DemoStore;
use crate::store::clock;
use crate::store::models::{AlertItem, HistoryEntry, Provider};
use crate::store::queries::{AlertCounts, StatusCounts};

pub enum ReportFormat {
    Terminal,
    Json,
    Html,
    /// Dashboard export: one row per provider with document counts.
    Csv,
    /// Registry export: contact data plus one column per required document.
    CsvDetalle,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub providers: Vec<Provider>,
    pub alerts: Vec<AlertItem>,
    pub history: Vec<HistoryEntry>,
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub providers: StatusCounts,
    pub alerts: AlertCounts,
    pub history_entries: usize,
    pub unread_notifications: usize,
}

impl Report {
    pub fn build(store: &DemoStore) -> Self {
        let summary = ReportSummary {
            providers: store.status_counts(),
            alerts: store.alert_counts(),
            history_entries: store.history().len(),
            unread_notifications: store.unread_count(),
        };

        Self {
            generated_at: clock::now(),
            providers: store.providers().to_vec(),
            alerts: store.alerts().to_vec(),
            history: store.history().to_vec(),
            summary,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, AppError> {
        match format {
            ReportFormat::Terminal => terminal::render(self),
            ReportFormat::Json => json::render(self),
            ReportFormat::Html => html::render(self),
            ReportFormat::Csv => csv::render_summary(self),
            ReportFormat::CsvDetalle => csv::render_detail(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_seed() {
        let store = DemoStore::seeded();
        let report = Report::build(&store);
        assert_eq!(report.providers.len(), 6);
        assert_eq!(report.summary.providers.bloqueado, 2);
        assert_eq!(report.summary.alerts.faltante, 3);
        assert_eq!(report.summary.history_entries, 8);
        assert_eq!(report.summary.unread_notifications, 0);
    }

    #[test]
    fn test_render_every_format() {
        let report = Report::build(&DemoStore::seeded());
        for format in [
            ReportFormat::Terminal,
            ReportFormat::Json,
            ReportFormat::Html,
            ReportFormat::Csv,
            ReportFormat::CsvDetalle,
        ] {
            let out = report.render(format).unwrap();
            assert!(out.contains("Suministros del Valle"));
        }
    }
}
