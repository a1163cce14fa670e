use chrono::NaiveDate;

use super::DemoStore;
use super::clock;
use super::models::{AlertItem, AlertKind};

impl DemoStore {
    pub fn dismiss_alert(&mut self, id: &str) {
        self.alerts.retain(|a| a.id != id);
    }

    /// Raises `vencido` / `proximo` alerts for uploaded documents whose
    /// expiry date (`YYYY-MM-DD`) is past or within `window_days` of `today`.
    /// An alert already present for the same provider, document and kind is
    /// not raised twice; an expired document drops its `proximo` alert.
    /// Returns the number of alerts raised.
    pub fn scan_expiry(&mut self, today: NaiveDate, window_days: i64) -> usize {
        let mut raised = Vec::new();

        for p in &self.providers {
            for (doc_key, slot) in p.docs.iter() {
                if !slot.uploaded {
                    continue;
                }
                let Some(raw) = slot.expiry_date.as_deref() else {
                    continue;
                };
                let expiry = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!("Skipping expiry '{raw}' on {}/{doc_key}: {e}", p.id);
                        continue;
                    }
                };

                let days_left = (expiry - today).num_days();
                let (kind, date) = if days_left < 0 {
                    (
                        AlertKind::Vencido,
                        format!("Venció el {}", clock::display_date(expiry)),
                    )
                } else if days_left <= window_days {
                    (
                        AlertKind::Proximo,
                        format!("Vence el {}", clock::display_date(expiry)),
                    )
                } else {
                    continue;
                };

                if self.alerts.iter().any(|a| a.matches(&p.id, doc_key, kind)) {
                    continue;
                }
                raised.push(AlertItem {
                    id: clock::uid(),
                    kind,
                    provider_id: p.id.clone(),
                    provider: p.nombre.clone(),
                    document: doc_key.label().to_string(),
                    doc_key,
                    date: Some(date),
                });
            }
        }

        let count = raised.len();
        for alert in raised {
            if alert.kind == AlertKind::Vencido {
                self.alerts
                    .retain(|a| !a.matches(&alert.provider_id, alert.doc_key, AlertKind::Proximo));
            }
            tracing::debug!(
                "Raised {} alert for {}/{}",
                alert.kind.as_str(),
                alert.provider_id,
                alert.doc_key
            );
            self.alerts.insert(0, alert);
        }
        count
    }
}
