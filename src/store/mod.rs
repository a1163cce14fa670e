pub mod alerts;
pub mod clock;
pub mod models;
pub mod operations;
pub mod queries;
pub mod seed;
pub mod status;
pub mod validation;

use models::{AlertItem, HistoryAction, HistoryEntry, Notification, Provider, Severity};

/// Session-scoped provider registry.
///
/// Owns providers, the audit history, alerts and notifications. Every
/// collection is kept most-recent-first. Nothing is persisted: dropping the
/// store discards the session.
#[derive(Debug, Clone)]
pub struct DemoStore {
    providers: Vec<Provider>,
    history: Vec<HistoryEntry>,
    alerts: Vec<AlertItem>,
    notifications: Vec<Notification>,
}

impl Default for DemoStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl DemoStore {
    pub fn seeded() -> Self {
        Self {
            providers: seed::providers(),
            history: seed::history(),
            alerts: seed::alerts(),
            notifications: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
            history: Vec::new(),
            alerts: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn alerts(&self) -> &[AlertItem] {
        &self.alerts
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    fn provider_mut(&mut self, id: &str) -> Option<&mut Provider> {
        self.providers.iter_mut().find(|p| p.id == id)
    }

    fn record(
        &mut self,
        action: HistoryAction,
        provider_name: &str,
        detail: String,
        provider_id: Option<&str>,
    ) {
        self.history.insert(
            0,
            HistoryEntry {
                id: clock::uid(),
                date: clock::now(),
                action,
                provider_id: provider_id.map(String::from),
                provider_name: provider_name.to_string(),
                detail,
            },
        );
    }

    pub fn add_notification(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.insert(
            0,
            Notification {
                id: clock::uid(),
                message: message.into(),
                severity,
                timestamp: clock::now(),
                read: false,
            },
        );
    }

    pub fn mark_notification_read(&mut self, id: &str) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Restores the seed snapshot and drops everything else.
    pub fn reset_all(&mut self) {
        *self = Self::seeded();
        tracing::info!("Store reset to seed data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ProviderStatus;

    #[test]
    fn test_seed_counts() {
        let store = DemoStore::seeded();
        assert_eq!(store.providers().len(), 6);
        assert_eq!(store.history().len(), 8);
        assert_eq!(store.alerts().len(), 7);
        assert!(store.notifications().is_empty());
        assert_eq!(
            store.provider("seed-4").unwrap().status,
            ProviderStatus::Bloqueado
        );
        assert_eq!(
            store.provider("seed-6").unwrap().status,
            ProviderStatus::Bloqueado
        );
    }

    #[test]
    fn test_notifications_inbox() {
        let mut store = DemoStore::empty();
        store.add_notification("primero", Severity::Info);
        store.add_notification("segundo", Severity::Warning);
        assert_eq!(store.notifications()[0].message, "segundo");
        assert_eq!(store.unread_count(), 2);

        let id = store.notifications()[1].id.clone();
        store.mark_notification_read(&id);
        assert!(store.notifications()[1].read);
        assert_eq!(store.unread_count(), 1);

        store.mark_notification_read("no-existe");
        assert_eq!(store.unread_count(), 1);

        store.clear_notifications();
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_reset_all_restores_seed() {
        let mut store = DemoStore::seeded();
        store.delete_provider("seed-1");
        store.block_provider("seed-2", "prueba");
        store.add_notification("hola", Severity::Info);
        store.dismiss_alert("a3");

        store.reset_all();

        assert_eq!(store.providers().len(), 6);
        assert_eq!(store.history().len(), 8);
        assert_eq!(store.alerts().len(), 7);
        assert_eq!(store.notifications().len(), 0);
        assert_eq!(
            store.provider("seed-2").unwrap().status,
            ProviderStatus::Activo
        );
        assert_eq!(
            store.provider("seed-4").unwrap().status,
            ProviderStatus::Bloqueado
        );
        assert_eq!(
            store.provider("seed-6").unwrap().status,
            ProviderStatus::Bloqueado
        );
    }
}
