use serde::Serialize;

use super::DemoStore;
use super::models::{AlertItem, AlertKind, HistoryEntry, Provider, ProviderStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todos: usize,
    pub activo: usize,
    pub pendiente: usize,
    pub completo: usize,
    pub bloqueado: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub proximo: usize,
    pub vencido: usize,
    pub faltante: usize,
}

impl DemoStore {
    pub fn status_counts(&self) -> StatusCounts {
        let count = |s: ProviderStatus| self.providers.iter().filter(|p| p.status == s).count();
        StatusCounts {
            todos: self.providers.len(),
            activo: count(ProviderStatus::Activo),
            pendiente: count(ProviderStatus::Pendiente),
            completo: count(ProviderStatus::Completo),
            bloqueado: count(ProviderStatus::Bloqueado),
        }
    }

    pub fn alert_counts(&self) -> AlertCounts {
        let count = |k: AlertKind| self.alerts.iter().filter(|a| a.kind == k).count();
        AlertCounts {
            proximo: count(AlertKind::Proximo),
            vencido: count(AlertKind::Vencido),
            faltante: count(AlertKind::Faltante),
        }
    }

    /// Providers matching an optional status and an optional search term.
    /// The term matches name or email case-insensitively, or a NIT substring.
    pub fn find_providers(
        &self,
        status: Option<ProviderStatus>,
        search: Option<&str>,
    ) -> Vec<&Provider> {
        let term = search
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        self.providers
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .filter(|p| match &term {
                Some(q) => {
                    p.nombre.to_lowercase().contains(q)
                        || p.nit.contains(q.as_str())
                        || p.correo.to_lowercase().contains(q)
                }
                None => true,
            })
            .collect()
    }

    pub fn find_by_correo(&self, correo: &str) -> Option<&Provider> {
        let needle = correo.trim().to_lowercase();
        self.providers
            .iter()
            .find(|p| p.correo.to_lowercase() == needle)
    }

    pub fn alerts_for(&self, provider_id: &str) -> Vec<&AlertItem> {
        self.alerts
            .iter()
            .filter(|a| a.provider_id == provider_id)
            .collect()
    }

    pub fn history_for(&self, provider_id: &str) -> Vec<&HistoryEntry> {
        self.history
            .iter()
            .filter(|h| h.provider_id.as_deref() == Some(provider_id))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_on_seed() {
        let store = DemoStore::seeded();
        let counts = store.status_counts();
        assert_eq!(
            counts,
            StatusCounts {
                todos: 6,
                activo: 2,
                pendiente: 2,
                completo: 0,
                bloqueado: 2,
            }
        );
        assert_eq!(
            store.alert_counts(),
            AlertCounts {
                proximo: 2,
                vencido: 2,
                faltante: 3,
            }
        );
    }

    #[test]
    fn test_find_providers() {
        let store = DemoStore::seeded();
        assert_eq!(store.find_providers(None, None).len(), 6);
        assert_eq!(store.find_providers(None, Some("  ")).len(), 6);

        let by_name = store.find_providers(None, Some("LOGÍSTICA"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "seed-2");

        let by_nit = store.find_providers(None, Some("800.222"));
        assert_eq!(by_nit[0].id, "seed-4");

        let by_mail = store.find_providers(None, Some("matyconstrucc"));
        assert_eq!(by_mail[0].id, "seed-5");

        let blocked_bogota = store.find_providers(Some(ProviderStatus::Bloqueado), Some("seguridad"));
        assert_eq!(blocked_bogota.len(), 1);
        assert!(
            store
                .find_providers(Some(ProviderStatus::Activo), Some("seguridad"))
                .is_empty()
        );
    }

    #[test]
    fn test_per_provider_views() {
        let store = DemoStore::seeded();
        assert_eq!(store.alerts_for("seed-5").len(), 2);
        assert_eq!(store.history_for("seed-1").len(), 3);
        assert_eq!(
            store.find_by_correo(" ADMIN@logisticaexpress.com ").unwrap().id,
            "seed-2"
        );
        assert!(store.find_by_correo("nadie@example.com").is_none());
    }
}
