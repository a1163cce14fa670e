use super::models::{Documents, ProviderStatus};

/// Derives a provider's status from its documents.
///
/// `bloqueado` and `activo` are returned unchanged. Callers that remove a
/// document pass `pendiente` instead of `activo` so removal can downgrade an
/// approved provider; uploads pass the current status through.
pub fn compute_status(docs: &Documents, current: ProviderStatus) -> ProviderStatus {
    match current {
        ProviderStatus::Bloqueado => ProviderStatus::Bloqueado,
        ProviderStatus::Activo => ProviderStatus::Activo,
        ProviderStatus::Pendiente | ProviderStatus::Completo => {
            if docs.required_complete() {
                ProviderStatus::Completo
            } else {
                ProviderStatus::Pendiente
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::DocKey;

    fn docs_with(keys: &[DocKey]) -> Documents {
        let mut docs = Documents::default();
        for k in keys {
            docs.get_mut(*k).uploaded = true;
        }
        docs
    }

    #[test]
    fn test_blocked_is_sticky() {
        let full = docs_with(&DocKey::ALL);
        let empty = Documents::default();
        assert_eq!(
            compute_status(&full, ProviderStatus::Bloqueado),
            ProviderStatus::Bloqueado
        );
        assert_eq!(
            compute_status(&empty, ProviderStatus::Bloqueado),
            ProviderStatus::Bloqueado
        );
    }

    #[test]
    fn test_active_is_sticky() {
        let empty = Documents::default();
        assert_eq!(
            compute_status(&empty, ProviderStatus::Activo),
            ProviderStatus::Activo
        );
    }

    #[test]
    fn test_required_set_decides_completeness() {
        let required = docs_with(&DocKey::REQUIRED);
        assert_eq!(
            compute_status(&required, ProviderStatus::Pendiente),
            ProviderStatus::Completo
        );

        let optional_only = docs_with(&[DocKey::Arl, DocKey::Poliza, DocKey::Rut]);
        assert_eq!(
            compute_status(&optional_only, ProviderStatus::Pendiente),
            ProviderStatus::Pendiente
        );
        assert_eq!(
            compute_status(&optional_only, ProviderStatus::Completo),
            ProviderStatus::Pendiente
        );
    }

    #[test]
    fn test_idempotent() {
        let docs = docs_with(&[DocKey::Camara, DocKey::Bancaria, DocKey::Rut]);
        for status in ProviderStatus::ALL {
            let once = compute_status(&docs, status);
            assert_eq!(compute_status(&docs, once), once);
        }
    }
}
