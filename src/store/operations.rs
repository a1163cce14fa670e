use super::DemoStore;
use super::clock;
use super::models::{
    AlertItem, AlertKind, DocKey, DocumentSlot, Documents, HistoryAction, NewProvider, OcrData,
    Provider, ProviderPatch, ProviderStatus, Severity,
};
use super::status::compute_status;

impl DemoStore {
    // --- Providers ---

    /// Registers a provider as given. Input is trusted; see
    /// `try_add_provider` for the validating entry point.
    pub fn add_provider(&mut self, input: NewProvider) -> Provider {
        let now = clock::now();
        let provider = Provider {
            id: clock::uid(),
            nombre: input.nombre,
            nit: input.nit,
            correo: input.correo,
            telefono: input.telefono,
            ciudad: input.ciudad,
            status: ProviderStatus::Pendiente,
            docs: Documents::default(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.providers.insert(0, provider.clone());
        self.record(
            HistoryAction::Creado,
            &provider.nombre,
            "Proveedor registrado en el sistema".into(),
            Some(&provider.id),
        );
        self.add_notification(
            format!("Proveedor \"{}\" registrado", provider.nombre),
            Severity::Success,
        );
        tracing::info!("Provider {} created ({})", provider.id, provider.nit);
        provider
    }

    pub fn update_provider(&mut self, id: &str, patch: ProviderPatch) {
        let Some(p) = self.provider_mut(id) else {
            tracing::debug!("update_provider: unknown provider {id}");
            return;
        };
        if let Some(nombre) = patch.nombre {
            p.nombre = nombre;
        }
        if let Some(nit) = patch.nit {
            p.nit = nit;
        }
        if let Some(correo) = patch.correo {
            p.correo = correo;
        }
        if let Some(telefono) = patch.telefono {
            p.telefono = telefono;
        }
        if let Some(ciudad) = patch.ciudad {
            p.ciudad = ciudad;
        }
        p.updated_at = clock::now();
        let nombre = p.nombre.clone();

        self.record(
            HistoryAction::Editado,
            &nombre,
            "Datos del proveedor actualizados".into(),
            Some(id),
        );
        self.add_notification(format!("\"{nombre}\" actualizado"), Severity::Info);
    }

    /// Removes the provider and every alert pointing at it. History stays.
    pub fn delete_provider(&mut self, id: &str) {
        match self.providers.iter().position(|p| p.id == id) {
            Some(idx) => {
                let removed = self.providers.remove(idx);
                self.record(
                    HistoryAction::Eliminado,
                    &removed.nombre,
                    "Proveedor eliminado del sistema".into(),
                    Some(id),
                );
                self.add_notification(
                    format!("\"{}\" eliminado", removed.nombre),
                    Severity::Warning,
                );
                tracing::info!("Provider {id} deleted");
            }
            None => tracing::debug!("delete_provider: unknown provider {id}"),
        }
        self.alerts.retain(|a| a.provider_id != id);
    }

    // --- Documents ---

    /// Marks `doc_key` as uploaded and re-derives the status. Uploading
    /// retracts the `faltante` alert for this provider and document.
    pub fn upload_document(
        &mut self,
        provider_id: &str,
        doc_key: DocKey,
        file_name: Option<&str>,
        ocr_data: Option<OcrData>,
    ) {
        let Some(p) = self.provider_mut(provider_id) else {
            tracing::debug!("upload_document: unknown provider {provider_id}");
            return;
        };
        let now = clock::now();
        let file_name = file_name
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("{doc_key}_doc.pdf"));

        *p.docs.get_mut(doc_key) = DocumentSlot {
            uploaded: true,
            file_name: Some(file_name),
            upload_date: Some(now.clone()),
            expiry_date: None,
            ocr_data,
        };
        let previous = p.status;
        p.status = compute_status(&p.docs, previous);
        p.updated_at = now;
        let current = p.status;
        let nombre = p.nombre.clone();

        self.record(
            HistoryAction::DocumentoSubido,
            &nombre,
            format!("{} subido", doc_key.label()),
            Some(provider_id),
        );
        if previous == ProviderStatus::Pendiente && current == ProviderStatus::Completo {
            self.add_notification(
                format!("\"{nombre}\" tiene toda la documentación requerida"),
                Severity::Success,
            );
        }
        if previous != current {
            tracing::info!("Provider {provider_id}: {previous} -> {current}");
        }

        let before = self.alerts.len();
        self.alerts
            .retain(|a| !a.matches(provider_id, doc_key, AlertKind::Faltante));
        if self.alerts.len() != before {
            tracing::debug!("Retracted missing-document alert for {provider_id}/{doc_key}");
        }
    }

    /// Clears a document slot. An `activo` provider is re-derived from
    /// `pendiente`; a removed required document raises a `faltante` alert.
    pub fn remove_document(&mut self, provider_id: &str, doc_key: DocKey) {
        let Some(p) = self.provider_mut(provider_id) else {
            tracing::debug!("remove_document: unknown provider {provider_id}");
            return;
        };
        *p.docs.get_mut(doc_key) = DocumentSlot::absent();
        let previous = p.status;
        let seed = match previous {
            ProviderStatus::Activo => ProviderStatus::Pendiente,
            other => other,
        };
        p.status = compute_status(&p.docs, seed);
        p.updated_at = clock::now();
        let current = p.status;
        let nombre = p.nombre.clone();

        self.record(
            HistoryAction::DocumentoActualizado,
            &nombre,
            format!("{} removido", doc_key.label()),
            Some(provider_id),
        );
        if previous != current {
            tracing::info!("Provider {provider_id}: {previous} -> {current}");
        }

        let already_flagged = self
            .alerts
            .iter()
            .any(|a| a.matches(provider_id, doc_key, AlertKind::Faltante));
        if doc_key.is_required() && !already_flagged {
            self.alerts.insert(
                0,
                AlertItem {
                    id: clock::uid(),
                    kind: AlertKind::Faltante,
                    provider_id: provider_id.to_string(),
                    provider: nombre,
                    document: doc_key.label().to_string(),
                    doc_key,
                    date: None,
                },
            );
        }
    }

    // --- Status ---

    /// Unconditional override; the only way out of `bloqueado`.
    pub fn set_provider_status(&mut self, id: &str, status: ProviderStatus) {
        let Some(p) = self.provider_mut(id) else {
            tracing::debug!("set_provider_status: unknown provider {id}");
            return;
        };
        let previous = p.status;
        p.status = status;
        p.updated_at = clock::now();
        let nombre = p.nombre.clone();

        self.record(
            HistoryAction::EstadoCambiado,
            &nombre,
            format!("Estado cambiado a {status}"),
            Some(id),
        );
        let severity = if status == ProviderStatus::Bloqueado {
            Severity::Error
        } else {
            Severity::Info
        };
        self.add_notification(format!("\"{nombre}\" → {status}"), severity);
        tracing::info!("Provider {id}: {previous} -> {status}");
    }

    pub fn approve_provider(&mut self, id: &str) {
        self.set_provider_status(id, ProviderStatus::Activo);
    }

    /// Blocks from any state. Repeated blocks are recorded again.
    pub fn block_provider(&mut self, id: &str, reason: &str) {
        let Some(p) = self.provider_mut(id) else {
            tracing::debug!("block_provider: unknown provider {id}");
            return;
        };
        let previous = p.status;
        p.status = ProviderStatus::Bloqueado;
        p.updated_at = clock::now();
        let nombre = p.nombre.clone();

        self.record(
            HistoryAction::EstadoCambiado,
            &nombre,
            format!("Bloqueado: {reason}"),
            Some(id),
        );
        self.add_notification(format!("\"{nombre}\" bloqueado: {reason}"), Severity::Error);
        tracing::info!("Provider {id}: {previous} -> bloqueado ({reason})");
    }

    // --- OCR ---

    /// Audit entry for a recognition run that is not tied to a provider yet.
    pub fn record_ocr(&mut self, detail: String) {
        self.record(HistoryAction::OcrProcesado, "OCR", detail, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::HistoryAction;

    fn new_provider(nombre: &str, nit: &str) -> NewProvider {
        NewProvider {
            nombre: nombre.into(),
            nit: nit.into(),
            correo: "contacto@example.co".into(),
            telefono: None,
            ciudad: Some("Cali".into()),
        }
    }

    fn faltante(store: &DemoStore, provider_id: &str, doc: DocKey) -> bool {
        store
            .alerts()
            .iter()
            .any(|a| a.matches(provider_id, doc, AlertKind::Faltante))
    }

    #[test]
    fn test_add_provider() {
        let mut store = DemoStore::seeded();
        let p = store.add_provider(new_provider("Nuevo S.A.S.", "901.000.111-2"));

        assert_eq!(p.status, ProviderStatus::Pendiente);
        assert_eq!(p.docs.uploaded_count(), 0);
        assert_eq!(store.providers()[0].id, p.id);
        assert_eq!(store.providers().len(), 7);

        let h = &store.history()[0];
        assert_eq!(h.action, HistoryAction::Creado);
        assert_eq!(h.provider_id.as_deref(), Some(p.id.as_str()));
        assert_eq!(store.notifications()[0].severity, Severity::Success);
        assert_eq!(
            store.notifications()[0].message,
            "Proveedor \"Nuevo S.A.S.\" registrado"
        );
    }

    #[test]
    fn test_update_provider_merges_contact_fields() {
        let mut store = DemoStore::seeded();
        store.update_provider(
            "seed-1",
            ProviderPatch {
                correo: Some("nuevo@valle.co".into()),
                telefono: Some(None),
                ..Default::default()
            },
        );
        let p = store.provider("seed-1").unwrap();
        assert_eq!(p.correo, "nuevo@valle.co");
        assert_eq!(p.nombre, "Suministros del Valle S.A.S.");
        assert!(p.telefono.is_none());
        assert_eq!(p.status, ProviderStatus::Activo);
        assert_eq!(store.history()[0].action, HistoryAction::Editado);
        assert_eq!(store.notifications()[0].severity, Severity::Info);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = DemoStore::seeded();
        store.update_provider("nope", ProviderPatch::default());
        store.delete_provider("nope");
        store.upload_document("nope", DocKey::Rut, None, None);
        store.remove_document("nope", DocKey::Rut);
        store.set_provider_status("nope", ProviderStatus::Activo);
        store.block_provider("nope", "x");
        store.dismiss_alert("nope");

        assert_eq!(store.history().len(), 8);
        assert_eq!(store.alerts().len(), 7);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_delete_cascades_alerts_but_not_history() {
        let mut store = DemoStore::seeded();
        store.delete_provider("seed-5");

        assert!(store.provider("seed-5").is_none());
        assert!(store.alerts().iter().all(|a| a.provider_id != "seed-5"));
        assert_eq!(store.alerts().len(), 5);
        assert!(
            store
                .history()
                .iter()
                .any(|h| h.provider_id.as_deref() == Some("seed-5") && h.action == HistoryAction::Creado)
        );
        assert_eq!(store.history()[0].action, HistoryAction::Eliminado);
        assert_eq!(store.history()[0].provider_name, "Materiales y Construcciones Ltda.");
        assert_eq!(store.notifications()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_upload_completes_required_set() {
        let mut store = DemoStore::seeded();
        // seed-3 has camara + rut; bancaria is missing
        store.upload_document("seed-3", DocKey::Bancaria, Some("banco.pdf"), None);

        let p = store.provider("seed-3").unwrap();
        assert_eq!(p.status, ProviderStatus::Completo);
        assert_eq!(p.docs.bancaria.file_name.as_deref(), Some("banco.pdf"));
        assert!(p.docs.bancaria.upload_date.is_some());
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].severity, Severity::Success);
        assert_eq!(store.history()[0].action, HistoryAction::DocumentoSubido);
        assert_eq!(store.history()[0].detail, "Certificación Bancaria subido");
        assert!(!faltante(&store, "seed-3", DocKey::Bancaria));
    }

    #[test]
    fn test_upload_optional_doc_keeps_pending() {
        let mut store = DemoStore::seeded();
        store.upload_document("seed-5", DocKey::Arl, None, None);

        let p = store.provider("seed-5").unwrap();
        assert_eq!(p.status, ProviderStatus::Pendiente);
        assert_eq!(p.docs.arl.file_name.as_deref(), Some("arl_doc.pdf"));
        assert!(store.notifications().is_empty());
        assert_eq!(store.history().len(), 9);
    }

    #[test]
    fn test_upload_retracts_only_missing_alert() {
        let mut store = DemoStore::seeded();
        store.upload_document("seed-5", DocKey::Camara, None, None);
        assert!(!faltante(&store, "seed-5", DocKey::Camara));
        assert!(faltante(&store, "seed-5", DocKey::Bancaria));

        // expiry alerts survive a re-upload of the same document
        store.upload_document("seed-6", DocKey::Camara, None, None);
        assert!(store.alerts().iter().any(|a| a.id == "a5"));
        store.upload_document("seed-1", DocKey::Poliza, None, None);
        assert!(store.alerts().iter().any(|a| a.id == "a1"));
    }

    #[test]
    fn test_upload_stores_ocr_payload() {
        let mut store = DemoStore::seeded();
        let ocr = OcrData {
            matricula: Some("1234567".into()),
            anio_renovado: Some("2025".into()),
        };
        store.upload_document("seed-5", DocKey::Camara, Some("camara.png"), Some(ocr.clone()));
        let p = store.provider("seed-5").unwrap();
        assert_eq!(p.docs.camara.ocr_data.as_ref(), Some(&ocr));
    }

    #[test]
    fn test_blocked_is_invariant_under_documents() {
        let mut store = DemoStore::seeded();
        for k in DocKey::ALL {
            store.remove_document("seed-4", k);
            assert_eq!(store.provider("seed-4").unwrap().status, ProviderStatus::Bloqueado);
        }
        for k in DocKey::ALL {
            store.upload_document("seed-4", k, None, None);
            assert_eq!(store.provider("seed-4").unwrap().status, ProviderStatus::Bloqueado);
        }
    }

    #[test]
    fn test_active_upload_keeps_active() {
        let mut store = DemoStore::seeded();
        store.upload_document("seed-1", DocKey::Arl, None, None);
        assert_eq!(store.provider("seed-1").unwrap().status, ProviderStatus::Activo);
    }

    #[test]
    fn test_active_remove_downgrades() {
        let mut store = DemoStore::seeded();
        store.remove_document("seed-1", DocKey::Rut);
        let p = store.provider("seed-1").unwrap();
        assert_eq!(p.status, ProviderStatus::Pendiente);
        assert!(!p.docs.rut.uploaded);
        assert!(p.docs.rut.file_name.is_none());
        assert_eq!(store.history()[0].action, HistoryAction::DocumentoActualizado);
        assert_eq!(store.history()[0].detail, "RUT removido");
        assert!(faltante(&store, "seed-1", DocKey::Rut));

        // optional removal re-derives from the document set
        store.remove_document("seed-2", DocKey::Poliza);
        assert_eq!(store.provider("seed-2").unwrap().status, ProviderStatus::Completo);
        assert!(!faltante(&store, "seed-2", DocKey::Poliza));
    }

    #[test]
    fn test_remove_does_not_duplicate_missing_alert() {
        let mut store = DemoStore::seeded();
        // a3 already flags seed-3/bancaria
        store.remove_document("seed-3", DocKey::Bancaria);
        let count = store
            .alerts()
            .iter()
            .filter(|a| a.matches("seed-3", DocKey::Bancaria, AlertKind::Faltante))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_lifecycle_round_trip() {
        let mut store = DemoStore::empty();
        let id = store.add_provider(new_provider("Ciclo Ltda.", "900.000.000-1")).id;
        for k in DocKey::REQUIRED {
            store.upload_document(&id, k, None, None);
        }
        assert_eq!(store.provider(&id).unwrap().status, ProviderStatus::Completo);

        store.approve_provider(&id);
        assert_eq!(store.provider(&id).unwrap().status, ProviderStatus::Activo);

        store.block_provider(&id, "Póliza vencida");
        assert_eq!(store.provider(&id).unwrap().status, ProviderStatus::Bloqueado);
        assert_eq!(store.history()[0].detail, "Bloqueado: Póliza vencida");
        assert_eq!(store.notifications()[0].severity, Severity::Error);

        store.block_provider(&id, "otra vez");
        assert_eq!(store.history()[0].detail, "Bloqueado: otra vez");

        store.set_provider_status(&id, ProviderStatus::Pendiente);
        assert_eq!(store.provider(&id).unwrap().status, ProviderStatus::Pendiente);
        assert_eq!(store.history()[0].detail, "Estado cambiado a pendiente");
        assert_eq!(store.notifications()[0].severity, Severity::Info);
        assert_eq!(store.notifications()[0].message, "\"Ciclo Ltda.\" → pendiente");

        store.upload_document(&id, DocKey::Arl, None, None);
        assert_eq!(store.provider(&id).unwrap().status, ProviderStatus::Completo);
    }

    #[test]
    fn test_set_status_blocked_severity() {
        let mut store = DemoStore::seeded();
        store.set_provider_status("seed-3", ProviderStatus::Bloqueado);
        assert_eq!(store.notifications()[0].severity, Severity::Error);
        assert_eq!(store.history()[0].action, HistoryAction::EstadoCambiado);
    }

    #[test]
    fn test_record_ocr_has_no_provider() {
        let mut store = DemoStore::seeded();
        store.record_ocr("camara.png: 3/5 campos".into());
        let h = &store.history()[0];
        assert_eq!(h.action, HistoryAction::OcrProcesado);
        assert!(h.provider_id.is_none());
    }
}
