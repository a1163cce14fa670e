use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKey {
    Camara,
    Rut,
    Bancaria,
    Arl,
    Poliza,
}

impl DocKey {
    pub const ALL: [DocKey; 5] = [
        DocKey::Camara,
        DocKey::Rut,
        DocKey::Bancaria,
        DocKey::Arl,
        DocKey::Poliza,
    ];

    /// Kinds whose presence decides `pendiente` vs `completo`.
    pub const REQUIRED: [DocKey; 3] = [DocKey::Camara, DocKey::Rut, DocKey::Bancaria];

    pub fn as_str(self) -> &'static str {
        match self {
            DocKey::Camara => "camara",
            DocKey::Rut => "rut",
            DocKey::Bancaria => "bancaria",
            DocKey::Arl => "arl",
            DocKey::Poliza => "poliza",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocKey::Camara => "Cámara de Comercio",
            DocKey::Rut => "RUT",
            DocKey::Bancaria => "Certificación Bancaria",
            DocKey::Arl => "Certificación ARL",
            DocKey::Poliza => "Póliza de Responsabilidad",
        }
    }

    pub fn is_required(self) -> bool {
        DocKey::REQUIRED.contains(&self)
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::UnknownDocument(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Pendiente,
    Completo,
    Activo,
    Bloqueado,
}

impl ProviderStatus {
    pub const ALL: [ProviderStatus; 4] = [
        ProviderStatus::Pendiente,
        ProviderStatus::Completo,
        ProviderStatus::Activo,
        ProviderStatus::Bloqueado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderStatus::Pendiente => "pendiente",
            ProviderStatus::Completo => "completo",
            ProviderStatus::Activo => "activo",
            ProviderStatus::Bloqueado => "bloqueado",
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matricula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anio_renovado: Option<String>,
}

/// One document kind for one provider. When `uploaded` is false every other
/// field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSlot {
    pub uploaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_data: Option<OcrData>,
}

impl DocumentSlot {
    pub fn absent() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    pub camara: DocumentSlot,
    pub rut: DocumentSlot,
    pub bancaria: DocumentSlot,
    pub arl: DocumentSlot,
    pub poliza: DocumentSlot,
}

impl Documents {
    pub fn get(&self, key: DocKey) -> &DocumentSlot {
        match key {
            DocKey::Camara => &self.camara,
            DocKey::Rut => &self.rut,
            DocKey::Bancaria => &self.bancaria,
            DocKey::Arl => &self.arl,
            DocKey::Poliza => &self.poliza,
        }
    }

    pub fn get_mut(&mut self, key: DocKey) -> &mut DocumentSlot {
        match key {
            DocKey::Camara => &mut self.camara,
            DocKey::Rut => &mut self.rut,
            DocKey::Bancaria => &mut self.bancaria,
            DocKey::Arl => &mut self.arl,
            DocKey::Poliza => &mut self.poliza,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocKey, &DocumentSlot)> {
        DocKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn required_complete(&self) -> bool {
        DocKey::REQUIRED.iter().all(|k| self.get(*k).uploaded)
    }

    pub fn uploaded_count(&self) -> usize {
        self.iter().filter(|(_, slot)| slot.uploaded).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub nombre: String,
    pub nit: String,
    pub correo: String,
    pub telefono: Option<String>,
    pub ciudad: Option<String>,
    pub status: ProviderStatus,
    pub docs: Documents,
    pub created_at: String,
    pub updated_at: String,
}

impl Provider {
    /// (uploaded required, total required)
    pub fn required_progress(&self) -> (usize, usize) {
        let done = DocKey::REQUIRED
            .iter()
            .filter(|k| self.docs.get(**k).uploaded)
            .count();
        (done, DocKey::REQUIRED.len())
    }

    pub fn required_percent(&self) -> f64 {
        let (done, total) = self.required_progress();
        if total == 0 {
            return 0.0;
        }
        done as f64 / total as f64 * 100.0
    }

    pub fn missing_required(&self) -> Vec<DocKey> {
        DocKey::REQUIRED
            .into_iter()
            .filter(|k| !self.docs.get(*k).uploaded)
            .collect()
    }
}

/// Input for provider creation. Optional contact fields are materialized
/// here and nowhere else.
#[derive(Debug, Clone, Default)]
pub struct NewProvider {
    pub nombre: String,
    pub nit: String,
    pub correo: String,
    pub telefono: Option<String>,
    pub ciudad: Option<String>,
}

/// Shallow merge over contact fields. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProviderPatch {
    pub nombre: Option<String>,
    pub nit: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<Option<String>>,
    pub ciudad: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Creado,
    DocumentoSubido,
    DocumentoActualizado,
    EstadoCambiado,
    Editado,
    Eliminado,
    OcrProcesado,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Creado => "creado",
            HistoryAction::DocumentoSubido => "documento_subido",
            HistoryAction::DocumentoActualizado => "documento_actualizado",
            HistoryAction::EstadoCambiado => "estado_cambiado",
            HistoryAction::Editado => "editado",
            HistoryAction::Eliminado => "eliminado",
            HistoryAction::OcrProcesado => "ocr_procesado",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub date: String,
    pub action: HistoryAction,
    pub provider_id: Option<String>,
    pub provider_name: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Proximo,
    Vencido,
    Faltante,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Proximo, AlertKind::Vencido, AlertKind::Faltante];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Proximo => "proximo",
            AlertKind::Vencido => "vencido",
            AlertKind::Faltante => "faltante",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AlertKind::Proximo => "Próximo a vencer",
            AlertKind::Vencido => "Vencido",
            AlertKind::Faltante => "Faltante",
        }
    }
}

impl FromStr for AlertKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::UnknownAlertKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub provider_id: String,
    pub provider: String,
    pub document: String,
    pub doc_key: DocKey,
    pub date: Option<String>,
}

impl AlertItem {
    pub fn matches(&self, provider_id: &str, doc_key: DocKey, kind: AlertKind) -> bool {
        self.provider_id == provider_id && self.doc_key == doc_key && self.kind == kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub timestamp: String,
    pub read: bool,
}
