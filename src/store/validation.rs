use std::sync::LazyLock;

use regex::Regex;

use super::DemoStore;
use super::models::{NewProvider, Provider, ProviderPatch};
use crate::error::AppError;

static NIT_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d$").expect("valid NIT regex"));
static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Digits of a NIT; separators (spaces, periods, hyphen) are ignored in
/// uniqueness checks.
pub fn normalize_nit(nit: &str) -> String {
    nit.chars().filter(char::is_ascii_digit).collect()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_nombre(nombre: &str) -> Result<(), AppError> {
    if nombre.trim().is_empty() {
        return Err(AppError::MissingField("nombre"));
    }
    Ok(())
}

pub fn validate_nit(nit: &str) -> Result<(), AppError> {
    if nit.trim().is_empty() {
        return Err(AppError::MissingField("nit"));
    }
    let compact: String = nit.chars().filter(|c| !c.is_whitespace()).collect();
    if !NIT_FORMAT.is_match(&compact) {
        return Err(AppError::InvalidNit(nit.to_string()));
    }
    Ok(())
}

pub fn validate_correo(correo: &str) -> Result<(), AppError> {
    let correo = correo.trim();
    if correo.is_empty() {
        return Err(AppError::MissingField("correo"));
    }
    if !EMAIL_FORMAT.is_match(correo) {
        return Err(AppError::InvalidEmail(correo.to_string()));
    }
    Ok(())
}

impl NewProvider {
    /// Trims every field and turns blank optional fields into `None`.
    pub fn normalized(self) -> Self {
        Self {
            nombre: self.nombre.trim().to_string(),
            nit: self.nit.trim().to_string(),
            correo: self.correo.trim().to_string(),
            telefono: blank_to_none(self.telefono),
            ciudad: blank_to_none(self.ciudad),
        }
    }
}

impl ProviderPatch {
    pub fn normalized(self) -> Self {
        Self {
            nombre: self.nombre.map(|v| v.trim().to_string()),
            nit: self.nit.map(|v| v.trim().to_string()),
            correo: self.correo.map(|v| v.trim().to_string()),
            telefono: self.telefono.map(blank_to_none),
            ciudad: self.ciudad.map(blank_to_none),
        }
    }
}

impl DemoStore {
    /// True when another provider (other than `except_id`) holds an
    /// equivalent NIT.
    pub fn nit_taken(&self, nit: &str, except_id: Option<&str>) -> bool {
        let wanted = normalize_nit(nit);
        self.providers
            .iter()
            .filter(|p| except_id != Some(p.id.as_str()))
            .any(|p| normalize_nit(&p.nit) == wanted)
    }

    /// Validating counterpart of `add_provider`.
    pub fn try_add_provider(&mut self, input: NewProvider) -> Result<Provider, AppError> {
        let input = input.normalized();
        validate_nombre(&input.nombre)?;
        validate_nit(&input.nit)?;
        validate_correo(&input.correo)?;
        if self.nit_taken(&input.nit, None) {
            return Err(AppError::DuplicateNit(input.nit));
        }
        Ok(self.add_provider(input))
    }

    /// Validating counterpart of `update_provider`. A provider may keep
    /// its own NIT.
    pub fn try_update_provider(&mut self, id: &str, patch: ProviderPatch) -> Result<(), AppError> {
        if self.provider(id).is_none() {
            return Err(AppError::ProviderNotFound(id.to_string()));
        }
        let patch = patch.normalized();
        if let Some(nombre) = &patch.nombre {
            validate_nombre(nombre)?;
        }
        if let Some(nit) = &patch.nit {
            validate_nit(nit)?;
            if self.nit_taken(nit, Some(id)) {
                return Err(AppError::DuplicateNit(nit.clone()));
            }
        }
        if let Some(correo) = &patch.correo {
            validate_correo(correo)?;
        }
        self.update_provider(id, patch);
        Ok(())
    }
}
