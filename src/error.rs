use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Proveedor no encontrado: {0}")]
    ProviderNotFound(String),

    #[error("Alerta no encontrada: {0}")]
    AlertNotFound(String),

    #[error("Campo requerido: {0}")]
    MissingField(&'static str),

    #[error("NIT inválido '{0}' (formato: 900.123.456-7)")]
    InvalidNit(String),

    #[error("Correo inválido: {0}")]
    InvalidEmail(String),

    #[error("NIT ya registrado: {0}")]
    DuplicateNit(String),

    #[error("Documento desconocido: {0} (camara, rut, bancaria, arl, poliza)")]
    UnknownDocument(String),

    #[error("Estado desconocido: {0} (pendiente, completo, activo, bloqueado)")]
    UnknownStatus(String),

    #[error("Tipo de alerta desconocido: {0} (proximo, vencido, faltante)")]
    UnknownAlertKind(String),

    #[error("Motor de reconocimiento desconocido: {0}")]
    UnknownRecognizer(String),

    #[error("Error al procesar. Asegúrate de subir una imagen legible (JPG o PNG).")]
    Recognition(#[source] anyhow::Error),

    #[error("Por favor completa todos los campos.")]
    LoginIncomplete,

    #[error("No se encontró un proveedor con ese correo. Verifica e intenta de nuevo.")]
    LoginUnknownEmail,

    #[error("La contraseña debe tener al menos {0} caracteres.")]
    LoginPasswordTooShort(usize),
}
