pub mod alerts;
pub mod history;
pub mod notifications;
pub mod ocr;
pub mod portal;
pub mod provider;
pub mod report;
pub mod session;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "provedocs",
    version,
    about = "Provider document control: registry, status workflow, expiry alerts and OCR intake"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive session over the seeded store
    Shell,
    /// Run session commands from a file, one per line
    Run {
        /// Script path
        script: String,
    },
    /// Extract Cámara de Comercio fields from a UTF-8 text file
    Extract {
        /// Text file path
        file: String,
    },
    /// Recognize an image and extract Cámara de Comercio fields
    Ocr {
        /// Image path (JPG or PNG)
        file: String,
        /// Recognition engine
        #[arg(long, default_value = crate::config::DEFAULT_RECOGNIZER, value_parser = ["tesseract", "texto"])]
        engine: String,
        /// Recognition language
        #[arg(long, default_value = crate::config::DEFAULT_LANGUAGE)]
        lang: String,
        /// Write the plain-text results to this path
        #[arg(long)]
        export: Option<String>,
    },
    /// Generate a report of the seed registry
    Report {
        /// Output format
        #[arg(long, default_value = "terminal", value_parser = REPORT_FORMATS)]
        format: String,
        /// Output file path (stdout if not specified)
        #[arg(long)]
        output: Option<String>,
    },
}

pub const REPORT_FORMATS: [&str; 5] = ["terminal", "json", "html", "csv", "csv-detalle"];

/// One line of session input.
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// List providers
    Proveedores {
        /// Filter by status (pendiente, completo, activo, bloqueado)
        #[arg(long)]
        estado: Option<String>,
        /// Match name, NIT or email
        #[arg(long)]
        buscar: Option<String>,
    },
    /// Show one provider with its documents
    Ver { id: String },
    /// Register a provider
    Agregar {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        nit: String,
        #[arg(long)]
        correo: String,
        #[arg(long)]
        telefono: Option<String>,
        #[arg(long)]
        ciudad: Option<String>,
    },
    /// Edit provider contact data (an empty value clears teléfono/ciudad)
    Editar {
        id: String,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        nit: Option<String>,
        #[arg(long)]
        correo: Option<String>,
        #[arg(long)]
        telefono: Option<String>,
        #[arg(long)]
        ciudad: Option<String>,
    },
    /// Delete a provider and its alerts
    Eliminar { id: String },
    /// Upload a document (camara, rut, bancaria, arl, poliza)
    Subir {
        id: String,
        doc: String,
        /// File name to record
        #[arg(long)]
        archivo: Option<String>,
    },
    /// Remove an uploaded document
    Quitar { id: String, doc: String },
    /// Approve a provider (status activo)
    Aprobar { id: String },
    /// Block a provider
    Bloquear {
        id: String,
        #[arg(long)]
        motivo: String,
    },
    /// Set a provider status directly
    Estado { id: String, estado: String },
    /// List alerts
    Alertas {
        #[arg(long)]
        proveedor: Option<String>,
        /// Filter by type (proximo, vencido, faltante)
        #[arg(long)]
        tipo: Option<String>,
    },
    /// Dismiss an alert
    Descartar { id: String },
    /// Raise expiry alerts for uploaded documents
    Vencimientos {
        /// Reference date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        hoy: Option<String>,
        /// Warning window in days
        #[arg(long, default_value_t = crate::config::EXPIRY_WARNING_DAYS)]
        dias: i64,
    },
    /// List notifications
    Notificaciones,
    /// Mark a notification as read
    Leer { id: String },
    /// Clear all notifications
    Limpiar,
    /// Show the audit history
    Historial {
        #[arg(long)]
        proveedor: Option<String>,
    },
    /// Recognize a Cámara de Comercio image
    Ocr {
        file: String,
        #[arg(long, default_value = crate::config::DEFAULT_RECOGNIZER)]
        engine: String,
        #[arg(long, default_value = crate::config::DEFAULT_LANGUAGE)]
        lang: String,
        /// Attach the result to this provider's Cámara de Comercio slot
        #[arg(long)]
        vincular: Option<String>,
        #[arg(long)]
        export: Option<String>,
    },
    /// Sign in to the provider portal
    Login {
        #[arg(long)]
        correo: String,
        #[arg(long)]
        clave: String,
    },
    /// Show the signed-in provider's portal
    Portal,
    /// Sign out of the provider portal
    Logout,
    /// Report over the current session
    Reporte {
        #[arg(long, default_value = "terminal", value_parser = REPORT_FORMATS)]
        format: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Discard all changes and restore the seed data
    Reiniciar,
}
