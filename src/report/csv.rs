use ::csv::{QuoteStyle, Writer, WriterBuilder};

use super::Report;
use crate::error::AppError;
use crate::store::models::DocKey;

const SUMMARY_HEADER: [&str; 7] = [
    "Nombre",
    "NIT",
    "Correo",
    "Ciudad",
    "Estado",
    "Docs Subidos",
    "Docs Total",
];

const DETAIL_HEADER: [&str; 9] = [
    "Nombre",
    "NIT",
    "Correo",
    "Teléfono",
    "Ciudad",
    "Estado",
    "Cámara",
    "RUT",
    "Bancaria",
];

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new())
}

fn finish(wtr: Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn render_summary(report: &Report) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(SUMMARY_HEADER)?;
    let total = DocKey::ALL.len().to_string();
    for p in &report.providers {
        let uploaded = p.docs.uploaded_count().to_string();
        wtr.write_record([
            p.nombre.as_str(),
            p.nit.as_str(),
            p.correo.as_str(),
            p.ciudad.as_deref().unwrap_or(""),
            p.status.as_str(),
            uploaded.as_str(),
            total.as_str(),
        ])?;
    }
    finish(wtr)
}

pub fn render_detail(report: &Report) -> Result<String, AppError> {
    let yes_no = |uploaded: bool| if uploaded { "Sí" } else { "No" };

    let mut wtr = writer();
    wtr.write_record(DETAIL_HEADER)?;
    for p in &report.providers {
        let mut record = vec![
            p.nombre.as_str(),
            p.nit.as_str(),
            p.correo.as_str(),
            p.telefono.as_deref().unwrap_or(""),
            p.ciudad.as_deref().unwrap_or(""),
            p.status.as_str(),
        ];
        record.extend(DocKey::REQUIRED.iter().map(|k| yes_no(p.docs.get(*k).uploaded)));
        wtr.write_record(&record)?;
    }
    finish(wtr)
}
