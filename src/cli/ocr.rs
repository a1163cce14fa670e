use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config;
use crate::error::AppError;
use crate::extract;
use crate::ocr::{self, OcrOutcome, Progress, TextRecognizer};
use crate::store::DemoStore;
use crate::store::models::{DocKey, Severity};

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn display_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

/// Read `file`, recognize it with `engine` and extract fields, showing a
/// spinner fed by the recognizer's progress reports.
pub async fn recognize_file(
    recognizers: &HashMap<String, Arc<dyn TextRecognizer>>,
    file: &str,
    engine: &str,
    lang: &str,
) -> anyhow::Result<OcrOutcome> {
    let recognizer = recognizers
        .get(engine)
        .ok_or_else(|| AppError::UnknownRecognizer(engine.to_string()))?;
    let input = tokio::fs::read(file)
        .await
        .map_err(|e| anyhow::anyhow!("No se pudo leer {file}: {e}"))?;

    let pb = spinner();
    pb.set_message(format!("{} procesando {}", recognizer.name(), display_name(file)));
    let bar = &pb;
    let progress = move |p: Progress| {
        bar.set_message(format!("{} ({:.0}%)", p.phase, p.fraction * 100.0));
    };

    let result = ocr::process(
        recognizer.as_ref(),
        &display_name(file),
        &input,
        lang,
        &progress,
    )
    .await;
    pb.finish_and_clear();
    Ok(result?)
}

pub fn print_outcome(outcome: &OcrOutcome) {
    println!("Archivo:   {}", outcome.file_name);
    println!(
        "Confianza: {:.0}% | Tiempo: {:.1}s | Campos: {}/5",
        outcome.recognition.confidence,
        outcome.elapsed_secs,
        outcome.fields.detected_count()
    );
    println!();
    for (label, value, placeholder) in outcome.fields.fields() {
        println!("  {label:<14} {}", value.unwrap_or(placeholder));
    }
}

fn export(outcome: &OcrOutcome, path: &str) -> anyhow::Result<()> {
    let path = config::resolve_output(path)?;
    std::fs::write(&path, outcome.export_text())?;
    println!("Resultados exportados a {}", path.display());
    Ok(())
}

/// One-shot recognition outside a session.
pub async fn run_ocr(
    recognizers: &HashMap<String, Arc<dyn TextRecognizer>>,
    file: &str,
    engine: &str,
    lang: &str,
    export_path: Option<&str>,
) -> anyhow::Result<()> {
    let outcome = recognize_file(recognizers, file, engine, lang).await?;
    print_outcome(&outcome);
    if let Some(path) = export_path {
        export(&outcome, path)?;
    }
    Ok(())
}

/// Recognition inside a session: the run is recorded in the history and,
/// with `link_to`, attached to that provider's Cámara de Comercio slot.
pub async fn run_ocr_in_session(
    store: &mut DemoStore,
    recognizers: &HashMap<String, Arc<dyn TextRecognizer>>,
    file: &str,
    engine: &str,
    lang: &str,
    link_to: Option<&str>,
    export_path: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(id) = link_to
        && store.provider(id).is_none()
    {
        return Err(AppError::ProviderNotFound(id.to_string()).into());
    }

    let outcome = recognize_file(recognizers, file, engine, lang).await?;
    print_outcome(&outcome);

    store.record_ocr(format!(
        "{}: {}/5 campos detectados",
        outcome.file_name,
        outcome.fields.detected_count()
    ));
    store.add_notification("OCR procesado exitosamente", Severity::Success);

    if let Some(id) = link_to {
        store.upload_document(
            id,
            DocKey::Camara,
            Some(&outcome.file_name),
            Some(outcome.fields.to_ocr_data()),
        );
        if let Some(p) = store.provider(id) {
            println!("\n{} vinculada a \"{}\"", DocKey::Camara.label(), p.nombre);
        }
    }

    if let Some(path) = export_path {
        export(&outcome, path)?;
    }
    Ok(())
}

/// Extraction only, over a text file.
pub fn run_extract(file: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("No se pudo leer {file}: {e}"))?;
    let fields = extract::extract_all(&text);
    for (label, value, placeholder) in fields.fields() {
        println!("{label:<14} {}", value.unwrap_or(placeholder));
    }
    Ok(())
}
