pub mod plaintext;
pub mod tesseract;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;
use crate::extract::{self, Extracted};

/// Output of a recognition run: raw text plus a 0–100 confidence score.
#[derive(Debug, Clone, Serialize)]
pub struct Recognition {
    pub text: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub phase: String,
    pub fraction: f32,
}

impl Progress {
    pub fn new(phase: impl Into<String>, fraction: f32) -> Self {
        Self {
            phase: phase.into(),
            fraction: fraction.clamp(0.0, 1.0),
        }
    }
}

pub type ProgressFn<'a> = &'a (dyn Fn(Progress) + Send + Sync);

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    async fn recognize(
        &self,
        input: &[u8],
        language: &str,
        progress: ProgressFn<'_>,
    ) -> anyhow::Result<Recognition>;
}

/// Build the map of all compiled-in recognizers.
pub fn build_recognizer_registry() -> HashMap<String, Arc<dyn TextRecognizer>> {
    let mut map: HashMap<String, Arc<dyn TextRecognizer>> = HashMap::new();

    let tesseract = Arc::new(tesseract::TesseractRecognizer::new());
    map.insert(tesseract.id().to_string(), tesseract);

    let plain = Arc::new(plaintext::PlainTextRecognizer);
    map.insert(plain.id().to_string(), plain);

    map
}

#[derive(Debug, Clone, Serialize)]
pub struct OcrOutcome {
    pub file_name: String,
    pub recognition: Recognition,
    pub fields: Extracted,
    pub elapsed_secs: f64,
}

/// Recognize `input` and extract fields. Any recognizer failure becomes the
/// terminal `AppError::Recognition`; the caller resubmits.
pub async fn process(
    recognizer: &dyn TextRecognizer,
    file_name: &str,
    input: &[u8],
    language: &str,
    progress: ProgressFn<'_>,
) -> Result<OcrOutcome, AppError> {
    let started = Instant::now();
    let recognition = match recognizer.recognize(input, language, progress).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Recognition with {} failed: {e:#}", recognizer.id());
            return Err(AppError::Recognition(e));
        }
    };
    let fields = extract::extract_all(&recognition.text);
    tracing::info!(
        "{file_name}: {}/5 fields, confidence {:.0}%",
        fields.detected_count(),
        recognition.confidence
    );

    Ok(OcrOutcome {
        file_name: file_name.to_string(),
        recognition,
        fields,
        elapsed_secs: started.elapsed().as_secs_f64(),
    })
}

impl OcrOutcome {
    /// Plain-text results document.
    pub fn export_text(&self) -> String {
        let rule = "=".repeat(40);
        let mut out = String::new();
        out.push_str(&format!("RESULTADOS OCR\n{rule}\n\n"));
        for (label, value, placeholder) in self.fields.fields() {
            out.push_str(&format!("{label}: {}\n", value.unwrap_or(placeholder)));
        }
        out.push_str(&format!(
            "Confianza: {:.0}%\nTiempo: {:.1}s\n\n",
            self.recognition.confidence, self.elapsed_secs
        ));
        out.push_str(&format!("{rule}\nTEXTO COMPLETO\n{rule}\n\n"));
        out.push_str(&self.recognition.text);
        out
    }
}
