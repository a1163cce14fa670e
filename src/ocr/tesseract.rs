use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{Progress, ProgressFn, Recognition, TextRecognizer};

/// Tesseract TSV rows at this level are single words.
const WORD_LEVEL: u32 = 5;

/// Runs the `tesseract` executable, feeding the image on stdin and reading
/// TSV output so per-word confidences are available.
pub struct TesseractRecognizer {
    binary: PathBuf,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct TsvRow {
    level: u32,
    page_num: u32,
    block_num: u32,
    par_num: u32,
    line_num: u32,
    conf: f32,
    #[serde(default)]
    text: String,
}

/// Rebuild line-broken text from word rows; confidence is the mean of the
/// non-negative word confidences.
fn parse_tsv(tsv: &[u8]) -> anyhow::Result<Recognition> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(tsv);

    let mut lines: Vec<String> = Vec::new();
    let mut current_line = None;
    let mut confidences = Vec::new();

    for row in reader.deserialize::<TsvRow>() {
        let row = row.context("malformed tesseract TSV row")?;
        let word = row.text.trim();
        if row.level != WORD_LEVEL || word.is_empty() {
            continue;
        }
        let key = (row.page_num, row.block_num, row.par_num, row.line_num);
        match lines.last_mut() {
            Some(line) if current_line == Some(key) => {
                line.push(' ');
                line.push_str(word);
            }
            _ => {
                lines.push(word.to_string());
                current_line = Some(key);
            }
        }
        if row.conf >= 0.0 {
            confidences.push(row.conf);
        }
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f32>() / confidences.len() as f32
    };

    Ok(Recognition {
        text: lines.join("\n"),
        confidence,
    })
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    fn id(&self) -> &str {
        "tesseract"
    }

    fn name(&self) -> &str {
        "Tesseract OCR"
    }

    async fn recognize(
        &self,
        input: &[u8],
        language: &str,
        progress: ProgressFn<'_>,
    ) -> anyhow::Result<Recognition> {
        progress(Progress::new("iniciando motor", 0.0));
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", language, "tsv"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.binary.display()))?;

        progress(Progress::new("cargando imagen", 0.2));
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input)
                .await
                .context("failed to send image to tesseract")?;
        }

        progress(Progress::new("reconociendo texto", 0.5));
        let output = child.wait_with_output().await?;
        if !output.status.success() {
            anyhow::bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let recognition = parse_tsv(&output.stdout)?;
        progress(Progress::new("listo", 1.0));
        Ok(recognition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
        1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t\n\
        4\t1\t1\t1\t1\t0\t10\t10\t300\t20\t-1\t\n\
        5\t1\t1\t1\t1\t1\t10\t10\t90\t20\t90.5\tRazón\n\
        5\t1\t1\t1\t1\t2\t110\t10\t90\t20\t80.5\tsocial:\n\
        5\t1\t1\t1\t1\t3\t210\t10\t90\t20\t95\tACME\n\
        5\t1\t1\t1\t2\t1\t10\t40\t90\t20\t70\tNIT\n\
        5\t1\t1\t1\t2\t2\t110\t40\t90\t20\t-1\t \n\
        5\t1\t1\t1\t2\t3\t210\t40\t90\t20\t84\t900.123.456-7\n";

    #[test]
    fn test_parse_tsv_rebuilds_lines() {
        let rec = parse_tsv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rec.text, "Razón social: ACME\nNIT 900.123.456-7");
        assert!((rec.confidence - 84.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_tsv_empty_page() {
        let header = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n";
        let rec = parse_tsv(header.as_bytes()).unwrap();
        assert!(rec.text.is_empty());
        assert_eq!(rec.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_missing_binary_fails() {
        let recognizer = TesseractRecognizer::with_binary("/nonexistent/tesseract-binary");
        let err = recognizer
            .recognize(b"\x89PNG", "spa", &|_| {})
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }
}
