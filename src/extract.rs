//! Field extraction from recognized Cámara de Comercio text.
//!
//! Each field owns an ordered list of case-insensitive patterns; the first
//! pattern that matches wins. Fields are extracted independently.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::store::models::OcrData;

const RAZON_MAX_CHARS: usize = 100;
const DIR_MAX_CHARS: usize = 120;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid extraction pattern"))
        .collect()
}

static MATRICULA: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)matr[ií]cula\s*(?:no\.?|n[oú]mero\.?|mercantil\.?)\s*[:\-]?\s*([\d.,\s]+\d)",
        r"(?i)(?:no\.?\s*)?matr[ií]cula\s*[:\-]?\s*([\d.,\s]+\d)",
    ])
});

static ANIO: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)renovaci[oó]n\s*.*?(\b20[0-9]{2}\b)",
        r"(?i)renovad[oa]\s*(?:hasta)?\s*.*?(\b20[0-9]{2}\b)",
        r"(?i)a[ñn]o\s*renovad[oa]\s*[:\-]?\s*(\b20[0-9]{2}\b)",
    ])
});

static ANIO_LINE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)renovaci[oó]n|renovad[oa]|vigencia").expect("valid keyword pattern")
});

static BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20[0-9]{2})\b").expect("valid year pattern"));

static RAZON: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)raz[oó]n\s*social\s*[:\-]?\s*(.+)",
        r"(?i)denominaci[oó]n\s*social\s*[:\-]?\s*(.+)",
    ])
});

static NIT: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(?i)n\.?\s*i\.?\s*t\.?\s*[:\-]?\s*([\d.,\s]+-\s*\d)"]));

static DIR: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)direcci[oó]n\s*(?:comercial|principal)?\s*[:\-]?\s*(.+)",
        r"(?i)domicilio\s*[:\-]?\s*(.+)",
    ])
});

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace pattern"));

/// Capture group 1 of the first pattern that matches.
fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trim, collapse whitespace runs, cap at `max` characters.
fn clean_line(raw: &str, max: usize) -> String {
    let collapsed = MULTI_SPACE.replace_all(raw.trim(), " ");
    collapsed.chars().take(max).collect()
}

/// Registration number with separators removed.
pub fn extract_matricula(text: &str) -> Option<String> {
    first_capture(&MATRICULA, text).map(|m| {
        m.chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '.')
            .collect()
    })
}

/// Renewal year. Falls back to scanning lines that mention renewal or
/// validity for a bare `20xx` token when no direct pattern matches.
pub fn extract_anio(text: &str) -> Option<String> {
    if let Some(year) = first_capture(&ANIO, text) {
        return Some(year.to_string());
    }
    text.lines()
        .filter(|line| ANIO_LINE_KEYWORD.is_match(line))
        .find_map(|line| BARE_YEAR.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn extract_razon(text: &str) -> Option<String> {
    first_capture(&RAZON, text).map(|m| clean_line(m, RAZON_MAX_CHARS))
}

pub fn extract_nit(text: &str) -> Option<String> {
    first_capture(&NIT, text).map(|m| m.chars().filter(|c| !c.is_whitespace()).collect())
}

pub fn extract_dir(text: &str) -> Option<String> {
    first_capture(&DIR, text).map(|m| clean_line(m, DIR_MAX_CHARS))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extracted {
    pub matricula: Option<String>,
    pub anio: Option<String>,
    pub razon: Option<String>,
    pub nit: Option<String>,
    pub dir: Option<String>,
}

pub fn extract_all(text: &str) -> Extracted {
    Extracted {
        matricula: extract_matricula(text),
        anio: extract_anio(text),
        razon: extract_razon(text),
        nit: extract_nit(text),
        dir: extract_dir(text),
    }
}

impl Extracted {
    /// (label, value, placeholder) in display order.
    pub fn fields(&self) -> [(&'static str, Option<&str>, &'static str); 5] {
        [
            ("Matrícula", self.matricula.as_deref(), "No detectada"),
            ("Año Renovado", self.anio.as_deref(), "No detectado"),
            ("Razón Social", self.razon.as_deref(), "No detectada"),
            ("NIT", self.nit.as_deref(), "No detectado"),
            ("Dirección", self.dir.as_deref(), "No detectada"),
        ]
    }

    pub fn detected_count(&self) -> usize {
        self.fields().iter().filter(|(_, v, _)| v.is_some()).count()
    }

    /// Subset stored on the Cámara de Comercio document slot.
    pub fn to_ocr_data(&self) -> OcrData {
        OcrData {
            matricula: self.matricula.clone(),
            anio_renovado: self.anio.clone(),
        }
    }
}
