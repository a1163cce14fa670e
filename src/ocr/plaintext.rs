use async_trait::async_trait;

use super::{Progress, ProgressFn, Recognition, TextRecognizer};

/// Treats the input as already-recognized UTF-8 text. Useful for documents
/// exported as text and for exercising the extraction pipeline end-to-end.
pub struct PlainTextRecognizer;

#[async_trait]
impl TextRecognizer for PlainTextRecognizer {
    fn id(&self) -> &str {
        "texto"
    }

    fn name(&self) -> &str {
        "Texto plano"
    }

    async fn recognize(
        &self,
        input: &[u8],
        _language: &str,
        progress: ProgressFn<'_>,
    ) -> anyhow::Result<Recognition> {
        progress(Progress::new("leyendo texto", 0.0));
        let text = String::from_utf8_lossy(input).into_owned();
        progress(Progress::new("listo", 1.0));
        Ok(Recognition {
            text,
            confidence: 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lossy_decoding() {
        let rec = PlainTextRecognizer
            .recognize(b"NIT \xff 900", "spa", &|_| {})
            .await
            .unwrap();
        assert!(rec.text.starts_with("NIT "));
        assert!(rec.text.ends_with(" 900"));
        assert_eq!(rec.confidence, 100.0);
    }
}
