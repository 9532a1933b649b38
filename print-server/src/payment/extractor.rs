//! OCR text extraction
//!
//! The attestation checker only sees plain text; how the text is produced
//! is this trait's business. The production implementation preprocesses
//! the screenshot (grayscale + contrast, which markedly improves OCR on
//! dark-mode UPI screenshots) and shells out to the `tesseract` binary.

use async_trait::async_trait;
use std::io::Cursor;
use thiserror::Error;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}

/// Extracts text from a screenshot image.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image: &[u8]) -> Result<String, ExtractError>;
}

/// Contrast boost applied before OCR
const CONTRAST_BOOST: f32 = 40.0;

/// Page segmentation mode: assume a uniform block of text
const TESSERACT_PSM: &str = "6";

/// `tesseract` CLI backed extractor
#[derive(Debug, Clone, Default)]
pub struct TesseractExtractor;

impl TesseractExtractor {
    /// Decode, grayscale and boost contrast, returning PNG bytes.
    fn preprocess(image_bytes: &[u8]) -> Result<Vec<u8>, ExtractError> {
        let img = image::load_from_memory(image_bytes)
            .map_err(|e| ExtractError::InvalidImage(e.to_string()))?;
        let processed = img.grayscale().adjust_contrast(CONTRAST_BOOST);

        let mut buffer = Vec::new();
        processed
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| ExtractError::InvalidImage(e.to_string()))?;
        Ok(buffer)
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_text(&self, image: &[u8]) -> Result<String, ExtractError> {
        let png = Self::preprocess(image)?;

        // tesseract reads from a file, so stage the preprocessed image
        let file = tempfile::Builder::new()
            .prefix("screenshot-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| ExtractError::Ocr(format!("temp file: {e}")))?;
        tokio::fs::write(file.path(), &png)
            .await
            .map_err(|e| ExtractError::Ocr(format!("temp file: {e}")))?;

        let output = tokio::process::Command::new("tesseract")
            .arg(file.path())
            .arg("stdout")
            .args(["-l", "eng", "--psm", TESSERACT_PSM])
            .output()
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Extractor returning canned text, for manager and handler tests.
    pub struct FixedExtractor(pub String);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract_text(&self, _image: &[u8]) -> Result<String, ExtractError> {
            Ok(self.0.clone())
        }
    }

    /// Extractor that always fails, for error-path tests.
    pub struct FailingExtractor;

    #[async_trait]
    impl TextExtractor for FailingExtractor {
        async fn extract_text(&self, _image: &[u8]) -> Result<String, ExtractError> {
            Err(ExtractError::Ocr("simulated failure".to_string()))
        }
    }
}
