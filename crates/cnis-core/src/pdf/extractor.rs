//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use std::path::Path;
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::{CnisError, PdfError};
use crate::models::config::PdfConfig;
use crate::source::TextSource;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Extracted text (if any).
    pub text: String,
    /// Number of pages.
    pub page_count: u32,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: config.min_text_length,
        }
    }

    /// Read and load a PDF file.
    pub fn open(path: impl AsRef<Path>, config: &PdfConfig) -> std::result::Result<Self, CnisError> {
        let data = std::fs::read(path.as_ref())?;
        let mut extractor = Self::with_config(config);
        extractor.load(&data)?;
        Ok(extractor)
    }

    /// Extract the text and classify the document.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let text = self.extract_text()?;
        let pdf_type = self.classify(&text);

        debug!(
            "PDF analysis: {} pages, {} chars text -> {:?}",
            page_count,
            text.chars().count(),
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            page_count,
        })
    }

    fn classify(&self, text: &str) -> PdfType {
        if text.trim().chars().count() > self.min_text_length {
            PdfType::Text
        } else if self.image_count() > 0 {
            PdfType::Image
        } else {
            PdfType::Empty
        }
    }

    /// Number of image XObjects anywhere in the document.
    fn image_count(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        let count = doc
            .objects
            .values()
            .filter(|object| is_image(object))
            .count();

        trace!("Found {} image objects", count);
        count
    }
}

fn is_image(object: &Object) -> bool {
    match object {
        Object::Stream(stream) => stream
            .dict
            .get(b"Subtype")
            .and_then(|s| s.as_name())
            .map(|name| name == b"Image")
            .unwrap_or(false),
        _ => false,
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Statements are sometimes protected with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        let pdf_type = self.classify(&text);
        debug!("PDF analysis: {} chars -> {:?}", text.len(), pdf_type);
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}

impl TextSource for PdfExtractor {
    fn describe(&self) -> String {
        format!("PDF ({} pages)", self.page_count())
    }

    fn acquire_text(&self) -> std::result::Result<String, CnisError> {
        Ok(self.extract_text()?)
    }
}
