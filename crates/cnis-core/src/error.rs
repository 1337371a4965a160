//! Error types for the cnis-core library.

use thiserror::Error;

/// Main error type for the cnis library.
#[derive(Error, Debug)]
pub enum CnisError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to statement field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The text source produced nothing to segment.
    #[error("no text could be extracted from the document")]
    EmptyText,

    /// A configurable pattern failed to compile.
    #[error("invalid pattern for {name}: {reason}")]
    Pattern { name: String, reason: String },

    /// A month/year value is malformed or its month is out of range.
    #[error("invalid month/year value: {0}")]
    InvalidMonthYear(String),

    /// Calendar arithmetic left the supported date range.
    #[error("date out of range: {0}")]
    DateOverflow(String),
}

impl ExtractionError {
    pub(crate) fn pattern(name: impl Into<String>, err: regex::Error) -> Self {
        Self::Pattern {
            name: name.into(),
            reason: err.to_string(),
        }
    }
}

/// Result type for the cnis library.
pub type Result<T> = std::result::Result<T, CnisError>;
