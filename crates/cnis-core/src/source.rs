//! Document text acquisition.

use std::path::Path;

use crate::error::Result;

/// Anything that can produce the plain text of a statement.
pub trait TextSource {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Produce the document text.
    fn acquire_text(&self) -> Result<String>;
}

/// Text that has already been extracted elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextSource {
    text: String,
}

impl PlainTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a UTF-8 text file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl TextSource for PlainTextSource {
    fn describe(&self) -> String {
        format!("plain text ({} chars)", self.text.chars().count())
    }

    fn acquire_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
