//! Core library for CNIS statement processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Employment record extraction from CNIS statements (employer, CNPJ, dates)
//! - Holder identification (name, CPF, birth date)
//! - INSS notice body cleanup and protocol lookup

pub mod cnis;
pub mod error;
pub mod models;
pub mod notice;
pub mod pdf;
pub mod source;

pub use cnis::CnisPipeline;
pub use error::{CnisError, ExtractionError, PdfError, Result};
pub use models::config::CnisConfig;
pub use models::statement::{EmploymentRecord, ExtractionOutput, ExtractionResult, PersonalData};
pub use notice::{process_notice, Notice, NoticeCleaner};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
pub use source::{PlainTextSource, TextSource};
