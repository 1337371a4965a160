//! End-to-end statement processing.

use tracing::{debug, info};

use super::employment::EmploymentExtractor;
use super::personal::PersonalDataExtractor;
use super::splitter::split_into_blocks;
use super::validator::RecordValidator;
use crate::error::{ExtractionError, Result};
use crate::models::config::CnisConfig;
use crate::models::statement::{EmploymentRecord, ExtractionResult};
use crate::source::TextSource;

/// CNIS statement pipeline.
///
/// Configurable patterns are compiled once in [`CnisPipeline::new`]; the
/// pipeline is immutable afterwards and can be reused across documents.
pub struct CnisPipeline {
    config: CnisConfig,
    personal: PersonalDataExtractor,
    employment: EmploymentExtractor,
    validator: RecordValidator,
}

impl CnisPipeline {
    pub fn new(config: CnisConfig) -> Result<Self> {
        let personal = PersonalDataExtractor::new(&config.extraction);
        let employment = EmploymentExtractor::new(&config.extraction)?;
        let validator = RecordValidator::new(&config.extraction)?;

        Ok(Self {
            config,
            personal,
            employment,
            validator,
        })
    }

    pub fn config(&self) -> &CnisConfig {
        &self.config
    }

    /// Process statement text. Never fails; problems become a failed result.
    pub fn process_text(&self, text: &str) -> ExtractionResult {
        match self.try_process_text(text) {
            Ok(result) => result,
            Err(e) => {
                info!("Statement processing failed: {}", e);
                ExtractionResult::failed(e.to_string())
            }
        }
    }

    /// Acquire text from `source` and process it.
    pub fn process_source(&self, source: &dyn TextSource) -> ExtractionResult {
        debug!("Acquiring text from {}", source.describe());
        match source.acquire_text() {
            Ok(text) => self.process_text(&text),
            Err(e) => {
                info!("Text acquisition failed: {}", e);
                ExtractionResult::failed(e.to_string())
            }
        }
    }

    fn try_process_text(&self, text: &str) -> std::result::Result<ExtractionResult, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }

        let personal = self.personal.extract(text);
        let exclusions = self.personal.exclusions(text, &personal);
        debug!("Excluding {} metadata dates", exclusions.len());

        let blocks = split_into_blocks(text);
        debug!("Split statement into {} blocks", blocks.len());

        let records: Vec<EmploymentRecord> = blocks
            .iter()
            .filter_map(|block| self.employment.extract(block, &exclusions))
            .filter_map(|record| self.validator.validate(record))
            .collect();

        info!(
            "Extracted {} employment records from {} blocks",
            records.len(),
            blocks.len()
        );

        Ok(ExtractionResult::succeeded(
            personal,
            records,
            text.chars().count(),
        ))
    }
}
