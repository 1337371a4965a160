//! Configuration structures for the CNIS pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the cnis pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CnisConfig {
    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// INSS notice cleanup configuration.
    pub notice: NoticeConfig,
}

/// Statement extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Literals that terminate the employer name on a block's first line.
    pub employer_markers: Vec<String>,

    /// Regex fragments naming benefit entries that are not employment records.
    /// Matched against the upper-cased, accent-folded employer name.
    pub benefit_terms: Vec<String>,

    /// Employer label assigned to collective contributor blocks.
    pub grouping_label: String,

    /// Holder names must be longer than this (in characters).
    pub min_name_length: usize,

    /// Title-case the holder name ("MARIA SILVA" -> "Maria Silva").
    pub title_case_names: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            employer_markers: vec!["Empregado".to_string(), "Contribuinte".to_string()],
            benefit_terms: vec![
                r"AUXILIO\s+DOENCA".to_string(),
                "APOSENTADORIA".to_string(),
                "BENEFICIO".to_string(),
            ],
            grouping_label: "AGRUPAMENTO DE CONTRATANTES".to_string(),
            min_name_length: 5,
            title_case_names: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// INSS notice (despacho) cleanup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Token-overlap ratio above which two dispatch lines count as duplicates.
    pub similarity_threshold: f64,

    /// Normalized lines this short are never treated as near-duplicates.
    pub min_similarity_length: usize,

    /// HTML text fragments this short (or shorter) are dropped.
    pub min_html_fragment_length: usize,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            min_similarity_length: 20,
            min_html_fragment_length: 10,
        }
    }
}

impl CnisConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CnisConfig =
            serde_json::from_str(r#"{"notice": {"similarity_threshold": 0.9}}"#).unwrap();
        assert_eq!(config.notice.similarity_threshold, 0.9);
        assert_eq!(config.notice.min_similarity_length, 20);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CnisConfig::default();
        config.extraction.title_case_names = false;
        config.save(&path).unwrap();

        let loaded = CnisConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
