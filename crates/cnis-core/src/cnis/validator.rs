//! Rejection of candidate records that are not employment relationships.

use regex::Regex;
use tracing::debug;

use super::rules::patterns::NUMBERED_ITEM;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::statement::EmploymentRecord;

/// Filters out benefit entries and stray numbered list items.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    /// `None` when no benefit terms are configured.
    benefit: Option<Regex>,
}

impl RecordValidator {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let terms: Vec<&str> = config
            .benefit_terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            debug!("No benefit terms configured, benefit check disabled");
            return Ok(Self { benefit: None });
        }

        let benefit = Regex::new(&terms.join("|"))
            .map_err(|e| ExtractionError::pattern("benefit_terms", e))?;
        Ok(Self {
            benefit: Some(benefit),
        })
    }

    /// Whether the employer text names a benefit rather than an employer.
    pub fn is_benefit(&self, employer: &str) -> bool {
        match &self.benefit {
            Some(benefit) => benefit.is_match(&fold_diacritics(&employer.to_uppercase())),
            None => false,
        }
    }

    /// Accepted records come back with a trimmed employer name.
    pub fn validate(&self, mut record: EmploymentRecord) -> Option<EmploymentRecord> {
        if self.is_benefit(&record.employer) {
            debug!("Rejected benefit entry {:?}", record.employer);
            return None;
        }
        if NUMBERED_ITEM.is_match(&record.employer) {
            debug!("Rejected numbered item {:?}", record.employer);
            return None;
        }

        record.employer = record.employer.trim().to_string();
        Some(record)
    }
}

/// Strip Portuguese diacritics from upper-case text.
fn fold_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> RecordValidator {
        RecordValidator::new(&ExtractionConfig::default()).unwrap()
    }

    fn record(employer: &str) -> EmploymentRecord {
        EmploymentRecord {
            employer: employer.to_string(),
            tax_id: "12.345.678/9012-34".to_string(),
            ..EmploymentRecord::default()
        }
    }

    #[test]
    fn test_benefit_vocabulary_is_rejected() {
        let v = validator();
        assert!(v.validate(record("AUXILIO DOENCA PREVIDENCIARIO")).is_none());
        assert!(v.validate(record("Auxílio  Doença")).is_none());
        assert!(v.validate(record("aposentadoria por idade")).is_none());
        assert!(v.validate(record("BENEFÍCIO 31")).is_none());
    }

    #[test]
    fn test_numbered_items_are_rejected() {
        let v = validator();
        assert!(v.validate(record("1 - EMPRESA")).is_none());
        assert!(v.validate(record("12- X")).is_none());
    }

    #[test]
    fn test_accepted_employer_is_trimmed() {
        let accepted = validator().validate(record("  ACME LTDA  ")).unwrap();
        assert_eq!(accepted.employer, "ACME LTDA");
        assert_eq!(accepted.tax_id, "12.345.678/9012-34");
    }

    #[test]
    fn test_ordinary_employers_pass() {
        let v = validator();
        assert!(v.validate(record("AUXILIAR DE SERVICOS GERAIS LTDA")).is_some());
        assert!(v.validate(record("123 COMERCIO")).is_some());
    }

    #[test]
    fn test_without_benefit_terms_only_numbered_items_are_rejected() {
        for terms in [vec![], vec!["".to_string(), "  ".to_string()]] {
            let config = ExtractionConfig {
                benefit_terms: terms,
                ..ExtractionConfig::default()
            };
            let v = RecordValidator::new(&config).unwrap();
            assert!(!v.is_benefit("ACME LTDA"));
            assert!(v.validate(record("ACME LTDA")).is_some());
            assert!(v.validate(record("AUXILIO DOENCA")).is_some());
            assert!(v.validate(record("1 - EMPRESA")).is_none());
        }
    }

    #[test]
    fn test_invalid_benefit_term() {
        let config = ExtractionConfig {
            benefit_terms: vec!["(".to_string()],
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            RecordValidator::new(&config),
            Err(ExtractionError::Pattern { .. })
        ));
    }
}
