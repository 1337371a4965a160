//! Field extraction for a single employment-record block.

use regex::Regex;
use tracing::{debug, trace};

use super::personal::ExclusionDateSet;
use super::rules::patterns::{
    ANY_TAX_ID, BARE_DATE, EMPLOYER_TRUNCATED, GROUPING_WITH_DATES, LAST_REMUNERATION,
    MONTH_YEAR_ONLY, PUBLIC_ONE_DATE, PUBLIC_TWO_DATES, TAX_ID_FULL, TAX_ID_ROOT,
};
use super::rules::{extract_last_salary, normalize_month_year, Cascade, MatchRule};
use super::splitter::Block;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::statement::{EmploymentRecord, TAX_ID_INDETERMINATE};

/// Employer name and tax id read from a block's first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerMatch {
    pub tax_id: String,
    pub employer: String,
}

/// Where an employer rule takes the tax id from.
enum TaxIdSource {
    /// Capture group number.
    Group(usize),
    /// Fixed placeholder.
    Literal(&'static str),
}

/// One employer-identification alternative.
struct EmployerRule {
    name: &'static str,
    pattern: Regex,
    tax_id: TaxIdSource,
    employer_group: usize,
}

impl MatchRule for EmployerRule {
    type Output = EmployerMatch;

    fn name(&self) -> &str {
        self.name
    }

    fn try_match(&self, line: &str) -> Option<EmployerMatch> {
        let caps = self.pattern.captures(line)?;
        let employer = caps.get(self.employer_group)?.as_str().trim();
        if employer.is_empty() {
            return None;
        }

        let tax_id = match self.tax_id {
            TaxIdSource::Group(group) => caps.get(group)?.as_str().to_string(),
            TaxIdSource::Literal(value) => value.to_string(),
        };

        Some(EmployerMatch {
            tax_id,
            employer: employer.to_string(),
        })
    }
}

/// Relationship dates before exclusion filtering has been applied.
#[derive(Debug, Default, PartialEq, Eq)]
struct Dates {
    start: Option<String>,
    end: Option<String>,
}

/// Turns a [`Block`] into a candidate [`EmploymentRecord`].
pub struct EmploymentExtractor {
    employer: Cascade<EmployerMatch>,
    grouping_label: String,
}

impl EmploymentExtractor {
    /// Build the employer cascade; marker literals come from configuration.
    ///
    /// At least one non-blank marker is required.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let markers = config
            .employer_markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();

        if markers.is_empty() {
            return Err(ExtractionError::Pattern {
                name: "employer_markers".to_string(),
                reason: "at least one marker is required".to_string(),
            });
        }
        let markers = markers.join("|");

        let compile = |name: &'static str, pattern: String| {
            Regex::new(&pattern).map_err(|e| ExtractionError::pattern(name, e))
        };

        let employer = Cascade::new()
            .with_rule(EmployerRule {
                name: "full_tax_id",
                pattern: compile(
                    "full_tax_id",
                    format!(r"^\d+\s+({TAX_ID_FULL})\s+(.+?)(?:{markers})"),
                )?,
                tax_id: TaxIdSource::Group(1),
                employer_group: 2,
            })
            .with_rule(EmployerRule {
                name: "partial_tax_id",
                pattern: compile(
                    "partial_tax_id",
                    format!(r"^\d+\s+({TAX_ID_ROOT})\s+(.+?)(?:{markers})"),
                )?,
                tax_id: TaxIdSource::Group(1),
                employer_group: 2,
            })
            .with_rule(EmployerRule {
                name: "indeterminate",
                pattern: compile(
                    "indeterminate",
                    format!(r"^\d+\s+Indeterminado\s+(.+?)(?:{markers})"),
                )?,
                tax_id: TaxIdSource::Literal(TAX_ID_INDETERMINATE),
                employer_group: 1,
            })
            .with_rule(EmployerRule {
                name: "truncated",
                pattern: EMPLOYER_TRUNCATED.clone(),
                tax_id: TaxIdSource::Group(1),
                employer_group: 2,
            });

        Ok(Self {
            employer,
            grouping_label: config.grouping_label.clone(),
        })
    }

    /// Names of the employer rules, in the order they are tried.
    pub fn employer_rule_names(&self) -> Vec<&str> {
        self.employer.rule_names()
    }

    /// Employer and tax id from a block's first line.
    pub fn match_employer(&self, line: &str) -> Option<EmployerMatch> {
        let (rule, found) = self.employer.first_match_named(line)?;
        trace!("Employer rule {} matched {:?}", rule, found.employer);
        Some(found)
    }

    /// Extract a candidate record. `None` when no employer could be found.
    pub fn extract(&self, block: &Block<'_>, exclusions: &ExclusionDateSet) -> Option<EmploymentRecord> {
        let first_line = block.first_line();

        let (employer, dates) = if let Some(caps) = GROUPING_WITH_DATES.captures(first_line) {
            let tax_id = block
                .rest()
                .iter()
                .find_map(|line| ANY_TAX_ID.captures(line).map(|c| c[1].to_string()))
                .unwrap_or_default();

            let employer = EmployerMatch {
                tax_id,
                employer: self.grouping_label.clone(),
            };
            let dates = Dates {
                start: Some(caps[1].to_string()),
                end: Some(caps[2].to_string()),
            };
            (Some(employer), dates)
        } else {
            (self.match_employer(first_line), dates_for_block(block, exclusions))
        };

        let Some(employer) = employer else {
            debug!("No employer found in block starting at line {}", block.start_line);
            return None;
        };

        let last_remuneration = block
            .lines
            .iter()
            .find_map(|line| LAST_REMUNERATION.captures(line).map(|c| c[1].to_string()));

        Some(EmploymentRecord {
            employer: employer.employer,
            tax_id: employer.tax_id,
            start_date: dates.start.filter(|d| !exclusions.contains(d)),
            end_date: dates.end.filter(|d| !exclusions.contains(d)),
            salary: extract_last_salary(block.lines.iter().copied()),
            last_remuneration,
        })
    }
}

/// Dates of a regular (non-grouping) block.
///
/// The second line's "Público" label is authoritative whenever it matches.
/// Only when it is missing are the remaining lines scanned for bare dates.
fn dates_for_block(block: &Block<'_>, exclusions: &ExclusionDateSet) -> Dates {
    let second_line = block.rest().first().copied().unwrap_or("");

    if let Some(caps) = PUBLIC_TWO_DATES.captures(second_line) {
        let raw_end = &caps[2];
        let end = if MONTH_YEAR_ONLY.is_match(raw_end) {
            normalize_month_year(raw_end)
        } else {
            raw_end.to_string()
        };

        return Dates {
            start: exclusions.admit(&caps[1]).map(str::to_string),
            end: exclusions.admit(&end).map(str::to_string),
        };
    }

    if let Some(caps) = PUBLIC_ONE_DATE.captures(second_line) {
        return Dates {
            start: exclusions.admit(&caps[1]).map(str::to_string),
            end: None,
        };
    }

    for line in block.rest() {
        let mut found = BARE_DATE
            .find_iter(line)
            .map(|m| m.as_str())
            .filter(|d| !exclusions.contains(d));

        if let Some(start) = found.next() {
            return Dates {
                start: Some(start.to_string()),
                end: found.next().map(str::to_string),
            };
        }
    }

    Dates::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnis::classifier::LineTag;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn block<'a>(lines: &[&'a str]) -> Block<'a> {
        Block {
            start_tag: LineTag::BlockStartFull,
            start_line: 1,
            lines: lines.to_vec(),
        }
    }

    fn extractor() -> EmploymentExtractor {
        EmploymentExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_employer_rule_order() {
        assert_eq!(
            extractor().employer_rule_names(),
            vec!["full_tax_id", "partial_tax_id", "indeterminate", "truncated"]
        );
    }

    #[test]
    fn test_full_record() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Público 01/03/2010 28/02/2015",
        ]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();

        assert_eq!(
            record,
            EmploymentRecord {
                employer: "ACME LTDA".to_string(),
                tax_id: "12.345.678/9012-34".to_string(),
                start_date: Some("01/03/2010".to_string()),
                end_date: Some("28/02/2015".to_string()),
                salary: None,
                last_remuneration: None,
            }
        );
    }

    #[test]
    fn test_month_year_end_is_normalized() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Público 01/03/2010 02/2016",
        ]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();
        assert_eq!(record.end_date.as_deref(), Some("29/02/2016"));
    }

    #[test]
    fn test_invalid_month_year_end_is_kept_verbatim() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Público 01/03/2010 13/2016",
        ]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();
        assert_eq!(record.end_date.as_deref(), Some("13/2016"));
    }

    #[test]
    fn test_single_public_date_is_ongoing() {
        let b = block(&["2 12.345.678 BETA COMERCIO Contribuinte", "Público 10/10/2020"]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();

        assert_eq!(record.tax_id, "12.345.678");
        assert_eq!(record.employer, "BETA COMERCIO");
        assert_eq!(record.start_date.as_deref(), Some("10/10/2020"));
        assert!(record.is_ongoing());
    }

    #[test]
    fn test_indeterminate_tax_id() {
        let b = block(&["3 Indeterminado EMPRESA X Empregado"]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();
        assert_eq!(record.tax_id, "Indeterminado");
        assert_eq!(record.employer, "EMPRESA X");
    }

    #[test]
    fn test_truncated_line() {
        let b = block(&["4 12.345.678/9012-34ACME INDUSTRIA"]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();
        assert_eq!(record.tax_id, "12.345.678/9012-34");
        assert_eq!(record.employer, "ACME INDUSTRIA");
    }

    #[test]
    fn test_blank_employer_falls_through() {
        let b = block(&["1 12.345.678/9012-34  Empregado"]);
        assert!(extractor().extract(&b, &ExclusionDateSet::new()).is_none());
    }

    #[test]
    fn test_custom_markers() {
        let config = ExtractionConfig {
            employer_markers: vec!["Avulso".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = EmploymentExtractor::new(&config).unwrap();
        let found = extractor
            .match_employer("1 12.345.678/9012-34 PORTO SANTOS Avulso")
            .unwrap();
        assert_eq!(found.employer, "PORTO SANTOS");
    }

    #[test]
    fn test_empty_markers_are_rejected() {
        for markers in [vec![], vec![" ".to_string()]] {
            let config = ExtractionConfig {
                employer_markers: markers,
                ..ExtractionConfig::default()
            };
            match EmploymentExtractor::new(&config) {
                Err(ExtractionError::Pattern { name, .. }) => assert_eq!(name, "employer_markers"),
                Err(other) => panic!("unexpected error: {other}"),
                Ok(_) => panic!("empty marker list must not compile"),
            }
        }
    }

    #[test]
    fn test_grouping_block() {
        let b = Block {
            start_tag: LineTag::BlockStartGrouping,
            start_line: 7,
            lines: vec![
                "5 AGRUPAMENTO DE CONTRATANTES/COOPERATIVAS Contribuinte Individual 01/01/2012 31/12/2012",
                "Contratante 98.765.432/0001-10 COOPERATIVA X",
                "Contratante 11.222.333/0001-44 COOPERATIVA Y",
            ],
        };
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();

        assert_eq!(record.employer, "AGRUPAMENTO DE CONTRATANTES");
        assert_eq!(record.tax_id, "98.765.432/0001-10");
        assert_eq!(record.start_date.as_deref(), Some("01/01/2012"));
        assert_eq!(record.end_date.as_deref(), Some("31/12/2012"));
    }

    #[test]
    fn test_excluded_public_date_is_dropped_without_fallback() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Público 01/01/1970 28/02/2015",
            "Admissão 05/05/2005",
        ]);
        let exclusions: ExclusionDateSet = ["01/01/1970"].into_iter().collect();
        let record = extractor().extract(&b, &exclusions).unwrap();

        assert_eq!(record.start_date, None);
        assert_eq!(record.end_date.as_deref(), Some("28/02/2015"));
    }

    #[test]
    fn test_fallback_scans_remaining_lines() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "sem rótulo",
            "Gerado em 15/05/2024 10:22:31",
            "Admissão 05/05/2005 Desligamento 06/06/2006",
        ]);
        let exclusions: ExclusionDateSet = ["15/05/2024"].into_iter().collect();
        let record = extractor().extract(&b, &exclusions).unwrap();

        assert_eq!(record.start_date.as_deref(), Some("05/05/2005"));
        assert_eq!(record.end_date.as_deref(), Some("06/06/2006"));
    }

    #[test]
    fn test_fallback_single_date() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Admissão 05/05/2005",
            "Outra 07/07/2007 08/08/2008",
        ]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();

        assert_eq!(record.start_date.as_deref(), Some("05/05/2005"));
        assert_eq!(record.end_date, None);
    }

    #[test]
    fn test_salary_and_last_remuneration() {
        let b = block(&[
            "1 12.345.678/9012-34 ACME LTDA Empregado",
            "Público 01/03/2010 28/02/2015 Últ. Remun. 02/2015",
            "01/2015 1.500,00 02/2015 1.650,50",
        ]);
        let record = extractor().extract(&b, &ExclusionDateSet::new()).unwrap();

        assert_eq!(record.salary, Some(Decimal::new(165050, 2)));
        assert_eq!(record.last_remuneration.as_deref(), Some("02/2015"));
    }
}
