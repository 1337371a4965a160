//! Holder identification and the set of dates that are never employment dates.

use std::collections::BTreeSet;

use tracing::debug;

use super::rules::patterns::{
    BIRTH_DATE, CPF_AFTER_NIT, CPF_LABELED, HOLDER_NAME, NAME_ARTIFACTS, REPORT_TIMESTAMP,
    WHITESPACE_RUN,
};
use super::rules::{Cascade, CaptureRule, MatchRule};
use crate::models::config::ExtractionConfig;
use crate::models::statement::PersonalData;

/// Dates known to belong to document metadata (birth date, report stamps).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionDateSet {
    dates: BTreeSet<String>,
}

impl ExclusionDateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: impl Into<String>) -> bool {
        self.dates.insert(date.into())
    }

    pub fn contains(&self, date: &str) -> bool {
        self.dates.contains(date)
    }

    /// `Some(date)` unless the date is excluded.
    pub fn admit<'a>(&self, date: &'a str) -> Option<&'a str> {
        (!self.contains(date)).then_some(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionDateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Holder name rule: NIT, CPF and `Nome:` on one structural run, cleaned up
/// and sanity-checked before it is accepted.
struct HolderNameRule {
    min_length: usize,
    title_case: bool,
}

impl MatchRule for HolderNameRule {
    type Output = String;

    fn name(&self) -> &str {
        "nit_cpf_nome"
    }

    fn try_match(&self, text: &str) -> Option<String> {
        let caps = HOLDER_NAME.captures(text)?;
        let cleaned = NAME_ARTIFACTS.replace_all(&caps[1], "");
        let cleaned = WHITESPACE_RUN.replace_all(cleaned.trim(), " ").into_owned();

        if cleaned.chars().count() <= self.min_length || !cleaned.contains(' ') {
            debug!("Rejected holder name candidate {:?}", cleaned);
            return None;
        }

        Some(if self.title_case {
            title_case(&cleaned)
        } else {
            cleaned
        })
    }
}

/// Extracts [`PersonalData`] from the whole statement text.
pub struct PersonalDataExtractor {
    tax_id: Cascade<String>,
    full_name: Cascade<String>,
    birth_date: Cascade<String>,
}

impl PersonalDataExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            tax_id: Cascade::new()
                .with_rule(CaptureRule::new("cpf_labeled", CPF_LABELED.clone(), 1))
                .with_rule(CaptureRule::new("nit_then_cpf", CPF_AFTER_NIT.clone(), 1)),
            full_name: Cascade::new().with_rule(HolderNameRule {
                min_length: config.min_name_length,
                title_case: config.title_case_names,
            }),
            birth_date: Cascade::new()
                .with_rule(CaptureRule::new("birth_date_labeled", BIRTH_DATE.clone(), 1)),
        }
    }

    /// Each field is looked up independently; a miss leaves it `None`.
    pub fn extract(&self, text: &str) -> PersonalData {
        PersonalData {
            tax_id: self.tax_id.first_match(text),
            full_name: self.full_name.first_match(text),
            birth_date: self.birth_date.first_match(text),
        }
    }

    /// Birth date plus every date stamped with a generation time.
    pub fn exclusions(&self, text: &str, personal: &PersonalData) -> ExclusionDateSet {
        let mut exclusions = ExclusionDateSet::new();

        if let Some(birth) = &personal.birth_date {
            debug!("Excluding birth date {}", birth);
            exclusions.insert(birth.clone());
        }

        for caps in REPORT_TIMESTAMP.captures_iter(text) {
            if exclusions.insert(&caps[1]) {
                debug!("Excluding report generation date {}", &caps[1]);
            }
        }

        exclusions
    }
}

impl Default for PersonalDataExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Upper-case the first letter of every word and lower-case the rest. Any
/// non-letter starts a new word, so `D'ÁVILA` becomes `D'Ávila`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
