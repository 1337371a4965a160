//! Common regex patterns for CNIS statement extraction.
//!
//! Patterns that depend on configuration (employer markers, benefit terms)
//! are compiled by their owners at construction time instead.

use lazy_static::lazy_static;
use regex::Regex;

/// Employer tax id (CNPJ), `NN.NNN.NNN/NNNN-NN`.
pub const TAX_ID_FULL: &str = r"\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}";

/// 8-digit CNPJ root, `NN.NNN.NNN`.
pub const TAX_ID_ROOT: &str = r"\d{2}\.\d{3}\.\d{3}";

/// Full calendar date, `DD/MM/YYYY`.
pub const DATE: &str = r"\d{2}/\d{2}/\d{4}";

/// Reduced date, `MM/YYYY`.
pub const MONTH_YEAR: &str = r"\d{2}/\d{4}";

lazy_static! {
    // Block start lines: sequence number followed by the employer identification
    pub static ref START_FULL: Regex = Regex::new(
        &format!(r"^\d+\s+{TAX_ID_FULL}\s+[A-Z]")
    ).unwrap();

    pub static ref START_PARTIAL: Regex = Regex::new(
        &format!(r"^\d+\s+{TAX_ID_ROOT}\s+[A-Z]")
    ).unwrap();

    pub static ref START_INDETERMINATE: Regex = Regex::new(
        r"^\d+\s+Indeterminado\s+[A-Z]"
    ).unwrap();

    pub static ref START_TRUNCATED: Regex = Regex::new(
        &format!(r"^\d+\s+{TAX_ID_FULL}[A-Z]")
    ).unwrap();

    pub static ref START_GROUPING: Regex = Regex::new(
        r"^\d+\s+AGRUPAMENTO\s+DE\s+CONTRATANTES/COOPERATIVAS\s+Contribuinte\s+Individual"
    ).unwrap();

    // Section headers that close a block
    pub static ref END_RELATIONS: Regex = Regex::new(
        r"^Relações\s+Previdenciárias"
    ).unwrap();

    pub static ref END_TOTALS: Regex = Regex::new(
        r"^(?:Valores\s+Consolidados|TOTAIS)"
    ).unwrap();

    pub static ref END_LEGEND: Regex = Regex::new(
        r"^Legenda"
    ).unwrap();

    // Employer identification on a block's first line
    pub static ref EMPLOYER_TRUNCATED: Regex = Regex::new(
        &format!(r"^\d+\s+({TAX_ID_FULL})([A-Z].+)")
    ).unwrap();

    pub static ref GROUPING_WITH_DATES: Regex = Regex::new(
        &format!(
            r"^\d+\s+AGRUPAMENTO\s+DE\s+CONTRATANTES/COOPERATIVAS\s+Contribuinte\s+Individual\s+({DATE})\s+({DATE})"
        )
    ).unwrap();

    pub static ref ANY_TAX_ID: Regex = Regex::new(
        &format!(r"({TAX_ID_ROOT}(?:/\d{{4}}-\d{{2}})?)")
    ).unwrap();

    // Relationship dates
    pub static ref PUBLIC_TWO_DATES: Regex = Regex::new(
        &format!(r"Público\s*({DATE})\s+({DATE}|{MONTH_YEAR})")
    ).unwrap();

    pub static ref PUBLIC_ONE_DATE: Regex = Regex::new(
        &format!(r"Público\s*({DATE})")
    ).unwrap();

    pub static ref BARE_DATE: Regex = Regex::new(DATE).unwrap();

    pub static ref MONTH_YEAR_ONLY: Regex = Regex::new(
        r"^(\d{2})/(\d{4})$"
    ).unwrap();

    // Remuneration entries are "MM/YYYY 1.234,56" token pairs
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"^[\d.,]+$"
    ).unwrap();

    pub static ref LAST_REMUNERATION: Regex = Regex::new(
        &format!(r"Últ\.\s*Remun\.\s*({MONTH_YEAR})")
    ).unwrap();

    // Holder identification
    pub static ref CPF_LABELED: Regex = Regex::new(
        r"CPF[:\s]*(\d{3}\.\d{3}\.\d{3}-\d{2})"
    ).unwrap();

    pub static ref CPF_AFTER_NIT: Regex = Regex::new(
        r"NIT[:\s]*\d+\.\d+\.\d+-\d+\s+CPF[:\s]*(\d{3}\.\d{3}\.\d{3}-\d{2})"
    ).unwrap();

    // Names may wrap; the capture runs to the birth-date label or end of text
    pub static ref HOLDER_NAME: Regex = Regex::new(
        r"(?i)NIT[:\s]*[\d.\-]+\s+CPF[:\s]*\d{3}\.\d{3}\.\d{3}-\d{2}\s+Nome[:\s]*([A-ZÁÉÍÓÚÂÊÔÃÕÇ][A-ZÁÉÍÓÚÂÊÔÃÕÇa-záéíóúâêôãõç\s]+?)(?:\s+Data\s+de\s+nascimento|\s*\z)"
    ).unwrap();

    pub static ref NAME_ARTIFACTS: Regex = Regex::new(
        r"[0-9\-_.()\[\]]"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    pub static ref BIRTH_DATE: Regex = Regex::new(
        &format!(r"(?i)Data\s+de\s+nascimento[:\s]*({DATE})")
    ).unwrap();

    // Report generation stamp: "DD/MM/YYYY HH:MM:SS"
    pub static ref REPORT_TIMESTAMP: Regex = Regex::new(
        &format!(r"({DATE})\s+\d{{2}}:\d{{2}}:\d{{2}}")
    ).unwrap();

    // Stray numbered list items ("1 - ...") mistaken for employers
    pub static ref NUMBERED_ITEM: Regex = Regex::new(
        r"^\d+\s*-\s*"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_year_only_rejects_full_dates() {
        assert!(MONTH_YEAR_ONLY.is_match("03/2015"));
        assert!(!MONTH_YEAR_ONLY.is_match("01/03/2010"));
        assert!(AMOUNT_TOKEN.is_match("1.234,56"));
        assert!(!AMOUNT_TOKEN.is_match("IREC-LC123"));
    }

    #[test]
    fn test_any_tax_id_prefers_full_form() {
        let caps = ANY_TAX_ID.captures("Contratante 98.765.432/0001-10 X").unwrap();
        assert_eq!(&caps[1], "98.765.432/0001-10");
        let caps = ANY_TAX_ID.captures("Contratante 98.765.432 X").unwrap();
        assert_eq!(&caps[1], "98.765.432");
    }

    #[test]
    fn test_report_timestamp() {
        let caps = REPORT_TIMESTAMP.captures("Gerado em 15/05/2024 10:22:31").unwrap();
        assert_eq!(&caps[1], "15/05/2024");
    }
}
