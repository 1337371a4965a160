//! Protocol number and service name lookup in INSS notices.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::cnis::rules::{Cascade, CaptureRule};

lazy_static! {
    static ref PROTOCOL_RULES: Cascade<String> = Cascade::new()
        .with_rule(labeled("requerimento", r"(?i)requerimento\s*[nº.:]*\s*(\d+)"))
        .with_rule(labeled("protocolo", r"(?i)protocolo\s*[nº.:]*\s*(\d+)"))
        .with_rule(labeled("processo", r"(?i)processo\s*[nº.:]*\s*(\d+)"))
        .with_rule(labeled("numero", r"(?i)número\s*[.:]*\s*(\d+)"))
        .with_rule(labeled("hash", r"#\s*(\d+)"))
        .with_rule(labeled("bracketed", r"[\[(](\d{6,})[\])]"))
        .with_rule(labeled("long_number", r"(\d{6,})"));

    static ref SERVICE: Regex = Regex::new(r"Serviço:(.*)").unwrap();
}

fn labeled(name: &'static str, pattern: &str) -> CaptureRule {
    CaptureRule::new(name, Regex::new(pattern).unwrap(), 1)
}

/// Protocol number of a notice: labeled forms first, then any long number.
pub fn extract_protocol(text: &str) -> Option<String> {
    match PROTOCOL_RULES.first_match_named(text) {
        Some((rule, protocol)) => {
            debug!("Protocol {} found by rule {}", protocol, rule);
            Some(protocol)
        }
        None => {
            warn!("No protocol number found");
            None
        }
    }
}

/// Service name: the text after `Serviço:` on the first line carrying it.
pub fn extract_service(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| SERVICE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .filter(|service| !service.is_empty())
}
