//! Line-level cleanup of INSS notice bodies.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use super::html::{looks_like_html, strip_html};
use crate::models::config::NoticeConfig;

/// Lines kept even when an identical line was already seen.
const KEY_LINES: [&str; 5] = [
    "Protocolo:",
    "Serviço:",
    "Data do Protocolo:",
    "Unidade responsável:",
    "Status atual:",
];

/// Boilerplate that never reaches the cleaned notice.
const BOILERPLATE: [&str; 4] = [
    "INSS - INSTITUTO NACIONAL DO SEGURO SOCIAL",
    "Unidade responsável:",
    "Serviço:",
    "Requerimento",
];

const METADATA_LINES: [&str; 3] = ["Protocolo:", "Data do Protocolo:", "Status atual:"];

const AUTOMATIC_MESSAGE: &str = "Esta é uma mensagem automática";

lazy_static! {
    static ref PUNCTUATION_ONLY: Regex = Regex::new(r"^[\s\W]+$").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// A notice body reduced to its metadata and dispatch text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedNotice {
    /// `Protocolo:`, `Data do Protocolo:` and `Status atual:` lines.
    pub metadata: Vec<String>,
    /// Greeting and dispatch lines, near-duplicates removed.
    pub dispatch: Vec<String>,
}

impl CleanedNotice {
    /// Metadata first, then dispatch, one line each.
    pub fn text(&self) -> String {
        self.metadata
            .iter()
            .chain(self.dispatch.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.dispatch.is_empty()
    }
}

/// Reduces a decoded notice body to the parts worth storing.
#[derive(Debug, Clone)]
pub struct NoticeCleaner {
    config: NoticeConfig,
}

impl NoticeCleaner {
    pub fn new(config: NoticeConfig) -> Self {
        Self { config }
    }

    /// Clean a plain-text or HTML body.
    pub fn clean(&self, body: &str) -> CleanedNotice {
        let lines = if looks_like_html(body) {
            strip_html(body, self.config.min_html_fragment_length)
        } else {
            body.lines().map(str::to_string).collect()
        };

        let lines = unique_lines(content_lines(&lines));
        self.organize(lines)
    }

    fn organize(&self, lines: Vec<&str>) -> CleanedNotice {
        let mut cleaned = CleanedNotice::default();
        let mut seen_dispatch: Vec<String> = Vec::new();
        let mut greeted = false;

        for line in lines {
            if BOILERPLATE.iter().any(|b| line.contains(b)) {
                continue;
            }

            if METADATA_LINES.iter().any(|m| line.contains(m)) {
                cleaned.metadata.push(line.to_string());
                continue;
            }

            if line.contains(AUTOMATIC_MESSAGE) {
                continue;
            }

            let normalized = normalize(line);
            if normalized.contains("prezado") || normalized.contains("prezada") {
                if !greeted {
                    greeted = true;
                    cleaned.dispatch.push(line.to_string());
                }
                continue;
            }

            if let Some(existing) = seen_dispatch.iter().find(|e| self.is_similar(&normalized, e)) {
                trace!("Dropping {:?}, similar to {:?}", normalized, existing);
                continue;
            }

            seen_dispatch.push(normalized);
            cleaned.dispatch.push(line.to_string());
        }

        debug!(
            "Cleaned notice: {} metadata lines, {} dispatch lines",
            cleaned.metadata.len(),
            cleaned.dispatch.len()
        );
        cleaned
    }

    fn is_similar(&self, line: &str, existing: &str) -> bool {
        line.chars().count() > self.config.min_similarity_length
            && (existing.contains(line)
                || line.contains(existing)
                || jaccard(line, existing) > self.config.similarity_threshold)
    }
}

impl Default for NoticeCleaner {
    fn default() -> Self {
        Self::new(NoticeConfig::default())
    }
}

/// Trimmed, non-empty lines that carry at least one word character.
fn content_lines(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .flat_map(|l| l.lines())
        .map(str::trim)
        .filter(|l| !l.is_empty() && !PUNCTUATION_ONLY.is_match(l))
        .collect()
}

/// Drop repeated lines by normalized form, except key metadata lines.
fn unique_lines(lines: Vec<&str>) -> Vec<&str> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| {
            let first_time = seen.insert(normalize(line));
            first_time || KEY_LINES.iter().any(|k| line.contains(k))
        })
        .collect()
}

/// Lower case, punctuation removed, whitespace collapsed.
fn normalize(line: &str) -> String {
    let lowered = line.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token-set overlap: |A ∩ B| / |A ∪ B|.
fn jaccard(a: &str, b: &str) -> f64 {
    let a: HashSet<&str> = a.split_whitespace().collect();
    let b: HashSet<&str> = b.split_whitespace().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}
