//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod notice;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use cnis_core::models::config::CnisConfig;
use cnis_core::pdf::{PdfExtractor, PdfProcessor, PdfType};
use cnis_core::source::{PlainTextSource, TextSource};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cnis")
        .join("config.json")
}

/// Load the configuration from an explicit path, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CnisConfig> {
    match config_path {
        Some(path) => Ok(CnisConfig::from_file(Path::new(path))?),
        None => Ok(CnisConfig::default()),
    }
}

/// Whether a path has an extension the statement commands accept.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "pdf" | "txt")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Open a statement file as a text source.
pub fn open_source(path: &Path, config: &CnisConfig) -> anyhow::Result<Box<dyn TextSource>> {
    match extension(path).as_str() {
        "pdf" => {
            let extractor = PdfExtractor::open(path, &config.pdf)?;
            debug!("PDF has {} pages", extractor.page_count());

            if extractor.analyze() == PdfType::Image {
                anyhow::bail!(
                    "{} has no text layer (scanned statement)",
                    path.display()
                );
            }
            Ok(Box::new(extractor))
        }
        "txt" => Ok(Box::new(PlainTextSource::from_file(path)?)),
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}
