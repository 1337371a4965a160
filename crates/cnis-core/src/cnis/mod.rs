//! CNIS statement extraction.
//!
//! Text flows through these stages:
//! - [`personal`]: holder identification and the metadata dates to exclude
//! - [`splitter`]: segmentation into blocks using [`classifier`] tags
//! - [`employment`]: employer, tax id, dates and remuneration per block
//! - [`validator`]: rejection of benefit entries and list artifacts
//!
//! [`CnisPipeline`] wires the stages together.

pub mod classifier;
pub mod employment;
pub mod personal;
pub mod pipeline;
pub mod rules;
pub mod splitter;
pub mod validator;

pub use classifier::{classify, LineTag};
pub use employment::{EmployerMatch, EmploymentExtractor};
pub use personal::{ExclusionDateSet, PersonalDataExtractor};
pub use pipeline::CnisPipeline;
pub use splitter::{split_into_blocks, Block, SplitterState};
pub use validator::RecordValidator;
