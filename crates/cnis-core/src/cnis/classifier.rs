//! Structural classification of statement lines.

use lazy_static::lazy_static;
use regex::Regex;

use super::rules::patterns::{
    END_LEGEND, END_RELATIONS, END_TOTALS, START_FULL, START_GROUPING, START_INDETERMINATE,
    START_PARTIAL, START_TRUNCATED,
};

/// Structural role of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    /// Sequence number, full CNPJ, employer name.
    BlockStartFull,
    /// Sequence number, 8-digit CNPJ root, employer name.
    BlockStartPartialTaxId,
    /// Sequence number, `Indeterminado`, employer name.
    BlockStartIndeterminate,
    /// Sequence number, full CNPJ glued to the employer name.
    BlockStartTruncated,
    /// Collective contributor arrangement (agrupamento de contratantes).
    BlockStartGrouping,
    /// "Relações Previdenciárias" header.
    BlockEndRelations,
    /// "Valores Consolidados" or "TOTAIS" header.
    BlockEndTotals,
    /// "Legenda" header.
    BlockEndLegend,
    /// Anything else.
    Plain,
}

impl LineTag {
    pub fn is_block_start(self) -> bool {
        matches!(
            self,
            Self::BlockStartFull
                | Self::BlockStartPartialTaxId
                | Self::BlockStartIndeterminate
                | Self::BlockStartTruncated
                | Self::BlockStartGrouping
        )
    }

    pub fn is_block_end(self) -> bool {
        matches!(
            self,
            Self::BlockEndRelations | Self::BlockEndTotals | Self::BlockEndLegend
        )
    }
}

lazy_static! {
    // Priority order matters for malformed lines: first hit wins.
    static ref CLASSIFICATION_TABLE: [(LineTag, &'static Regex); 8] = [
        (LineTag::BlockStartFull, &*START_FULL),
        (LineTag::BlockStartPartialTaxId, &*START_PARTIAL),
        (LineTag::BlockStartIndeterminate, &*START_INDETERMINATE),
        (LineTag::BlockStartTruncated, &*START_TRUNCATED),
        (LineTag::BlockStartGrouping, &*START_GROUPING),
        (LineTag::BlockEndRelations, &*END_RELATIONS),
        (LineTag::BlockEndTotals, &*END_TOTALS),
        (LineTag::BlockEndLegend, &*END_LEGEND),
    ];
}

/// Classify one line. Surrounding whitespace is ignored.
pub fn classify(line: &str) -> LineTag {
    let line = line.trim();

    CLASSIFICATION_TABLE
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(tag, _)| *tag)
        .unwrap_or(LineTag::Plain)
}
