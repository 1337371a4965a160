//! Segmentation of a statement into candidate employment-record blocks.
//!
//! A two-state machine driven by [`classify`]:
//!
//! | state     | line          | effect                                    | next      |
//! |-----------|---------------|-------------------------------------------|-----------|
//! | `Outside` | block start   | open a block with the line                | `InBlock` |
//! | `Outside` | end / plain   | ignored                                   | `Outside` |
//! | `InBlock` | block start   | emit the open block *without* the line,   | `InBlock` |
//! |           |               | open a new block with it                  |           |
//! | `InBlock` | block end     | append the line, emit the block           | `Outside` |
//! | `InBlock` | plain         | append the line                           | `InBlock` |
//!
//! A block still open when the stream ends is emitted as-is.

use tracing::trace;

use super::classifier::{classify, LineTag};

/// Contiguous lines believed to describe one employment relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Tag of the start line.
    pub start_tag: LineTag,
    /// 1-based line number of the start line in the document.
    pub start_line: usize,
    /// Trimmed lines, start line first.
    pub lines: Vec<&'a str>,
}

impl<'a> Block<'a> {
    fn open(start_tag: LineTag, start_line: usize, line: &'a str) -> Self {
        Self {
            start_tag,
            start_line,
            lines: vec![line],
        }
    }

    /// The block's start line.
    pub fn first_line(&self) -> &'a str {
        self.lines.first().copied().unwrap_or("")
    }

    /// Lines after the start line.
    pub fn rest(&self) -> &[&'a str] {
        self.lines.get(1..).unwrap_or(&[])
    }
}

/// Splitter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitterState<'a> {
    /// No open block.
    Outside,
    /// A block is accumulating lines.
    InBlock(Block<'a>),
}

/// Apply one transition. Returns the next state and the block closed by
/// this line, if any.
pub fn step<'a>(
    state: SplitterState<'a>,
    tag: LineTag,
    line_no: usize,
    line: &'a str,
) -> (SplitterState<'a>, Option<Block<'a>>) {
    match state {
        SplitterState::Outside if tag.is_block_start() => {
            (SplitterState::InBlock(Block::open(tag, line_no, line)), None)
        }
        SplitterState::Outside => (SplitterState::Outside, None),
        SplitterState::InBlock(current) if tag.is_block_start() => (
            SplitterState::InBlock(Block::open(tag, line_no, line)),
            Some(current),
        ),
        SplitterState::InBlock(mut current) if tag.is_block_end() => {
            current.lines.push(line);
            (SplitterState::Outside, Some(current))
        }
        SplitterState::InBlock(mut current) => {
            current.lines.push(line);
            (SplitterState::InBlock(current), None)
        }
    }
}

/// Flush the machine at end of stream.
pub fn finish(state: SplitterState<'_>) -> Option<Block<'_>> {
    match state {
        SplitterState::Outside => None,
        SplitterState::InBlock(block) => Some(block),
    }
}

/// Split document text into blocks, in document order.
pub fn split_into_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut state = SplitterState::Outside;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let tag = classify(line);

        let (next, closed) = step(state, tag, idx + 1, line);
        if let Some(block) = closed {
            trace!("Closed block at line {} ({} lines)", block.start_line, block.lines.len());
            blocks.push(block);
        }
        state = next;
    }

    blocks.extend(finish(state));
    blocks
}
