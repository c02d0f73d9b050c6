//! Markdown-like body text used by posts and tutorials.
//!
//! Parsing is line oriented and never fails: every input produces a list of
//! typed blocks. Turning blocks into HTML is left to the presentation layer.

mod blocks;
mod inline;

pub use blocks::{
    Block, CodeBlock, Heading, Line, List, ListItem, ListStyle, classify_line, parse_blocks,
};
pub use inline::{Span, parse_spans, plain_text};

/// Heading reference used to build an in-page outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    pub anchor: String,
    pub title: String,
}

/// Parsed body of a post or tutorial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            blocks: parse_blocks(source),
        }
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading(heading) => Some(OutlineEntry {
                    level: heading.level,
                    anchor: heading.anchor.clone(),
                    title: plain_text(&heading.spans),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn contains_code(&self) -> bool {
        self.blocks.iter().any(|block| match block {
            Block::Code(_) => true,
            Block::Paragraph(spans) => spans.iter().any(|span| matches!(span, Span::Code(_))),
            _ => false,
        })
    }
}
