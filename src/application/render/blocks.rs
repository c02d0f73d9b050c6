use super::inline::{Span, parse_spans};

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Fence { language: Option<&'a str> },
    Heading { level: u8, text: &'a str },
    Checklist { checked: bool, text: &'a str },
    Bullet(&'a str),
    Ordered(&'a str),
    Lead(&'a str),
    Blank,
    Text(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Ordered,
    Checklist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub spans: Vec<Span>,
    /// Only set for checklist items.
    pub checked: Option<bool>,
}

impl ListItem {
    pub fn is_checked(&self) -> bool {
        self.checked == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub anchor: String,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub style: ListStyle,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn is_ordered(&self) -> bool {
        self.style == ListStyle::Ordered
    }

    pub fn is_checklist(&self) -> bool {
        self.style == ListStyle::Checklist
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Vec<Span>),
    /// A line that is bold from end to end, shown as an emphasised lead-in.
    Lead(String),
    List(List),
    Code(CodeBlock),
}

/// Classify one line outside a fenced code block.
pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim_end();

    if let Some(rest) = line.strip_prefix("```") {
        let language = rest.trim();
        return Line::Fence {
            language: (!language.is_empty()).then_some(language),
        };
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(text) = line.strip_prefix("### ") {
        return Line::Heading { level: 3, text };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Line::Heading { level: 2, text };
    }
    if let Some(text) = line.strip_prefix("# ") {
        return Line::Heading { level: 1, text };
    }
    if let Some(text) = line.strip_prefix("- [ ] ") {
        return Line::Checklist {
            checked: false,
            text,
        };
    }
    if let Some(text) = line
        .strip_prefix("- [x] ")
        .or_else(|| line.strip_prefix("- [X] "))
    {
        return Line::Checklist {
            checked: true,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("- ") {
        return Line::Bullet(text);
    }
    if let Some(text) = ordered_item(line) {
        return Line::Ordered(text);
    }
    if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        let inner = &line[2..line.len() - 2];
        if !inner.contains("**") {
            return Line::Lead(inner);
        }
    }

    Line::Text(line)
}

/// `"12. text"` -> `Some("text")`.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

/// Parse a markdown-like document into blocks.
///
/// The input is trimmed first. Lines inside a fence are kept verbatim; an
/// unterminated fence is closed at end of input. Consecutive list items of
/// the same style form one list, and blank lines end a list.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut parser = BlockParser::default();
    for line in source.trim().lines() {
        parser.push_line(line);
    }
    parser.finish()
}

#[derive(Default)]
struct BlockParser {
    blocks: Vec<Block>,
    list: Option<(ListStyle, Vec<ListItem>)>,
    fence: Option<(Option<String>, Vec<String>)>,
    anchors: crate::domain::slug::AnchorSlugger,
}

impl BlockParser {
    fn push_line(&mut self, raw: &str) {
        if let Some((_, code)) = self.fence.as_mut() {
            if raw.trim_end().starts_with("```") {
                self.close_fence();
            } else {
                code.push(raw.to_string());
            }
            return;
        }

        match classify_line(raw) {
            Line::Fence { language } => {
                self.close_list();
                self.fence = Some((language.map(str::to_string), Vec::new()));
            }
            Line::Blank => self.close_list(),
            Line::Heading { level, text } => {
                self.close_list();
                let spans = parse_spans(text);
                let anchor = self
                    .anchors
                    .anchor_for(&super::inline::plain_text(&spans));
                self.blocks.push(Block::Heading(Heading {
                    level,
                    anchor,
                    spans,
                }));
            }
            Line::Checklist { checked, text } => {
                self.push_item(ListStyle::Checklist, text, Some(checked))
            }
            Line::Bullet(text) => self.push_item(ListStyle::Bullet, text, None),
            Line::Ordered(text) => self.push_item(ListStyle::Ordered, text, None),
            Line::Lead(text) => {
                self.close_list();
                self.blocks.push(Block::Lead(text.to_string()));
            }
            Line::Text(text) => {
                self.close_list();
                self.blocks.push(Block::Paragraph(parse_spans(text)));
            }
        }
    }

    fn push_item(&mut self, style: ListStyle, text: &str, checked: Option<bool>) {
        if self.list.as_ref().is_some_and(|(open, _)| *open != style) {
            self.close_list();
        }
        let item = ListItem {
            spans: parse_spans(text),
            checked,
        };
        match self.list.as_mut() {
            Some((_, items)) => items.push(item),
            None => self.list = Some((style, vec![item])),
        }
    }

    fn close_list(&mut self) {
        if let Some((style, items)) = self.list.take() {
            self.blocks.push(Block::List(List { style, items }));
        }
    }

    fn close_fence(&mut self) {
        if let Some((language, lines)) = self.fence.take() {
            self.blocks.push(Block::Code(CodeBlock {
                language,
                code: lines.join("\n"),
            }));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_list();
        self.close_fence();
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Vec<Span> {
        vec![Span::Text(value.to_string())]
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(
            classify_line("```python"),
            Line::Fence {
                language: Some("python")
            }
        );
        assert_eq!(classify_line("```"), Line::Fence { language: None });
        assert_eq!(
            classify_line("## Types  "),
            Line::Heading {
                level: 2,
                text: "Types"
            }
        );
        assert_eq!(classify_line("- item"), Line::Bullet("item"));
        assert_eq!(
            classify_line("- [ ] todo"),
            Line::Checklist {
                checked: false,
                text: "todo"
            }
        );
        assert_eq!(classify_line("12. step"), Line::Ordered("step"));
        assert_eq!(classify_line("2025. was a year"), Line::Ordered("was a year"));
        assert_eq!(classify_line("**Benefits:**"), Line::Lead("Benefits:"));
        assert_eq!(classify_line("   "), Line::Blank);
        assert_eq!(classify_line("#hashtag"), Line::Text("#hashtag"));
        assert_eq!(classify_line("1.5 is a number"), Line::Text("1.5 is a number"));
    }

    #[test]
    fn bold_fragments_are_not_leads() {
        assert_eq!(
            classify_line("**Trade-off**: Freshness vs. **latency**"),
            Line::Text("**Trade-off**: Freshness vs. **latency**")
        );
    }

    #[test]
    fn parses_document_structure() {
        let source = "\n# Intro\n\nSome text.\n\n## Steps\n1. One\n2. Two\n- a\n- b\n\n```rust\nfn main() {}\n\n  let x = 1;\n```\n**Done**\n";
        let blocks = parse_blocks(source);

        assert_eq!(
            blocks,
            vec![
                Block::Heading(Heading {
                    level: 1,
                    anchor: "intro".to_string(),
                    spans: text("Intro"),
                }),
                Block::Paragraph(text("Some text.")),
                Block::Heading(Heading {
                    level: 2,
                    anchor: "steps".to_string(),
                    spans: text("Steps"),
                }),
                Block::List(List {
                    style: ListStyle::Ordered,
                    items: vec![
                        ListItem {
                            spans: text("One"),
                            checked: None
                        },
                        ListItem {
                            spans: text("Two"),
                            checked: None
                        },
                    ],
                }),
                Block::List(List {
                    style: ListStyle::Bullet,
                    items: vec![
                        ListItem {
                            spans: text("a"),
                            checked: None
                        },
                        ListItem {
                            spans: text("b"),
                            checked: None
                        },
                    ],
                }),
                Block::Code(CodeBlock {
                    language: Some("rust".to_string()),
                    code: "fn main() {}\n\n  let x = 1;".to_string(),
                }),
                Block::Lead("Done".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_fence_is_closed_at_end() {
        let blocks = parse_blocks("```\nlet a = 1;\n- not a list");
        assert_eq!(
            blocks,
            vec![Block::Code(CodeBlock {
                language: None,
                code: "let a = 1;\n- not a list".to_string(),
            })]
        );
    }

    #[test]
    fn duplicate_headings_get_unique_anchors() {
        let blocks = parse_blocks("## Setup\n## Setup");
        let anchors: Vec<&str> = blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading(Heading { anchor, .. }) => Some(anchor.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(anchors, vec!["setup", "setup-2"]);
    }

    #[test]
    fn checklist_items_keep_state() {
        let blocks = parse_blocks("- [ ] open\n- [x] done");
        assert_eq!(
            blocks,
            vec![Block::List(List {
                style: ListStyle::Checklist,
                items: vec![
                    ListItem {
                        spans: text("open"),
                        checked: Some(false)
                    },
                    ListItem {
                        spans: text("done"),
                        checked: Some(true)
                    },
                ],
            })]
        );
    }
}
