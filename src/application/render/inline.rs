/// A run of inline content inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Code(String),
    Strong(String),
}

/// Split a line into text, `` `code` `` and `**strong**` spans.
///
/// A delimiter without a closing partner is kept as literal text.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some((inner, after)) = delimited(rest, "**") {
            flush_text(&mut text, &mut spans);
            spans.push(Span::Strong(inner.to_string()));
            rest = after;
            continue;
        }

        if let Some((inner, after)) = delimited(rest, "`") {
            flush_text(&mut text, &mut spans);
            spans.push(Span::Code(inner.to_string()));
            rest = after;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            text.push(ch);
        }
        rest = chars.as_str();
    }

    flush_text(&mut text, &mut spans);
    spans
}

/// `(inner, remainder)` when `input` starts with a non-empty `marker`-delimited run.
fn delimited<'a>(input: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let after = input.strip_prefix(marker)?;
    let end = after.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((&after[..end], &after[end + marker.len()..]))
}

fn flush_text(text: &mut String, spans: &mut Vec<Span>) {
    if !text.is_empty() {
        spans.push(Span::Text(std::mem::take(text)));
    }
}

/// Concatenated text of `spans` without markup, used for anchors and the outline.
pub fn plain_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(value) | Span::Code(value) | Span::Strong(value) => value.as_str(),
        })
        .collect()
}
