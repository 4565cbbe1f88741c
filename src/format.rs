//! Response formatter: loosely structured assistant text to block elements.
//!
//! DESIGN
//! ======
//! Inline emphasis is substituted over the whole text first, then the result
//! is walked line by line with a single open-list buffer. List kind comes
//! from the raw line's leading marker (`N.` is ordered, `-` is
//! unordered), and a change of kind closes the open list instead of merging.
//!
//! TRADE-OFFS
//! ==========
//! Output is trusted markup. Nothing here escapes or sanitizes the model's
//! text, so callers must only render it where the chatbot API is trusted.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- (.*)$").expect("valid bullet regex"));
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("valid numbered regex"));
static ORDERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid prefix regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?(strong|em)>").expect("valid tag regex"));

// =============================================================================
// TYPES
// =============================================================================

/// One rendered block of an assistant message. Strings hold inline markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockElement {
    Paragraph(String),
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    /// Vertical gap produced by a blank line.
    Spacer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

struct OpenList {
    kind: ListKind,
    items: Vec<String>,
}

impl OpenList {
    fn into_block(self) -> BlockElement {
        match self.kind {
            ListKind::Ordered => BlockElement::OrderedList(self.items),
            ListKind::Unordered => BlockElement::UnorderedList(self.items),
        }
    }
}

// =============================================================================
// FORMAT
// =============================================================================

/// Apply `**bold**` then `*italic*` substitution. Neither crosses a line break.
#[must_use]
pub fn apply_inline(text: &str) -> String {
    let bolded = BOLD.replace_all(text, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}

/// Convert raw assistant text into paragraph, list, and spacer blocks.
#[must_use]
pub fn format(text: &str) -> Vec<BlockElement> {
    let inline = apply_inline(text);
    let mut blocks = Vec::new();
    let mut open: Option<OpenList> = None;

    for (raw, line) in split_lines(text).zip(split_lines(&inline)) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut open, &mut blocks);
            blocks.push(BlockElement::Spacer);
            continue;
        }

        let Some(item) = list_item(line) else {
            flush(&mut open, &mut blocks);
            blocks.push(BlockElement::Paragraph(trimmed.to_owned()));
            continue;
        };

        let kind = if ORDERED_PREFIX.is_match(raw.trim()) { ListKind::Ordered } else { ListKind::Unordered };
        if open.as_ref().is_some_and(|list| list.kind != kind) {
            flush(&mut open, &mut blocks);
        }
        open.get_or_insert_with(|| OpenList { kind, items: Vec::new() })
            .items
            .push(item.to_owned());
    }

    flush(&mut open, &mut blocks);
    blocks
}

fn flush(open: &mut Option<OpenList>, blocks: &mut Vec<BlockElement>) {
    if let Some(list) = open.take() {
        blocks.push(list.into_block());
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn list_item(line: &str) -> Option<&str> {
    BULLET_ITEM
        .captures(line)
        .or_else(|| NUMBERED_ITEM.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render blocks as HTML. Item and paragraph markup is emitted unescaped.
#[must_use]
pub fn render_html(blocks: &[BlockElement]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            BlockElement::Paragraph(html) => {
                let _ = write!(out, "<p>{html}</p>");
            }
            BlockElement::UnorderedList(items) => render_list(&mut out, "ul", items),
            BlockElement::OrderedList(items) => render_list(&mut out, "ol", items),
            BlockElement::Spacer => out.push_str("<div class=\"spacer\"></div>"),
        }
    }
    out
}

fn render_list(out: &mut String, tag: &str, items: &[String]) {
    let _ = write!(out, "<{tag}>");
    for item in items {
        let _ = write!(out, "<li>{item}</li>");
    }
    let _ = write!(out, "</{tag}>");
}

/// Render blocks for a plain terminal: emphasis tags dropped, lists bulleted or numbered.
#[must_use]
pub fn render_text(blocks: &[BlockElement]) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            BlockElement::Paragraph(html) => lines.push(strip_tags(html)),
            BlockElement::UnorderedList(items) => {
                lines.extend(items.iter().map(|item| format!("  • {}", strip_tags(item))));
            }
            BlockElement::OrderedList(items) => {
                lines.extend(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| format!("  {}. {}", i + 1, strip_tags(item))),
                );
            }
            BlockElement::Spacer => lines.push(String::new()),
        }
    }
    lines.join("\n")
}

fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
