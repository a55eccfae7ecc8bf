//! Card extraction from heading-structured text.
//!
//! Grammar, one line at a time:
//! - `#`, `##`, ... followed by label text is a heading. Heading detection runs
//!   first, so a heading line never yields a card.
//! - A bullet (`-`, `*` or `+`, optionally indented) followed by `front::back` is
//!   a card. `front` ends at the first `::`; `back` is the rest of the line.
//! - Anything else is skipped and leaves the heading state untouched.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::heading::HeadingPath;
use crate::model::Card;

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)(.*)$").unwrap());

static CARD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*?)::(.*)$").unwrap());

/// How a single document line is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Heading { depth: usize, label: &'a str },
    Card { front: &'a str, back: &'a str },
    Other,
}

pub fn classify_line(line: &str) -> Line<'_> {
    if let Some(caps) = HEADING_PATTERN.captures(line) {
        let depth = caps.get(1).map_or(0, |m| m.as_str().len());
        let label = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Heading { depth, label };
    }
    if let Some(caps) = CARD_PATTERN.captures(line) {
        let front = caps.get(1).map_or("", |m| m.as_str().trim());
        let back = caps.get(2).map_or("", |m| m.as_str().trim());
        return Line::Card { front, back };
    }
    Line::Other
}

/// Scans a document top to bottom, tracking headings and collecting cards.
///
/// The heading state lives only as long as the extractor, so nothing leaks
/// between documents.
#[derive(Debug, Default)]
pub struct CardExtractor {
    headings: HeadingPath,
    cards: Vec<Card>,
}

impl CardExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line; returns the card it produced, if any.
    pub fn feed_line(&mut self, line: &str) -> Option<&Card> {
        match classify_line(line) {
            Line::Heading { depth, label } => {
                let headings = std::mem::take(&mut self.headings);
                self.headings = headings.observe(depth, label);
                None
            }
            Line::Card { front, .. } if front.is_empty() => None,
            Line::Card { front, back } => {
                let card = Card {
                    front: front.to_string(),
                    back: back.to_string(),
                    tags: self.headings.tag_path(),
                };
                debug!(front = %card.front, back = %card.back, tags = ?card.tags, "Parsed card");
                self.cards.push(card);
                self.cards.last()
            }
            Line::Other => None,
        }
    }

    pub fn headings(&self) -> &HeadingPath {
        &self.headings
    }

    pub fn finish(self) -> Vec<Card> {
        self.cards
    }
}

/// Extracts every card of `text`, in document order.
pub fn extract_cards(text: &str) -> Vec<Card> {
    let mut extractor = CardExtractor::new();
    for line in text.lines() {
        extractor.feed_line(line);
    }
    let cards = extractor.finish();
    debug!(count = cards.len(), "Total parsed cards");
    cards
}
