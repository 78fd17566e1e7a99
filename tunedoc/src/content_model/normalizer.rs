//! Plain text to canonical markdown normalization
//!
//! Ingested guide drafts arrive as loosely structured text in which
//! structure is line-oriented: `1) Title` marks a top-level heading,
//! `2. Subtitle` a second-level heading and `-`/`∙`/`•` a list item.
//! This module rewrites such text into canonical markdown for the block
//! transformer. It is best effort and never fails; anything unrecognized
//! degrades to a paragraph line.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\)\s+(.*)$").expect("valid heading pattern"));

static NUMBERED_SUBHEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("valid subheading pattern"));

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-∙•]\s*(.*)$").expect("valid bullet pattern"));

/// Convert loosely structured plain text into canonical markdown.
///
/// Rules are applied per line, first match wins:
/// 1. `<digits>) text` becomes a level 1 heading
/// 2. `<digits>. text` becomes a level 2 heading
/// 3. a bullet glyph (`-`, `∙`, `•`) becomes a markdown list item
/// 4. a blank line stays a paragraph break
/// 5. any other line becomes a paragraph of its own
pub fn normalize_text(text: &str) -> String {
    let mut markdown = String::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            markdown.push('\n');
        } else if let Some(caps) = NUMBERED_HEADING.captures(trimmed) {
            markdown.push_str(&format!("# {}\n\n", &caps[1]));
        } else if let Some(caps) = NUMBERED_SUBHEADING.captures(trimmed) {
            markdown.push_str(&format!("## {}\n\n", &caps[1]));
        } else if let Some(caps) = BULLET_ITEM.captures(trimmed) {
            // no trailing blank line so consecutive items form one list
            markdown.push_str(&format!("- {}\n", &caps[1]));
        } else {
            markdown.push_str(&format!("{}\n\n", trimmed));
        }
    }

    markdown
}
