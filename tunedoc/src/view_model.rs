//! Presentation-only enrichment of a stored guide
//!
//! Derives the table of contents, the estimated read time and resolved
//! display names. Nothing here is persisted; view models are rebuilt for
//! every render pass.

use crate::content_model::Block;
use crate::guide::Guide;
use crate::site_config::SiteConfig;

/// Reading speed the estimate is based on, in characters per minute
const READ_CHARS_PER_MINUTE: usize = 500;

/// One table-of-contents entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// A guide enriched with derived, render-only fields.
///
/// Built against an explicit block slice rather than always the whole
/// guide body, so a section page gets a TOC and read time scoped to the
/// blocks it actually shows.
#[derive(Debug)]
pub struct GuideViewModel<'a> {
    pub guide: &'a Guide,
    pub level_name: String,
    pub category_name: String,
    pub toc: Vec<TocItem>,
    pub estimated_read_time: usize,
}

/// Build the view model for a guide and the blocks being rendered.
pub fn build_view_model<'a>(
    guide: &'a Guide,
    blocks: &[Block],
    config: &SiteConfig,
) -> GuideViewModel<'a> {
    let category_name = match config.category_name(&guide.category_id) {
        Some(name) => name.to_string(),
        None => {
            // categories are an open key set; degrade to the raw id
            log::warn!(
                "no display name configured for category `{}`",
                guide.category_id
            );
            guide.category_id.clone()
        }
    };

    GuideViewModel {
        guide,
        level_name: config.level_name(guide.level_id).to_string(),
        category_name,
        toc: generate_toc(blocks),
        estimated_read_time: estimate_read_time(blocks),
    }
}

/// Derive the table of contents: every heading of level 3 or less, in
/// document order. A heading without an anchor falls back to
/// `heading-<n>` where `n` is its position among the TOC entries.
pub fn generate_toc(blocks: &[Block]) -> Vec<TocItem> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading { level, content, id } if *level <= 3 => Some((*level, content, id)),
            _ => None,
        })
        .enumerate()
        .map(|(index, (level, content, id))| TocItem {
            id: id
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("heading-{index}")),
            title: content.clone(),
            level,
        })
        .collect()
}

/// Estimate the reading time in whole minutes.
///
/// Counts the characters of heading and paragraph content and divides by
/// the reading speed, rounding up. An empty block list yields 0.
pub fn estimate_read_time(blocks: &[Block]) -> usize {
    let chars: usize = blocks
        .iter()
        .map(|block| match block {
            Block::Heading { content, .. } | Block::Paragraph { content } => content.chars().count(),
            _ => 0,
        })
        .sum();

    chars.div_ceil(READ_CHARS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuideStatus, LevelId};

    fn heading(level: u8, content: &str, id: Option<&str>) -> Block {
        Block::Heading {
            level,
            content: content.to_string(),
            id: id.map(str::to_string),
        }
    }

    fn paragraph(content: &str) -> Block {
        Block::Paragraph {
            content: content.to_string(),
        }
    }

    fn sample_guide(category_id: &str, blocks: Vec<Block>) -> Guide {
        Guide {
            id: format!("beginner_{category_id}_sample"),
            level_id: LevelId::Beginner,
            category_id: category_id.to_string(),
            title: "Sample".to_string(),
            slug: "sample".to_string(),
            summary: None,
            tags: vec![],
            status: GuideStatus::Published,
            created_at: "2024-03-01T09:00:00Z".to_string(),
            updated_at: "2024-03-01T09:00:00Z".to_string(),
            blocks,
        }
    }

    #[test]
    fn test_toc_excludes_deep_headings_and_keeps_order() {
        let blocks = vec![
            heading(1, "One", Some("one")),
            heading(4, "Too Deep", Some("too-deep")),
            heading(3, "Three", Some("three")),
            paragraph("text"),
            heading(2, "Two", Some("two")),
        ];

        let toc = generate_toc(&blocks);
        let ids: Vec<&str> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three", "two"]);
        assert_eq!(toc[1].level, 3);
    }

    #[test]
    fn test_toc_fallback_id_counts_toc_entries() {
        let blocks = vec![
            heading(1, "Named", Some("named")),
            heading(5, "Skipped", None),
            heading(2, "Anonymous", None),
        ];

        let toc = generate_toc(&blocks);
        assert_eq!(toc.len(), 2);
        // index is the position among TOC entries, not among blocks
        assert_eq!(toc[1].id, "heading-1");
    }

    #[test]
    fn test_read_time_empty_is_zero() {
        assert_eq!(estimate_read_time(&[]), 0);
    }

    #[test]
    fn test_read_time_single_full_minute() {
        let blocks = vec![paragraph(&"가".repeat(500))];
        assert_eq!(estimate_read_time(&blocks), 1);
    }

    #[test]
    fn test_read_time_rounds_up() {
        let blocks = vec![paragraph(&"a".repeat(501))];
        assert_eq!(estimate_read_time(&blocks), 2);
    }

    #[test]
    fn test_read_time_ignores_non_text_blocks() {
        let blocks = vec![
            Block::Divider,
            Block::Image {
                url: None,
                alt: Some("long alt text that should not count".to_string()),
                caption: None,
            },
        ];
        assert_eq!(estimate_read_time(&blocks), 0);
    }

    #[test]
    fn test_display_names_resolve_from_config() {
        let config = SiteConfig::default();
        let guide = sample_guide("exterior", vec![]);

        let view = build_view_model(&guide, &guide.blocks, &config);
        assert_eq!(view.level_name, "초급자");
        assert_eq!(view.category_name, "외관 튜닝");
    }

    #[test]
    fn test_unknown_category_degrades_to_raw_id() {
        let config = SiteConfig::default();
        let guide = sample_guide("suspension", vec![]);

        let view = build_view_model(&guide, &guide.blocks, &config);
        assert_eq!(view.category_name, "suspension");
    }
}
