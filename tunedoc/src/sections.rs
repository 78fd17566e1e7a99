//! Section derivation from a block sequence
//!
//! Sections are views computed on demand for the reading experience and
//! for URL addressing; they are never persisted and hold no ownership
//! over the blocks they cover.

use unicode_normalization::UnicodeNormalization;

use crate::content_model::Block;

/// Id of the implicit section collecting blocks before the first heading
pub const INTRO_SECTION_ID: &str = "intro";

/// Title prefix for sections whose heading carries no text
const UNTITLED_SECTION_PREFIX: &str = "섹션";

/// A contiguous run of blocks bounded by level 1/2 headings
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    /// Anchor id: the opening heading's slug, `intro`, or a positional
    /// fallback
    pub id: String,

    /// The opening heading's text, or a positional fallback
    pub title: String,

    /// The blocks this section covers, including its opening heading
    pub blocks: &'a [Block],
}

/// Partition a block sequence into ordered sections.
///
/// A heading of level 1 or 2 starts a new section; blocks before the
/// first such heading collect into an implicit section with id `intro`
/// and the given title. Sections are only emitted once they contain at
/// least one block, so an empty input yields an empty list, which is a
/// valid state rather than an error. Concatenating the returned slices
/// in order always reconstructs the input exactly.
pub fn split_into_sections<'a>(blocks: &'a [Block], intro_title: &str) -> Vec<Section<'a>> {
    let mut sections: Vec<Section<'a>> = Vec::new();
    let mut start = 0usize;
    let mut id = INTRO_SECTION_ID.to_string();
    let mut title = intro_title.to_string();

    for (index, block) in blocks.iter().enumerate() {
        let Block::Heading {
            level,
            content,
            id: heading_id,
        } = block
        else {
            continue;
        };
        if *level > 2 {
            continue;
        }

        if index > start {
            push_section(&mut sections, id.clone(), title.clone(), &blocks[start..index]);
        }

        // duplicate heading slugs are not deduplicated here; lookup is
        // first match wins
        id = heading_id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("section-{}", sections.len()));
        title = content.clone();
        start = index;
    }

    if start < blocks.len() {
        push_section(&mut sections, id, title, &blocks[start..]);
    }

    sections
}

fn push_section<'a>(sections: &mut Vec<Section<'a>>, id: String, title: String, blocks: &'a [Block]) {
    let title = if title.is_empty() {
        format!("{} {}", UNTITLED_SECTION_PREFIX, sections.len() + 1)
    } else {
        title
    };
    sections.push(Section { id, title, blocks });
}

/// Look up a section by id.
///
/// Both the stored id and the requested path segment are NFC-normalized
/// before comparison so equivalent but differently encoded forms of the
/// same heading text match. Returns the section's index alongside it for
/// prev/next navigation.
pub fn find_section<'a, 's>(
    sections: &'s [Section<'a>],
    requested: &str,
) -> Option<(usize, &'s Section<'a>)> {
    let target: String = requested.nfc().collect();
    sections
        .iter()
        .enumerate()
        .find(|(_, section)| section.id.nfc().collect::<String>() == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::slugify;

    fn heading(level: u8, content: &str) -> Block {
        let slug = slugify(content);
        Block::Heading {
            level,
            content: content.to_string(),
            id: (!slug.is_empty()).then_some(slug),
        }
    }

    fn paragraph(content: &str) -> Block {
        Block::Paragraph {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_sequence_yields_no_sections() {
        assert!(split_into_sections(&[], "소개").is_empty());
    }

    #[test]
    fn test_no_headings_yields_single_intro_section() {
        let blocks = vec![paragraph("a"), paragraph("b")];
        let sections = split_into_sections(&blocks, "소개");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, INTRO_SECTION_ID);
        assert_eq!(sections[0].title, "소개");
        assert_eq!(sections[0].blocks, blocks.as_slice());
    }

    #[test]
    fn test_headings_open_sections_and_keep_their_block() {
        let blocks = vec![
            paragraph("lead-in"),
            heading(2, "Wheels"),
            paragraph("wheel text"),
            heading(1, "Brakes"),
            paragraph("brake text"),
        ];
        let sections = split_into_sections(&blocks, "소개");

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].id, "intro");
        assert_eq!(sections[0].blocks, &blocks[0..1]);
        assert_eq!(sections[1].id, "wheels");
        assert_eq!(sections[1].title, "Wheels");
        assert_eq!(sections[1].blocks, &blocks[1..3]);
        assert_eq!(sections[2].id, "brakes");
        assert_eq!(sections[2].blocks, &blocks[3..5]);
    }

    #[test]
    fn test_level_three_headings_do_not_split() {
        let blocks = vec![heading(2, "Top"), heading(3, "Detail"), paragraph("x")];
        let sections = split_into_sections(&blocks, "소개");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].blocks, blocks.as_slice());
    }

    #[test]
    fn test_concatenated_sections_reconstruct_input() {
        let blocks = vec![
            paragraph("intro text"),
            heading(1, "One"),
            paragraph("a"),
            heading(2, "Two"),
            paragraph("b"),
            paragraph("c"),
            heading(2, "Three"),
        ];
        let sections = split_into_sections(&blocks, "소개");

        let rebuilt: Vec<Block> = sections
            .iter()
            .flat_map(|s| s.blocks.iter().cloned())
            .collect();
        assert_eq!(rebuilt, blocks);
    }

    #[test]
    fn test_heading_without_slug_gets_positional_fallback() {
        let blocks = vec![
            Block::Heading {
                level: 2,
                content: "!!!".to_string(),
                id: None,
            },
            paragraph("x"),
        ];
        let sections = split_into_sections(&blocks, "소개");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "section-0");
        assert_eq!(sections[0].title, "!!!");
    }

    #[test]
    fn test_empty_heading_text_gets_positional_title() {
        let blocks = vec![
            Block::Heading {
                level: 2,
                content: String::new(),
                id: None,
            },
            paragraph("x"),
        ];
        let sections = split_into_sections(&blocks, "소개");

        assert_eq!(sections[0].title, "섹션 1");
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_match() {
        let blocks = vec![
            heading(2, "Setup"),
            paragraph("first"),
            heading(2, "Setup"),
            paragraph("second"),
        ];
        let sections = split_into_sections(&blocks, "소개");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, sections[1].id);

        let (index, found) = find_section(&sections, "setup").unwrap();
        assert_eq!(index, 0);
        assert_eq!(found.blocks, &blocks[0..2]);
    }

    #[test]
    fn test_find_section_matches_across_unicode_forms() {
        let blocks = vec![heading(2, "엔진 튜닝"), paragraph("x")];
        let sections = split_into_sections(&blocks, "소개");

        // decomposed (NFD) form of the same id
        let decomposed: String = sections[0].id.nfd().collect();
        assert_ne!(decomposed, sections[0].id);

        let found = find_section(&sections, &decomposed);
        assert!(found.is_some());
        assert_eq!(found.unwrap().0, 0);
    }

    #[test]
    fn test_find_section_absent_id() {
        let blocks = vec![heading(2, "Setup"), paragraph("x")];
        let sections = split_into_sections(&blocks, "소개");
        assert!(find_section(&sections, "missing").is_none());
    }
}
