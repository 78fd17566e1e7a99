//! Sponsored block injection
//!
//! Inserts ad slots into a freshly transformed block sequence at
//! deterministic positions. The policy is position-only: it never
//! inspects ad inventory, frequency caps or viewer state, and it never
//! disturbs the relative order of the original blocks.

use crate::content_model::{AdPosition, Block};

/// Interleave ad blocks into a block sequence.
///
/// * one `top` ad immediately after the first level 2 heading, if any
/// * one `middle` ad after the block at index `floor(len * 0.5)`
/// * one `bottom` ad appended after everything else
///
/// An empty input still yields exactly one bottom ad.
pub fn inject_ads(blocks: Vec<Block>) -> Vec<Block> {
    let total = blocks.len();
    let mut result = Vec::with_capacity(total + 3);
    let mut top_placed = false;

    for (index, block) in blocks.into_iter().enumerate() {
        let first_h2 = !top_placed && matches!(block, Block::Heading { level: 2, .. });

        result.push(block);

        if first_h2 {
            top_placed = true;
            result.push(Block::Ad {
                position: Some(AdPosition::Top),
            });
        }

        if index == total / 2 {
            result.push(Block::Ad {
                position: Some(AdPosition::Middle),
            });
        }
    }

    result.push(Block::Ad {
        position: Some(AdPosition::Bottom),
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::ListStyle;

    fn heading(level: u8, content: &str) -> Block {
        Block::Heading {
            level,
            content: content.to_string(),
            id: None,
        }
    }

    fn paragraph(content: &str) -> Block {
        Block::Paragraph {
            content: content.to_string(),
        }
    }

    fn ad_positions(blocks: &[Block]) -> Vec<(usize, AdPosition)> {
        blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| match b {
                Block::Ad { position } => Some((i, position.unwrap())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_sequence_gets_exactly_one_bottom_ad() {
        let result = inject_ads(vec![]);
        assert_eq!(
            result,
            vec![Block::Ad {
                position: Some(AdPosition::Bottom)
            }]
        );
    }

    #[test]
    fn test_ten_block_scenario() {
        // two level 2 headings, ten blocks total
        let mut blocks = vec![heading(1, "Guide"), heading(2, "First")];
        for i in 0..7 {
            blocks.push(paragraph(&format!("p{i}")));
        }
        blocks.push(heading(2, "Second"));
        assert_eq!(blocks.len(), 10);

        let result = inject_ads(blocks);

        // top ad right after the first h2 (original index 1)
        assert_eq!(result[1], heading(2, "First"));
        assert_eq!(
            result[2],
            Block::Ad {
                position: Some(AdPosition::Top)
            }
        );
        // middle ad after the block at original index 5, shifted by the
        // top ad already inserted
        assert_eq!(result[6], paragraph("p3"));
        assert_eq!(
            result[7],
            Block::Ad {
                position: Some(AdPosition::Middle)
            }
        );
        // bottom ad is last
        assert_eq!(
            result.last(),
            Some(&Block::Ad {
                position: Some(AdPosition::Bottom)
            })
        );
        assert_eq!(result.len(), 13);
    }

    #[test]
    fn test_exactly_one_ad_per_position_regardless_of_length() {
        for n in [1usize, 2, 3, 7, 24] {
            let mut blocks = vec![heading(2, "only")];
            for i in 0..n.saturating_sub(1) {
                blocks.push(paragraph(&format!("p{i}")));
            }

            let result = inject_ads(blocks);
            let ads = ad_positions(&result);

            let tops = ads.iter().filter(|(_, p)| *p == AdPosition::Top).count();
            let middles = ads.iter().filter(|(_, p)| *p == AdPosition::Middle).count();
            let bottoms = ads.iter().filter(|(_, p)| *p == AdPosition::Bottom).count();

            assert_eq!((tops, middles, bottoms), (1, 1, 1), "n = {n}");
        }
    }

    #[test]
    fn test_no_top_ad_without_level_two_heading() {
        let result = inject_ads(vec![heading(1, "Guide"), paragraph("intro")]);
        let ads = ad_positions(&result);

        assert!(ads.iter().all(|(_, p)| *p != AdPosition::Top));
        assert_eq!(ads.len(), 2); // middle and bottom
    }

    #[test]
    fn test_only_first_level_two_heading_gets_top_ad() {
        let blocks = vec![
            heading(2, "a"),
            heading(2, "b"),
            heading(2, "c"),
            paragraph("x"),
        ];
        let result = inject_ads(blocks);
        let tops = ad_positions(&result)
            .into_iter()
            .filter(|(_, p)| *p == AdPosition::Top)
            .count();
        assert_eq!(tops, 1);
    }

    #[test]
    fn test_original_order_is_preserved() {
        let blocks = vec![
            heading(1, "t"),
            paragraph("one"),
            Block::List {
                style: ListStyle::Bullet,
                items: vec!["i".to_string()],
            },
            paragraph("two"),
        ];

        let result = inject_ads(blocks.clone());
        let originals: Vec<Block> = result
            .into_iter()
            .filter(|b| !matches!(b, Block::Ad { .. }))
            .collect();

        assert_eq!(originals, blocks);
    }
}
