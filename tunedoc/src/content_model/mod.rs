//! Structured content model
//!
//! Everything between raw ingested text and a stored guide body lives
//! here: the typed block definitions, the plain-text normalizer, anchor
//! slug derivation and the markdown-to-blocks transformer.

mod blocks;
mod normalizer;
mod slug;
mod transformer;

pub use blocks::{AdPosition, Block, ListStyle, QuoteStyle, VideoProvider};
pub use normalizer::normalize_text;
pub use slug::slugify;
pub use transformer::blocks_from_markdown;
