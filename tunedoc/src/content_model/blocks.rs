//! Typed content blocks
//!
//! This module defines the structured representation of guide content.
//! A guide body is an ordered `Vec<Block>`; array position is the only
//! ordering signal, there is no explicit order field anywhere.

use serde::{Deserialize, Serialize};

/// One typed unit of guide content.
///
/// Serialized with an internal `type` tag so stored documents carry the
/// `{"type": "heading", ...}` wire shape the ingestion automation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A heading with level and plain text content
    Heading {
        /// Heading level (1 = h1, through 6 = h6)
        level: u8,
        /// Plain text of the heading
        content: String,
        /// Anchor slug for TOC links and section addressing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// A paragraph of plain text
    Paragraph { content: String },

    /// An ordered or bulleted list of plain text items
    List {
        style: ListStyle,
        /// Item text in document order; never empty for authored content
        items: Vec<String>,
    },

    /// An image reference
    ///
    /// All attributes are optional; an image block may exist before its
    /// file has been uploaded. Absent attributes are `None`, never empty
    /// strings.
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    /// A callout quote
    Quote {
        content: String,
        /// Visual emphasis; rendering defaults an absent style to `info`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<QuoteStyle>,
    },

    /// A data table
    ///
    /// Row length is not validated against header length; rendering must
    /// tolerate ragged rows.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },

    /// An embedded video
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider: Option<VideoProvider>,
    },

    /// A horizontal divider with no payload
    Divider,

    /// A sponsored content slot
    Ad {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<AdPosition>,
    },

    /// Any block type this build does not know about
    ///
    /// Stored documents may be written by a newer producer; unknown tags
    /// deserialize into this variant and render as nothing instead of
    /// failing the whole document.
    #[serde(other)]
    Unknown,
}

impl Block {
    /// Human-readable name of the block variant
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::Image { .. } => "image",
            Block::Quote { .. } => "quote",
            Block::Table { .. } => "table",
            Block::Video { .. } => "video",
            Block::Divider => "divider",
            Block::Ad { .. } => "ad",
            Block::Unknown => "unknown",
        }
    }
}

/// List marker style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Bullet,
    Ordered,
}

/// Quote callout emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Info,
    Warning,
    Error,
    Success,
}

impl QuoteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStyle::Info => "info",
            QuoteStyle::Warning => "warning",
            QuoteStyle::Error => "error",
            QuoteStyle::Success => "success",
        }
    }
}

/// Video hosting provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
    Direct,
}

/// Placement hint for a sponsored content slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPosition {
    Top,
    Middle,
    Bottom,
    Sidebar,
}

impl AdPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdPosition::Top => "top",
            AdPosition::Middle => "middle",
            AdPosition::Bottom => "bottom",
            AdPosition::Sidebar => "sidebar",
        }
    }
}
