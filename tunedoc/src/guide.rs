//! Guide document model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content_model::Block;

/// Reader skill level a guide is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    Beginner,
    Intermediate,
    Advanced,
}

impl LevelId {
    /// Every level, for exhaustive validation of display-name tables
    pub const ALL: [LevelId; 3] = [LevelId::Beginner, LevelId::Intermediate, LevelId::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelId::Beginner => "beginner",
            LevelId::Intermediate => "intermediate",
            LevelId::Advanced => "advanced",
        }
    }

    /// Parse a level id from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(LevelId::Beginner),
            "intermediate" => Some(LevelId::Intermediate),
            "advanced" => Some(LevelId::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication status of a guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideStatus {
    Draft,
    Published,
    Archived,
}

impl GuideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuideStatus::Draft => "draft",
            GuideStatus::Published => "published",
            GuideStatus::Archived => "archived",
        }
    }

    /// Parse a status from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(GuideStatus::Draft),
            "published" => Some(GuideStatus::Published),
            "archived" => Some(GuideStatus::Archived),
            _ => None,
        }
    }
}

impl Default for GuideStatus {
    fn default() -> Self {
        GuideStatus::Published
    }
}

impl fmt::Display for GuideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted tuning guide
///
/// Identity is the composite `{level}_{category}_{slug}` key. The guide
/// exclusively owns its block sequence; re-ingestion replaces the whole
/// document, there are no partial updates. Field names serialize in
/// camelCase because the wire format is shared with the external
/// ingestion automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    /// Composite key `{level_id}_{category_id}_{slug}`
    pub id: String,

    pub level_id: LevelId,

    /// Open category key, resolved to a display name at read time
    pub category_id: String,

    pub title: String,

    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub status: GuideStatus,

    /// RFC 3339 creation timestamp
    pub created_at: String,

    /// RFC 3339 timestamp of the last full replace
    pub updated_at: String,

    /// Ordered block sequence; array position is the only ordering signal
    pub blocks: Vec<Block>,
}

impl Guide {
    /// Derive the composite document id
    pub fn compose_id(level_id: LevelId, category_id: &str, slug: &str) -> String {
        format!("{}_{}_{}", level_id, category_id, slug)
    }
}
