//! Ingestion pipeline
//!
//! Validates an automation-submitted request, runs the content transform
//! stages and assembles the final guide document. Validation happens
//! before any parsing: a request with a missing or malformed required
//! field is rejected with a field-level message and nothing is persisted.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::ads::inject_ads;
use crate::content_model::{blocks_from_markdown, normalize_text, Block};
use crate::guide::{Guide, GuideStatus, LevelId};
use crate::store::{GuideStore, StoreError};

/// Key fields become path components of the stored document id, so they
/// are restricted to word characters and hyphens
static KEY_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+$").expect("valid key pattern"));

/// Raw ingestion payload as submitted by the automation caller.
///
/// Every field is optional at this stage; `validate` either produces a
/// `ValidRequest` or the first field-level error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    /// Free-form text; goes through the normalizer before parsing
    #[serde(default)]
    pub text: Option<String>,

    /// Already-canonical markdown; parsed directly
    #[serde(default)]
    pub markdown: Option<String>,

    #[serde(default)]
    pub level_id: Option<String>,

    #[serde(default)]
    pub category_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Caller-side correlation id; identity always derives from
    /// level/category/slug, this is only echoed back
    #[serde(default)]
    pub document_id: Option<String>,
}

/// A request that passed field validation
#[derive(Debug, Clone)]
pub struct ValidRequest {
    pub input: GuideInput,
    pub level_id: LevelId,
    pub category_id: String,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub status: GuideStatus,
}

/// The raw content of a request
#[derive(Debug, Clone)]
pub enum GuideInput {
    Text(String),
    Markdown(String),
}

/// Errors raised by the ingestion pipeline
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("one of `text` or `markdown` is required")]
    MissingInput,

    #[error("malformed ingest request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("failed to stamp guide timestamps: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse an ingest request from its JSON payload
pub fn parse_request(json: &str) -> Result<IngestRequest, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Validate required fields, reporting the first violation.
///
/// When both `text` and `markdown` are present the free-form text wins,
/// matching the normalizing entry point the automation uses.
pub fn validate(request: IngestRequest) -> Result<ValidRequest, IngestError> {
    let input = match (non_empty(request.text), non_empty(request.markdown)) {
        (Some(text), _) => GuideInput::Text(text),
        (None, Some(markdown)) => GuideInput::Markdown(markdown),
        (None, None) => return Err(IngestError::MissingInput),
    };

    let level_str = request
        .level_id
        .ok_or(IngestError::MissingField("levelId"))?;
    let level_id = LevelId::parse(&level_str).ok_or_else(|| IngestError::InvalidField {
        field: "levelId",
        reason: format!("`{level_str}` is not one of beginner, intermediate, advanced"),
    })?;

    let category_id = key_field(request.category_id, "categoryId")?;
    let slug = key_field(request.slug, "slug")?;

    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(IngestError::MissingField("title"))?;

    let status = match request.status {
        Some(s) => GuideStatus::parse(&s).ok_or_else(|| IngestError::InvalidField {
            field: "status",
            reason: format!("`{s}` is not one of draft, published, archived"),
        })?,
        None => GuideStatus::default(),
    };

    Ok(ValidRequest {
        input,
        level_id,
        category_id,
        title,
        slug,
        summary: request.summary.filter(|s| !s.is_empty()),
        tags: request.tags,
        status,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn key_field(value: Option<String>, field: &'static str) -> Result<String, IngestError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(IngestError::MissingField(field))?;

    if !KEY_FIELD.is_match(&value) {
        return Err(IngestError::InvalidField {
            field,
            reason: format!("`{value}` may only contain word characters and hyphens"),
        });
    }

    Ok(value)
}

/// Run the content transform stages and assemble the guide.
///
/// # Parameters
/// * `request` - A validated ingestion request
///
/// # Returns
/// * `Ok(Guide)` - The assembled guide, timestamps set to now, ads injected
/// * `Err(IngestError)` - Timestamp formatting failure
pub fn build_guide(request: ValidRequest) -> Result<Guide, IngestError> {
    let ValidRequest {
        input,
        level_id,
        category_id,
        title,
        slug,
        summary,
        tags,
        status,
    } = request;

    let markdown = match input {
        GuideInput::Text(text) => normalize_text(&text),
        GuideInput::Markdown(markdown) => markdown,
    };

    let blocks = blocks_from_markdown(&markdown);
    log::info!("transformed input into {} blocks", blocks.len());
    warn_duplicate_anchors(&blocks);

    let blocks = inject_ads(blocks);

    let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let id = Guide::compose_id(level_id, &category_id, &slug);

    Ok(Guide {
        id,
        level_id,
        category_id,
        title,
        slug,
        summary,
        tags,
        status,
        created_at: now.clone(),
        updated_at: now,
        blocks,
    })
}

/// Full pipeline: validate, transform, persist by full replace.
pub fn ingest(request: IngestRequest, store: &GuideStore) -> Result<Guide, IngestError> {
    let valid = validate(request)?;
    let guide = build_guide(valid)?;
    store.save(&guide)?;
    Ok(guide)
}

/// Colliding heading anchors are tolerated (section lookup takes the
/// first match) but worth surfacing to the author
fn warn_duplicate_anchors(blocks: &[Block]) {
    let duplicates: Vec<&str> = blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading { id: Some(id), .. } => Some(id.as_str()),
            _ => None,
        })
        .duplicates()
        .collect();

    if !duplicates.is_empty() {
        log::warn!(
            "duplicate heading anchors, section lookup will use the first match: {}",
            duplicates.iter().join(", ")
        );
    }
}
