//! Target-side records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, Rating, Status};
use crate::error::NormalizeError;

/// `external_site` value of the mapping that carries the cross-source ID
pub const MAPPING_SITE: &str = "myanimelist/anime";

/// Link from a target media record to another site's ID
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMapping {
    /// Site the ID belongs to
    pub external_site: String,
    /// ID on that site, as text
    pub external_id: String,
}

/// Media record a target entry points at
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMedia {
    /// Canonical title
    pub canonical_title: String,
    /// Small poster image URL
    pub poster_image: Option<String>,
    /// IDs of the same media on other sites
    pub mappings: Vec<RawMapping>,
}

/// One library entry as delivered by the target source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTargetEntry {
    /// Status code such as `current` or `on_hold`
    pub status: String,
    /// Episodes watched
    pub progress: u32,
    /// Currently rewatching
    pub reconsuming: bool,
    /// Times rewatched
    pub reconsume_count: u32,
    /// Free text notes
    pub notes: String,
    /// Rating out of 5.0
    pub rating: Option<String>,
    /// RFC 3339 modification time
    pub updated_at: Option<String>,
    /// Parent media; may be missing entirely
    pub media: Option<RawMedia>,
}

/// Convert a target record into a canonical entry.
///
/// A record without a media reference yields an entry with zero-valued
/// `id`, `title` and `image`; that is not an error.
///
/// # Errors
///
/// Fails with [`NormalizeError::InvalidStatus`],
/// [`NormalizeError::InvalidTimestamp`], [`NormalizeError::InvalidId`] or
/// [`NormalizeError::InvalidRating`] when the respective field is malformed.
pub fn from_target(raw: &RawTargetEntry) -> Result<Entry, NormalizeError> {
    let mut entry = Entry {
        episodes_watched: raw.progress,
        notes: Some(raw.notes.clone()),
        times_rewatched: raw.reconsume_count,
        rewatching: raw.reconsuming,
        rating: raw.rating.clone().map(Rating::from).unwrap_or_default(),
        ..Entry::default()
    };

    if let Some(media) = &raw.media {
        entry.title = media.canonical_title.clone();
        entry.image = media.poster_image.clone().unwrap_or_default();
        if let Some(mapping) = media
            .mappings
            .iter()
            .find(|m| m.external_site == MAPPING_SITE)
        {
            entry.id = mapping
                .external_id
                .trim()
                .parse()
                .map_err(|_| NormalizeError::InvalidId {
                    title: entry.title.clone(),
                    value: mapping.external_id.clone(),
                })?;
        }
    }

    entry.status =
        Status::from_target_code(&raw.status).ok_or_else(|| NormalizeError::InvalidStatus {
            id: entry.id,
            title: entry.title.clone(),
            code: raw.status.clone(),
        })?;

    entry.last_updated = match raw.updated_at.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(
            DateTime::parse_from_rfc3339(text)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| NormalizeError::InvalidTimestamp {
                    id: entry.id,
                    title: entry.title.clone(),
                    value: text.to_string(),
                })?,
        ),
    };

    if !entry.rating.as_str().is_empty() {
        let score = entry
            .rating
            .to_score()
            .map_err(|_| NormalizeError::InvalidRating {
                id: entry.id,
                title: entry.title.clone(),
                value: entry.rating.to_string(),
            })?;
        entry.rating = Rating::from_score(score);
    }

    Ok(entry)
}
