//! Reference-side records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId, Rating, Status};
use crate::error::NormalizeError;

/// One list entry as delivered by the reference source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReferenceEntry {
    /// Anime ID
    pub series_animedb_id: EntryId,
    /// Anime title
    pub series_title: String,
    /// Cover image URL
    pub series_image: String,
    /// Episodes watched
    pub my_watched_episodes: u32,
    /// Numeric status code
    pub my_status: i64,
    /// Score on a 0-10 scale
    pub my_score: u8,
    /// Unix epoch seconds as decimal text
    pub my_last_updated: String,
    /// `"1"` while rewatching
    pub my_rewatching: String,
    /// Times rewatched
    pub my_rewatching_ep: u32,
}

/// Convert a reference record into a canonical entry.
///
/// The reference source does not deliver notes, so `notes` is `None`.
///
/// # Errors
///
/// Fails with [`NormalizeError::InvalidStatus`] for a code outside the status
/// table, [`NormalizeError::InvalidRating`] for a score above 10 and
/// [`NormalizeError::InvalidTimestamp`] when `my_last_updated` is not an
/// epoch second count.
pub fn from_reference(raw: &RawReferenceEntry) -> Result<Entry, NormalizeError> {
    let status = Status::from_reference_code(raw.my_status).ok_or_else(|| {
        NormalizeError::InvalidStatus {
            id: raw.series_animedb_id,
            title: raw.series_title.clone(),
            code: raw.my_status.to_string(),
        }
    })?;

    if raw.my_score > Rating::MAX_SCORE {
        return Err(NormalizeError::InvalidRating {
            id: raw.series_animedb_id,
            title: raw.series_title.clone(),
            value: raw.my_score.to_string(),
        });
    }

    let last_updated = parse_epoch_seconds(&raw.my_last_updated).ok_or_else(|| {
        NormalizeError::InvalidTimestamp {
            id: raw.series_animedb_id,
            title: raw.series_title.clone(),
            value: raw.my_last_updated.clone(),
        }
    })?;

    Ok(Entry {
        id: raw.series_animedb_id,
        title: raw.series_title.clone(),
        status,
        episodes_watched: raw.my_watched_episodes,
        last_updated: Some(last_updated),
        rating: Rating::from_score(raw.my_score),
        notes: None,
        times_rewatched: raw.my_rewatching_ep,
        rewatching: raw.my_rewatching == "1",
        image: raw.series_image.clone(),
    })
}

fn parse_epoch_seconds(text: &str) -> Option<DateTime<Utc>> {
    let seconds: i64 = text.parse().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawReferenceEntry {
        RawReferenceEntry {
            series_animedb_id: 1,
            series_title: "Cowboy Bebop".to_string(),
            series_image: "https://img.example/1.jpg".to_string(),
            my_watched_episodes: 26,
            my_status: 2,
            my_score: 7,
            my_last_updated: "1451606400".to_string(),
            my_rewatching: "1".to_string(),
            my_rewatching_ep: 2,
        }
    }

    #[test]
    fn test_from_reference() {
        let entry = from_reference(&sample()).unwrap();

        assert_eq!(entry.id, 1);
        assert_eq!(entry.title, "Cowboy Bebop");
        assert_eq!(entry.status, Status::Completed);
        assert_eq!(entry.episodes_watched, 26);
        assert_eq!(entry.rating, Rating::from("3.5"));
        assert!(entry.rewatching);
        assert_eq!(entry.times_rewatched, 2);
        assert_eq!(entry.notes, None);
        assert_eq!(
            entry.last_updated,
            Some("2016-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn test_unrated_reference_reads_as_zero() {
        let raw = RawReferenceEntry {
            my_score: 0,
            ..sample()
        };
        assert_eq!(from_reference(&raw).unwrap().rating, Rating::from("0.0"));
    }

    #[test]
    fn test_score_above_ten_is_rejected() {
        let raw = RawReferenceEntry {
            my_score: 11,
            ..sample()
        };
        assert!(matches!(
            from_reference(&raw),
            Err(NormalizeError::InvalidRating { id: 1, .. })
        ));

        let raw = RawReferenceEntry {
            my_score: 10,
            ..sample()
        };
        assert_eq!(from_reference(&raw).unwrap().rating, Rating::from("5.0"));
    }

    #[test]
    fn test_rewatching_flag_other_values() {
        for flag in ["0", "", "yes"] {
            let raw = RawReferenceEntry {
                my_rewatching: flag.to_string(),
                ..sample()
            };
            assert!(!from_reference(&raw).unwrap().rewatching);
        }
    }

    #[test]
    fn test_invalid_status() {
        let raw = RawReferenceEntry {
            my_status: 0,
            ..sample()
        };
        let err = from_reference(&raw).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::InvalidStatus {
                id: 1,
                title: "Cowboy Bebop".to_string(),
                code: "0".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        for value in ["", "not-a-number", "12.5"] {
            let raw = RawReferenceEntry {
                my_last_updated: value.to_string(),
                ..sample()
            };
            assert!(matches!(
                from_reference(&raw),
                Err(NormalizeError::InvalidTimestamp { .. })
            ));
        }
    }
}
