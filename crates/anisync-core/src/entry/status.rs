//! Watch status and its per-source encodings
//!
//! ```text
//! canonical    reference   target
//! Current          1       current
//! Completed        2       completed
//! OnHold           3       on_hold
//! Dropped          4       dropped
//! Planned          6       planned
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Canonical watch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Currently watching
    Current,
    /// Plan to watch
    Planned,
    /// Finished
    Completed,
    /// Paused
    OnHold,
    /// Abandoned
    Dropped,
    /// Not (yet) known; never written to a source
    #[default]
    Unknown,
}

impl Status {
    /// Every status that has a source encoding
    pub const KNOWN: [Self; 5] = [
        Self::Current,
        Self::Planned,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
    ];

    /// Numeric code used by the reference source
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownStatus`] for [`Status::Unknown`].
    pub fn reference_code(self) -> Result<u8, ConvertError> {
        match self {
            Self::Current => Ok(1),
            Self::Completed => Ok(2),
            Self::OnHold => Ok(3),
            Self::Dropped => Ok(4),
            Self::Planned => Ok(6),
            Self::Unknown => Err(ConvertError::UnknownStatus),
        }
    }

    /// Decode a reference-side numeric code
    #[must_use]
    pub const fn from_reference_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Current),
            2 => Some(Self::Completed),
            3 => Some(Self::OnHold),
            4 => Some(Self::Dropped),
            6 => Some(Self::Planned),
            _ => None,
        }
    }

    /// String code used by the target source
    #[must_use]
    pub const fn target_code(self) -> Option<&'static str> {
        match self {
            Self::Current => Some("current"),
            Self::Planned => Some("planned"),
            Self::Completed => Some("completed"),
            Self::OnHold => Some("on_hold"),
            Self::Dropped => Some("dropped"),
            Self::Unknown => None,
        }
    }

    /// Decode a target-side string code
    #[must_use]
    pub fn from_target_code(code: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|status| status.target_code() == Some(code))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Current => "current",
            Self::Planned => "planned",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
            Self::Dropped => "dropped",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
