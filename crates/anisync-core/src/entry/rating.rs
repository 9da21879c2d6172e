//! String-encoded ratings and the reference-side 0-10 score

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A rating in `{"", "0.0", "0.5", ..., "5.0"}`.
///
/// Sources disagree on how "no rating" is spelled: `""` and `"0.0"` both mean
/// unrated but are deliberately not equal under `==`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(String);

impl Rating {
    /// Highest reference-side score
    pub const MAX_SCORE: u8 = 10;

    /// Build a rating from a reference-side score on a 0-10 scale
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        Self(format!("{:.1}", f64::from(score) / 2.0))
    }

    /// Convert to a reference-side score, rounding half points up
    ///
    /// An empty rating becomes score 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidRating`] if the rating is not a decimal
    /// in `0.0..=5.0`.
    pub fn to_score(&self) -> Result<u8, ConvertError> {
        if self.0.is_empty() {
            return Ok(0);
        }
        let value: f64 = self
            .0
            .trim()
            .parse()
            .map_err(|_| ConvertError::InvalidRating(self.0.clone()))?;
        if !(0.0..=f64::from(Self::MAX_SCORE) / 2.0).contains(&value) {
            return Err(ConvertError::InvalidRating(self.0.clone()));
        }
        Ok((value * 2.0).ceil() as u8)
    }

    /// Whether this spells "no rating" in either source's convention
    #[must_use]
    pub fn is_unrated(&self) -> bool {
        self.0.is_empty() || self.0 == "0.0"
    }

    /// Raw text of the rating
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Rating {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
