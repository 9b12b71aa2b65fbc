//! Validated quality score for chore completions.

use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize};

/// A chore quality score in the inclusive range −100..150.
///
/// 100 is a full award, values above 100 are bonuses, negative values are
/// penalties. Construction outside the range fails, so a stored score is
/// always valid.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct QualityScore(i16);

impl QualityScore {
    pub const MIN: i16 = -100;
    pub const MAX: i16 = 150;

    /// Full-credit score applied when an approval omits an explicit score.
    pub const FULL: QualityScore = QualityScore(100);
    /// Zero award, the default for denying an optional chore without a score.
    pub const ZERO: QualityScore = QualityScore(0);
    /// Full negative award, applied when a required chore is denied unscored.
    pub const FULL_PENALTY: QualityScore = QualityScore(-100);

    pub fn new(value: i16) -> Result<Self, ScoreRangeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreRangeError::OutOfRange(value))
        }
    }

    pub fn value(self) -> i16 {
        self.0
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i16> for QualityScore {
    type Error = ScoreRangeError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for QualityScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i16::deserialize(deserializer)?;
        QualityScore::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`QualityScore`] values.
pub enum ScoreRangeError {
    OutOfRange(i16),
}

impl fmt::Display for ScoreRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreRangeError::OutOfRange(value) => write!(
                f,
                "score {} outside allowed range {}..={}",
                value,
                QualityScore::MIN,
                QualityScore::MAX
            ),
        }
    }
}

impl std::error::Error for ScoreRangeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        assert!(QualityScore::new(-100).is_ok());
        assert!(QualityScore::new(0).is_ok());
        assert!(QualityScore::new(150).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            QualityScore::new(-101),
            Err(ScoreRangeError::OutOfRange(-101))
        );
        assert_eq!(QualityScore::new(151), Err(ScoreRangeError::OutOfRange(151)));
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: QualityScore = serde_json::from_str("120").unwrap();
        assert_eq!(ok.value(), 120);
        assert!(serde_json::from_str::<QualityScore>("200").is_err());
    }
}
