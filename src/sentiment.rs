// src/sentiment.rs
//! Compound-score thresholding into a three-way label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{PolarityEngine, PolarityScores, COMPOUND};
use crate::error::EngineError;

/// `compound >= POSITIVE_THRESHOLD` is positive (inclusive).
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// `compound <= NEGATIVE_THRESHOLD` is negative (inclusive).
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Bucket a compound score. Anything strictly between the thresholds,
    /// NaN included, is neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus the engine's full, unmodified score map.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub label: SentimentLabel,
    pub scores: PolarityScores,
}

impl Scored {
    pub fn compound(&self) -> f64 {
        self.scores.get(COMPOUND).copied().unwrap_or_default()
    }
}

/// Score one text. Total for engines that always report `compound`.
pub fn score(engine: &dyn PolarityEngine, text: &str) -> Result<Scored, EngineError> {
    let scores = engine.polarity_scores(text)?;
    let compound = *scores.get(COMPOUND).ok_or(EngineError::MissingCompound)?;
    Ok(Scored {
        label: SentimentLabel::from_compound(compound),
        scores,
    })
}
