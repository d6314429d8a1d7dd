// src/engine.rs
//! Polarity engines: the external scorer behind `sentiment::score`.
//!
//! An engine maps raw text to a map of named polarity components
//! (`neg`, `neu`, `pos`, `compound`). It is built once at startup and shared
//! read-only across all requests as [`SharedEngine`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::EngineError;

/// Named polarity components. Sorted keys keep the JSON output stable.
pub type PolarityScores = BTreeMap<String, f64>;

/// Process-wide engine handle.
pub type SharedEngine = Arc<dyn PolarityEngine>;

pub const COMPOUND: &str = "compound";
pub const DEFAULT_ENGINE: &str = "vader";

/// Sentence scored once at startup to prove the engine is usable.
const WARM_UP_PROBE: &str = "Shares rallied after strong earnings, but guidance remains uncertain.";

pub trait PolarityEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score `text`. Implementations must include a `compound` component.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, EngineError>;
}

/// VADER lexicon/rule-based scorer.
pub struct VaderEngine {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderEngine {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityEngine for VaderEngine {
    fn name(&self) -> &'static str {
        "vader"
    }

    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, EngineError> {
        // Same all-zero map VADER yields for text without tokens.
        if text.trim().is_empty() {
            return Ok(["neg", "neu", "pos", COMPOUND]
                .into_iter()
                .map(|k| (k.to_string(), 0.0))
                .collect());
        }

        let mut scores: PolarityScores = self
            .analyzer
            .polarity_scores(text)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let fractions = scores_fraction(&scores);
        if let Some(compound) = scores.get_mut(COMPOUND) {
            *compound = punctuation_corrected(*compound, &fractions, text);
        }
        Ok(scores)
    }
}

/// Standard VADER normalization constant: `x / sqrt(x^2 + ALPHA)`.
const ALPHA: f64 = 15.0;
const EXCLAIM_STEP: f64 = 0.292;
const QUESTION_STEP: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;
/// Slack for recovering the raw valence sum from a rounded compound.
const SUM_EPSILON: f64 = 1e-3;

/// `(pos, neg)` fractions from a score map.
fn scores_fraction(scores: &PolarityScores) -> (f64, f64) {
    (
        scores.get("pos").copied().unwrap_or_default(),
        scores.get("neg").copied().unwrap_or_default(),
    )
}

/// Punctuation emphasis the way VADER computes it: up to four `!`, and `?`
/// only when there is more than one.
fn punctuation_amplifier(text: &str) -> f64 {
    let ep = text.matches('!').count().min(4) as f64 * EXCLAIM_STEP;
    let qm = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * QUESTION_STEP,
        _ => QUESTION_MAX,
    };
    ep + qm
}

/// `vader_sentiment` subtracts the punctuation amplifier when the valence sum
/// is exactly zero; reference VADER leaves a zero sum untouched. Undo that so
/// neutral text ending in `!` or `??` keeps a zero compound.
fn punctuation_corrected(compound: f64, (pos, neg): &(f64, f64), text: &str) -> f64 {
    if compound >= 0.0 {
        return compound;
    }
    if *pos == 0.0 && *neg == 0.0 {
        return 0.0;
    }
    let amp = punctuation_amplifier(text);
    if amp == 0.0 || compound <= -1.0 {
        return compound;
    }
    // Invert the normalization to get the amplified sum back.
    let total = compound * (ALPHA / (1.0 - compound * compound)).sqrt();
    if (total + amp).abs() < SUM_EPSILON {
        0.0
    } else {
        compound
    }
}

/// Build the engine named in configuration (case-insensitive).
pub fn build_engine(name: &str) -> Result<SharedEngine, EngineError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "vader" => Ok(Arc::new(VaderEngine::new())),
        other => Err(EngineError::Unknown(other.to_string())),
    }
}

/// Score a fixed probe once and check the result is a usable compound value.
pub fn warm_up(engine: &dyn PolarityEngine) -> Result<(), EngineError> {
    let scores = engine.polarity_scores(WARM_UP_PROBE)?;
    let compound = *scores.get(COMPOUND).ok_or(EngineError::MissingCompound)?;
    if !compound.is_finite() || !(-1.0..=1.0).contains(&compound) {
        return Err(EngineError::OutOfRange(compound));
    }
    info!(engine = engine.name(), compound, "polarity engine ready");
    Ok(())
}
