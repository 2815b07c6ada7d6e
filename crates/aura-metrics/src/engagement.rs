//! Weighted engagement scoring
//!
//! Combines per-modality component scores into one engagement scalar.
//! Missing components sit at the neutral 0.5, so a person is never scored
//! down just because a detector had nothing this cycle.

use aura_core::{Sentiment, SentimentScore};

/// Component weights; the defaults favor facial emotion and body language.
#[derive(Debug, Clone)]
pub struct EngagementWeights {
    pub emotion: f32,
    pub body: f32,
    pub gaze: f32,
    pub micro_expression: f32,
    pub movement: f32,
    pub speech: f32,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            emotion: 0.3,
            body: 0.25,
            gaze: 0.15,
            micro_expression: 0.1,
            movement: 0.1,
            speech: 0.1,
        }
    }
}

/// Component scores in [0,1]; `None` means the modality produced nothing
/// and counts as neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementComponents {
    pub emotion: Option<f32>,
    pub body: Option<f32>,
    pub gaze: Option<f32>,
    pub micro_expression: Option<f32>,
    pub movement: Option<f32>,
    pub speech: Option<f32>,
}

/// Engagement bands used for indicator coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementBand {
    HighlyEngaged,
    Neutral,
    Disengaged,
}

impl EngagementBand {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.7 {
            EngagementBand::HighlyEngaged
        } else if score >= 0.4 {
            EngagementBand::Neutral
        } else {
            EngagementBand::Disengaged
        }
    }
}

/// Weighted engagement score, clamped to [0,1].
pub fn engagement_score(components: &EngagementComponents, weights: &EngagementWeights) -> f32 {
    const NEUTRAL: f32 = 0.5;

    let score = components.emotion.unwrap_or(NEUTRAL) * weights.emotion
        + components.body.unwrap_or(NEUTRAL) * weights.body
        + components.gaze.unwrap_or(NEUTRAL) * weights.gaze
        + components.micro_expression.unwrap_or(NEUTRAL) * weights.micro_expression
        + components.movement.unwrap_or(NEUTRAL) * weights.movement
        + components.speech.unwrap_or(NEUTRAL) * weights.speech;

    score.clamp(0.0, 1.0)
}

/// Speech participation component: speaking with positive sentiment boosts
/// the score, silence reads as lower engagement.
pub fn speech_component(is_speaking: bool, sentiment: f32) -> f32 {
    if is_speaking {
        0.5 + sentiment.clamp(0.0, 1.0) * 0.5
    } else {
        0.3
    }
}

/// Map a categorical sentiment to a [0,1] component value.
pub fn sentiment_value(score: &SentimentScore) -> f32 {
    match score.sentiment {
        Sentiment::Positive => 1.0,
        Sentiment::Neutral => 0.5,
        Sentiment::Negative => 0.0,
    }
}
