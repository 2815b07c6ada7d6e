//! Detection result entities
//!
//! One typed result per modality, exactly as the detector adapters deliver
//! them. Results are self-contained values, not deltas: a later completion
//! fully replaces an earlier one.

use crate::{BoundingBox, NormalizedLandmark};

/// Dense face mesh landmark count (without iris refinement).
pub const FACE_LANDMARK_COUNT: usize = 468;
/// Face mesh landmark count when iris refinement is present.
pub const FACE_WITH_IRIS_COUNT: usize = 478;
/// Body pose landmark count.
pub const POSE_LANDMARK_COUNT: usize = 33;
/// Hand landmark count.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A detected object with normalized bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDetection {
    pub label: String,
    /// Detection confidence in [0,1]
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

impl ObjectDetection {
    pub fn new(label: &str, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.to_string(),
            confidence,
            bounding_box,
        }
    }
}

/// A recognized hand gesture with its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureGuess {
    pub gesture: String,
    pub confidence: f32,
}

/// One detected hand: 21 landmarks plus an optional gesture guess.
#[derive(Debug, Clone, PartialEq)]
pub struct HandData {
    pub landmarks: Vec<NormalizedLandmark>,
    pub gesture: Option<GestureGuess>,
}

impl HandData {
    pub fn new(landmarks: Vec<NormalizedLandmark>) -> Self {
        Self {
            landmarks,
            gesture: None,
        }
    }

    pub fn with_gesture(mut self, gesture: &str, confidence: f32) -> Self {
        self.gesture = Some(GestureGuess {
            gesture: gesture.to_string(),
            confidence,
        });
        self
    }

    /// True when the landmark array has the fixed hand topology length.
    #[inline]
    pub fn has_valid_topology(&self) -> bool {
        self.landmarks.len() == HAND_LANDMARK_COUNT
    }
}

/// The seven facial expressions the attribute detector scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Expression {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
}

impl Expression {
    pub fn all() -> &'static [Expression] {
        &[
            Expression::Neutral,
            Expression::Happy,
            Expression::Sad,
            Expression::Angry,
            Expression::Fearful,
            Expression::Disgusted,
            Expression::Surprised,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Angry => "angry",
            Expression::Fearful => "fearful",
            Expression::Disgusted => "disgusted",
            Expression::Surprised => "surprised",
        }
    }
}

/// Expression probabilities, seven entries summing to roughly 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpressionScores {
    pub neutral: f32,
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub fearful: f32,
    pub disgusted: f32,
    pub surprised: f32,
}

impl ExpressionScores {
    pub fn get(&self, expression: Expression) -> f32 {
        match expression {
            Expression::Neutral => self.neutral,
            Expression::Happy => self.happy,
            Expression::Sad => self.sad,
            Expression::Angry => self.angry,
            Expression::Fearful => self.fearful,
            Expression::Disgusted => self.disgusted,
            Expression::Surprised => self.surprised,
        }
    }

    /// The highest-probability expression.
    pub fn dominant(&self) -> (Expression, f32) {
        let mut best = (Expression::Neutral, self.neutral);
        for &e in Expression::all() {
            let v = self.get(e);
            if v > best.1 {
                best = (e, v);
            }
        }
        best
    }

    /// Rescale so the entries sum to 1.0 (neutral-only when all near zero).
    pub fn normalize(&self) -> ExpressionScores {
        let sum = Expression::all().iter().map(|&e| self.get(e)).sum::<f32>();
        if sum < 0.001 {
            return ExpressionScores {
                neutral: 1.0,
                ..Default::default()
            };
        }

        ExpressionScores {
            neutral: self.neutral / sum,
            happy: self.happy / sum,
            sad: self.sad / sum,
            angry: self.angry / sum,
            fearful: self.fearful / sum,
            disgusted: self.disgusted / sum,
            surprised: self.surprised / sum,
        }
    }
}

/// Apparent gender as reported by the attribute detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// Inclusive age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

/// Facial attribute inference result for one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAttributes {
    pub age: u32,
    pub age_range: AgeRange,
    pub gender: Gender,
    pub gender_confidence: f32,
    pub expressions: ExpressionScores,
    pub dominant_expression: Expression,
    pub bounding_box: BoundingBox,
}

impl FaceAttributes {
    /// Build from raw scores, deriving the age bracket and dominant
    /// expression the way the attribute detector reports them.
    pub fn from_scores(
        age: u32,
        gender: Gender,
        gender_confidence: f32,
        expressions: ExpressionScores,
        bounding_box: BoundingBox,
    ) -> Self {
        let (dominant_expression, _) = expressions.dominant();
        Self {
            age,
            age_range: AgeRange {
                min: age.saturating_sub(5),
                max: age + 5,
            },
            gender,
            gender_confidence,
            expressions,
            dominant_expression,
            bounding_box,
        }
    }
}

/// Coarse sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Sentiment category plus its confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub confidence: f32,
}

/// Live speech state.
///
/// `transcript` only ever grows; `interim_transcript` is ephemeral and
/// replaced wholesale on every interim update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeechState {
    pub transcript: String,
    pub interim_transcript: String,
    pub sentiment: Option<SentimentScore>,
}

impl SpeechState {
    /// Replace the interim transcript with the latest hypothesis.
    pub fn set_interim(&mut self, text: &str) {
        self.interim_transcript.clear();
        self.interim_transcript.push_str(text);
    }

    /// Commit a finalized segment: append to the transcript and clear the
    /// interim text it supersedes.
    pub fn commit_final(&mut self, segment: &str) {
        if !self.transcript.is_empty() && !segment.is_empty() {
            self.transcript.push(' ');
        }
        self.transcript.push_str(segment);
        self.interim_transcript.clear();
    }

    pub fn set_sentiment(&mut self, sentiment: Sentiment, confidence: f32) {
        self.sentiment = Some(SentimentScore {
            sentiment,
            confidence,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty() && self.interim_transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_topology_check() {
        let hand = HandData::new(vec![NormalizedLandmark::new(0.5, 0.5); HAND_LANDMARK_COUNT]);
        assert!(hand.has_valid_topology());

        let short = HandData::new(vec![NormalizedLandmark::new(0.5, 0.5); 7]);
        assert!(!short.has_valid_topology());
    }

    #[test]
    fn test_dominant_expression() {
        let scores = ExpressionScores {
            happy: 0.7,
            surprised: 0.2,
            neutral: 0.1,
            ..Default::default()
        };

        let (dominant, value) = scores.dominant();
        assert_eq!(dominant, Expression::Happy);
        assert_eq!(value, 0.7);
    }

    #[test]
    fn test_expression_normalize() {
        let scores = ExpressionScores {
            happy: 2.0,
            sad: 2.0,
            ..Default::default()
        };

        let normalized = scores.normalize();
        assert!((normalized.happy - 0.5).abs() < 0.01);
        assert!((normalized.sad - 0.5).abs() < 0.01);

        let empty = ExpressionScores::default().normalize();
        assert_eq!(empty.neutral, 1.0);
    }

    #[test]
    fn test_face_attributes_derivation() {
        let attrs = FaceAttributes::from_scores(
            30,
            Gender::Female,
            0.92,
            ExpressionScores {
                surprised: 0.8,
                ..Default::default()
            },
            BoundingBox::new(0.3, 0.2, 0.2, 0.25),
        );

        assert_eq!(attrs.age_range.min, 25);
        assert_eq!(attrs.age_range.max, 35);
        assert_eq!(attrs.dominant_expression, Expression::Surprised);
    }

    #[test]
    fn test_speech_interim_replaced_wholesale() {
        let mut speech = SpeechState::default();
        speech.set_interim("hello wo");
        speech.set_interim("hello wor");

        assert_eq!(speech.interim_transcript, "hello wor");
        assert!(speech.transcript.is_empty());
    }

    #[test]
    fn test_speech_commit_appends_and_clears_interim() {
        let mut speech = SpeechState::default();
        speech.set_interim("hello worl");
        speech.commit_final("hello world");

        assert_eq!(speech.transcript, "hello world");
        assert!(speech.interim_transcript.is_empty());

        speech.set_interim("how are");
        speech.commit_final("how are you");
        assert_eq!(speech.transcript, "hello world how are you");
    }
}
