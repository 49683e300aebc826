//! Scoring engine
//!
//! Pure function of (predicted category, declared category, confidence) to a
//! signed point delta. No side effects; results depend only on the inputs and
//! the configured reward parameters.

use serde::Deserialize;

use super::waste::{Category, Classification, ClassificationSource};
use crate::shared::{DomainError, DomainResult};

/// Reward parameters, loadable from the `[scoring]` config section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points for a correct declaration
    pub correct_points: i32,
    /// Penalty (positive number) deducted for an incorrect declaration
    pub incorrect_penalty: i32,
    /// Confidence bonus scale: bonus = floor(confidence * scale)
    pub confidence_bonus_scale: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            correct_points: 10,
            incorrect_penalty: 5,
            confidence_bonus_scale: 5,
        }
    }
}

pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a remote classification against the user's declared category.
    ///
    /// Correct declaration earns `correct_points` plus
    /// `floor(confidence * confidence_bonus_scale)`; an incorrect one costs
    /// `incorrect_penalty` regardless of confidence. Confidence outside
    /// [0, 1] (including NaN) is rejected rather than clamped, so upstream
    /// adapter bugs surface instead of being masked.
    pub fn score(&self, predicted: Category, declared: Category, confidence: f64) -> DomainResult<i32> {
        self.score_tagged(predicted, declared, confidence, ClassificationSource::Remote)
    }

    /// Source-aware scoring for a full classification result.
    ///
    /// Synthetic classifications never earn the confidence bonus: their
    /// confidence is a random stand-in, not evidence.
    pub fn score_classification(
        &self,
        classification: &Classification,
        declared: Category,
    ) -> DomainResult<i32> {
        self.score_tagged(
            classification.category,
            declared,
            classification.confidence,
            classification.source,
        )
    }

    fn score_tagged(
        &self,
        predicted: Category,
        declared: Category,
        confidence: f64,
        source: ClassificationSource,
    ) -> DomainResult<i32> {
        // NaN fails both bounds checks, so it is rejected here too.
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::Validation(format!(
                "confidence must be within [0, 1], got {confidence}"
            )));
        }

        if predicted != declared {
            return Ok(-self.config.incorrect_penalty);
        }

        let bonus = match source {
            ClassificationSource::Remote => {
                (confidence * self.config.confidence_bonus_scale as f64).floor() as i32
            }
            ClassificationSource::Synthetic => 0,
        };

        Ok(self.config.correct_points + bonus)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::default()
    }

    #[test]
    fn correct_declaration_earns_base_plus_confidence_bonus() {
        // 10 + floor(0.9 * 5) = 14
        assert_eq!(engine().score(Category::Dry, Category::Dry, 0.9).unwrap(), 14);
    }

    #[test]
    fn incorrect_declaration_costs_flat_penalty() {
        // Confidence bonus must not soften the penalty.
        assert_eq!(engine().score(Category::Dry, Category::Wet, 0.9).unwrap(), -5);
        assert_eq!(engine().score(Category::Dry, Category::Wet, 0.0).unwrap(), -5);
    }

    #[test]
    fn all_category_pairs_respect_bounds() {
        let engine = engine();
        for predicted in Category::ALL {
            for declared in Category::ALL {
                for confidence in [0.0, 0.2, 0.5, 0.8, 1.0] {
                    let points = engine.score(predicted, declared, confidence).unwrap();
                    if predicted == declared {
                        assert!(points >= 10, "{predicted}/{declared}: {points}");
                    } else {
                        assert_eq!(points, -5, "{predicted}/{declared}");
                    }
                }
            }
        }
    }

    #[test]
    fn score_is_monotone_in_confidence_when_correct() {
        let engine = engine();
        let mut last = i32::MIN;
        for step in 0..=10 {
            let confidence = step as f64 / 10.0;
            let points = engine
                .score(Category::Hazardous, Category::Hazardous, confidence)
                .unwrap();
            assert!(points >= last);
            last = points;
        }
    }

    #[test]
    fn out_of_range_confidence_is_rejected_not_clamped() {
        let engine = engine();
        assert!(engine.score(Category::Dry, Category::Dry, -0.1).is_err());
        assert!(engine.score(Category::Dry, Category::Dry, 1.01).is_err());
        assert!(engine.score(Category::Dry, Category::Dry, f64::NAN).is_err());
        assert!(engine.score(Category::Dry, Category::Dry, f64::INFINITY).is_err());
    }

    #[test]
    fn synthetic_classification_gets_no_confidence_bonus() {
        let engine = engine();
        let classification = Classification {
            label: "plastic_bottle".into(),
            detected_object: "plastic_bottle".into(),
            category: Category::Dry,
            confidence: 0.95,
            source: ClassificationSource::Synthetic,
        };
        assert_eq!(
            engine.score_classification(&classification, Category::Dry).unwrap(),
            10
        );
        // Incorrect synthetic still costs the penalty.
        assert_eq!(
            engine.score_classification(&classification, Category::Wet).unwrap(),
            -5
        );
    }

    #[test]
    fn custom_parameters_are_honored() {
        let engine = ScoringEngine::new(ScoringConfig {
            correct_points: 20,
            incorrect_penalty: 8,
            confidence_bonus_scale: 10,
        });
        assert_eq!(engine.score(Category::Wet, Category::Wet, 0.55).unwrap(), 25);
        assert_eq!(engine.score(Category::Wet, Category::Dry, 0.55).unwrap(), -8);
    }
}
