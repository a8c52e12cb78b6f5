//! Classification results and score interpretation.

use crate::core::ClassifierError;
use crate::domain::DiseaseClass;
use crate::processors::argmax;
use serde::Serialize;

/// Sentinel label for a successful inference whose best score fell below
/// the confidence threshold.
pub const NOT_A_PLANT: &str = "Not a tomato plant";

/// Sentinel label for a request the pipeline could not analyze at all.
pub const ANALYSIS_FAILED: &str = "Unable to analyze image";

/// The outcome of one classification request.
///
/// Sentinel outcomes are distinct variants, so callers distinguish them by
/// identity rather than by confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Diagnosis {
    /// A trusted prediction: the best score met the confidence threshold.
    Disease {
        /// The predicted category (may be the healthy category).
        class: DiseaseClass,
        /// The winning score.
        confidence: f32,
    },
    /// The model produced a prediction but it is not trusted enough to act on.
    Unrecognized {
        /// The below-threshold winning score.
        confidence: f32,
    },
    /// The image could not be decoded or inference failed.
    AnalysisFailed,
}

impl Diagnosis {
    /// The label string surfaced to callers: either a training label or one
    /// of the two sentinel values.
    pub fn label(&self) -> &'static str {
        match self {
            Diagnosis::Disease { class, .. } => class.as_str(),
            Diagnosis::Unrecognized { .. } => NOT_A_PLANT,
            Diagnosis::AnalysisFailed => ANALYSIS_FAILED,
        }
    }

    /// The confidence associated with this outcome, `0.0` for failures.
    pub fn confidence(&self) -> f32 {
        match self {
            Diagnosis::Disease { confidence, .. } | Diagnosis::Unrecognized { confidence } => {
                *confidence
            }
            Diagnosis::AnalysisFailed => 0.0,
        }
    }

    /// Whether this outcome is a trusted category prediction.
    pub fn is_recognized(&self) -> bool {
        matches!(self, Diagnosis::Disease { .. })
    }

    /// Whether the pipeline failed to analyze the request.
    pub fn is_failure(&self) -> bool {
        matches!(self, Diagnosis::AnalysisFailed)
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.4})", self.label(), self.confidence())
    }
}

/// Interprets a raw score vector into a [`Diagnosis`].
///
/// The highest-scoring category wins, with ties broken by the lowest index.
/// The gate is a hard cutoff: a best score at or above `confidence_threshold`
/// yields that category, anything below yields [`Diagnosis::Unrecognized`]
/// carrying the observed score.
///
/// # Errors
///
/// Returns `ClassifierError::InvalidInput` if the score vector length does
/// not match the label set. That is a construction-time bug (model and
/// label set disagree), not a runtime data condition.
pub fn interpret(scores: &[f32], confidence_threshold: f32) -> Result<Diagnosis, ClassifierError> {
    if scores.len() != DiseaseClass::COUNT {
        return Err(ClassifierError::invalid_input(format!(
            "expected {} class scores, got {}",
            DiseaseClass::COUNT,
            scores.len()
        )));
    }

    let (class_id, confidence) = argmax(scores)
        .ok_or_else(|| ClassifierError::invalid_input("empty score vector"))?;
    let class = DiseaseClass::from_class_id(class_id).ok_or_else(|| {
        ClassifierError::invalid_input(format!("class id {class_id} outside the label set"))
    })?;

    if confidence >= confidence_threshold {
        Ok(Diagnosis::Disease { class, confidence })
    } else {
        Ok(Diagnosis::Unrecognized { confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores_with(index: usize, value: f32, rest: f32) -> Vec<f32> {
        let mut scores = vec![rest; DiseaseClass::COUNT];
        scores[index] = value;
        scores
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scores = scores_with(3, 0.7, 0.03);
        let diagnosis = interpret(&scores, 0.7).unwrap();
        assert_eq!(
            diagnosis,
            Diagnosis::Disease {
                class: DiseaseClass::LeafMold,
                confidence: 0.7
            }
        );
    }

    #[test]
    fn test_just_below_threshold_is_unrecognized() {
        let scores = scores_with(3, 0.6999, 0.03);
        let diagnosis = interpret(&scores, 0.7).unwrap();
        assert_eq!(diagnosis, Diagnosis::Unrecognized { confidence: 0.6999 });
        assert_eq!(diagnosis.label(), NOT_A_PLANT);
    }

    #[test]
    fn test_tie_selects_lowest_index() {
        let mut scores = vec![0.01; DiseaseClass::COUNT];
        scores[2] = 0.9;
        scores[5] = 0.9;
        let diagnosis = interpret(&scores, 0.7).unwrap();
        assert_eq!(
            diagnosis,
            Diagnosis::Disease {
                class: DiseaseClass::LateBlight,
                confidence: 0.9
            }
        );
    }

    #[test]
    fn test_dominant_category() {
        // Index 8 dominant at 0.95, everything else at 0.05.
        let scores = scores_with(8, 0.95, 0.05);
        let diagnosis = interpret(&scores, 0.7).unwrap();
        assert_eq!(
            diagnosis,
            Diagnosis::Disease {
                class: DiseaseClass::MosaicVirus,
                confidence: 0.95
            }
        );
        assert_eq!(diagnosis.label(), "Tomato___Tomato_mosaic_virus");
    }

    #[test]
    fn test_uniform_scores_are_unrecognized() {
        let scores = vec![0.12; DiseaseClass::COUNT];
        let diagnosis = interpret(&scores, 0.7).unwrap();
        assert_eq!(diagnosis, Diagnosis::Unrecognized { confidence: 0.12 });
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(interpret(&[0.5; 9], 0.7).is_err());
        assert!(interpret(&[0.5; 11], 0.7).is_err());
        assert!(interpret(&[], 0.7).is_err());
    }

    #[test]
    fn test_failure_sentinel_has_zero_confidence() {
        let diagnosis = Diagnosis::AnalysisFailed;
        assert_eq!(diagnosis.label(), ANALYSIS_FAILED);
        assert_eq!(diagnosis.confidence(), 0.0);
        assert!(diagnosis.is_failure());
        assert!(!diagnosis.is_recognized());
    }

    #[test]
    fn test_sentinels_are_distinct_from_labels() {
        for class in DiseaseClass::ALL {
            assert_ne!(class.as_str(), NOT_A_PLANT);
            assert_ne!(class.as_str(), ANALYSIS_FAILED);
        }
        assert_ne!(NOT_A_PLANT, ANALYSIS_FAILED);
    }
}
