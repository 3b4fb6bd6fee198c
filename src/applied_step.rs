use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::refs::{ProcessingStepRef, ScoreTypeRef};

/// A processing step that was applied to a data item, possibly with associated scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedProcessingStep {
    /// If there are only scores, the processing step may be missing.
    pub step: Option<ProcessingStepRef>,
    /// Scores produced at this step, keyed by score type.
    pub scores: BTreeMap<ScoreTypeRef, f64>,
}

impl AppliedProcessingStep {
    /// Creates a record for the given step (if any) with the given scores.
    ///
    /// # Arguments
    /// * `step` - The processing step this record belongs to, if any.
    /// * `scores` - The scores produced at that step.
    ///
    pub fn new(step: Option<ProcessingStepRef>, scores: BTreeMap<ScoreTypeRef, f64>) -> Self {
        Self { step, scores }
    }

    /// Creates a record holding a single score.
    pub fn with_score(
        step: Option<ProcessingStepRef>,
        score_type: ScoreTypeRef,
        score: f64,
    ) -> Self {
        let mut scores = BTreeMap::new();
        scores.insert(score_type, score);
        Self { step, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_score() {
        let score_type = ScoreTypeRef::new(0);
        let applied = AppliedProcessingStep::with_score(None, score_type, 0.25);
        assert_eq!(applied.step, None);
        assert_eq!(applied.scores.len(), 1);
        assert_eq!(applied.scores[&score_type], 0.25);
    }

    #[test]
    fn test_equality_covers_step_and_scores() {
        let step = Some(ProcessingStepRef::new(1));
        let score_type = ScoreTypeRef::new(0);

        let applied = AppliedProcessingStep::with_score(step, score_type, 1.0);
        assert_eq!(applied, AppliedProcessingStep::with_score(step, score_type, 1.0));
        assert_ne!(applied, AppliedProcessingStep::with_score(step, score_type, 2.0));
        assert_ne!(applied, AppliedProcessingStep::with_score(None, score_type, 1.0));
    }
}
