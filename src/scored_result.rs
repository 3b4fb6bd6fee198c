use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::applied_step::AppliedProcessingStep;
use crate::ledger::StepLedger;
use crate::meta::{MetaInfo, MetaValue};
use crate::refs::{ProcessingStepRef, ScoreTypeRef};

/// Base type for identification results that carry scores and the processing
/// steps that produced them.
///
/// Meant to be embedded in concrete result entities (peptide hit, protein
/// hit, spectrum match). All mutation routes through
/// [`ScoredResult::add_processing_step`], which keeps the ledger free of
/// duplicate steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    steps_and_scores: StepLedger,
    meta: MetaInfo,
}

impl ScoredResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// The applied processing steps in application order.
    pub fn steps_and_scores(&self) -> &StepLedger {
        &self.steps_and_scores
    }

    /// The applied processing steps ordered by step reference.
    pub fn steps_and_scores_by_step(
        &self,
    ) -> impl Iterator<Item = &AppliedProcessingStep> + '_ {
        self.steps_and_scores.iter_by_step()
    }

    /// Visits every record in step-reference order with mutable access to
    /// its scores.
    pub fn steps_and_scores_by_step_mut<F>(&mut self, visit: F)
    where
        F: FnMut(Option<ProcessingStepRef>, &mut BTreeMap<ScoreTypeRef, f64>),
    {
        self.steps_and_scores.for_each_by_step_mut(visit);
    }

    /// Records an applied processing step.
    ///
    /// If a record for the same step reference already exists, the given
    /// scores are merged into it (existing score types are updated) and it
    /// keeps its position in the application order.
    pub fn add_processing_step(&mut self, applied: AppliedProcessingStep) {
        let step = applied.step;
        let updated = self.steps_and_scores.modify(step, |scores| {
            for (&score_type, &score) in &applied.scores {
                scores.insert(score_type, score);
            }
        });
        if updated {
            trace!(?step, "updated scores of existing processing step");
        } else {
            trace!(?step, "recorded new processing step");
            self.steps_and_scores.push(applied);
        }
    }

    /// Records a processing step together with the scores it produced.
    ///
    /// # Arguments
    /// * `step` - The processing step to record.
    /// * `scores` - The scores produced at that step, may be empty.
    ///
    pub fn add_step(&mut self, step: ProcessingStepRef, scores: BTreeMap<ScoreTypeRef, f64>) {
        self.add_processing_step(AppliedProcessingStep::new(Some(step), scores));
    }

    /// Records a single score, optionally tied to a processing step.
    pub fn add_score(
        &mut self,
        score_type: ScoreTypeRef,
        score: f64,
        step: Option<ProcessingStepRef>,
    ) {
        self.add_processing_step(AppliedProcessingStep::with_score(step, score_type, score));
    }

    /// Merges the steps, scores and metadata of `other` into this result.
    ///
    /// `other`'s records are folded in in their application order, so partial
    /// results from independent runs can be combined without losing a step or
    /// score. Metadata entries of `other` overwrite entries under the same
    /// key, unconditionally.
    pub fn merge(&mut self, other: &ScoredResult) -> &mut Self {
        debug!(
            steps = other.steps_and_scores.len(),
            meta_keys = other.meta.len(),
            "merging result"
        );
        for applied in &other.steps_and_scores {
            self.add_processing_step(applied.clone());
        }
        for key in other.meta.keys() {
            if let Some(value) = other.meta.get(key) {
                self.meta.set(key, value.clone());
            }
        }
        self
    }

    /// Looks up a score by score type.
    ///
    /// All records are considered, most recent first; a score from a later
    /// processing step supersedes an earlier score of the same type.
    pub fn score(&self, score_type: ScoreTypeRef) -> Option<f64> {
        self.score_and_step(score_type).map(|(score, _)| score)
    }

    /// Looks up a score by score type and the step that produced it.
    ///
    /// Only the record for exactly `step` is considered, regardless of more
    /// recent records; pass `None` to read from the record without a
    /// processing step.
    pub fn score_for_step(
        &self,
        score_type: ScoreTypeRef,
        step: Option<ProcessingStepRef>,
    ) -> Option<f64> {
        self.steps_and_scores
            .get(step)
            .and_then(|applied| applied.scores.get(&score_type).copied())
    }

    /// Looks up a score by score type, reporting which step produced it.
    ///
    /// All records are considered, most recent first. The returned step
    /// reference is `None` when the winning record is not tied to a step.
    pub fn score_and_step(
        &self,
        score_type: ScoreTypeRef,
    ) -> Option<(f64, Option<ProcessingStepRef>)> {
        self.steps_and_scores.iter().rev().find_map(|applied| {
            applied
                .scores
                .get(&score_type)
                .map(|&score| (score, applied.step))
        })
    }

    /// The metadata side table.
    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaInfo {
        &mut self.meta
    }

    /// Sets or overwrites a metadata value.
    pub fn set_meta_value(&mut self, key: u32, value: impl Into<MetaValue>) {
        self.meta.set(key, value);
    }

    pub fn get_meta_value(&self, key: u32) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    pub fn meta_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.meta.keys()
    }
}

impl AddAssign<&ScoredResult> for ScoredResult {
    fn add_assign(&mut self, other: &ScoredResult) {
        self.merge(other);
    }
}
