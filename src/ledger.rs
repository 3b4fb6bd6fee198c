use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::applied_step::AppliedProcessingStep;
use crate::error::Error;
use crate::refs::{ProcessingStepRef, ScoreTypeRef};

/// Applied processing steps in order of application, with a unique secondary
/// index over the (optional) step reference.
///
/// The sequence view preserves the order in which steps were recorded, the
/// index view guarantees at most one record per step reference (the record
/// without a step counts as one key). Both views always hold exactly the
/// same records.
#[derive(Debug, Clone, Default)]
pub struct StepLedger {
    steps: Vec<AppliedProcessingStep>,
    // step reference -> position in `steps`
    by_step: BTreeMap<Option<ProcessingStepRef>, usize>,
}

impl StepLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether a record for the given step reference exists.
    pub fn contains_step(&self, step: Option<ProcessingStepRef>) -> bool {
        self.by_step.contains_key(&step)
    }

    /// Appends a record at the end of the sequence.
    ///
    /// The caller must ensure that no record with the same step reference is
    /// present yet; `ScoredResult::add_processing_step` is the deduplicating
    /// entry point that maintains this.
    pub fn push(&mut self, applied: AppliedProcessingStep) {
        debug_assert!(!self.by_step.contains_key(&applied.step));
        self.by_step.insert(applied.step, self.steps.len());
        self.steps.push(applied);
    }

    /// Point lookup by step reference.
    pub fn get(&self, step: Option<ProcessingStepRef>) -> Option<&AppliedProcessingStep> {
        self.by_step.get(&step).map(|&position| &self.steps[position])
    }

    /// Applies `mutator` to the score map of the record for `step`, leaving
    /// its position in the sequence untouched.
    ///
    /// Returns `false` if there is no record for `step`.
    pub fn modify<F>(&mut self, step: Option<ProcessingStepRef>, mutator: F) -> bool
    where
        F: FnOnce(&mut BTreeMap<ScoreTypeRef, f64>),
    {
        match self.by_step.get(&step) {
            Some(&position) => {
                mutator(&mut self.steps[position].scores);
                true
            }
            None => false,
        }
    }

    /// Records in application order.
    ///
    /// The iterator is double-ended; `.rev()` gives the most-recent-first
    /// view used for score resolution.
    pub fn iter(&self) -> std::slice::Iter<'_, AppliedProcessingStep> {
        self.steps.iter()
    }

    /// Records ordered by step reference instead of application order.
    pub fn iter_by_step(&self) -> impl Iterator<Item = &AppliedProcessingStep> + '_ {
        self.by_step.values().map(|&position| &self.steps[position])
    }

    /// Visits every record in step-reference order with mutable access to
    /// its scores. The step references themselves stay fixed.
    pub fn for_each_by_step_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(Option<ProcessingStepRef>, &mut BTreeMap<ScoreTypeRef, f64>),
    {
        let steps = &mut self.steps;
        for (&step, &position) in &self.by_step {
            visit(step, &mut steps[position].scores);
        }
    }
}

impl PartialEq for StepLedger {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the sequence, comparing the sequence is enough.
        self.steps == other.steps
    }
}

impl<'a> IntoIterator for &'a StepLedger {
    type Item = &'a AppliedProcessingStep;
    type IntoIter = std::slice::Iter<'a, AppliedProcessingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<AppliedProcessingStep>> for StepLedger {
    type Error = Error;

    /// Builds a ledger from records in application order, rebuilding the
    /// step index and rejecting duplicate step references.
    fn try_from(steps: Vec<AppliedProcessingStep>) -> Result<Self, Error> {
        let mut ledger = StepLedger::new();
        for applied in steps {
            if ledger.contains_step(applied.step) {
                return Err(Error::DuplicateStep(applied.step));
            }
            ledger.push(applied);
        }
        Ok(ledger)
    }
}

// Only the sequence view is serialized; the step index is rebuilt (and the
// uniqueness invariant re-checked) on deserialization.
impl Serialize for StepLedger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.steps.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StepLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let steps = Vec::<AppliedProcessingStep>::deserialize(deserializer)?;
        StepLedger::try_from(steps).map_err(serde::de::Error::custom)
    }
}
