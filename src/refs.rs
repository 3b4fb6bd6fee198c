use serde::{Deserialize, Serialize};

/// Reference to a processing step owned by an external registry.
///
/// This is a stable index into the registry's arena. The ledger only stores
/// and compares these references, it never resolves them; the registry must
/// outlive every result that holds one of its references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessingStepRef(usize);

impl ProcessingStepRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The arena index this reference points to.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Reference to a score type (e.g. "XCorr", "q-value") owned by an external registry.
///
/// Same arena-index scheme as [`ProcessingStepRef`]. The total order over
/// references makes them usable as map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScoreTypeRef(usize);

impl ScoreTypeRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The arena index this reference points to.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refs_order_by_index() {
        assert!(ProcessingStepRef::new(0) < ProcessingStepRef::new(1));
        assert!(ScoreTypeRef::new(3) > ScoreTypeRef::new(2));
        assert_eq!(ScoreTypeRef::new(7).index(), 7);
    }

    #[test]
    fn test_optional_step_refs_order_none_first() {
        // The record without a step sorts before any real step reference.
        assert!(None < Some(ProcessingStepRef::new(0)));
    }
}
