use thiserror::Error;

use crate::refs::ProcessingStepRef;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate record for processing step {0:?}")]
    DuplicateStep(Option<ProcessingStepRef>),
    #[error("Cannot read {1} meta value as {0}")]
    MetaValueType(&'static str, &'static str),
}
