pub mod engine;
pub mod outcome;
pub mod tree;

use crate::error::DgaError;
use crate::model::{ClassificationMode, GasReading};
use outcome::Diagnosis;

/// Classify a gas reading with the selected native rule set.
///
/// The reading is validated at entry; an invalid reading never reaches the
/// rules, and a zero-valued denominator gas is never an error (see the ratio
/// convention in [`crate::model::RatioSet`]).
pub fn classify(reading: &GasReading, mode: ClassificationMode) -> Result<Diagnosis, DgaError> {
    reading.validate()?;

    Ok(match mode {
        ClassificationMode::Scoring => engine::classify_scoring(reading),
        ClassificationMode::Tree => tree::classify_tree(reading),
    })
}
