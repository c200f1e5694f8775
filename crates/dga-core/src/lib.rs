pub mod backend;
pub mod classify;
pub mod error;
pub mod model;
pub mod parsing;
pub mod rules;

use backend::DiagnosisBackend;
use classify::outcome::Diagnosis;
use error::DgaError;
use model::{ClassificationMode, GasReading};

/// Main API entry point: diagnose a gas reading with the built-in rules.
///
/// Pure and stateless: identical readings always yield identical diagnoses,
/// and independent calls share nothing. Fails with `InvalidReading` before
/// any rule evaluates if the reading is out of range.
pub fn diagnose(reading: &GasReading, mode: ClassificationMode) -> Result<Diagnosis, DgaError> {
    classify::classify(reading, mode)
}

/// Diagnose through an explicit backend (native or an external rule engine).
pub fn diagnose_with(
    backend: &dyn DiagnosisBackend,
    reading: &GasReading,
    mode: ClassificationMode,
) -> Result<Diagnosis, DgaError> {
    backend.diagnose(reading, mode)
}
