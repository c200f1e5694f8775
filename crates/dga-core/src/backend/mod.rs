pub mod clips;

use crate::classify;
use crate::classify::outcome::Diagnosis;
use crate::error::DgaError;
use crate::model::{ClassificationMode, GasReading};

/// Trait for rule-evaluation backends.
///
/// Both the native engines and the external CLIPS adapter honor the same
/// contract: five gas concentrations in, one fault category (plus optional
/// trace) out. Which backend runs is a configuration decision in the caller,
/// never a separate code path.
pub trait DiagnosisBackend: Send + Sync {
    /// Diagnose a single reading. Deterministic for the native backend;
    /// external backends may block while their engine evaluates.
    fn diagnose(
        &self,
        reading: &GasReading,
        mode: ClassificationMode,
    ) -> Result<Diagnosis, DgaError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// The built-in rule evaluator.
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        NativeBackend
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosisBackend for NativeBackend {
    fn diagnose(
        &self,
        reading: &GasReading,
        mode: ClassificationMode,
    ) -> Result<Diagnosis, DgaError> {
        classify::classify(reading, mode)
    }

    fn backend_name(&self) -> &str {
        "native"
    }
}
