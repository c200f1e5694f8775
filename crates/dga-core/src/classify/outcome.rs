use crate::model::{ClassificationMode, FaultCategory, RatioSet};
use serde::{Deserialize, Serialize};

/// A single rule that held for a reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiredRule {
    /// Rule identifier (R1..R8).
    pub rule_id: String,
    /// The category this rule scored for.
    pub category: FaultCategory,
    /// Human-readable account of the evaluated values.
    pub detail: String,
}

/// Score of one category after all rules were evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: FaultCategory,
    pub score: u32,
}

/// The result of classifying one gas reading.
///
/// Immutable value: identical readings always produce identical diagnoses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    /// The reported fault category.
    pub category: FaultCategory,
    /// Which rule set produced this diagnosis.
    pub mode: ClassificationMode,
    /// The three derived ratios, for display alongside the verdict.
    pub ratios: RatioSet,
    /// Fired rules in evaluation order. Empty for the decision tree, for
    /// external backends, and when no scoring rule held.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fired_rules: Vec<FiredRule>,
    /// Per-category scores in priority order. Scoring mode only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<CategoryScore>,
}

impl Diagnosis {
    /// True when no rule fired and the transformer looks healthy.
    pub fn is_normal(&self) -> bool {
        self.category == FaultCategory::Normal
    }
}
