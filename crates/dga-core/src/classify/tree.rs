use crate::classify::outcome::Diagnosis;
use crate::model::{ClassificationMode, FaultCategory, GasReading, RatioSet};
use rust_decimal::Decimal;

/// Classify a reading with the first-match decision tree.
///
/// Single verdict over the coarse category set, short-circuiting at the
/// first branch that matches. No trace is produced; the cascade itself is
/// the explanation.
pub fn classify_tree(reading: &GasReading) -> Diagnosis {
    let ratios = RatioSet::of(reading);

    let category = if ratios.c2h2_over_c2h4 > Decimal::ONE && ratios.ch4_over_h2 < Decimal::new(1, 1)
    {
        FaultCategory::ArcingFault
    } else if ratios.ch4_over_h2 > Decimal::ONE && ratios.c2h4_over_c2h6 < Decimal::ONE {
        FaultCategory::ThermalFault
    } else if reading.h2 > reading.ch4 && reading.h2 > reading.c2h2 {
        FaultCategory::PartialDischarge
    } else {
        FaultCategory::Normal
    };

    Diagnosis {
        category,
        mode: ClassificationMode::Tree,
        ratios,
        fired_rules: Vec::new(),
        scores: Vec::new(),
    }
}
