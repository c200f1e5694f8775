use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five gases tracked by dissolved gas analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    H2,
    CH4,
    C2H2,
    C2H4,
    C2H6,
}

impl Gas {
    pub const ALL: [Gas; 5] = [Gas::H2, Gas::CH4, Gas::C2H2, Gas::C2H4, Gas::C2H6];

    /// English name of the gas, for prose output.
    pub fn name(&self) -> &'static str {
        match self {
            Gas::H2 => "hydrogen",
            Gas::CH4 => "methane",
            Gas::C2H2 => "acetylene",
            Gas::C2H4 => "ethylene",
            Gas::C2H6 => "ethane",
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gas::H2 => write!(f, "H2"),
            Gas::CH4 => write!(f, "CH4"),
            Gas::C2H2 => write!(f, "C2H2"),
            Gas::C2H4 => write!(f, "C2H4"),
            Gas::C2H6 => write!(f, "C2H6"),
        }
    }
}

/// One oil sample: concentrations of the five diagnostic gases in ppm.
///
/// Values are exact decimals and must be non-negative. Construct via
/// [`GasReading::new`] (or [`GasReading::from_f64`] for float input); both
/// reject invalid readings up front so the classifiers never see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasReading {
    pub h2: Decimal,
    pub ch4: Decimal,
    pub c2h2: Decimal,
    pub c2h4: Decimal,
    pub c2h6: Decimal,
}

impl GasReading {
    pub fn new(
        h2: Decimal,
        ch4: Decimal,
        c2h2: Decimal,
        c2h4: Decimal,
        c2h6: Decimal,
    ) -> Result<Self, crate::error::DgaError> {
        let reading = GasReading {
            h2,
            ch4,
            c2h2,
            c2h4,
            c2h6,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Build a reading from float input, rejecting NaN and infinities.
    pub fn from_f64(
        h2: f64,
        ch4: f64,
        c2h2: f64,
        c2h4: f64,
        c2h6: f64,
    ) -> Result<Self, crate::error::DgaError> {
        use rust_decimal::prelude::FromPrimitive;

        let mut problems = Vec::new();
        let mut convert = |gas: Gas, v: f64| match Decimal::from_f64(v) {
            Some(d) => d,
            None => {
                problems.push(format!("{} is not a finite number ({})", gas, v));
                Decimal::ZERO
            }
        };

        let h2 = convert(Gas::H2, h2);
        let ch4 = convert(Gas::CH4, ch4);
        let c2h2 = convert(Gas::C2H2, c2h2);
        let c2h4 = convert(Gas::C2H4, c2h4);
        let c2h6 = convert(Gas::C2H6, c2h6);

        if !problems.is_empty() {
            return Err(crate::error::DgaError::InvalidReading(problems.join("; ")));
        }

        GasReading::new(h2, ch4, c2h2, c2h4, c2h6)
    }

    pub fn get(&self, gas: Gas) -> Decimal {
        match gas {
            Gas::H2 => self.h2,
            Gas::CH4 => self.ch4,
            Gas::C2H2 => self.c2h2,
            Gas::C2H4 => self.c2h4,
            Gas::C2H6 => self.c2h6,
        }
    }

    /// Check that every concentration is non-negative.
    ///
    /// Reports all offending fields at once, not just the first.
    pub fn validate(&self) -> Result<(), crate::error::DgaError> {
        let negative: Vec<String> = Gas::ALL
            .iter()
            .filter(|&&gas| self.get(gas) < Decimal::ZERO)
            .map(|&gas| format!("{} is negative ({} ppm)", gas, self.get(gas)))
            .collect();

        if negative.is_empty() {
            Ok(())
        } else {
            Err(crate::error::DgaError::InvalidReading(negative.join("; ")))
        }
    }
}

/// The three diagnostic ratios derived from a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    pub ch4_over_h2: Decimal,
    pub c2h2_over_c2h4: Decimal,
    pub c2h4_over_c2h6: Decimal,
}

impl RatioSet {
    pub fn of(reading: &GasReading) -> RatioSet {
        RatioSet {
            ch4_over_h2: ratio(reading.ch4, reading.h2),
            c2h2_over_c2h4: ratio(reading.c2h2, reading.c2h4),
            c2h4_over_c2h6: ratio(reading.c2h4, reading.c2h6),
        }
    }
}

/// Gas ratio with the fixed convention that a zero denominator yields 0.
///
/// An absent denominator gas means the ratio signal carries no information,
/// so the ratio must not fire any threshold rule. This is a policy choice
/// inherited from the field procedure; it changes which rules fire.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Fault labels produced by the classifiers.
///
/// The scoring engine uses the seven specific categories plus `Normal`; the
/// decision tree uses the coarse `ArcingFault`/`ThermalFault` labels plus
/// `PartialDischarge` and `Normal`. One enum covers both so a diagnosis
/// looks the same regardless of mode or backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    PartialDischarge,
    LowEnergyArcing,
    HighEnergyArcing,
    ThermalT1,
    ThermalT2,
    ThermalT3,
    MixedFault,
    ArcingFault,
    ThermalFault,
    Normal,
}

impl FaultCategory {
    /// Categories scored by the scoring engine, in tie-break priority order.
    ///
    /// Winner selection walks this array front to back with strict
    /// greater-than replacement, so on equal scores the earlier entry wins.
    pub const SCORED: [FaultCategory; 7] = [
        FaultCategory::PartialDischarge,
        FaultCategory::LowEnergyArcing,
        FaultCategory::HighEnergyArcing,
        FaultCategory::ThermalT1,
        FaultCategory::ThermalT2,
        FaultCategory::ThermalT3,
        FaultCategory::MixedFault,
    ];

    /// Slot of this category in [`FaultCategory::SCORED`], if it is scored.
    pub fn scored_index(&self) -> Option<usize> {
        FaultCategory::SCORED.iter().position(|c| c == self)
    }

    /// Short code for compact tabular output (confusion matrices).
    ///
    /// Uses the conventional DGA shorthand: PD for partial discharge, D1/D2
    /// for low/high energy discharge, T1..T3 for the thermal bands.
    pub fn code(&self) -> &'static str {
        match self {
            FaultCategory::PartialDischarge => "PD",
            FaultCategory::LowEnergyArcing => "D1",
            FaultCategory::HighEnergyArcing => "D2",
            FaultCategory::ThermalT1 => "T1",
            FaultCategory::ThermalT2 => "T2",
            FaultCategory::ThermalT3 => "T3",
            FaultCategory::MixedFault => "MIX",
            FaultCategory::ArcingFault => "ARC",
            FaultCategory::ThermalFault => "THM",
            FaultCategory::Normal => "OK",
        }
    }

    /// Parse a label leniently, accepting snake_case identifiers as well as
    /// the display strings used in reports and batch files.
    pub fn from_str_loose(s: &str) -> Option<FaultCategory> {
        let lower = s.trim().to_lowercase();
        if lower.contains("partial") || lower == "pd" {
            Some(FaultCategory::PartialDischarge)
        } else if lower.contains("arc") && lower.contains("low") {
            Some(FaultCategory::LowEnergyArcing)
        } else if lower.contains("arc") && lower.contains("high") {
            Some(FaultCategory::HighEnergyArcing)
        } else if lower.contains("arc") {
            Some(FaultCategory::ArcingFault)
        } else if lower.contains("t1") {
            Some(FaultCategory::ThermalT1)
        } else if lower.contains("t2") {
            Some(FaultCategory::ThermalT2)
        } else if lower.contains("t3") {
            Some(FaultCategory::ThermalT3)
        } else if lower.contains("mixed") {
            Some(FaultCategory::MixedFault)
        } else if lower.contains("thermal") {
            Some(FaultCategory::ThermalFault)
        } else if lower.contains("normal") {
            Some(FaultCategory::Normal)
        } else {
            None
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FaultCategory::PartialDischarge => "Partial Discharge",
            FaultCategory::LowEnergyArcing => "Low Energy Arcing",
            FaultCategory::HighEnergyArcing => "High Energy Arcing",
            FaultCategory::ThermalT1 => "Thermal Fault T1 (<300 C)",
            FaultCategory::ThermalT2 => "Thermal Fault T2 (300-700 C)",
            FaultCategory::ThermalT3 => "Thermal Fault T3 (>700 C)",
            FaultCategory::MixedFault => "Mixed Fault",
            FaultCategory::ArcingFault => "Arcing Fault",
            FaultCategory::ThermalFault => "Thermal Fault",
            FaultCategory::Normal => "Normal",
        };
        write!(f, "{label}")
    }
}

/// Which native rule set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Multi-rule scoring engine: every matching rule adds a point to its
    /// category, highest score wins, full fired-rule trace.
    Scoring,
    /// First-match decision tree over the coarse category set, no trace.
    Tree,
}

impl ClassificationMode {
    pub fn from_str_loose(s: &str) -> Option<ClassificationMode> {
        match s.trim().to_lowercase().as_str() {
            "scoring" | "score" => Some(ClassificationMode::Scoring),
            "tree" | "decision-tree" => Some(ClassificationMode::Tree),
            _ => None,
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMode::Scoring => write!(f, "scoring"),
            ClassificationMode::Tree => write!(f, "tree"),
        }
    }
}
