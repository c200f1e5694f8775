use crate::model::{FaultCategory, GasReading, RatioSet};
use rust_decimal::Decimal;

/// One threshold rule of the scoring engine.
///
/// Rules are fixed literals from the IEC/Rogers-style procedure; there is
/// deliberately no file-loaded rule schema here. Each rule targets exactly
/// one category and, when it holds, contributes one point and a human
/// readable account of the values it saw.
pub struct ScoringRule {
    /// Stable identifier (R1..R8).
    pub id: &'static str,
    /// Condition in plain language, for `dga rules explain`.
    pub condition: &'static str,
    /// Short summary of what the rule indicates.
    pub summary: &'static str,
    pub category: FaultCategory,
    check: fn(&GasReading, &RatioSet) -> Option<String>,
}

impl ScoringRule {
    /// Evaluate the rule, returning the evaluated-value detail if it fires.
    pub fn evaluate(&self, reading: &GasReading, ratios: &RatioSet) -> Option<String> {
        (self.check)(reading, ratios)
    }
}

/// The scoring rule set, in fixed declaration order R1..R8.
///
/// Order matters only for the trace and for the tie-break over
/// [`FaultCategory::SCORED`]; every rule is always evaluated.
pub const SCORING_RULES: [ScoringRule; 8] = [
    ScoringRule {
        id: "R1",
        condition: "H2 > 100 ppm and H2 > CH4",
        summary: "hydrogen dominant",
        category: FaultCategory::PartialDischarge,
        check: r1,
    },
    ScoringRule {
        id: "R2",
        condition: "CH4/H2 < 0.1",
        summary: "low CH4/H2 ratio",
        category: FaultCategory::PartialDischarge,
        check: r2,
    },
    ScoringRule {
        id: "R3",
        condition: "0.1 <= C2H2/C2H4 <= 1",
        summary: "low energy arcing ratio",
        category: FaultCategory::LowEnergyArcing,
        check: r3,
    },
    ScoringRule {
        id: "R4",
        condition: "C2H2/C2H4 > 1",
        summary: "high energy arcing ratio",
        category: FaultCategory::HighEnergyArcing,
        check: r4,
    },
    ScoringRule {
        id: "R5",
        condition: "CH4/H2 > 1 and C2H4/C2H6 < 1",
        summary: "low temperature thermal",
        category: FaultCategory::ThermalT1,
        check: r5,
    },
    ScoringRule {
        id: "R6",
        condition: "1 <= C2H4/C2H6 < 3",
        summary: "medium temperature thermal",
        category: FaultCategory::ThermalT2,
        check: r6,
    },
    ScoringRule {
        id: "R7",
        condition: "C2H4/C2H6 >= 3",
        summary: "high temperature thermal",
        category: FaultCategory::ThermalT3,
        check: r7,
    },
    ScoringRule {
        id: "R8",
        condition: "C2H2 > 10 ppm and C2H4 > 100 ppm",
        summary: "mixed fault condition",
        category: FaultCategory::MixedFault,
        check: r8,
    },
];

fn r1(reading: &GasReading, _ratios: &RatioSet) -> Option<String> {
    (reading.h2 > Decimal::ONE_HUNDRED && reading.h2 > reading.ch4).then(|| {
        format!(
            "H2 {} ppm > 100 and > CH4 {} ppm",
            reading.h2, reading.ch4
        )
    })
}

fn r2(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    (ratios.ch4_over_h2 < Decimal::new(1, 1))
        .then(|| format!("CH4/H2 = {} < 0.1", ratios.ch4_over_h2.round_dp(2)))
}

fn r3(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    let r = ratios.c2h2_over_c2h4;
    (r >= Decimal::new(1, 1) && r <= Decimal::ONE)
        .then(|| format!("0.1 <= C2H2/C2H4 = {} <= 1", r.round_dp(2)))
}

fn r4(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    (ratios.c2h2_over_c2h4 > Decimal::ONE)
        .then(|| format!("C2H2/C2H4 = {} > 1", ratios.c2h2_over_c2h4.round_dp(2)))
}

fn r5(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    (ratios.ch4_over_h2 > Decimal::ONE && ratios.c2h4_over_c2h6 < Decimal::ONE).then(|| {
        format!(
            "CH4/H2 = {} > 1 and C2H4/C2H6 = {} < 1",
            ratios.ch4_over_h2.round_dp(2),
            ratios.c2h4_over_c2h6.round_dp(2)
        )
    })
}

fn r6(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    let r = ratios.c2h4_over_c2h6;
    (r >= Decimal::ONE && r < Decimal::new(3, 0))
        .then(|| format!("1 <= C2H4/C2H6 = {} < 3", r.round_dp(2)))
}

fn r7(_reading: &GasReading, ratios: &RatioSet) -> Option<String> {
    (ratios.c2h4_over_c2h6 >= Decimal::new(3, 0))
        .then(|| format!("C2H4/C2H6 = {} >= 3", ratios.c2h4_over_c2h6.round_dp(2)))
}

fn r8(reading: &GasReading, _ratios: &RatioSet) -> Option<String> {
    (reading.c2h2 > Decimal::TEN && reading.c2h4 > Decimal::ONE_HUNDRED).then(|| {
        format!(
            "C2H2 {} ppm > 10 and C2H4 {} ppm > 100",
            reading.c2h2, reading.c2h4
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reading(h2: Decimal, ch4: Decimal, c2h2: Decimal, c2h4: Decimal, c2h6: Decimal) -> GasReading {
        GasReading::new(h2, ch4, c2h2, c2h4, c2h6).unwrap()
    }

    fn fired_ids(r: &GasReading) -> Vec<&'static str> {
        let ratios = RatioSet::of(r);
        SCORING_RULES
            .iter()
            .filter(|rule| rule.evaluate(r, &ratios).is_some())
            .map(|rule| rule.id)
            .collect()
    }

    #[test]
    fn test_r1_requires_both_conditions() {
        // H2 above 100 but not above CH4
        let r = reading(dec!(150), dec!(200), dec!(0), dec!(0), dec!(0));
        assert!(!fired_ids(&r).contains(&"R1"));

        let r = reading(dec!(180), dec!(90), dec!(0), dec!(0), dec!(0));
        assert!(fired_ids(&r).contains(&"R1"));
    }

    #[test]
    fn test_r1_boundary_100_exclusive() {
        let r = reading(dec!(100), dec!(10), dec!(0), dec!(0), dec!(0));
        assert!(!fired_ids(&r).contains(&"R1"));
    }

    #[test]
    fn test_r3_fires_at_exactly_one() {
        // C2H2/C2H4 == 1 belongs to R3, not R4
        let r = reading(dec!(0), dec!(0), dec!(40), dec!(40), dec!(0));
        let ids = fired_ids(&r);
        assert!(ids.contains(&"R3"));
        assert!(!ids.contains(&"R4"));
    }

    #[test]
    fn test_r3_fires_at_exactly_point_one() {
        let r = reading(dec!(0), dec!(0), dec!(4), dec!(40), dec!(0));
        assert!(fired_ids(&r).contains(&"R3"));
    }

    #[test]
    fn test_r4_strictly_above_one() {
        let r = reading(dec!(0), dec!(0), dec!(41), dec!(40), dec!(0));
        let ids = fired_ids(&r);
        assert!(ids.contains(&"R4"));
        assert!(!ids.contains(&"R3"));
    }

    #[test]
    fn test_r6_r7_interval_boundaries() {
        // ratio exactly 1: R6 fires
        let r = reading(dec!(0), dec!(0), dec!(0), dec!(50), dec!(50));
        assert!(fired_ids(&r).contains(&"R6"));

        // ratio exactly 3: R7, not R6
        let r = reading(dec!(0), dec!(0), dec!(0), dec!(150), dec!(50));
        let ids = fired_ids(&r);
        assert!(ids.contains(&"R7"));
        assert!(!ids.contains(&"R6"));
    }

    #[test]
    fn test_r8_thresholds_are_strict() {
        let r = reading(dec!(0), dec!(0), dec!(10), dec!(100), dec!(0));
        assert!(!fired_ids(&r).contains(&"R8"));

        let r = reading(dec!(0), dec!(0), dec!(11), dec!(101), dec!(0));
        assert!(fired_ids(&r).contains(&"R8"));
    }

    #[test]
    fn test_zero_denominators_fire_r2_only() {
        // All gases zero: every ratio collapses to 0, which satisfies R2
        // (0 < 0.1) and nothing else.
        let r = reading(dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
        assert_eq!(fired_ids(&r), vec!["R2"]);
    }

    #[test]
    fn test_rule_table_order_is_r1_to_r8() {
        let ids: Vec<&str> = SCORING_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8"]);
    }

    #[test]
    fn test_detail_strings_name_the_values() {
        let r = reading(dec!(180), dec!(90), dec!(2), dec!(40), dec!(50));
        let ratios = RatioSet::of(&r);
        let detail = SCORING_RULES[0].evaluate(&r, &ratios).unwrap();
        assert!(detail.contains("180"));
        assert!(detail.contains("90"));
    }
}
