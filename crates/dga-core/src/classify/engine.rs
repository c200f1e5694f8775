use crate::classify::outcome::{CategoryScore, Diagnosis, FiredRule};
use crate::model::{ClassificationMode, FaultCategory, GasReading, RatioSet};
use crate::rules::SCORING_RULES;

/// Classify a reading with the scoring rule set.
///
/// Every rule is evaluated independently; each one that holds adds one point
/// to its category and one entry to the trace. The reported category is the
/// highest-scoring one, ties broken by the fixed priority order of
/// [`FaultCategory::SCORED`]. If nothing fires the verdict is `Normal` with
/// an empty trace.
pub fn classify_scoring(reading: &GasReading) -> Diagnosis {
    let ratios = RatioSet::of(reading);

    let mut scores = [0u32; FaultCategory::SCORED.len()];
    let mut fired_rules = Vec::new();

    for rule in &SCORING_RULES {
        if let Some(detail) = rule.evaluate(reading, &ratios) {
            if let Some(idx) = rule.category.scored_index() {
                scores[idx] += 1;
            }
            fired_rules.push(FiredRule {
                rule_id: rule.id.to_string(),
                category: rule.category,
                detail,
            });
        }
    }

    // Stable max: explicit ordered walk with strict-greater-than replacement,
    // so on equal scores the earlier-declared category wins.
    let mut winner = 0;
    for (idx, &score) in scores.iter().enumerate() {
        if score > scores[winner] {
            winner = idx;
        }
    }

    let category = if scores[winner] == 0 {
        FaultCategory::Normal
    } else {
        FaultCategory::SCORED[winner]
    };

    Diagnosis {
        category,
        mode: ClassificationMode::Scoring,
        ratios,
        fired_rules,
        scores: FaultCategory::SCORED
            .iter()
            .zip(scores)
            .map(|(&category, score)| CategoryScore { category, score })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn reading(h2: Decimal, ch4: Decimal, c2h2: Decimal, c2h4: Decimal, c2h6: Decimal) -> GasReading {
        GasReading::new(h2, ch4, c2h2, c2h4, c2h6).unwrap()
    }

    #[test]
    fn test_hydrogen_dominant_sample_is_partial_discharge() {
        // Only R1 holds: CH4/H2 = 0.5 keeps R2 and R5 quiet, C2H2/C2H4 = 0.05
        // keeps the arcing rules quiet, C2H4/C2H6 = 0.8 keeps the thermal
        // rules quiet.
        let d = classify_scoring(&reading(dec!(180), dec!(90), dec!(2), dec!(40), dec!(50)));
        assert_eq!(d.category, FaultCategory::PartialDischarge);
        assert_eq!(d.fired_rules.len(), 1);
        assert_eq!(d.fired_rules[0].rule_id, "R1");
        let pd = d
            .scores
            .iter()
            .find(|s| s.category == FaultCategory::PartialDischarge)
            .unwrap();
        assert_eq!(pd.score, 1);
    }

    #[test]
    fn test_no_rule_fires_is_normal_with_empty_trace() {
        // CH4/H2 = 1, C2H2/C2H4 = 0.0625, C2H4/C2H6 = 0.8
        let d = classify_scoring(&reading(dec!(20), dec!(20), dec!(0.5), dec!(8), dec!(10)));
        assert_eq!(d.category, FaultCategory::Normal);
        assert!(d.fired_rules.is_empty());
        assert!(d.scores.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_tie_between_r1_and_r8_resolves_to_partial_discharge() {
        // R1: H2 200 > 100 and > CH4 100. R8: C2H2 12 > 10, C2H4 150 > 100.
        // CH4/H2 = 0.5, C2H2/C2H4 = 0.08, C2H4/C2H6 = 0.75 keep the rest
        // quiet. One point each; first-declared category wins.
        let d = classify_scoring(&reading(dec!(200), dec!(100), dec!(12), dec!(150), dec!(200)));
        let fired: Vec<&str> = d.fired_rules.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(fired, vec!["R1", "R8"]);
        assert_eq!(d.category, FaultCategory::PartialDischarge);
    }

    #[test]
    fn test_two_point_partial_discharge_beats_single_rules() {
        // H2 1000, CH4 20: R1 and R2 both score Partial Discharge. The
        // boundary ratios C2H2/C2H4 = 1 (R3) and C2H4/C2H6 = 1 (R6) each add
        // a single point elsewhere.
        let d = classify_scoring(&reading(dec!(1000), dec!(20), dec!(1), dec!(1), dec!(1)));
        assert_eq!(d.category, FaultCategory::PartialDischarge);
        let pd = d
            .scores
            .iter()
            .find(|s| s.category == FaultCategory::PartialDischarge)
            .unwrap();
        assert_eq!(pd.score, 2);
    }

    #[test]
    fn test_high_energy_arcing_wins_tie_against_thermal_t3() {
        // C2H2/C2H4 = 2 fires R4; C2H4/C2H6 = 10 fires R7. High Energy
        // Arcing is declared before Thermal T3, so it takes the tie.
        let d = classify_scoring(&reading(dec!(10), dec!(10), dec!(200), dec!(100), dec!(10)));
        assert_eq!(d.category, FaultCategory::HighEnergyArcing);
    }

    #[test]
    fn test_missing_denominator_gas_shifts_the_verdict() {
        // With H2 = 0 the CH4/H2 ratio is defined as 0, so R2 fires even
        // though methane is present. The zero convention is part of the
        // procedure, not an accident.
        let d = classify_scoring(&reading(dec!(0), dec!(50), dec!(0), dec!(0), dec!(0)));
        assert_eq!(d.category, FaultCategory::PartialDischarge);
        assert_eq!(d.fired_rules.len(), 1);
        assert_eq!(d.fired_rules[0].rule_id, "R2");
    }

    #[test]
    fn test_scores_listed_in_priority_order() {
        let d = classify_scoring(&reading(dec!(20), dec!(20), dec!(0.5), dec!(8), dec!(10)));
        let listed: Vec<FaultCategory> = d.scores.iter().map(|s| s.category).collect();
        assert_eq!(listed, FaultCategory::SCORED.to_vec());
    }

    #[test]
    fn test_determinism_on_repeated_calls() {
        let r = reading(dec!(180), dec!(90), dec!(2), dec!(40), dec!(50));
        let first = classify_scoring(&r);
        for _ in 0..10 {
            let again = classify_scoring(&r);
            assert_eq!(again.category, first.category);
            assert_eq!(again.fired_rules.len(), first.fired_rules.len());
        }
    }
}
