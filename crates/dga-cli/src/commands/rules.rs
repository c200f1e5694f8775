use dga_core::error::DgaError;
use dga_core::model::{ClassificationMode, FaultCategory};
use dga_core::rules::SCORING_RULES;

pub fn list() -> Result<(), DgaError> {
    println!("Available classification modes:\n");
    println!("  scoring  Multi-rule scoring engine");
    println!("           8 threshold rules over 7 fault categories; every matching rule");
    println!("           scores one point for its category and the highest total wins.");
    println!("           Produces a full fired-rule trace.");
    println!();
    println!("  tree     First-match decision tree");
    println!("           Coarse verdicts (arcing, thermal, partial discharge, normal);");
    println!("           stops at the first matching branch. No trace.");
    println!();
    Ok(())
}

pub fn explain(mode_str: &str) -> Result<(), DgaError> {
    let mode = ClassificationMode::from_str_loose(mode_str)
        .ok_or_else(|| DgaError::UnknownMode(mode_str.to_string()))?;

    match mode {
        ClassificationMode::Scoring => explain_scoring(),
        ClassificationMode::Tree => explain_tree(),
    }

    Ok(())
}

fn explain_scoring() {
    println!("Scoring rule set (IEC/Rogers-style ratio thresholds)\n");
    println!("Three ratios are derived from the reading:");
    println!("  CH4/H2, C2H2/C2H4, C2H4/C2H6");
    println!("A ratio with a zero-valued denominator gas is defined as 0,");
    println!("so an absent gas never fires a ratio rule.\n");
    println!("Every rule is evaluated independently; each one that holds adds one");
    println!("point to its category. The highest score wins, ties resolved in the");
    println!("order the categories are listed below. If nothing fires, the");
    println!("transformer is reported as Normal.\n");

    let max_cond = SCORING_RULES
        .iter()
        .map(|r| r.condition.len())
        .max()
        .unwrap_or(30);

    println!("  {:<4}{:<width$}  Category", "Rule", "Condition", width = max_cond + 2);
    println!("  {}", "-".repeat(4 + max_cond + 2 + 2 + 28));
    for rule in &SCORING_RULES {
        println!(
            "  {:<4}{:<width$}  {}",
            rule.id,
            rule.condition,
            rule.category,
            width = max_cond + 2
        );
    }

    println!("\nTie-break priority:");
    for cat in FaultCategory::SCORED {
        println!("  {}", cat);
    }
    println!();
}

fn explain_tree() {
    println!("Decision-tree rule set (single verdict, first match wins)\n");
    println!("  1. C2H2/C2H4 > 1 and CH4/H2 < 0.1   -> {}", FaultCategory::ArcingFault);
    println!("  2. CH4/H2 > 1 and C2H4/C2H6 < 1     -> {}", FaultCategory::ThermalFault);
    println!("  3. H2 > CH4 and H2 > C2H2           -> {}", FaultCategory::PartialDischarge);
    println!("  4. otherwise                        -> {}", FaultCategory::Normal);
    println!();
    println!("The cascade short-circuits at the first matching branch and");
    println!("produces no explanation trace.");
    println!();
}
