use dga_core::classify::outcome::Diagnosis;
use dga_core::model::ClassificationMode;

use crate::commands::batch::BatchReport;

pub fn print_diagnosis(diagnosis: &Diagnosis, verbose: bool) {
    println!("=== DGA Diagnosis ({} mode) ===\n", diagnosis.mode);

    if diagnosis.is_normal() {
        println!("  Status: {}", diagnosis.category);
    } else {
        println!("  Fault:  {}", diagnosis.category);
    }

    println!("\n  Ratios:");
    println!("    CH4/H2     {}", diagnosis.ratios.ch4_over_h2.round_dp(2));
    println!("    C2H2/C2H4  {}", diagnosis.ratios.c2h2_over_c2h4.round_dp(2));
    println!("    C2H4/C2H6  {}", diagnosis.ratios.c2h4_over_c2h6.round_dp(2));

    if !diagnosis.fired_rules.is_empty() {
        println!("\n  Fired rules:");
        let max_cat = diagnosis
            .fired_rules
            .iter()
            .map(|f| f.category.to_string().len())
            .max()
            .unwrap_or(10);
        for fired in &diagnosis.fired_rules {
            println!(
                "    {:<4}{:<width$}  {}",
                fired.rule_id,
                fired.category.to_string(),
                fired.detail,
                width = max_cat + 2
            );
        }
    } else if diagnosis.mode == ClassificationMode::Scoring {
        println!("\n  No rule fired.");
    }

    if verbose && !diagnosis.scores.is_empty() {
        println!("\n  Scores:");
        for entry in &diagnosis.scores {
            println!("    {:<30}{}", entry.category.to_string(), entry.score);
        }
    }

    println!();
}

pub fn print_batch(report: &BatchReport) {
    println!(
        "=== Batch report ({} mode, {} samples) ===\n",
        report.mode, report.total
    );
    println!(
        "  Accuracy: {:.2}% ({}/{})\n",
        report.accuracy_pct(),
        report.correct,
        report.total
    );

    let labels = report.labels();
    if !labels.is_empty() {
        let max_name = labels
            .iter()
            .map(|l| l.to_string().len())
            .max()
            .unwrap_or(10);

        // Confusion matrix: rows actual, columns predicted (short codes).
        print!("  {:<width$}", "Actual \\ Predicted", width = max_name + 2);
        for label in &labels {
            print!("  {:>4}", label.code());
        }
        println!();
        println!("  {}", "-".repeat(max_name + 2 + labels.len() * 6));

        for actual in &labels {
            print!("  {:<width$}", actual.to_string(), width = max_name + 2);
            for predicted in &labels {
                let count = report
                    .matrix
                    .get(&(*actual, *predicted))
                    .copied()
                    .unwrap_or(0);
                print!("  {:>4}", count);
            }
            println!();
        }
        println!();
    }

    let misclassified: Vec<_> = report.rows.iter().filter(|r| !r.correct).collect();
    if !misclassified.is_empty() {
        println!("  Misclassified rows:");
        for row in misclassified {
            println!(
                "    row {:<4} expected {:<30} got {}",
                row.index,
                row.expected.to_string(),
                row.predicted
            );
        }
        println!();
    }
}
