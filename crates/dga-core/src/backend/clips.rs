use crate::backend::DiagnosisBackend;
use crate::classify::outcome::Diagnosis;
use crate::error::DgaError;
use crate::model::{ClassificationMode, FaultCategory, GasReading, RatioSet};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Adapter to an external CLIPS production-rule engine.
///
/// Boundary shim only: the reading is asserted as a `gases` fact, the rule
/// source decides everything else, and the resulting fact base is scanned
/// for a `(diagnosis ...)` fact. If the rules produce no diagnosis the
/// verdict is `Normal`. The requested mode is ignored; a CLIPS rule file
/// carries its own semantics, and the contract preserved here is only
/// five-gases-in, fault-label-out. No trace is produced.
pub struct ClipsBackend {
    rules_path: PathBuf,
}

impl ClipsBackend {
    pub fn new(rules_path: impl Into<PathBuf>) -> Self {
        ClipsBackend {
            rules_path: rules_path.into(),
        }
    }

    /// Check if the clips executable is available on the system.
    pub fn is_available() -> bool {
        let script = match write_script("(exit)\n") {
            Ok(s) => s,
            Err(_) => return false,
        };
        Command::new("clips")
            .arg("-f2")
            .arg(script.path())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn batch_script(&self, reading: &GasReading) -> String {
        format!(
            "(load \"{}\")\n\
             (reset)\n\
             (assert (gases (h2 {}) (ch4 {}) (c2h2 {}) (c2h4 {}) (c2h6 {})))\n\
             (run)\n\
             (facts)\n\
             (exit)\n",
            self.rules_path.display(),
            reading.h2,
            reading.ch4,
            reading.c2h2,
            reading.c2h4,
            reading.c2h6,
        )
    }
}

impl DiagnosisBackend for ClipsBackend {
    fn diagnose(
        &self,
        reading: &GasReading,
        mode: ClassificationMode,
    ) -> Result<Diagnosis, DgaError> {
        reading.validate()?;

        if let Err(e) = std::fs::metadata(&self.rules_path) {
            return Err(DgaError::RuleSourceLoad {
                path: self.rules_path.clone(),
                reason: e.to_string(),
            });
        }

        let script = write_script(&self.batch_script(reading))?;

        let output = Command::new("clips")
            .arg("-f2")
            .arg(script.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DgaError::ClipsNotFound
                } else {
                    DgaError::Backend {
                        backend: "clips".into(),
                        reason: e.to_string(),
                    }
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(DgaError::ClipsFailed { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);

        if let Some(tag) = first_error_line(&stdout) {
            return Err(DgaError::Backend {
                backend: "clips".into(),
                reason: tag.to_string(),
            });
        }

        let category = match parse_diagnosis_fact(&stdout) {
            Some(label) => FaultCategory::from_str_loose(&label)
                .ok_or(DgaError::UnknownCategory(label))?,
            None => FaultCategory::Normal,
        };

        Ok(Diagnosis {
            category,
            mode,
            ratios: RatioSet::of(reading),
            fired_rules: Vec::new(),
            scores: Vec::new(),
        })
    }

    fn backend_name(&self) -> &str {
        "clips"
    }
}

fn write_script(content: &str) -> Result<tempfile::NamedTempFile, DgaError> {
    let mut file = tempfile::NamedTempFile::new().map_err(|e| DgaError::Backend {
        backend: "clips".into(),
        reason: e.to_string(),
    })?;
    file.write_all(content.as_bytes())
        .map_err(|e| DgaError::Backend {
            backend: "clips".into(),
            reason: e.to_string(),
        })?;
    Ok(file)
}

/// Scan a CLIPS fact listing for the first `(diagnosis ...)` fact and
/// return its label, stripped of quotes.
///
/// Facts print as e.g. `f-3     (diagnosis "High Energy Arcing")`.
fn parse_diagnosis_fact(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        let line = line.trim();
        let start = match line.find("(diagnosis") {
            Some(i) => i + "(diagnosis".len(),
            None => continue,
        };
        let rest = &line[start..];
        let end = rest.find(')')?;
        let label = rest[..end].trim().trim_matches('"').trim();
        if !label.is_empty() {
            return Some(label.to_string());
        }
    }
    None
}

/// CLIPS reports rule-source problems as bracket-tagged lines on stdout
/// while still exiting 0 in batch mode; surface the first one.
fn first_error_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with('[') && l.contains(']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_diagnosis_fact_quoted() {
        let stdout = "\
f-0     (initial-fact)
f-1     (gases (h2 1000) (ch4 50) (c2h2 200) (c2h4 100) (c2h6 10))
f-2     (diagnosis \"High Energy Arcing\")
For a total of 3 facts.
";
        assert_eq!(
            parse_diagnosis_fact(stdout),
            Some("High Energy Arcing".to_string())
        );
    }

    #[test]
    fn test_parse_diagnosis_fact_symbol() {
        let stdout = "f-2     (diagnosis partial-discharge)\n";
        assert_eq!(
            parse_diagnosis_fact(stdout),
            Some("partial-discharge".to_string())
        );
    }

    #[test]
    fn test_no_diagnosis_fact_is_none() {
        let stdout = "f-0     (initial-fact)\nFor a total of 1 fact.\n";
        assert_eq!(parse_diagnosis_fact(stdout), None);
    }

    #[test]
    fn test_parsed_symbol_maps_to_category() {
        let label = parse_diagnosis_fact("f-2 (diagnosis partial-discharge)\n").unwrap();
        assert_eq!(
            FaultCategory::from_str_loose(&label),
            Some(FaultCategory::PartialDischarge)
        );
    }

    #[test]
    fn test_first_error_line_detected() {
        let stdout = "\
Loading rules...
[CSTRCPSR1] Expected the beginning of a construct.
";
        assert!(first_error_line(stdout).is_some());
    }

    #[test]
    fn test_clean_output_has_no_error_line() {
        assert!(first_error_line("f-0 (initial-fact)\n").is_none());
    }

    #[test]
    fn test_batch_script_asserts_all_five_gases() {
        let backend = ClipsBackend::new("/tmp/dga.clp");
        let reading = GasReading::new(dec!(180), dec!(90), dec!(2), dec!(40), dec!(50)).unwrap();
        let script = backend.batch_script(&reading);
        assert!(script.contains("(load \"/tmp/dga.clp\")"));
        assert!(script.contains("(h2 180)"));
        assert!(script.contains("(c2h6 50)"));
        assert!(script.contains("(facts)"));
    }

    #[test]
    fn test_missing_rule_source_is_load_error() {
        let backend = ClipsBackend::new("/nonexistent/rules.clp");
        let reading = GasReading::new(dec!(1), dec!(1), dec!(1), dec!(1), dec!(1)).unwrap();
        let err = backend
            .diagnose(&reading, ClassificationMode::Scoring)
            .unwrap_err();
        assert!(matches!(err, DgaError::RuleSourceLoad { .. }));
    }
}
