//! JSON output formatter

use marklint_core::LintResult;
use miette::{IntoDiagnostic, Result};

use super::Failure;

pub fn output_json(results: &[LintResult], failures: &[Failure]) -> Result<()> {
    let files: Vec<_> = results
        .iter()
        .map(|r| {
            let mut file = serde_json::json!({
                "path": r.path.as_ref().map(|p| p.display().to_string()),
                "diagnostics": r.diagnostics,
            });
            if !r.timings.is_empty() {
                let timings: serde_json::Map<_, _> = r
                    .timings
                    .iter()
                    .map(|(rule, duration)| {
                        (rule.clone(), serde_json::json!(duration.as_secs_f64() * 1000.0))
                    })
                    .collect();
                file["timings_ms"] = serde_json::Value::Object(timings);
            }
            file
        })
        .collect();

    let errors: Vec<_> = failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "path": f.path.display().to_string(),
                "error": f.error.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "files": files,
        "failures": errors,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
