//! Text output formatter

use std::collections::HashMap;
use std::time::Duration;

use marklint_core::{LintResult, LintSummary};

use super::Failure;

pub fn output_text(
    results: &[LintResult],
    failures: &[Failure],
    summary: &LintSummary,
    timings: bool,
) {
    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        let path = result
            .path
            .as_ref()
            .map_or_else(|| "<input>".to_string(), |p| p.display().to_string());
        println!("\n{}:", path);
        for diag in &result.diagnostics {
            let location = diag.position.map_or_else(
                || "-".to_string(),
                |p| format!("{}:{}", p.start.line, p.start.column),
            );
            println!(
                "  {:<8} {:<7} {} [{}]",
                location,
                diag.severity.as_str(),
                diag.message,
                diag.rule_id
            );
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for failure in failures {
            eprintln!("  {}: {}", failure.path.display(), failure.error);
        }
    }

    println!();
    println!(
        "Checked {} files, found {} issues ({} errors, {} warnings)",
        summary.files_checked, summary.total_diagnostics, summary.errors, summary.warnings
    );

    if timings {
        output_timings(results);
    }
}

fn output_timings(results: &[LintResult]) {
    let mut total_duration = Duration::new(0, 0);
    let mut rule_timings: HashMap<&str, Duration> = HashMap::new();

    for result in results {
        for (rule, duration) in &result.timings {
            *rule_timings.entry(rule.as_str()).or_default() += *duration;
            total_duration += *duration;
        }
    }

    if rule_timings.is_empty() {
        return;
    }

    println!("\nPerformance Timings:");
    println!("{:<30} | {:<15} | {:<10}", "Rule", "Duration", "%");
    println!("{:-<30}-+-{:-<15}-+-{:-<10}", "", "", "");

    let mut sorted_timings: Vec<_> = rule_timings.into_iter().collect();
    sorted_timings.sort_by(|a, b| b.1.cmp(&a.1));

    for (rule, duration) in sorted_timings {
        let percentage = if total_duration.as_secs_f64() > 0.0 {
            (duration.as_secs_f64() / total_duration.as_secs_f64()) * 100.0
        } else {
            0.0
        };
        println!("{:<30} | {:<15?} | {:<10.1}%", rule, duration, percentage);
    }
    println!("{:-<30}-+-{:-<15}-+-{:-<10}", "", "", "");
    println!("{:<30} | {:<15?}", "Total", total_duration);
}
