//! Human-readable report assembly for an analysis result.
//!
//! Presentation only: consumes [`AnalysisResult`] and produces text. The
//! structured result is the contract; anything here can change without
//! touching the engine.

use crate::analysis::{AnalysisResult, Limitation};

/// Render a full text report.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("📊 Analysis Result\n\n");

    match (&result.choice, &result.limitation) {
        (Some(choice), _) => {
            out.push_str(&format!("Selected test: {choice}\n"));
        }
        (None, Some(Limitation::UnsupportedConfiguration { detail })) => {
            out.push_str("⚠️  No supported test for this configuration\n");
            out.push_str(&format!("Reason: {detail}\n"));
        }
        (None, _) => {}
    }

    match result.p_value {
        Some(p) => {
            out.push_str(&format!("P-value: {p:.4}\n"));
            if let Some(label) = result.label {
                out.push_str(&format!("Significance: {label}\n"));
            }
        }
        None => {
            if let Some(Limitation::TestNotComputable { detail }) = &result.limitation {
                out.push_str(&format!("⚠️  Test not computable: {detail}\n"));
            }
        }
    }

    if let (Some(_), Some(Limitation::TestNotComputable { detail })) =
        (result.p_value, &result.limitation)
    {
        // Omnibus p exists but the post-hoc step failed.
        out.push_str(&format!("⚠️  Post-hoc not computable: {detail}\n"));
    }

    if let Some(table) = &result.post_hoc {
        out.push_str(&format!("\nPost-hoc ({}):\n", table.method));
        for c in &table.comparisons {
            let marker = if c.significant { "significant" } else { "ns" };
            out.push_str(&format!(
                "  {} vs {}: p = {:.4} ({marker})\n",
                c.group_a, c.group_b, c.adjusted_p
            ));
        }
    }

    out.push_str("\nDiagnostics:\n");
    for check in &result.diagnostics.normality {
        match check.p_value {
            Some(p) => out.push_str(&format!("  {} normality (p): {p:.4}\n", check.group)),
            None => out.push_str(&format!("  {} normality: not computable\n", check.group)),
        }
    }
    match result.diagnostics.variance_p_value {
        Some(p) => out.push_str(&format!("  variance homogeneity (p): {p:.4}\n")),
        None => out.push_str("  variance homogeneity: not computable\n"),
    }
    out.push_str("  (p > 0.05 means the assumption holds)\n");

    out
}
