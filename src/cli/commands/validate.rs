//! Validate command implementation

use crate::cli::commands::load_schemas;
use crate::cli::error::CliError;
use crate::import::NormalizeOptions;
use crate::validation::{DiagnosticsReport, SchemaDiagnostics};

/// Handle the validate command
///
/// Prints the diagnostics of every loaded schema and fails when any of them
/// is not clean.
pub fn handle_validate(input: &str, options: NormalizeOptions) -> Result<(), CliError> {
    let schemas = load_schemas(input, options)?;
    let diagnostics = SchemaDiagnostics::new();

    let mut problems = 0;
    for schema in &schemas {
        let report = diagnostics.analyze(schema);
        problems += report.unresolved_navigation.len() + report.dangling_edges.len();
        print!(
            "{}",
            render_report(schema.namespace.as_deref().unwrap_or("<unnamed schema>"), &report)
        );
    }

    if problems > 0 {
        return Err(CliError::DiagnosticsFailed(problems));
    }

    println!("Validation successful");
    Ok(())
}

/// Human-readable diagnostics for one schema
pub fn render_report(name: &str, report: &DiagnosticsReport) -> String {
    let mut out = format!("{}\n", name);

    for unresolved in &report.unresolved_navigation {
        out.push_str(&format!(
            "  ❌ {}.{}: {}\n",
            unresolved.entity_type, unresolved.navigation_property, unresolved.reason
        ));
    }
    for edge in &report.dangling_edges {
        out.push_str(&format!(
            "  ❌ edge {} -> {} leaves the schema\n",
            edge.from, edge.to
        ));
    }
    for entity in &report.isolated_entity_types {
        out.push_str(&format!("  ⚠️  {} has no relationships\n", entity));
    }
    if report.is_clean() {
        out.push_str("  ✅ all navigation properties resolve\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{UnresolvedNavigation, UnresolvedReason};

    #[test]
    fn report_lists_problems() {
        let report = DiagnosticsReport {
            unresolved_navigation: vec![UnresolvedNavigation {
                entity_type: "Customer".to_string(),
                navigation_property: "Ghost".to_string(),
                reason: UnresolvedReason::UnknownAssociation,
            }],
            dangling_edges: Vec::new(),
            isolated_entity_types: vec!["Region".to_string()],
        };
        let out = render_report("Demo", &report);
        assert!(out.contains("Customer.Ghost: unknown association"));
        assert!(out.contains("Region has no relationships"));
        assert!(!out.contains("all navigation properties resolve"));
    }
}
