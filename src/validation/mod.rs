//! Validation functionality
//!
//! Provides diagnostics for normalized schemas:
//! - Navigation properties whose association or roles do not resolve
//! - Projected edges pointing outside the schema
//! - Entity types without relationships

pub mod relationships;

pub use relationships::{DiagnosticsReport, SchemaDiagnostics, UnresolvedNavigation, UnresolvedReason};
