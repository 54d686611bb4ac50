//! Integration tests for the trace-driven scheduler: end-to-end scenarios and
//! quantified invariants.

/// Property-based invariants that should hold for any config and trace.
pub mod properties;
/// Boundary-case traces run as an `rstest` fixture table.
pub mod boundary_cases;
