//! examples of usage of RustedRoots
/// Root finding examples: every method on the same equations, traces and comparisons
pub mod root_finding_examples;
/// Symbolic operations examples
pub mod symbolic_examples;
