//! Mathematical utilities for the solver

/// Weighted Shannon entropy
pub mod entropy;
/// Deterministic seeded pseudo-random generators
pub mod random;
