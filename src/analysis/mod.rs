//! Input model preparation

/// Example grid compilation and model merging
pub mod model;
