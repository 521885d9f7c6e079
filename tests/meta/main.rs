//! Structural checks on the test suite layout
