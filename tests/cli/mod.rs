//! End-to-end tests that drive the soccer-sql binary.

pub mod common;
pub mod run_test;
