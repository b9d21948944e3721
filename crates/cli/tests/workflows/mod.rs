//! Workflow integration tests
//!
//! Tests for complete workflows that exercise the binary end to end.

pub mod compare;
pub mod config;
pub mod evaluate;
pub mod session;
