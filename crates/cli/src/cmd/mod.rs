//! CLI command implementations

pub mod categories;
pub mod compare;
pub mod config;
pub mod evaluate;
pub mod generate;
pub mod session;
