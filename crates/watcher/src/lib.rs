//! Input settling for Memoscope
//!
//! This crate watches a rapidly changing value (a search box being typed
//! into) and only lets it through once it has stopped changing:
//! - Configurable quiet period (300ms for search, 500ms default)
//! - Total cancellation of superseded timers
//! - Observer notification through a `tokio::sync::watch` channel

pub mod debounce;

pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD, SEARCH_QUIET_PERIOD};
