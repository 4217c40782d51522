//! TSTAI UI - Console presentation layer
//!
//! Renders run progress, the summary and the credential commands' messages
//! for a terminal. Formatting lives in pure functions; [`ConsoleReporter`]
//! writes them as the run advances.

pub mod auth;
mod console;
pub mod format;

pub use console::ConsoleReporter;
