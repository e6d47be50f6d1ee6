//! CLI library components for the `copo` report generator.

pub mod cli;
pub mod edits;
pub mod logging;
