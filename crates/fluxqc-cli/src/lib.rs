//! Library side of the `fluxqc` command line.

pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
