#![deny(unsafe_code)]

mod error;
mod reader;

pub use error::{IngestError, Result};
pub use reader::{IngestOptions, read_flux_table, read_flux_table_from_reader};
