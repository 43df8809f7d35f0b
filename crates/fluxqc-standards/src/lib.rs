#![deny(unsafe_code)]

pub mod catalog;
pub mod dictionary;
pub mod error;
pub mod paths;

pub use crate::catalog::{
    MESSAGE_FIELD_COUNT, MessageCatalog, MessageEntry, ReportKind, load_catalog,
    load_default_catalog,
};
pub use crate::dictionary::{load_default_dictionary, load_dictionary};
pub use crate::error::{CatalogError, DictionaryError};
pub use crate::paths::{RESOURCES_ENV_VAR, dictionary_path, messages_path, resources_root};
