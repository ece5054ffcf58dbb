//! Error types shared by the front end crates.

use thiserror::Error;

/// Errors raised while building an [`Options`](crate::Options) set from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The name does not match any known option.
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },
}
