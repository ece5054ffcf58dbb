use as2js_core::{Diagnostics, OptionsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the checked entry points.
///
/// The lenient entry points never fail; they hand the diagnostics back with
/// the tree instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The option list given as text named an unknown option.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The source has syntax errors.
    #[error("{} error(s) found while parsing:\n{diagnostics}", .diagnostics.len())]
    Syntax { diagnostics: Diagnostics },
}

impl Error {
    /// Diagnostics of a syntax error, if this is one.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Syntax { diagnostics } => Some(diagnostics),
            Error::Options(_) => None,
        }
    }
}
