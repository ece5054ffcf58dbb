//! Shared building blocks for the as2js front end.
//!
//! - [`Position`]: file/line/column/page/paragraph tracking
//! - [`Options`]: the language toggles consulted by the lexer and parser
//! - [`Diagnostic`], [`MessageSink`], [`Diagnostics`]: the message contract

pub mod error;
pub mod message;
pub mod options;
pub mod position;

pub use error::OptionsError;
pub use message::{Diagnostic, Diagnostics, ErrorCode, MessageSink, Severity};
pub use options::Options;
pub use position::Position;
