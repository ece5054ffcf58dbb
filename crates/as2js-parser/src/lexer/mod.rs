//! Lexical analysis for as2js source.

mod char_class;
mod keyword;
mod lexer;

pub use char_class::{CharClass, char_class};
pub use keyword::lookup_keyword;
pub use lexer::Lexer;
