//! as2js parser crate.
//!
//! This crate provides the lexer, the node arena and the parser for as2js
//! source code:
//! - [`Input`]: code point sources, with [`StringInput`] for in-memory text
//! - [`Lexer`]: turns code points into token nodes
//! - [`Tree`]: the arena holding every [`Node`] of a compilation unit
//! - [`Parser`]: builds a `PROGRAM` tree out of the token stream
//!
//! # Example
//!
//! ```
//! use as2js_core::Options;
//! use as2js_parser::{NodeType, Parser, StringInput};
//!
//! let output = Parser::new(StringInput::new("var a = 1 + 2;"), Options::empty()).parse();
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.tree.node_type(output.root).unwrap(), NodeType::Program);
//! ```

pub mod input;
pub mod lexer;
pub mod node;
pub mod parser;

pub use input::{Input, StringInput};
pub use lexer::Lexer;
pub use node::{
    Attribute, AttributeGroup, AttributeSet, Flag, FlagSet, Link, Node, NodeError, NodeId,
    NodeResult, NodeType, Tree, TreeDisplay, Value,
};
pub use parser::{ParseOutput, Parser};
