//! as2js: a front end for an extended ECMAScript/ActionScript dialect.
//!
//! The work is split over two crates re-exported here:
//! - [`as2js_core`]: positions, options and diagnostics
//! - [`as2js_parser`]: the input abstraction, the lexer, the node tree and
//!   the parser
//!
//! The functions of this crate are the one-call entry points.

mod error;

use log::debug;

pub use as2js_core::{
    Diagnostic, Diagnostics, ErrorCode, MessageSink, Options, OptionsError, Position, Severity,
};
pub use as2js_parser::{
    Attribute, AttributeGroup, Flag, Input, Lexer, Link, Node, NodeError, NodeId, NodeResult,
    NodeType, ParseOutput, Parser, StringInput, Tree, TreeDisplay, Value,
};
pub use error::{Error, Result};

/// A parsed compilation unit.
#[derive(Debug)]
pub struct ParsedProgram {
    /// Arena owning every node of the program.
    pub tree: Tree,
    /// The `PROGRAM` node.
    pub root: NodeId,
    /// Everything reported while lexing and parsing, in source order.
    pub diagnostics: Diagnostics,
}

impl ParsedProgram {
    /// Directives of the top-level `DIRECTIVE_LIST`; empty for an empty
    /// program.
    pub fn directives(&self) -> &[NodeId] {
        self.tree
            .children(self.root)
            .ok()
            .and_then(|children| children.first())
            .and_then(|list| self.tree.children(*list).ok())
            .unwrap_or(&[])
    }

    /// Indented dump of the whole tree.
    pub fn dump(&self) -> String {
        self.tree.display(self.root).to_string()
    }

    /// Turn syntax errors into an [`Error`]. Warnings alone pass.
    pub fn into_result(self) -> Result<Self> {
        if self.diagnostics.has_errors() {
            Err(Error::Syntax {
                diagnostics: self.diagnostics,
            })
        } else {
            Ok(self)
        }
    }
}

impl From<ParseOutput> for ParsedProgram {
    fn from(output: ParseOutput) -> Self {
        Self {
            tree: output.tree,
            root: output.root,
            diagnostics: output.diagnostics,
        }
    }
}

/// Parse `source` with every option off.
///
/// Parsing never fails: the program is returned with whatever diagnostics
/// were found, and holds a structurally valid tree even when the source is
/// broken.
///
/// # Example
///
/// ```
/// use as2js::{parse, NodeType};
///
/// let program = parse("var total = price * count;");
/// assert!(program.diagnostics.is_empty());
/// let var = program.directives()[0];
/// assert_eq!(program.tree.node_type(var).unwrap(), NodeType::Var);
/// ```
pub fn parse(source: &str) -> ParsedProgram {
    parse_with(source, Options::empty())
}

/// Parse `source` with the given options.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_with(source: &str, options: Options) -> ParsedProgram {
    Parser::new(StringInput::new(source), options).parse().into()
}

/// Parse a named source file. The name only shows in positions and in
/// `__FILE__`.
pub fn parse_file(filename: &str, source: &str, options: Options) -> ParsedProgram {
    Parser::new(StringInput::new(source).with_filename(filename), options)
        .parse()
        .into()
}

/// Parse `source` with options given by name, as in
/// `"extended_operators,strict"`, and fail on any syntax error.
///
/// # Example
///
/// ```
/// let program = as2js::parse_checked("a ** b;", "extended_operators").unwrap();
/// assert_eq!(program.directives().len(), 1);
///
/// assert!(as2js::parse_checked("a ** b;", "").is_err());
/// assert!(as2js::parse_checked("a;", "turbo").is_err());
/// ```
pub fn parse_checked(source: &str, options: &str) -> Result<ParsedProgram> {
    let options: Options = options.parse()?;
    debug!("checked parse with options [{}]", options);
    parse_with(source, options).into_result()
}

/// Parse a single expression; the `root` of the result is the expression
/// itself.
///
/// ```
/// let program = as2js::parse_expression("1 + 2 * 3", as2js::Options::empty()).unwrap();
/// assert_eq!(program.dump(), "ADD\n  INT64 1\n  MULTIPLY\n    INT64 2\n    INT64 3\n");
/// ```
pub fn parse_expression(source: &str, options: Options) -> Result<ParsedProgram> {
    ParsedProgram::from(Parser::new(StringInput::new(source), options).parse_expression())
        .into_result()
}
