//! Parser infrastructure.
//!
//! Provides the [`Parser`] struct with token navigation, error reporting and
//! the entry points. The grammar itself is split by area:
//! - `directive`: directive lists, attributes, labels and blocks
//! - `stmt_parser`: control-flow statements
//! - `decl_parser`: variables, classes, enums, packages and imports
//! - `function`: function declarations and parameter lists
//! - `expr_parser`: the expression precedence ladder
//! - `pragma`: `use` pragmas that change the options while parsing
//!
//! Syntax errors never stop the parser. Each one is reported to the
//! diagnostics sink and parsing resumes, either as if the missing token was
//! present or after skipping to the next synchronization point.

mod decl_parser;
mod directive;
mod expr_parser;
mod function;
mod pragma;
mod stmt_parser;

use as2js_core::{Diagnostic, Diagnostics, ErrorCode, MessageSink, Options, Position};
use log::{debug, trace};

use crate::input::Input;
use crate::lexer::Lexer;
use crate::node::{NodeError, NodeId, NodeType, Tree};

/// What a parse produced.
///
/// The tree owns every node reachable from `root`; nodes the parser created
/// but did not keep have already been collected.
#[derive(Debug)]
pub struct ParseOutput {
    pub tree: Tree,
    pub root: NodeId,
    pub diagnostics: Diagnostics,
}

/// The parser for as2js source code.
///
/// The parser keeps one token of lookahead and a small stack of pushed back
/// tokens used to resolve the few ambiguous prefixes of the grammar (labels,
/// attributes, the `()` operator name).
pub struct Parser<I> {
    lexer: Lexer<I>,
    tree: Tree,
    /// Options in effect; pragmas may change them while parsing.
    options: Options,
    /// Current token.
    token: NodeId,
    /// Tokens pushed back, last in first out.
    pending: Vec<NodeId>,
    diagnostics: Diagnostics,
    /// Functions whose body is being parsed, innermost last.
    functions: Vec<NodeId>,
}

impl<I: Input> Parser<I> {
    pub fn new(input: I, options: Options) -> Self {
        let mut tree = Tree::new();
        let mut lexer = Lexer::new(input, options);
        let token = lexer.next_token(&mut tree);
        let mut parser = Self {
            lexer,
            tree,
            options,
            token,
            pending: Vec::new(),
            diagnostics: Diagnostics::new(),
            functions: Vec::new(),
        };
        parser.drain_lexer_messages();
        parser
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Parse a whole compilation unit into a `PROGRAM` node.
    pub fn parse(mut self) -> ParseOutput {
        #[cfg(feature = "profiling")]
        profiling::scope!("Parser::parse");

        debug!("parsing {}", self.lexer.position().filename());
        let root = self.new_node(NodeType::Program);
        if !self.is_eof() {
            let result = self
                .directive_list(true)
                .and_then(|list| self.tree.append_child(root, list));
            if let Err(err) = result {
                self.internal_error(err);
            }
        }
        self.finish(root)
    }

    /// Parse a single expression. Tokens left after it are reported.
    pub fn parse_expression(mut self) -> ParseOutput {
        let root = match self.expression() {
            Ok(root) => root,
            Err(err) => {
                self.internal_error(err);
                self.new_node(NodeType::Unknown)
            }
        };
        if !self.is_eof() {
            let found = self.peek();
            self.error(
                ErrorCode::InvalidExpression,
                format!("unexpected token {} found after the expression", found),
            );
        }
        self.finish(root)
    }

    fn finish(mut self, root: NodeId) -> ParseOutput {
        self.drain_tree_messages();
        let freed = self.tree.collect_garbage(&[root]);
        debug!(
            "parse done: {} nodes kept, {} dropped, {} diagnostics",
            self.tree.len(),
            freed,
            self.diagnostics.len()
        );
        ParseOutput {
            tree: self.tree,
            root,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================
    // Token Navigation
    // =========================================

    /// Type of the current token.
    fn peek(&self) -> NodeType {
        self.tree.node_type(self.token).unwrap_or(NodeType::Eof)
    }

    fn check(&self, node_type: NodeType) -> bool {
        self.peek() == node_type
    }

    fn is_eof(&self) -> bool {
        self.check(NodeType::Eof)
    }

    /// Return the current token and move to the next one.
    fn advance(&mut self) -> NodeId {
        let next = match self.pending.pop() {
            Some(token) => token,
            None => {
                let token = self.lexer.next_token(&mut self.tree);
                self.drain_lexer_messages();
                token
            }
        };
        trace!("advance to {}", self.tree.node_type(next).unwrap_or(NodeType::Eof));
        std::mem::replace(&mut self.token, next)
    }

    /// Consume the current token if it has the given type.
    fn eat(&mut self, node_type: NodeType) -> bool {
        if self.check(node_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Make `token` current again; the current token comes next.
    fn unget(&mut self, token: NodeId) {
        self.pending.push(self.token);
        self.token = token;
    }

    /// String value of the current token, empty when it has none.
    fn token_string(&self) -> String {
        self.tree
            .string(self.token)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Whether the current token is the identifier `name`.
    fn check_contextual(&self, name: &str) -> bool {
        self.check(NodeType::Identifier) && self.tree.string(self.token).is_ok_and(|s| s == name)
    }

    fn position(&self) -> Position {
        self.tree
            .position(self.token)
            .cloned()
            .unwrap_or_else(|_| self.lexer.position().clone())
    }

    /// Create a node at the position of the current token.
    fn new_node(&mut self, node_type: NodeType) -> NodeId {
        let position = self.position();
        self.tree.create(node_type, position)
    }

    fn is_set(&self, option: Options) -> bool {
        self.options.contains(option)
    }

    fn set_options(&mut self, options: Options) {
        debug!("options changed to {:?}", options);
        self.options = options;
        self.lexer.set_options(options);
    }

    // =========================================
    // Error Handling
    // =========================================

    /// Report a syntax error at the current token.
    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let position = self.position();
        self.error_at(position, code, message);
    }

    fn warning(&mut self, code: ErrorCode, message: impl Into<String>) {
        let position = self.position();
        self.diagnostics.report(Diagnostic::warning(code, position, message));
    }

    fn error_at(&mut self, position: Position, code: ErrorCode, message: impl Into<String>) {
        self.diagnostics.report(Diagnostic::error(code, position, message));
    }

    /// Report a broken node contract. Parsing goes on.
    fn internal_error(&mut self, err: NodeError) {
        let position = self.position();
        self.diagnostics.report(Diagnostic::fatal(
            ErrorCode::InternalError,
            position,
            err.to_string(),
        ));
    }

    /// Consume `node_type` or report `message`.
    fn expect(&mut self, node_type: NodeType, code: ErrorCode, message: &str) -> bool {
        if self.eat(node_type) {
            true
        } else {
            self.error(code, message);
            false
        }
    }

    /// Skip tokens up to a synchronization point: after the next `;`, or
    /// before a `}`, an `else` or the end of the input.
    fn synchronize(&mut self) {
        loop {
            match self.peek() {
                NodeType::Semicolon => {
                    self.advance();
                    return;
                }
                NodeType::CloseCurvlyBracket | NodeType::Else | NodeType::Eof => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn drain_lexer_messages(&mut self) {
        for message in self.lexer.take_messages() {
            self.diagnostics.report(message);
        }
    }

    fn drain_tree_messages(&mut self) {
        // the tree already logged these when it refused the attribute
        for message in self.tree.take_messages() {
            self.diagnostics.push(message);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::input::StringInput;

    #[test]
    fn empty_input_gives_an_empty_program() {
        let output = parse("");
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.tree.node_type(output.root).unwrap(), NodeType::Program);
        assert_eq!(output.tree.children_count(output.root).unwrap(), 0);
        assert_eq!(output.tree.len(), 1);
    }

    #[test]
    fn program_holds_one_directive_list() {
        let output = parse("a; b; c;");
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.tree.children_count(output.root).unwrap(), 1);
        assert_eq!(directives(&output).len(), 3);
    }

    #[test]
    fn unused_tokens_are_collected() {
        let output = parse("(((a)));");
        // PROGRAM, DIRECTIVE_LIST and the identifier
        assert_eq!(output.tree.len(), 3);
    }

    #[test]
    fn lexer_errors_are_forwarded() {
        let output = parse("var s = \"abc");
        assert_eq!(codes(&output), vec![ErrorCode::UnterminatedString]);
    }

    #[test]
    fn parse_expression_entry_point() {
        let output = parse_expression_with("1 + 2 * 3", Options::empty());
        assert!(output.diagnostics.is_empty());
        assert_eq!(
            output.tree.display(output.root).to_string(),
            "ADD\n  INT64 1\n  MULTIPLY\n    INT64 2\n    INT64 3\n"
        );

        let output = parse_expression_with("a b", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::InvalidExpression]);
    }

    #[test]
    fn unget_restores_order() {
        let mut parser = Parser::new(StringInput::new("a b c"), Options::empty());
        let a = parser.advance();
        let b = parser.advance();
        assert_eq!(parser.token_string(), "c");
        parser.unget(b);
        parser.unget(a);
        assert_eq!(parser.token_string(), "a");
        parser.advance();
        assert_eq!(parser.token_string(), "b");
        parser.advance();
        assert_eq!(parser.token_string(), "c");
        parser.advance();
        assert!(parser.is_eof());
    }

    #[test]
    fn synchronize_stops_at_recovery_points() {
        let mut parser = Parser::new(StringInput::new("a b ; c } d"), Options::empty());
        parser.synchronize();
        assert_eq!(parser.token_string(), "c");
        parser.synchronize();
        assert!(parser.check(NodeType::CloseCurvlyBracket));
    }

    #[test]
    fn every_error_is_a_diagnostic_not_a_panic() {
        for source in [
            "(", "[", "{", ")", "]", "}", "a +", "if", "for (", "function", "class", "var",
            "switch (a) {", "x = { a: ", "use", "import", "a ? b", "new", "try", "catch",
            "case", "default", "do a;", "enum {", "package a.", "...", "::", "else",
        ] {
            let output = parse_with(source, Options::all());
            assert!(!output.diagnostics.has_fatal(), "{:?}: {}", source, output.diagnostics);
            assert!(!output.diagnostics.is_empty(), "{:?} gave no diagnostic", source);
        }
    }
}
