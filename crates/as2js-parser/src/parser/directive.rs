//! Directive lists, attributes, labels and blocks.

use as2js_core::ErrorCode;
use log::trace;

use super::Parser;
use super::decl_parser::VariableKind;
use crate::input::Input;
use crate::node::{Flag, Link, NodeId, NodeResult, NodeType};

/// Tokens that can be written as attributes in front of a directive.
fn is_attribute_token(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Identifier | NodeType::Public | NodeType::Private | NodeType::True | NodeType::False
    )
}

/// Tokens that turn the last pending attribute back into the start of an
/// expression or a label.
fn ends_attributes(node_type: NodeType) -> bool {
    use NodeType::*;
    node_type.is_assignment()
        || matches!(
            node_type,
            Eof | CloseCurvlyBracket | Colon | Comma | Semicolon | OpenParenthesis
                | OpenSquareBracket | Conditional | Member | Scope | Range | Rest | Increment
                | Decrement | As | In | Is | Instanceof | Implements | Add | Subtract | Multiply
                | Divide | Modulo | Power | BitwiseAnd | BitwiseOr | BitwiseXor | LogicalAnd
                | LogicalOr | LogicalXor | Equal | NotEqual
                | StrictlyEqual | StrictlyNotEqual | Compare | SmartMatch | Match | NotMatch
                | Less | LessEqual | Greater | GreaterEqual | Minimum | Maximum | ShiftLeft
                | ShiftRight | ShiftRightUnsigned | RotateLeft | RotateRight
        )
}

/// Directives an attribute list may be attached to.
fn accepts_attributes(node_type: NodeType) -> bool {
    use NodeType::*;
    matches!(
        node_type,
        Class | Interface | Enum | Function | Var | Namespace | Import | Use | Package | DirectiveList
    )
}

/// Tokens that can start an expression statement.
fn starts_expression(node_type: NodeType) -> bool {
    use NodeType::*;
    node_type.is_literal()
        || matches!(
            node_type,
            Identifier | Videntifier | This | Super | Private | Public | New | Delete | Increment
                | Decrement | Void | Typeof | Add | Subtract | LogicalNot | BitwiseNot | SmartMatch
                | NotMatch | OpenParenthesis | OpenSquareBracket
        )
}

impl<I: Input> Parser<I> {
    /// Parse directives up to the end of the input, or up to the closing
    /// `}` of the enclosing block which is left for the caller.
    pub(super) fn directive_list(&mut self, top_level: bool) -> NodeResult<NodeId> {
        let list = self.new_node(NodeType::DirectiveList);
        loop {
            match self.peek() {
                NodeType::Eof => break,
                NodeType::Semicolon => {
                    self.advance();
                }
                NodeType::CloseCurvlyBracket if !top_level => break,
                NodeType::CloseCurvlyBracket => {
                    self.error(ErrorCode::CurvlyBracketsExpected, "unexpected '}' outside of any block");
                    self.advance();
                }
                _ => {
                    if let Some(directive) = self.directive(list) {
                        self.tree.append_child(list, directive)?;
                    }
                }
            }
        }
        Ok(list)
    }

    /// Parse one directive. Always consumes at least one token.
    pub(super) fn directive(&mut self, list: NodeId) -> Option<NodeId> {
        match self.directive_inner(list) {
            Ok(node) => node,
            Err(err) => {
                self.internal_error(err);
                self.synchronize();
                None
            }
        }
    }

    fn directive_inner(&mut self, list: NodeId) -> NodeResult<Option<NodeId>> {
        use NodeType::*;

        let mut attributes = self.attributes()?;
        let lone_final = self.is_lone_final(attributes)?;
        let found = self.peek();
        trace!("directive starting with {}", found);

        let (node, needs_semicolon) = match found {
            Use => {
                self.advance();
                if self.eat(Namespace) {
                    (Some(self.use_namespace()?), true)
                } else {
                    self.pragma()?;
                    (None, true)
                }
            }
            Package => {
                self.advance();
                (Some(self.package()?), false)
            }
            Import => {
                let token = self.advance();
                (Some(self.import(token)?), true)
            }
            Class | Interface => {
                let token = self.advance();
                (Some(self.class_declaration(token)?), false)
            }
            Enum => {
                let token = self.advance();
                (Some(self.enum_declaration(token)?), false)
            }
            Function => {
                let token = self.advance();
                (Some(self.function(token, false)?), false)
            }
            Const => {
                self.advance();
                self.eat(Var);
                let var = self.variable(VariableKind::Const)?;
                self.declare_variables(list, var)?;
                (Some(var), true)
            }
            Var => {
                self.advance();
                let kind = if self.take_final(&mut attributes)? {
                    VariableKind::Final
                } else {
                    VariableKind::Var
                };
                let var = self.variable(kind)?;
                self.declare_variables(list, var)?;
                (Some(var), true)
            }
            Identifier if lone_final => {
                // `final name = value;`
                if let Some(attrs) = attributes.take() {
                    self.tree.release(attrs)?;
                }
                let var = self.variable(VariableKind::Final)?;
                self.declare_variables(list, var)?;
                (Some(var), true)
            }
            OpenCurvlyBracket => {
                self.advance();
                (Some(self.block()?), false)
            }
            Semicolon => {
                // empty statement used as a body
                self.advance();
                (None, false)
            }
            Break | Continue => {
                let token = self.advance();
                (Some(self.break_continue(token)?), true)
            }
            Case => {
                let token = self.advance();
                (Some(self.case_directive(token)?), false)
            }
            Catch => {
                let token = self.advance();
                (Some(self.catch_directive(token)?), false)
            }
            Default => {
                let token = self.advance();
                (Some(self.default_directive(token)?), false)
            }
            Do => {
                let token = self.advance();
                (Some(self.do_directive(token)?), true)
            }
            For => {
                let token = self.advance();
                (Some(self.for_directive(token)?), false)
            }
            Try | Finally => {
                let token = self.advance();
                (Some(self.try_finally(token)?), false)
            }
            Goto => {
                let token = self.advance();
                (Some(self.goto_directive(token)?), true)
            }
            If => {
                let token = self.advance();
                (Some(self.if_directive(token)?), false)
            }
            Namespace => {
                let token = self.advance();
                (Some(self.namespace_block(token, &mut attributes)?), false)
            }
            Return => {
                let token = self.advance();
                (Some(self.return_directive(token)?), true)
            }
            Switch => {
                let token = self.advance();
                (Some(self.switch_directive(token)?), false)
            }
            Synchronized => {
                let token = self.advance();
                (Some(self.synchronized(token)?), false)
            }
            Throw => {
                let token = self.advance();
                (Some(self.throw_directive(token)?), true)
            }
            With | While => {
                let token = self.advance();
                (Some(self.with_while(token)?), false)
            }
            Yield => {
                let token = self.advance();
                (Some(self.yield_directive(token)?), true)
            }
            Identifier | Public | Private => {
                let token = self.advance();
                if self.eat(Colon) {
                    (Some(self.label(token)?), false)
                } else {
                    self.unget(token);
                    (Some(self.expression()?), true)
                }
            }
            _ if starts_expression(found) => (Some(self.expression()?), true),
            Debugger | Else | Extends | Implements | In | Instanceof | Is | As => {
                self.error(
                    ErrorCode::InvalidKeyword,
                    format!("unexpected keyword '{}'", found),
                );
                self.advance();
                (None, false)
            }
            _ => {
                self.error(
                    ErrorCode::InvalidOperator,
                    format!("unexpected operator '{}'", found),
                );
                self.advance();
                (None, false)
            }
        };

        if let Some(attrs) = attributes {
            match node {
                Some(node) if accepts_attributes(self.tree.node_type(node)?) => {
                    self.tree.set_link(node, Link::Attributes, attrs)?;
                }
                _ => {
                    let position = self.tree.position(attrs)?.clone();
                    self.error_at(
                        position,
                        ErrorCode::InvalidAttributes,
                        "no attributes were expected here (statements, expressions and pragmas cannot be annotated)",
                    );
                    self.tree.release(attrs)?;
                }
            }
        }

        if needs_semicolon {
            self.end_of_directive();
        }
        Ok(node)
    }

    /// Accept the `;` that ends a directive.
    fn end_of_directive(&mut self) {
        match self.peek() {
            NodeType::Semicolon => {
                self.advance();
            }
            NodeType::CloseCurvlyBracket | NodeType::Eof => {}
            found => {
                self.error(
                    ErrorCode::SemicolonExpected,
                    format!("';' was expected (current token: '{}')", found),
                );
                self.synchronize();
            }
        }
    }

    // =========================================
    // Attributes
    // =========================================

    /// Collect the attributes written in front of a directive.
    ///
    /// The last candidate is left as the current token when an operator or
    /// punctuation follows it, so that it can start an expression or a label.
    pub(super) fn attributes(&mut self) -> NodeResult<Option<NodeId>> {
        let mut list = None;
        while is_attribute_token(self.peek()) {
            let token = self.advance();
            if ends_attributes(self.peek()) {
                self.unget(token);
                break;
            }
            let attrs = match list {
                Some(attrs) => attrs,
                None => {
                    let attrs = self.tree.create_replacement(token, NodeType::Attributes)?;
                    list = Some(attrs);
                    attrs
                }
            };
            self.tree.append_child(attrs, token)?;
        }
        Ok(list)
    }

    /// Whether the attribute list is exactly `final`.
    fn is_lone_final(&self, attributes: Option<NodeId>) -> NodeResult<bool> {
        let Some(attrs) = attributes else {
            return Ok(false);
        };
        let children = self.tree.children(attrs)?;
        Ok(children.len() == 1 && self.is_final_token(children[0])?)
    }

    fn is_final_token(&self, token: NodeId) -> NodeResult<bool> {
        Ok(self.tree.node_type(token)? == NodeType::Identifier && self.tree.string(token)? == "final")
    }

    /// Remove `final` from the attributes of a `var` directive.
    fn take_final(&mut self, attributes: &mut Option<NodeId>) -> NodeResult<bool> {
        let Some(attrs) = *attributes else {
            return Ok(false);
        };
        let mut offset = None;
        for (index, child) in self.tree.children(attrs)?.iter().enumerate() {
            if self.is_final_token(*child)? {
                offset = Some(index);
                break;
            }
        }
        let Some(index) = offset else {
            return Ok(false);
        };
        self.tree.delete_child(attrs, index)?;
        if self.tree.children_count(attrs)? == 0 {
            self.tree.release(attrs)?;
            *attributes = None;
        }
        Ok(true)
    }

    /// Register the variables of a `VAR` node with the enclosing list.
    fn declare_variables(&mut self, list: NodeId, var: NodeId) -> NodeResult<()> {
        let variables: Vec<NodeId> = self.tree.children(var)?.to_vec();
        for variable in variables {
            self.tree.add_variable(list, variable)?;
        }
        self.tree.set_flag(list, Flag::DirectiveListNewVariables, true)
    }

    // =========================================
    // Labels and blocks
    // =========================================

    /// Turn `token` into a label. The `:` was already consumed.
    fn label(&mut self, token: NodeId) -> NodeResult<NodeId> {
        self.tree.to_identifier(token)?;
        self.tree.to_label(token)?;
        if let Some(&function) = self.functions.last() {
            let name = self.tree.string(token)?.to_string();
            if self.tree.find_label(function, &name)?.is_some() {
                let position = self.tree.position(token)?.clone();
                self.error_at(
                    position,
                    ErrorCode::InvalidLabel,
                    format!("label '{}' is already defined in this function", name),
                );
            } else {
                self.tree.add_label(function, token)?;
            }
        }
        Ok(token)
    }

    /// Parse the inside of a block. The `{` was already consumed.
    pub(super) fn block(&mut self) -> NodeResult<NodeId> {
        let list = self.directive_list(false)?;
        self.expect(
            NodeType::CloseCurvlyBracket,
            ErrorCode::CurvlyBracketsExpected,
            "'}' expected to close a block",
        );
        Ok(list)
    }

    /// Parse the body of a control-flow statement.
    pub(super) fn body(&mut self, statement: NodeType) -> NodeResult<NodeId> {
        if self.eat(NodeType::OpenCurvlyBracket) {
            return self.block();
        }
        if self.is_set(as2js_core::Options::FORCED_BLOCK) {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                format!("'{{' expected to open the '{}' block", statement),
            );
        }
        let list = self.new_node(NodeType::DirectiveList);
        match self.peek() {
            NodeType::Eof => {
                self.error(
                    ErrorCode::UnexpectedEof,
                    format!("unexpected end of input in the '{}' statement", statement),
                );
            }
            NodeType::CloseCurvlyBracket => {
                self.error(
                    ErrorCode::CurvlyBracketsExpected,
                    format!("a directive was expected before '}}' in the '{}' statement", statement),
                );
            }
            _ => {
                if let Some(directive) = self.directive(list) {
                    self.tree.append_child(list, directive)?;
                }
            }
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::{ErrorCode, Options};

    use crate::node::{Flag, Link, NodeType};

    #[test]
    fn attributes_are_linked_to_declarations() {
        let output = parse("public static function f() {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let function = directives(&output)[0];
        assert_eq!(output.tree.node_type(function).unwrap(), NodeType::Function);
        let attrs = output.tree.link(function, Link::Attributes).unwrap().unwrap();
        assert_eq!(
            output.tree.display(attrs).to_string(),
            "ATTRIBUTES\n  PUBLIC\n  IDENTIFIER \"static\"\n"
        );
    }

    #[test]
    fn attributes_on_statements_are_dropped() {
        let output = parse("static if (a) b;");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidAttributes]);
        let node = directives(&output)[0];
        assert_eq!(output.tree.node_type(node).unwrap(), NodeType::If);
        assert_eq!(output.tree.link(node, Link::Attributes).unwrap(), None);
    }

    #[test]
    fn identifier_before_operator_starts_an_expression() {
        let output = parse("a = b;");
        assert!(output.diagnostics.is_empty());
        assert_eq!(
            dump_first(&output),
            "ASSIGNMENT\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn two_identifiers_make_an_annotated_expression() {
        let output = parse("a b;");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidAttributes]);
        assert_eq!(dump_first(&output), "IDENTIFIER \"b\"\n");
    }

    #[test]
    fn labels() {
        let output = parse("start: a;");
        assert!(output.diagnostics.is_empty());
        let list = directives(&output);
        assert_eq!(output.tree.display(list[0]).to_string(), "LABEL \"start\"\n");
        assert_eq!(output.tree.display(list[1]).to_string(), "IDENTIFIER \"a\"\n");
    }

    #[test]
    fn duplicate_labels_in_a_function() {
        let output = parse("function f() { again: a; again: b; }");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidLabel]);
        let function = directives(&output)[0];
        assert!(output.tree.find_label(function, "again").unwrap().is_some());
    }

    #[test]
    fn missing_semicolon_recovers_at_the_next_one() {
        let output = parse("a + b c; d;");
        assert_eq!(codes(&output), vec![ErrorCode::SemicolonExpected]);
        let list = directives(&output);
        assert_eq!(list.len(), 2);
        assert_eq!(output.tree.display(list[1]).to_string(), "IDENTIFIER \"d\"\n");
    }

    #[test]
    fn semicolon_may_be_replaced_by_a_closing_brace() {
        let output = parse("{ a }");
        assert!(output.diagnostics.is_empty());
        assert_eq!(dump_first(&output), "DIRECTIVE_LIST\n  IDENTIFIER \"a\"\n");
    }

    #[test]
    fn stray_operators_and_keywords() {
        let output = parse(") a; else b;");
        assert_eq!(
            codes(&output),
            vec![ErrorCode::InvalidOperator, ErrorCode::InvalidKeyword]
        );
        assert_eq!(directives(&output).len(), 2);
    }

    #[test]
    fn stray_closing_brace_at_top_level() {
        let output = parse("a; } b;");
        assert_eq!(codes(&output), vec![ErrorCode::CurvlyBracketsExpected]);
        assert_eq!(directives(&output).len(), 2);
    }

    #[test]
    fn unclosed_block_reports_once() {
        let output = parse("{ a; { b; }");
        assert_eq!(codes(&output), vec![ErrorCode::CurvlyBracketsExpected]);
    }

    #[test]
    fn var_declarations_are_registered_with_the_list() {
        let output = parse("var a, b; c;");
        assert!(output.diagnostics.is_empty());
        let list = output.tree.child(output.root, 0).unwrap();
        assert!(output.tree.flag(list, Flag::DirectiveListNewVariables).unwrap());
        assert_eq!(output.tree.variable_count(list).unwrap(), 2);
        assert_eq!(
            output.tree.string(output.tree.variable(list, 1).unwrap()).unwrap(),
            "b"
        );
    }

    #[test]
    fn final_variables() {
        let output = parse("final var a = 1; final b = 2;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        for var in list {
            let variable = output.tree.child(var, 0).unwrap();
            assert!(output.tree.flag(variable, Flag::VariableFinal).unwrap());
            assert_eq!(output.tree.link(var, Link::Attributes).unwrap(), None);
        }
    }

    #[test]
    fn forced_block_requires_braces() {
        let output = parse_with("while (a) b;", Options::FORCED_BLOCK);
        assert_eq!(codes(&output), vec![ErrorCode::CurvlyBracketsExpected]);
        assert_eq!(
            dump_first(&output),
            "WHILE\n  IDENTIFIER \"a\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"b\"\n"
        );

        let output = parse_with("while (a) { b; }", Options::FORCED_BLOCK);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn body_cut_by_end_of_input() {
        let output = parse("if (a)");
        assert_eq!(codes(&output), vec![ErrorCode::UnexpectedEof]);
        assert_eq!(
            dump_first(&output),
            "IF\n  IDENTIFIER \"a\"\n  DIRECTIVE_LIST\n"
        );
    }
}
