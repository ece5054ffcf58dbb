//! Control-flow statements.
//!
//! The keyword token of each statement becomes the statement node. Bodies
//! are always `DIRECTIVE_LIST` nodes, see [`Parser::body`].

use as2js_core::{ErrorCode, Options};

use super::Parser;
use super::decl_parser::VariableKind;
use crate::input::Input;
use crate::node::{Flag, Link, NodeId, NodeResult, NodeType};

impl<I: Input> Parser<I> {
    /// `( expr )` following a statement keyword.
    ///
    /// A missing `(` is reported once and the expression is read anyway.
    fn condition(&mut self, keyword: &str) -> NodeResult<NodeId> {
        let opened = self.eat(NodeType::OpenParenthesis);
        if !opened {
            self.error(
                ErrorCode::ParenthesisExpected,
                format!("'(' expected after the '{}' keyword", keyword),
            );
        }
        let expr = self.expression()?;
        if opened {
            self.expect(
                NodeType::CloseParenthesis,
                ErrorCode::ParenthesisExpected,
                &format!("')' expected to end the '{}' expression", keyword),
            );
        } else {
            self.eat(NodeType::CloseParenthesis);
        }
        Ok(expr)
    }

    fn ends_statement(&self) -> bool {
        matches!(
            self.peek(),
            NodeType::Semicolon | NodeType::CloseCurvlyBracket | NodeType::Eof
        )
    }

    // =========================================
    // Conditionals and loops
    // =========================================

    pub(super) fn if_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let condition = self.condition("if")?;
        self.tree.append_child(token, condition)?;
        let then = self.body(NodeType::If)?;
        self.tree.append_child(token, then)?;
        if self.eat(NodeType::Else) {
            let otherwise = self.body(NodeType::Else)?;
            self.tree.append_child(token, otherwise)?;
        }
        Ok(token)
    }

    /// `for ([var|const] init; cond; next)`, `for (x in obj)` and
    /// `for each (x in obj)`.
    pub(super) fn for_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let for_each = self.check_contextual("each");
        if for_each {
            self.advance();
        }
        if !self.eat(NodeType::OpenParenthesis) {
            self.error(
                ErrorCode::ParenthesisExpected,
                "'(' expected following the 'for' keyword",
            );
        }

        let mut got_in = false;
        match self.peek() {
            found @ (NodeType::Const | NodeType::Var) => {
                self.advance();
                let kind = if found == NodeType::Const {
                    self.eat(NodeType::Var);
                    self.tree.set_flag(token, Flag::ForConst, true)?;
                    VariableKind::Const
                } else {
                    VariableKind::Var
                };
                let var = self.variable(kind)?;
                self.tree.append_child(token, var)?;
            }
            NodeType::Semicolon => {
                let empty = self.new_node(NodeType::Empty);
                self.tree.append_child(token, empty)?;
            }
            _ => {
                let expr = self.expression()?;
                if self.tree.node_type(expr)? == NodeType::In
                    && self.tree.children_count(expr)? == 2
                    && self.check(NodeType::CloseParenthesis)
                {
                    // `x in obj` was read as one expression
                    let object = self.tree.remove_child(expr, 1)?;
                    let name = self.tree.remove_child(expr, 0)?;
                    self.tree.release(expr)?;
                    self.tree.append_child(token, name)?;
                    self.tree.append_child(token, object)?;
                    got_in = true;
                } else {
                    self.tree.append_child(token, expr)?;
                }
            }
        }

        if !got_in {
            if self.eat(NodeType::In) {
                let object = self.expression()?;
                self.tree.append_child(token, object)?;
                got_in = true;
            } else if self.eat(NodeType::Semicolon) {
                let condition = if self.check(NodeType::Semicolon) {
                    self.new_node(NodeType::Empty)
                } else {
                    self.expression()?
                };
                self.tree.append_child(token, condition)?;
                if self.eat(NodeType::Semicolon) {
                    let next = if self.check(NodeType::CloseParenthesis) {
                        self.new_node(NodeType::Empty)
                    } else {
                        self.expression()?
                    };
                    self.tree.append_child(token, next)?;
                } else {
                    self.error(
                        ErrorCode::SemicolonExpected,
                        "';' expected between the last two 'for' expressions",
                    );
                }
            } else {
                self.error(
                    ErrorCode::SemicolonExpected,
                    "';' or 'in' expected between the 'for' expressions",
                );
            }
        }
        if got_in {
            self.tree.set_flag(token, Flag::ForIn, true)?;
        }

        self.expect(
            NodeType::CloseParenthesis,
            ErrorCode::ParenthesisExpected,
            "')' expected to close the 'for' expressions",
        );

        if for_each {
            if got_in {
                self.tree.set_flag(token, Flag::ForForeach, true)?;
            } else {
                self.error(
                    ErrorCode::ParenthesisExpected,
                    "'for each()' only available with an enumeration for",
                );
            }
        }

        let body = self.body(NodeType::For)?;
        self.tree.append_child(token, body)?;
        Ok(token)
    }

    /// `while (cond) body` and `with (object) body`.
    pub(super) fn with_while(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let statement = self.tree.node_type(token)?;
        let keyword = if statement == NodeType::With {
            if self.is_set(Options::STRICT) {
                self.error(
                    ErrorCode::NotAllowedInStrictMode,
                    "'with' is not allowed in strict mode",
                );
            } else if !self.is_set(Options::ALLOW_WITH) {
                self.error(
                    ErrorCode::NotAllowed,
                    "'with' is not allowed, use the allow_with pragma to enable it",
                );
            }
            "with"
        } else {
            "while"
        };

        let condition = self.condition(keyword)?;
        self.tree.append_child(token, condition)?;
        let body = self.body(statement)?;
        self.tree.append_child(token, body)?;
        Ok(token)
    }

    pub(super) fn do_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let body = self.body(NodeType::Do)?;
        self.tree.append_child(token, body)?;
        if self.eat(NodeType::While) {
            let condition = self.condition("while")?;
            self.tree.append_child(token, condition)?;
        } else {
            self.error(
                ErrorCode::InvalidDo,
                "'while' expected after the block of a 'do' keyword",
            );
        }
        Ok(token)
    }

    // =========================================
    // Switch
    // =========================================

    /// `switch (expr) [with (op)] [attributes] { ... }`.
    pub(super) fn switch_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let expr = self.condition("switch")?;
        self.tree.append_child(token, expr)?;

        if self.eat(NodeType::With) {
            let opened = self.eat(NodeType::OpenParenthesis);
            let found = self.peek();
            match found {
                NodeType::StrictlyEqual
                | NodeType::Equal
                | NodeType::NotEqual
                | NodeType::StrictlyNotEqual
                | NodeType::Match
                | NodeType::In
                | NodeType::Is
                | NodeType::As
                | NodeType::Instanceof
                | NodeType::Less
                | NodeType::LessEqual
                | NodeType::Greater
                | NodeType::GreaterEqual
                | NodeType::Default => {
                    self.tree.set_switch_operator(token, found)?;
                    self.advance();
                }
                _ => {
                    self.error(
                        ErrorCode::InvalidOperator,
                        "unsupported operator for a 'switch() with()' expression",
                    );
                    if !matches!(found, NodeType::CloseParenthesis | NodeType::OpenCurvlyBracket) {
                        self.advance();
                    }
                }
            }
            if self.eat(NodeType::CloseParenthesis) {
                if !opened {
                    self.error(
                        ErrorCode::ParenthesisExpected,
                        "'(' was expected to start the 'switch() with()' expression",
                    );
                }
            } else if opened {
                self.error(
                    ErrorCode::ParenthesisExpected,
                    "')' expected to end the 'switch() with()' expression",
                );
            }
        }

        if let Some(attrs) = self.attributes()? {
            self.tree.set_link(token, Link::Attributes, attrs)?;
        }

        if self.eat(NodeType::OpenCurvlyBracket) {
            let list = self.block()?;
            self.tree.append_child(token, list)?;
        } else {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                "'{' expected after the 'switch' expression",
            );
        }
        Ok(token)
    }

    /// `case expr:` or, with extended statements, `case a .. b:`.
    pub(super) fn case_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let expr = self.expression()?;
        self.tree.append_child(token, expr)?;

        if matches!(self.peek(), NodeType::Range | NodeType::Rest) {
            if !self.is_set(Options::EXTENDED_STATEMENTS) {
                self.error(
                    ErrorCode::NotAllowed,
                    "ranges in a 'case' statement are only accepted when extended statements are allowed (use extended_statements;)",
                );
            }
            self.advance();
            let upper = self.expression()?;
            self.tree.append_child(token, upper)?;
        }

        self.expect(
            NodeType::Colon,
            ErrorCode::CaseLabel,
            "case expression expected to be followed by ':'",
        );
        Ok(token)
    }

    pub(super) fn default_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        self.expect(
            NodeType::Colon,
            ErrorCode::DefaultLabel,
            "default label expected to be followed by ':'",
        );
        Ok(token)
    }

    // =========================================
    // Exceptions
    // =========================================

    /// `try { ... }` and `finally { ... }`.
    pub(super) fn try_finally(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if self.eat(NodeType::OpenCurvlyBracket) {
            let list = self.block()?;
            self.tree.append_child(token, list)?;
        } else {
            let keyword = if self.tree.node_type(token)? == NodeType::Try {
                "try"
            } else {
                "finally"
            };
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                format!("'{{' expected after the '{}' keyword", keyword),
            );
        }
        Ok(token)
    }

    /// `catch (name [: type]) { ... }`.
    pub(super) fn catch_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if !self.eat(NodeType::OpenParenthesis) {
            self.error(
                ErrorCode::ParenthesisExpected,
                "'(' expected after the 'catch' keyword",
            );
            return Ok(token);
        }

        let parameters = self.parameter_list()?.map(|(parameters, _)| parameters);
        let count = match parameters {
            Some(parameters) => {
                self.tree.append_child(token, parameters)?;
                self.tree.children_count(parameters)?
            }
            None => 0,
        };
        match parameters {
            Some(parameters) if count == 1 => {
                let param = self.tree.child(parameters, 0)?;
                self.tree.set_flag(param, Flag::ParamCatch, true)?;
                let mut typed = false;
                for child in self.tree.children(param)?.to_vec() {
                    if self.tree.node_type(child)? == NodeType::Set {
                        self.error(
                            ErrorCode::InvalidCatch,
                            "'catch' parameters do not support initializers",
                        );
                    } else {
                        typed = true;
                    }
                }
                if typed {
                    self.tree.set_flag(token, Flag::CatchTyped, true)?;
                }
            }
            _ => {
                self.error(
                    ErrorCode::InvalidCatch,
                    "the 'catch' keyword expects exactly one parameter",
                );
            }
        }

        if !self.expect(
            NodeType::CloseParenthesis,
            ErrorCode::ParenthesisExpected,
            "')' expected to end the 'catch' parameter list",
        ) {
            return Ok(token);
        }
        if self.eat(NodeType::OpenCurvlyBracket) {
            let list = self.block()?;
            self.tree.append_child(token, list)?;
        } else {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                "'{' expected after the 'catch' parameter",
            );
        }
        Ok(token)
    }

    pub(super) fn throw_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let expr = self.expression()?;
        self.tree.append_child(token, expr)?;
        Ok(token)
    }

    // =========================================
    // Jumps
    // =========================================

    pub(super) fn return_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if !self.ends_statement() {
            let expr = self.expression()?;
            self.tree.append_child(token, expr)?;
        }
        Ok(token)
    }

    /// `break [label]` and `continue [label]`. `default` stands for no
    /// label at all.
    pub(super) fn break_continue(&mut self, token: NodeId) -> NodeResult<NodeId> {
        match self.peek() {
            NodeType::Identifier => {
                let label = self.token_string();
                self.advance();
                self.tree.set_string(token, label)?;
            }
            NodeType::Default => {
                self.advance();
            }
            _ => {}
        }
        if !self.ends_statement() {
            self.error(
                ErrorCode::InvalidLabel,
                "'break' and 'continue' can be followed by one label only",
            );
            while !self.ends_statement() {
                self.advance();
            }
        }
        Ok(token)
    }

    pub(super) fn goto_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if self.check(NodeType::Identifier) {
            let label = self.token_string();
            self.advance();
            self.tree.set_string(token, label)?;
        } else {
            self.error(ErrorCode::InvalidGoto, "'goto' expects a label as parameter");
        }
        Ok(token)
    }

    pub(super) fn yield_directive(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if !self.ends_statement() {
            let expr = self.expression()?;
            self.tree.append_child(token, expr)?;
        }
        Ok(token)
    }

    /// `synchronized (object) { ... }`.
    pub(super) fn synchronized(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let object = self.condition("synchronized")?;
        self.tree.append_child(token, object)?;
        if self.eat(NodeType::OpenCurvlyBracket) {
            let list = self.block()?;
            self.tree.append_child(token, list)?;
        } else {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                "'{' expected after the 'synchronized' expression",
            );
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::{ErrorCode, Options};

    use crate::node::{Flag, Link, NodeType};

    #[test]
    fn if_with_else_blocks() {
        let output = parse("if (x) { y; } else { z; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "IF\n  IDENTIFIER \"x\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"y\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"z\"\n"
        );
    }

    #[test]
    fn else_binds_to_the_closest_if() {
        let output = parse("if (a) if (b) c; else d;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let outer = directives(&output)[0];
        assert_eq!(output.tree.children_count(outer).unwrap(), 2);
    }

    #[test]
    fn missing_parenthesis_is_reported_once() {
        let output = parse("if a) b;");
        assert_eq!(codes(&output), vec![ErrorCode::ParenthesisExpected]);
        let output = parse("while (a b;");
        assert_eq!(codes(&output)[0], ErrorCode::ParenthesisExpected);
    }

    #[test]
    fn classic_for_loop() {
        let output = parse("for (var i = 0; i < 10; i++) a;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "FOR\n  VAR\n    VARIABLE \"i\"\n      SET\n        INT64 0\n  LESS\n    IDENTIFIER \"i\"\n    INT64 10\n  POST_INCREMENT\n    IDENTIFIER \"i\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"a\"\n"
        );
    }

    #[test]
    fn empty_for_clauses() {
        let output = parse("for (;;) {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "FOR\n  EMPTY\n  EMPTY\n  EMPTY\n  DIRECTIVE_LIST\n"
        );
    }

    #[test]
    fn for_in_splits_the_expression() {
        let output = parse("for (key in object) f(key);");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let node = directives(&output)[0];
        assert!(output.tree.flag(node, Flag::ForIn).unwrap());
        assert!(!output.tree.flag(node, Flag::ForForeach).unwrap());
        assert_eq!(
            output.tree.display(node).to_string(),
            "FOR FOR_IN\n  IDENTIFIER \"key\"\n  IDENTIFIER \"object\"\n  DIRECTIVE_LIST\n    CALL\n      IDENTIFIER \"f\"\n      LIST\n        IDENTIFIER \"key\"\n"
        );
    }

    #[test]
    fn for_each_with_a_constant() {
        let output = parse("for each (const v in list) {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let node = directives(&output)[0];
        assert!(output.tree.flag(node, Flag::ForForeach).unwrap());
        assert!(output.tree.flag(node, Flag::ForConst).unwrap());
        assert_eq!(output.tree.children_count(node).unwrap(), 3);

        let output = parse("for each (i = 0; i; i) {}");
        assert_eq!(codes(&output), vec![ErrorCode::ParenthesisExpected]);
    }

    #[test]
    fn while_and_do() {
        let output = parse("while (a) b; do c; while (d);");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert_eq!(
            output.tree.display(list[1]).to_string(),
            "DO\n  DIRECTIVE_LIST\n    IDENTIFIER \"c\"\n  IDENTIFIER \"d\"\n"
        );

        let output = parse("do a;");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidDo]);
    }

    #[test]
    fn with_needs_permission() {
        let output = parse("with (a) b;");
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowed]);
        assert_eq!(output.tree.node_type(directives(&output)[0]).unwrap(), NodeType::With);

        let output = parse_with("with (a) b;", Options::ALLOW_WITH);
        assert!(output.diagnostics.is_empty());

        let output = parse_with("with (a) b;", Options::ALLOW_WITH | Options::STRICT);
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowedInStrictMode]);
    }

    #[test]
    fn switch_with_cases() {
        let output = parse("switch (a) { case 1: b; break; default: c; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "SWITCH\n  IDENTIFIER \"a\"\n  DIRECTIVE_LIST\n    CASE\n      INT64 1\n    IDENTIFIER \"b\"\n    BREAK\n    DEFAULT\n    IDENTIFIER \"c\"\n"
        );
        let node = directives(&output)[0];
        assert_eq!(output.tree.switch_operator(node).unwrap(), NodeType::Unknown);
    }

    #[test]
    fn switch_operator_and_attributes() {
        let output = parse("switch (a) with (<) foreach { }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let node = directives(&output)[0];
        assert_eq!(output.tree.switch_operator(node).unwrap(), NodeType::Less);
        assert!(output.tree.link(node, Link::Attributes).unwrap().is_some());

        let output = parse("switch (a) with (+) { }");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidOperator]);
    }

    #[test]
    fn case_ranges_need_extended_statements() {
        let source = "switch (a) { case 1 .. 5: b; }";
        let output = parse_with(source, Options::EXTENDED_STATEMENTS);
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let output = parse(source);
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowed]);
        let list = output.tree.child(directives(&output)[0], 1).unwrap();
        let case = output.tree.child(list, 0).unwrap();
        assert_eq!(output.tree.children_count(case).unwrap(), 2);
    }

    #[test]
    fn case_and_default_need_a_colon() {
        let output = parse("switch (a) { case 1 b; default c; }");
        assert_eq!(
            codes(&output),
            vec![ErrorCode::CaseLabel, ErrorCode::DefaultLabel]
        );
    }

    #[test]
    fn try_catch_finally() {
        let output = parse("try { a; } catch (e: Error) { b; } finally { c; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert_eq!(list.len(), 3);
        assert_eq!(
            output.tree.display(list[1]).to_string(),
            "CATCH CATCH_TYPED\n  PARAMETERS\n    PARAM \"e\" PARAM_CATCH\n      TYPE\n        IDENTIFIER \"Error\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn catch_errors() {
        let output = parse("try {} catch (a, b) {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidCatch]);

        let output = parse("try {} catch (a = 1) {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidCatch]);

        let output = parse("try {} catch (e) {}");
        let catch = directives(&output)[1];
        assert!(!output.tree.flag(catch, Flag::CatchTyped).unwrap());
    }

    #[test]
    fn jumps() {
        let output = parse("function f() { return; return a + 1; throw e; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);

        let output = parse("while (a) { break outer; continue default; break; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let body = output.tree.child(directives(&output)[0], 1).unwrap();
        let statements = output.tree.children(body).unwrap().to_vec();
        assert_eq!(output.tree.display(statements[0]).to_string(), "BREAK \"outer\"\n");
        assert_eq!(output.tree.display(statements[1]).to_string(), "CONTINUE\n");

        let output = parse("while (a) { break one two; b; }");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidLabel]);
    }

    #[test]
    fn goto_needs_extended_statements() {
        let output = parse_with("goto there;", Options::EXTENDED_STATEMENTS);
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(dump_first(&output), "GOTO \"there\"\n");

        let output = parse_with("goto 3;", Options::EXTENDED_STATEMENTS);
        assert_eq!(codes(&output)[0], ErrorCode::InvalidGoto);
    }

    #[test]
    fn yield_and_synchronized() {
        let output = parse("yield; yield a; synchronized (lock) { b; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert_eq!(output.tree.children_count(list[0]).unwrap(), 0);
        assert_eq!(output.tree.children_count(list[1]).unwrap(), 1);
        assert_eq!(
            output.tree.display(list[2]).to_string(),
            "SYNCHRONIZED\n  IDENTIFIER \"lock\"\n  DIRECTIVE_LIST\n    IDENTIFIER \"b\"\n"
        );
    }
}
