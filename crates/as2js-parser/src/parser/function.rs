//! Function declarations, function expressions and parameter lists.

use as2js_core::ErrorCode;

use super::Parser;
use crate::input::Input;
use crate::node::{Flag, NodeId, NodeResult, NodeType};

/// Parameter modifiers written before the name.
fn parameter_modifier(node_type: NodeType, name: &str) -> Option<Option<Flag>> {
    match node_type {
        NodeType::Rest => Some(Some(Flag::ParamRest)),
        NodeType::Const => Some(Some(Flag::ParamConst)),
        NodeType::In => Some(Some(Flag::ParamIn)),
        NodeType::Var => Some(None),
        NodeType::Identifier => match name {
            "out" => Some(Some(Flag::ParamOut)),
            "named" => Some(Some(Flag::ParamNamed)),
            "unchecked" => Some(Some(Flag::ParamUnchecked)),
            _ => None,
        },
        _ => None,
    }
}

impl<I: Input> Parser<I> {
    /// Parse a function after its `function` keyword, which becomes the
    /// `FUNCTION` node.
    ///
    /// Function expressions may be anonymous; declarations must be named.
    pub(super) fn function(&mut self, token: NodeId, expression: bool) -> NodeResult<NodeId> {
        self.function_name(token, expression)?;

        if self.eat(NodeType::OpenParenthesis) && !self.eat(NodeType::CloseParenthesis) {
            match self.parameter_list()? {
                Some((parameters, has_out)) => {
                    self.tree.append_child(token, parameters)?;
                    if has_out {
                        self.tree.set_flag(token, Flag::FunctionOut, true)?;
                    }
                }
                None => self.tree.set_flag(token, Flag::FunctionNoparams, true)?,
            }
            self.expect(
                NodeType::CloseParenthesis,
                ErrorCode::ParenthesisExpected,
                "')' expected to close the 'function' parameters",
            );
        }

        if self.check(NodeType::Colon) {
            let colon = self.advance();
            if self.check(NodeType::Void) || self.check_contextual("Void") {
                // a procedure
                self.advance();
                self.tree.set_flag(token, Flag::FunctionVoid, true)?;
            } else if self.check_contextual("Never") {
                self.advance();
                self.tree.set_flag(token, Flag::FunctionNever, true)?;
            } else {
                let type_node = self.tree.create_replacement(colon, NodeType::Type)?;
                let expr = self.conditional_expression(false)?;
                self.tree.append_child(type_node, expr)?;
                self.tree.append_child(token, type_node)?;
            }
        }

        // no body: an abstract function or a function type
        if self.eat(NodeType::OpenCurvlyBracket) {
            self.functions.push(token);
            let body = self.directive_list(false);
            self.functions.pop();
            self.tree.append_child(token, body?)?;
            self.expect(
                NodeType::CloseCurvlyBracket,
                ErrorCode::CurvlyBracketsExpected,
                "'}' expected to close the 'function' block",
            );
        }
        Ok(token)
    }

    /// Read the name of a function: an identifier, `get name`, `set name`,
    /// an operator token, a string or the `()` operator.
    fn function_name(&mut self, token: NodeId, expression: bool) -> NodeResult<()> {
        let found = self.peek();
        match found {
            NodeType::Identifier => {
                let name = self.token_string();
                let accessor = match name.as_str() {
                    "get" => Some(("->", Flag::FunctionGetter)),
                    "set" => Some(("<-", Flag::FunctionSetter)),
                    _ => None,
                };
                self.advance();
                match accessor {
                    Some((prefix, flag)) => self.accessor_name(token, &name, prefix, flag, expression)?,
                    None => {
                        self.tree.set_string(token, name)?;
                        if self.check(NodeType::Identifier) {
                            self.error(
                                ErrorCode::InvalidFunction,
                                "only one name is expected for a function (misspelled get or set?)",
                            );
                            self.advance();
                        }
                    }
                }
            }
            NodeType::String => {
                let name = self.token_string();
                self.advance();
                if NodeType::string_to_operator(&name).is_some() {
                    self.tree.set_flag(token, Flag::FunctionOperator, true)?;
                }
                self.tree.set_string(token, name)?;
            }
            NodeType::OpenParenthesis if self.call_operator_name()? => {
                self.tree.set_string(token, "()")?;
                self.tree.set_flag(token, Flag::FunctionOperator, true)?;
            }
            _ => match found.operator_to_string() {
                Some(operator) => {
                    self.advance();
                    self.tree.set_string(token, operator)?;
                    self.tree.set_flag(token, Flag::FunctionOperator, true)?;
                }
                None if !expression => {
                    self.error(
                        ErrorCode::InvalidFunction,
                        "function declarations are required to be named",
                    );
                }
                None => {}
            },
        }
        Ok(())
    }

    /// `get name` or `set name`; `keyword` is `get` or `set` and was
    /// already consumed.
    fn accessor_name(
        &mut self,
        token: NodeId,
        keyword: &str,
        prefix: &str,
        flag: Flag,
        expression: bool,
    ) -> NodeResult<()> {
        match self.peek() {
            NodeType::Identifier | NodeType::String => {
                let name = self.token_string();
                if NodeType::string_to_operator(&name).is_some() {
                    self.error(
                        ErrorCode::InvalidFunction,
                        "operator override cannot be marked as a getter nor a setter function",
                    );
                }
                self.advance();
                self.tree.set_string(token, format!("{}{}", prefix, name))?;
                self.tree.set_flag(token, flag, true)?;
            }
            NodeType::OpenParenthesis => {
                // a function named `get` or `set`
                self.tree.set_string(token, keyword)?;
                return Ok(());
            }
            _ => {
                if !expression {
                    self.error(
                        ErrorCode::InvalidFunction,
                        "getter and setter functions require a name",
                    );
                }
                self.tree.set_flag(token, flag, true)?;
            }
        }
        if expression {
            self.error(
                ErrorCode::InvalidFunction,
                "expression functions cannot be getter nor setter functions",
            );
        }
        Ok(())
    }

    /// Whether `( ) (` follows, naming the `()` operator. When it does the
    /// first two tokens are consumed, otherwise nothing is.
    fn call_operator_name(&mut self) -> NodeResult<bool> {
        let open = self.advance();
        if !self.check(NodeType::CloseParenthesis) {
            self.unget(open);
            return Ok(false);
        }
        let close = self.advance();
        if self.check(NodeType::OpenParenthesis) {
            return Ok(true);
        }
        self.unget(close);
        self.unget(open);
        Ok(false)
    }

    /// Parse parameters up to the closing `)`, which is left for the caller.
    ///
    /// Returns `None` for `(void)`. The flag reports whether any parameter
    /// is an `out` parameter.
    pub(super) fn parameter_list(&mut self) -> NodeResult<Option<(NodeId, bool)>> {
        if self.check(NodeType::Void) || self.check_contextual("Void") {
            self.advance();
            return Ok(None);
        }

        let parameters = self.new_node(NodeType::Parameters);
        if self.check_contextual("unprototyped") {
            let token = self.advance();
            let param = self.tree.create_replacement(token, NodeType::Param)?;
            self.tree.set_flag(param, Flag::ParamUnprototyped, true)?;
            self.tree.append_child(parameters, param)?;
            return Ok(Some((parameters, false)));
        }

        let mut has_out = false;
        let mut invalid = false;
        loop {
            let param = self.new_node(NodeType::Param);
            while let Some(modifier) = parameter_modifier(self.peek(), &self.token_string()) {
                if let Some(flag) = modifier {
                    self.tree.set_flag(param, flag, true)?;
                }
                self.advance();
                invalid = false;
            }

            let rest = self.tree.flag(param, Flag::ParamRest)?;
            if self.tree.flag(param, Flag::ParamOut)? {
                has_out = true;
                if rest {
                    self.error(
                        ErrorCode::InvalidParameters,
                        "you cannot use the function parameter attribute 'out' with '...'",
                    );
                }
                if self.tree.flag(param, Flag::ParamConst)? {
                    self.error(
                        ErrorCode::InvalidParameters,
                        "you cannot use the function attributes 'out' and 'const' together",
                    );
                }
            }

            if self.check(NodeType::Identifier) {
                let name = self.token_string();
                self.advance();
                self.tree.set_string(param, name)?;
                self.tree.append_child(parameters, param)?;
                invalid = false;

                if self.check(NodeType::Colon) {
                    let colon = self.advance();
                    let type_node = self.tree.create_replacement(colon, NodeType::Type)?;
                    let expr = self.conditional_expression(false)?;
                    self.tree.append_child(type_node, expr)?;
                    self.tree.append_child(param, type_node)?;
                }
                if self.check(NodeType::Assignment) {
                    if rest {
                        self.error(
                            ErrorCode::InvalidParameters,
                            "you cannot assign a default value to '...'",
                        );
                    }
                    let assignment = self.advance();
                    let set = self.tree.create_replacement(assignment, NodeType::Set)?;
                    let value = self.conditional_expression(false)?;
                    self.tree.append_child(set, value)?;
                    self.tree.append_child(param, set)?;
                }
            } else if rest {
                self.tree.append_child(parameters, param)?;
            } else {
                self.tree.release(param)?;
            }

            match self.peek() {
                NodeType::CloseParenthesis => break,
                NodeType::Comma => {
                    if rest {
                        self.error(
                            ErrorCode::InvalidParameters,
                            "no other parameters expected after '...'",
                        );
                    }
                    self.advance();
                }
                found => {
                    if !invalid {
                        self.error(
                            ErrorCode::InvalidParameters,
                            format!("expected an identifier as the parameter name (not token {})", found),
                        );
                    }
                    if matches!(
                        found,
                        NodeType::Eof
                            | NodeType::Semicolon
                            | NodeType::OpenCurvlyBracket
                            | NodeType::CloseCurvlyBracket
                    ) {
                        break;
                    }
                    if invalid {
                        self.advance();
                    }
                    invalid = true;
                }
            }
        }
        Ok(Some((parameters, has_out)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::ErrorCode;

    use crate::node::{Flag, NodeType};

    #[test]
    fn named_function_with_parameters_and_body() {
        let output = parse("function add(a: int, b = 1): int { return a + b; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "FUNCTION \"add\"\n  PARAMETERS\n    PARAM \"a\"\n      TYPE\n        IDENTIFIER \"int\"\n    PARAM \"b\"\n      SET\n        INT64 1\n  TYPE\n    IDENTIFIER \"int\"\n  DIRECTIVE_LIST\n    RETURN\n      ADD\n        IDENTIFIER \"a\"\n        IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn declarations_must_be_named() {
        let output = parse("function () {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidFunction]);

        let output = parse("f = function (x) { };");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
    }

    #[test]
    fn two_names() {
        let output = parse("function gett value() {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidFunction]);
    }

    #[test]
    fn getters_and_setters() {
        let output = parse("function get size() {} function set size(v) {} function get() {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert_eq!(output.tree.string(list[0]).unwrap(), "->size");
        assert!(output.tree.flag(list[0], Flag::FunctionGetter).unwrap());
        assert_eq!(output.tree.string(list[1]).unwrap(), "<-size");
        assert!(output.tree.flag(list[1], Flag::FunctionSetter).unwrap());
        assert_eq!(output.tree.string(list[2]).unwrap(), "get");
        assert!(!output.tree.flag(list[2], Flag::FunctionGetter).unwrap());

        let output = parse("f = function get x() {};");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidFunction]);
    }

    #[test]
    fn operator_overloads() {
        let output = parse("function +(a) {} function \"<=>\"(a) {} function ()(a) {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let names: Vec<String> = directives(&output)
            .iter()
            .map(|f| {
                assert!(output.tree.flag(*f, Flag::FunctionOperator).unwrap());
                output.tree.string(*f).unwrap().to_string()
            })
            .collect();
        assert_eq!(names, vec!["+", "<=>", "()"]);
    }

    #[test]
    fn parenthesis_after_function_is_the_parameter_list() {
        let output = parse("f = function () {};");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let function = output.tree.child(directives(&output)[0], 1).unwrap();
        assert_eq!(output.tree.node_type(function).unwrap(), NodeType::Function);
        assert!(!output.tree.flag(function, Flag::FunctionOperator).unwrap());
    }

    #[test]
    fn parameter_modifiers() {
        let output = parse("function f(const in a, out b, named unchecked var c, ...rest) {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let function = directives(&output)[0];
        assert!(output.tree.flag(function, Flag::FunctionOut).unwrap());
        let parameters = output.tree.child(function, 0).unwrap();
        assert_eq!(
            output.tree.display(parameters).to_string(),
            "PARAMETERS\n  PARAM \"a\" PARAM_CONST PARAM_IN\n  PARAM \"b\" PARAM_OUT\n  PARAM \"c\" PARAM_NAMED PARAM_UNCHECKED\n  PARAM \"rest\" PARAM_REST\n"
        );
    }

    #[test]
    fn void_and_unprototyped_parameters() {
        let output = parse("function f(void) {} function g(unprototyped) {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert!(output.tree.flag(list[0], Flag::FunctionNoparams).unwrap());
        let parameters = output.tree.child(list[1], 0).unwrap();
        let param = output.tree.child(parameters, 0).unwrap();
        assert!(output.tree.flag(param, Flag::ParamUnprototyped).unwrap());
    }

    #[test]
    fn parameter_errors() {
        let output = parse("function f(..., a) {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidParameters]);

        let output = parse("function f(out ...a) {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidParameters]);

        let output = parse("function f(a b) {}");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidParameters]);
    }

    #[test]
    fn return_types() {
        let output = parse("function f(): void {} function g(): Never {}");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let list = directives(&output);
        assert!(output.tree.flag(list[0], Flag::FunctionVoid).unwrap());
        assert!(output.tree.flag(list[1], Flag::FunctionNever).unwrap());
    }

    #[test]
    fn function_without_body() {
        let output = parse("function f(a);");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "FUNCTION \"f\"\n  PARAMETERS\n    PARAM \"a\"\n"
        );
    }

    #[test]
    fn unclosed_function_body() {
        let output = parse("function f() { a;");
        assert_eq!(codes(&output), vec![ErrorCode::CurvlyBracketsExpected]);
    }
}
