//! Expression parsing.
//!
//! A precedence ladder: each binary level parses the next tighter level and
//! then loops over its own operators, so every level is left associative.
//! Assignment, the conditional operator and power are right associative and
//! are handled by dedicated functions.
//!
//! Operator tokens produced by the lexer are reused as the operator nodes.

use as2js_core::{ErrorCode, Options};

use super::Parser;
use crate::input::Input;
use crate::node::{NodeId, NodeResult, NodeType, format_float64};

/// Binary operator levels from the loosest to the tightest binding one.
const BINARY_LEVELS: &[&[NodeType]] = &[
    &[NodeType::Minimum, NodeType::Maximum],
    &[NodeType::LogicalOr],
    &[NodeType::LogicalXor],
    &[NodeType::LogicalAnd],
    &[NodeType::BitwiseOr],
    &[NodeType::BitwiseXor],
    &[NodeType::BitwiseAnd],
    &[
        NodeType::Equal,
        NodeType::NotEqual,
        NodeType::StrictlyEqual,
        NodeType::StrictlyNotEqual,
        NodeType::Compare,
        NodeType::SmartMatch,
    ],
    &[
        NodeType::Less,
        NodeType::LessEqual,
        NodeType::Greater,
        NodeType::GreaterEqual,
        NodeType::Is,
        NodeType::As,
        NodeType::In,
        NodeType::Instanceof,
    ],
    &[
        NodeType::ShiftLeft,
        NodeType::ShiftRight,
        NodeType::ShiftRightUnsigned,
        NodeType::RotateLeft,
        NodeType::RotateRight,
    ],
    &[NodeType::Add, NodeType::Subtract],
    &[NodeType::Multiply, NodeType::Divide, NodeType::Modulo],
    &[NodeType::Match, NodeType::NotMatch],
];

/// Operators only accepted with [`Options::EXTENDED_OPERATORS`].
fn is_extended_operator(node_type: NodeType) -> bool {
    use NodeType::*;
    matches!(
        node_type,
        Minimum
            | Maximum
            | LogicalXor
            | Compare
            | SmartMatch
            | RotateLeft
            | RotateRight
            | Match
            | NotMatch
            | Power
            | Scope
            | AssignmentLogicalXor
            | AssignmentMaximum
            | AssignmentMinimum
            | AssignmentPower
            | AssignmentRotateLeft
            | AssignmentRotateRight
    )
}

impl<I: Input> Parser<I> {
    pub(super) fn expression(&mut self) -> NodeResult<NodeId> {
        self.list_expression(false, false)
    }

    /// Parse a comma separated list; a single item is returned as is.
    ///
    /// With `rest`, items may be `...` or named (`name: value`) as in call
    /// arguments. With `empty`, missing items become `EMPTY` nodes as in
    /// array literals.
    pub(super) fn list_expression(&mut self, rest: bool, empty: bool) -> NodeResult<NodeId> {
        let mut has_rest = false;
        let first = self.list_item(rest, empty, &mut has_rest)?;
        if !self.check(NodeType::Comma) {
            return Ok(first);
        }

        let list = self.tree.create_replacement(first, NodeType::List)?;
        self.tree.append_child(list, first)?;
        let mut rest_reported = false;
        while self.eat(NodeType::Comma) {
            if has_rest && !rest_reported {
                self.error(
                    ErrorCode::InvalidRest,
                    "'...' was expected to be the last expression in this function call",
                );
                rest_reported = true;
            }
            let item = if empty && self.check(NodeType::CloseSquareBracket) {
                self.new_node(NodeType::Empty)
            } else {
                self.list_item(rest, empty, &mut has_rest)?
            };
            self.tree.append_child(list, item)?;
        }
        Ok(list)
    }

    fn list_item(&mut self, rest: bool, empty: bool, has_rest: &mut bool) -> NodeResult<NodeId> {
        if empty && self.check(NodeType::Comma) {
            return Ok(self.new_node(NodeType::Empty));
        }
        if rest && self.check(NodeType::Rest) {
            *has_rest = true;
            return Ok(self.advance());
        }
        if rest && self.check(NodeType::Identifier) {
            let name = self.advance();
            if self.eat(NodeType::Colon) {
                let named = self.tree.create_replacement(name, NodeType::Name)?;
                let text = self.tree.string(name)?.to_string();
                self.tree.set_string(named, text)?;
                let value = if self.check(NodeType::Rest) {
                    *has_rest = true;
                    self.advance()
                } else {
                    self.assignment_expression()?
                };
                self.tree.append_child(named, value)?;
                return Ok(named);
            }
            self.unget(name);
        }
        self.assignment_expression()
    }

    pub(super) fn assignment_expression(&mut self) -> NodeResult<NodeId> {
        let left = self.conditional_expression(true)?;
        if !self.peek().is_assignment() {
            return Ok(left);
        }
        self.check_extended_operator();
        let node = self.advance();
        let right = self.assignment_expression()?;
        self.tree.append_child(node, left)?;
        self.tree.append_child(node, right)?;
        Ok(node)
    }

    /// `a ? b : c`. Outside of assignments the branches cannot hold an
    /// assignment either, which is what type expressions need.
    pub(super) fn conditional_expression(&mut self, assignment: bool) -> NodeResult<NodeId> {
        let condition = self.binary_expression(0)?;
        if !self.check(NodeType::Conditional) {
            return Ok(condition);
        }
        let node = self.advance();
        self.tree.append_child(node, condition)?;

        let then = self.conditional_branch(assignment)?;
        self.tree.append_child(node, then)?;
        if self.eat(NodeType::Colon) {
            let otherwise = self.conditional_branch(assignment)?;
            self.tree.append_child(node, otherwise)?;
        } else {
            self.error(
                ErrorCode::InvalidConditional,
                "invalid use of the conditional operator, ':' was expected",
            );
        }
        Ok(node)
    }

    fn conditional_branch(&mut self, assignment: bool) -> NodeResult<NodeId> {
        if assignment {
            self.assignment_expression()
        } else {
            self.conditional_expression(false)
        }
    }

    fn binary_expression(&mut self, level: usize) -> NodeResult<NodeId> {
        let Some(operators) = BINARY_LEVELS.get(level) else {
            return self.power_expression();
        };

        let mut left = self.binary_expression(level + 1)?;
        while operators.contains(&self.peek()) {
            self.check_extended_operator();
            let node = self.advance();
            let right = self.binary_expression(level + 1)?;
            self.tree.append_child(node, left)?;
            self.tree.append_child(node, right)?;

            // `x in min .. max`
            if self.tree.node_type(node)? == NodeType::In
                && matches!(self.peek(), NodeType::Range | NodeType::Rest)
            {
                if !self.is_set(Options::EXTENDED_OPERATORS) {
                    self.error(
                        ErrorCode::NotAllowed,
                        "the 'x in min .. max' operator is only available when extended operators are authorized (use extended_operators;)",
                    );
                }
                self.advance();
                let end = self.binary_expression(level + 1)?;
                self.tree.append_child(node, end)?;
            }
            left = node;
        }
        Ok(left)
    }

    fn power_expression(&mut self) -> NodeResult<NodeId> {
        let left = self.unary_expression()?;
        if !self.check(NodeType::Power) {
            return Ok(left);
        }
        self.check_extended_operator();
        let node = self.advance();
        let right = self.power_expression()?;
        self.tree.append_child(node, left)?;
        self.tree.append_child(node, right)?;
        Ok(node)
    }

    fn unary_expression(&mut self) -> NodeResult<NodeId> {
        use NodeType::*;
        match self.peek() {
            Delete | Increment | Decrement => {
                let node = self.advance();
                let operand = self.postfix_expression()?;
                self.tree.append_child(node, operand)?;
                Ok(node)
            }
            Void | Typeof | Add | Subtract | BitwiseNot | LogicalNot => {
                let node = self.advance();
                let operand = self.unary_expression()?;
                self.tree.append_child(node, operand)?;
                Ok(node)
            }
            // `~~x` and `!~x` in prefix position are two operators; the
            // integer conversion of `~` must not be optimized away
            found @ (SmartMatch | NotMatch) => {
                let token = self.advance();
                let outer_type = if found == SmartMatch { BitwiseNot } else { LogicalNot };
                let outer = self.tree.create_replacement(token, outer_type)?;
                let inner = self.tree.create_replacement(token, BitwiseNot)?;
                self.tree.append_child(outer, inner)?;
                let operand = self.unary_expression()?;
                self.tree.append_child(inner, operand)?;
                Ok(outer)
            }
            _ => self.postfix_expression(),
        }
    }

    pub(super) fn postfix_expression(&mut self) -> NodeResult<NodeId> {
        let mut node = self.primary_expression()?;
        loop {
            match self.peek() {
                NodeType::Member => {
                    let member = self.advance();
                    let right = self.primary_expression()?;
                    self.tree.append_child(member, node)?;
                    self.tree.append_child(member, right)?;
                    node = member;
                }
                NodeType::Scope => {
                    self.check_extended_operator();
                    let scope = self.advance();
                    self.tree.append_child(scope, node)?;
                    if self.check(NodeType::Identifier) {
                        let name = self.advance();
                        self.tree.append_child(scope, name)?;
                    } else {
                        self.error(
                            ErrorCode::InvalidScope,
                            "scope operator '::' is expected to be followed by an identifier",
                        );
                    }
                    node = scope;
                }
                found @ (NodeType::Increment | NodeType::Decrement) => {
                    let token = self.advance();
                    let post_type = if found == NodeType::Increment {
                        NodeType::PostIncrement
                    } else {
                        NodeType::PostDecrement
                    };
                    let post = self.tree.create_replacement(token, post_type)?;
                    self.tree.append_child(post, node)?;
                    node = post;
                }
                NodeType::OpenParenthesis => {
                    let token = self.advance();
                    let call = self.tree.create_replacement(token, NodeType::Call)?;
                    self.tree.append_child(call, node)?;
                    let arguments = if self.check(NodeType::CloseParenthesis) {
                        self.tree.create_replacement(token, NodeType::List)?
                    } else {
                        let arguments = self.list_expression(true, false)?;
                        if self.tree.node_type(arguments)? == NodeType::List {
                            arguments
                        } else {
                            let list = self.tree.create_replacement(token, NodeType::List)?;
                            self.tree.append_child(list, arguments)?;
                            list
                        }
                    };
                    self.tree.append_child(call, arguments)?;
                    self.expect(
                        NodeType::CloseParenthesis,
                        ErrorCode::ParenthesisExpected,
                        "')' expected to end the list of arguments",
                    );
                    node = call;
                }
                NodeType::OpenSquareBracket => {
                    let token = self.advance();
                    let array = self.tree.create_replacement(token, NodeType::Array)?;
                    self.tree.append_child(array, node)?;
                    if !self.check(NodeType::CloseSquareBracket) {
                        let index = self.list_expression(false, false)?;
                        self.tree.append_child(array, index)?;
                    }
                    self.expect(
                        NodeType::CloseSquareBracket,
                        ErrorCode::SquareBracketsExpected,
                        "']' expected to end the list of element references or declarations",
                    );
                    node = array;
                }
                _ => return Ok(node),
            }
        }
    }

    fn primary_expression(&mut self) -> NodeResult<NodeId> {
        use NodeType::*;
        match self.peek() {
            Int64 | Float64 | String | True | False | Null | Undefined | RegularExpression
            | Identifier | Videntifier | This | Super => Ok(self.advance()),
            Private | Public => {
                let token = self.advance();
                self.tree.to_identifier(token)?;
                Ok(token)
            }
            New => {
                let node = self.advance();
                let object = self.postfix_expression()?;
                self.tree.append_child(node, object)?;
                Ok(node)
            }
            OpenParenthesis => {
                self.advance();
                let node = self.expression()?;
                // `(a).field` reads the field named by the content of `a`
                self.tree.to_videntifier(node)?;
                self.expect(
                    CloseParenthesis,
                    ErrorCode::ParenthesisExpected,
                    "')' expected to match the '('",
                );
                Ok(node)
            }
            OpenSquareBracket => {
                let token = self.advance();
                let literal = self.tree.create_replacement(token, ArrayLiteral)?;
                if !self.check(CloseSquareBracket) {
                    let elements = self.list_expression(false, true)?;
                    self.tree.append_child(literal, elements)?;
                }
                self.expect(
                    CloseSquareBracket,
                    ErrorCode::SquareBracketsExpected,
                    "']' expected to match the '[' of this array",
                );
                Ok(literal)
            }
            OpenCurvlyBracket => {
                let token = self.advance();
                let literal = self.object_literal(token)?;
                self.expect(
                    CloseCurvlyBracket,
                    ErrorCode::CurvlyBracketsExpected,
                    "'}' expected to match the '{' of this object literal",
                );
                Ok(literal)
            }
            Function => {
                let token = self.advance();
                self.function(token, true)
            }
            found => {
                self.error(
                    ErrorCode::InvalidExpression,
                    format!("unexpected token '{}' found in an expression", found),
                );
                Ok(self.new_node(Unknown))
            }
        }
    }

    // =========================================
    // Object literals
    // =========================================

    /// Parse `name: value, ...` up to the closing `}`, which is left for
    /// the caller. Children alternate between `NAME` and `SET` nodes.
    fn object_literal(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let object = self.tree.create_replacement(token, NodeType::ObjectLiteral)?;
        while !matches!(self.peek(), NodeType::CloseCurvlyBracket | NodeType::Eof) {
            let Some(name) = self.field_name()? else {
                // skip to the next field
                while !matches!(
                    self.peek(),
                    NodeType::Comma | NodeType::CloseCurvlyBracket | NodeType::Semicolon | NodeType::Eof
                ) {
                    self.advance();
                }
                if self.eat(NodeType::Comma) {
                    continue;
                }
                break;
            };

            if !self.eat(NodeType::Colon) {
                self.error(ErrorCode::ColonExpected, "':' expected after the name of a field");
                match self.peek() {
                    NodeType::CloseCurvlyBracket | NodeType::Semicolon | NodeType::Eof => break,
                    NodeType::Comma => {
                        self.advance();
                        continue;
                    }
                    _ => {}
                }
            }

            let set = self.new_node(NodeType::Set);
            let value = self.assignment_expression()?;
            self.tree.append_child(set, value)?;
            self.tree.append_child(object, name)?;
            self.tree.append_child(object, set)?;

            match self.peek() {
                NodeType::CloseCurvlyBracket | NodeType::Eof => break,
                NodeType::Comma => {
                    self.advance();
                }
                NodeType::Semicolon => {
                    self.error(
                        ErrorCode::CommaExpected,
                        "'}' expected before the ';' to end an object literal",
                    );
                    break;
                }
                _ => {
                    self.error(ErrorCode::CommaExpected, "',' or '}' expected after the value of a field");
                    break;
                }
            }
        }
        Ok(object)
    }

    /// Parse a field name: an identifier, a string or number literal,
    /// `public::name`, `private::name` or `(expr)::name`.
    fn field_name(&mut self) -> NodeResult<Option<NodeId>> {
        let name = self.new_node(NodeType::Name);
        match self.peek() {
            NodeType::OpenParenthesis => {
                self.advance();
                let expr = self.expression()?;
                self.tree.to_videntifier(expr)?;
                self.tree.append_child(name, expr)?;
                if !self.eat(NodeType::CloseParenthesis) {
                    self.error(
                        ErrorCode::InvalidField,
                        "')' is expected to close a dynamically named object field",
                    );
                }
                self.field_scope(name, true)?;
            }
            NodeType::Identifier => {
                let token = self.advance();
                let text = self.tree.string(token)?.to_string();
                self.tree.set_string(name, text)?;
                self.field_scope(name, false)?;
            }
            found @ (NodeType::Public | NodeType::Private) => {
                self.advance();
                let text = if found == NodeType::Public { "public" } else { "private" };
                self.tree.set_string(name, text)?;
                self.field_scope(name, true)?;
            }
            NodeType::Int64 => {
                let token = self.advance();
                let text = self.tree.int64(token)?.to_string();
                self.tree.set_string(name, text)?;
            }
            NodeType::Float64 => {
                let token = self.advance();
                let text = format_float64(self.tree.float64(token)?);
                self.tree.set_string(name, text)?;
            }
            NodeType::String => {
                let token = self.advance();
                let text = self.tree.string(token)?.to_string();
                self.tree.set_string(name, text)?;
            }
            _ => {
                self.error(ErrorCode::InvalidField, "the name of a field was expected");
                self.tree.release(name)?;
                return Ok(None);
            }
        }
        Ok(Some(name))
    }

    fn field_scope(&mut self, name: NodeId, required: bool) -> NodeResult<()> {
        if self.check(NodeType::Scope) {
            self.check_extended_operator();
            self.advance();
            if self.check(NodeType::Identifier) {
                let field = self.advance();
                self.tree.append_child(name, field)?;
            } else {
                self.error(
                    ErrorCode::InvalidScope,
                    "'::' is expected to always be followed by an identifier",
                );
            }
        } else if required {
            self.error(
                ErrorCode::InvalidField,
                "'public', 'private' or a dynamic scope cannot be used as a field name, '::' was expected",
            );
        }
        Ok(())
    }

    /// Report the current operator when it needs extended operators and
    /// they are off. The caller still builds the node.
    fn check_extended_operator(&mut self) {
        let found = self.peek();
        if is_extended_operator(found) && !self.is_set(Options::EXTENDED_OPERATORS) {
            let text = found.operator_to_string().unwrap_or(found.name());
            self.error(
                ErrorCode::NotAllowed,
                format!(
                    "the '{}' operator is only available when extended operators are authorized (use extended_operators;)",
                    text
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::{ErrorCode, Options};

    fn expr(source: &str) -> String {
        let output = parse_expression_with(source, Options::EXTENDED_OPERATORS);
        assert!(output.diagnostics.is_empty(), "{}: {}", source, output.diagnostics);
        output.tree.display(output.root).to_string()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            expr("1 + 2 * 3"),
            "ADD\n  INT64 1\n  MULTIPLY\n    INT64 2\n    INT64 3\n"
        );
        assert_eq!(
            expr("1 * 2 + 3"),
            "ADD\n  MULTIPLY\n    INT64 1\n    INT64 2\n  INT64 3\n"
        );
    }

    #[test]
    fn binary_levels_are_left_associative() {
        assert_eq!(
            expr("a - b - c"),
            "SUBTRACT\n  SUBTRACT\n    IDENTIFIER \"a\"\n    IDENTIFIER \"b\"\n  IDENTIFIER \"c\"\n"
        );
    }

    #[test]
    fn assignment_and_power_are_right_associative() {
        assert_eq!(
            expr("a = b += c"),
            "ASSIGNMENT\n  IDENTIFIER \"a\"\n  ASSIGNMENT_ADD\n    IDENTIFIER \"b\"\n    IDENTIFIER \"c\"\n"
        );
        assert_eq!(
            expr("a ** b ** c"),
            "POWER\n  IDENTIFIER \"a\"\n  POWER\n    IDENTIFIER \"b\"\n    IDENTIFIER \"c\"\n"
        );
    }

    #[test]
    fn ladder_order() {
        assert_eq!(
            expr("a || b && c | d ^ e & f == g < h << i"),
            "LOGICAL_OR\n  IDENTIFIER \"a\"\n  LOGICAL_AND\n    IDENTIFIER \"b\"\n    BITWISE_OR\n      IDENTIFIER \"c\"\n      BITWISE_XOR\n        IDENTIFIER \"d\"\n        BITWISE_AND\n          IDENTIFIER \"e\"\n          EQUAL\n            IDENTIFIER \"f\"\n            LESS\n              IDENTIFIER \"g\"\n              SHIFT_LEFT\n                IDENTIFIER \"h\"\n                IDENTIFIER \"i\"\n"
        );
    }

    #[test]
    fn conditional() {
        assert_eq!(
            expr("a ? b : c ? d : e"),
            "CONDITIONAL\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n  CONDITIONAL\n    IDENTIFIER \"c\"\n    IDENTIFIER \"d\"\n    IDENTIFIER \"e\"\n"
        );

        let output = parse_expression_with("a ? b", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::InvalidConditional]);
    }

    #[test]
    fn comma_builds_a_list() {
        assert_eq!(
            expr("a, b, c"),
            "LIST\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n  IDENTIFIER \"c\"\n"
        );
    }

    #[test]
    fn unary_operators() {
        assert_eq!(
            expr("-!a"),
            "SUBTRACT\n  LOGICAL_NOT\n    IDENTIFIER \"a\"\n"
        );
        assert_eq!(
            expr("typeof ++a"),
            "TYPEOF\n  INCREMENT\n    IDENTIFIER \"a\"\n"
        );
        assert_eq!(
            expr("delete a.b"),
            "DELETE\n  MEMBER\n    IDENTIFIER \"a\"\n    IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn doubled_prefix_operators_are_split() {
        assert_eq!(
            expr("~~a"),
            "BITWISE_NOT\n  BITWISE_NOT\n    IDENTIFIER \"a\"\n"
        );
        assert_eq!(
            expr("!~a"),
            "LOGICAL_NOT\n  BITWISE_NOT\n    IDENTIFIER \"a\"\n"
        );
    }

    #[test]
    fn postfix_chain() {
        assert_eq!(
            expr("a.b[c](d, e)++"),
            "POST_INCREMENT\n  CALL\n    ARRAY\n      MEMBER\n        IDENTIFIER \"a\"\n        IDENTIFIER \"b\"\n      IDENTIFIER \"c\"\n    LIST\n      IDENTIFIER \"d\"\n      IDENTIFIER \"e\"\n"
        );
        assert_eq!(expr("f()"), "CALL\n  IDENTIFIER \"f\"\n  LIST\n");
        assert_eq!(
            expr("f(x)"),
            "CALL\n  IDENTIFIER \"f\"\n  LIST\n    IDENTIFIER \"x\"\n"
        );
    }

    #[test]
    fn call_arguments_accept_rest_and_names() {
        assert_eq!(
            expr("f(size: 3, ...)"),
            "CALL\n  IDENTIFIER \"f\"\n  LIST\n    NAME \"size\"\n      INT64 3\n    REST\n"
        );

        let output = parse_expression_with("f(..., a)", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::InvalidRest]);
    }

    #[test]
    fn scope_operator() {
        assert_eq!(
            expr("a::b"),
            "SCOPE\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn grouped_identifier_becomes_dynamic() {
        assert_eq!(
            expr("(a).b"),
            "MEMBER\n  VIDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n"
        );
        assert_eq!(
            expr("(a + b) * c"),
            "MULTIPLY\n  ADD\n    IDENTIFIER \"a\"\n    IDENTIFIER \"b\"\n  IDENTIFIER \"c\"\n"
        );
    }

    #[test]
    fn new_expression() {
        assert_eq!(
            expr("new Date(1)"),
            "NEW\n  CALL\n    IDENTIFIER \"Date\"\n    LIST\n      INT64 1\n"
        );
    }

    #[test]
    fn array_literals() {
        assert_eq!(expr("[]"), "ARRAY_LITERAL\n");
        assert_eq!(expr("[1]"), "ARRAY_LITERAL\n  INT64 1\n");
        assert_eq!(
            expr("[, 1, , 2, ]"),
            "ARRAY_LITERAL\n  LIST\n    EMPTY\n    INT64 1\n    EMPTY\n    INT64 2\n    EMPTY\n"
        );
    }

    #[test]
    fn object_literals() {
        assert_eq!(expr("{}"), "OBJECT_LITERAL\n");
        assert_eq!(
            expr("{ a: 1, \"b\": 2, 3: c, }"),
            "OBJECT_LITERAL\n  NAME \"a\"\n  SET\n    INT64 1\n  NAME \"b\"\n  SET\n    INT64 2\n  NAME \"3\"\n  SET\n    IDENTIFIER \"c\"\n"
        );
        assert_eq!(
            expr("{ (k)::f: 1, public::g: 2 }"),
            "OBJECT_LITERAL\n  NAME\n    VIDENTIFIER \"k\"\n    IDENTIFIER \"f\"\n  SET\n    INT64 1\n  NAME \"public\"\n    IDENTIFIER \"g\"\n  SET\n    INT64 2\n"
        );
    }

    #[test]
    fn object_literal_errors() {
        let output = parse_expression_with("{ a 1 }", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::ColonExpected]);

        let output = parse_expression_with("{ a: 1 b: 2 }", Options::empty());
        assert_eq!(
            codes(&output),
            vec![
                ErrorCode::CommaExpected,
                ErrorCode::CurvlyBracketsExpected,
                ErrorCode::InvalidExpression,
            ]
        );

        let output = parse_expression_with("{ ) }", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::InvalidField]);
    }

    #[test]
    fn in_with_a_range() {
        assert_eq!(
            expr("a in 1 .. 5"),
            "IN\n  IDENTIFIER \"a\"\n  INT64 1\n  INT64 5\n"
        );
        let output = parse_expression_with("a in 1 .. 5", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowed]);
    }

    #[test]
    fn gated_operators_are_reported_and_still_built() {
        let output = parse_expression_with("a ^^ b", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowed]);
        assert_eq!(
            output.tree.display(output.root).to_string(),
            "LOGICAL_XOR\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n"
        );

        let output = parse_expression_with("a::b", Options::empty());
        assert_eq!(codes(&output), vec![ErrorCode::NotAllowed]);
    }

    #[test]
    fn rotate_is_never_built_without_extended_operators() {
        let output = parse_expression_with("a !< 3", Options::empty());
        let dump = output.tree.display(output.root).to_string();
        assert!(!dump.contains("ROTATE_LEFT"), "{}", dump);
        assert!(!output.diagnostics.is_empty());
    }

    #[test]
    fn missing_closers_are_reported_once() {
        for (source, code) in [
            ("(a", ErrorCode::ParenthesisExpected),
            ("f(a", ErrorCode::ParenthesisExpected),
            ("[a", ErrorCode::SquareBracketsExpected),
            ("a[b", ErrorCode::SquareBracketsExpected),
            ("{a: 1", ErrorCode::CurvlyBracketsExpected),
        ] {
            let output = parse_expression_with(source, Options::empty());
            assert_eq!(codes(&output), vec![code], "{}", source);
        }
    }

    #[test]
    fn invalid_token_gives_a_placeholder() {
        let output = parse_expression_with("1 + )", Options::empty());
        assert_eq!(
            codes(&output),
            vec![ErrorCode::InvalidExpression, ErrorCode::InvalidExpression]
        );
        assert_eq!(
            output.tree.display(output.root).to_string(),
            "ADD\n  INT64 1\n  UNKNOWN\n"
        );
    }
}
