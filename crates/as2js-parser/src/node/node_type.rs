//! The closed set of node tags.
//!
//! Tags cover punctuation and operators produced by the lexer, literals,
//! keywords, and the structural markers the parser synthesizes. Which tags
//! may own children, or be owned, is decided here by exhaustive matches.

use std::fmt;

macro_rules! node_types {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, )*) => {
        /// Tag identifying the kind of a node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeType {
            $( $(#[$doc])* $variant, )*
        }

        impl NodeType {
            /// Every tag, in declaration order.
            pub const ALL: &'static [NodeType] = &[ $( NodeType::$variant, )* ];

            /// Upper-case name of the tag, as shown in tree dumps.
            pub fn name(self) -> &'static str {
                match self {
                    $( NodeType::$variant => $name, )*
                }
            }
        }
    };
}

node_types! {
    // =========================================
    // Lexer terminals and single-character tokens
    // =========================================
    /// End of input.
    Eof => "EOF",
    /// Placeholder tag, also the default switch operator.
    Unknown => "UNKNOWN",
    /// `+`
    Add => "ADD",
    /// `&`
    BitwiseAnd => "BITWISE_AND",
    /// `~`
    BitwiseNot => "BITWISE_NOT",
    /// `=`
    Assignment => "ASSIGNMENT",
    /// `|`
    BitwiseOr => "BITWISE_OR",
    /// `^`
    BitwiseXor => "BITWISE_XOR",
    /// `}`
    CloseCurvlyBracket => "CLOSE_CURVLY_BRACKET",
    /// `)`
    CloseParenthesis => "CLOSE_PARENTHESIS",
    /// `]`
    CloseSquareBracket => "CLOSE_SQUARE_BRACKET",
    /// `:`
    Colon => "COLON",
    /// `,`
    Comma => "COMMA",
    /// `?`
    Conditional => "CONDITIONAL",
    /// `/`
    Divide => "DIVIDE",
    /// `>`
    Greater => "GREATER",
    /// `<`
    Less => "LESS",
    /// `!`
    LogicalNot => "LOGICAL_NOT",
    /// `%`
    Modulo => "MODULO",
    /// `*`
    Multiply => "MULTIPLY",
    /// `{`
    OpenCurvlyBracket => "OPEN_CURVLY_BRACKET",
    /// `(`
    OpenParenthesis => "OPEN_PARENTHESIS",
    /// `[`
    OpenSquareBracket => "OPEN_SQUARE_BRACKET",
    /// `.`
    Member => "MEMBER",
    /// `;`
    Semicolon => "SEMICOLON",
    /// `-`
    Subtract => "SUBTRACT",

    // =========================================
    // Everything else, sorted by name
    // =========================================
    /// `a[b]`
    Array => "ARRAY",
    /// `[a, b]`
    ArrayLiteral => "ARRAY_LITERAL",
    As => "AS",
    AssignmentAdd => "ASSIGNMENT_ADD",
    AssignmentBitwiseAnd => "ASSIGNMENT_BITWISE_AND",
    AssignmentBitwiseOr => "ASSIGNMENT_BITWISE_OR",
    AssignmentBitwiseXor => "ASSIGNMENT_BITWISE_XOR",
    AssignmentDivide => "ASSIGNMENT_DIVIDE",
    AssignmentLogicalAnd => "ASSIGNMENT_LOGICAL_AND",
    AssignmentLogicalOr => "ASSIGNMENT_LOGICAL_OR",
    AssignmentLogicalXor => "ASSIGNMENT_LOGICAL_XOR",
    AssignmentMaximum => "ASSIGNMENT_MAXIMUM",
    AssignmentMinimum => "ASSIGNMENT_MINIMUM",
    AssignmentModulo => "ASSIGNMENT_MODULO",
    AssignmentMultiply => "ASSIGNMENT_MULTIPLY",
    AssignmentPower => "ASSIGNMENT_POWER",
    AssignmentRotateLeft => "ASSIGNMENT_ROTATE_LEFT",
    AssignmentRotateRight => "ASSIGNMENT_ROTATE_RIGHT",
    AssignmentShiftLeft => "ASSIGNMENT_SHIFT_LEFT",
    AssignmentShiftRight => "ASSIGNMENT_SHIFT_RIGHT",
    AssignmentShiftRightUnsigned => "ASSIGNMENT_SHIFT_RIGHT_UNSIGNED",
    AssignmentSubtract => "ASSIGNMENT_SUBTRACT",
    /// List of attributes preceding a directive.
    Attributes => "ATTRIBUTES",
    Auto => "AUTO",
    Break => "BREAK",
    /// `f(args)`
    Call => "CALL",
    Case => "CASE",
    Catch => "CATCH",
    Class => "CLASS",
    /// `<=>`
    Compare => "COMPARE",
    Const => "CONST",
    Continue => "CONTINUE",
    Debugger => "DEBUGGER",
    /// `--x`
    Decrement => "DECREMENT",
    Default => "DEFAULT",
    Delete => "DELETE",
    /// Ordered list of directives (statements and declarations).
    DirectiveList => "DIRECTIVE_LIST",
    Do => "DO",
    Else => "ELSE",
    /// Stands in for an omitted expression.
    Empty => "EMPTY",
    Enum => "ENUM",
    Equal => "EQUAL",
    Exclude => "EXCLUDE",
    Extends => "EXTENDS",
    False => "FALSE",
    Finally => "FINALLY",
    Float64 => "FLOAT64",
    For => "FOR",
    Function => "FUNCTION",
    Goto => "GOTO",
    GreaterEqual => "GREATER_EQUAL",
    Identifier => "IDENTIFIER",
    If => "IF",
    Implements => "IMPLEMENTS",
    Import => "IMPORT",
    In => "IN",
    Include => "INCLUDE",
    /// `++x`
    Increment => "INCREMENT",
    Instanceof => "INSTANCEOF",
    Int64 => "INT64",
    Interface => "INTERFACE",
    Is => "IS",
    Label => "LABEL",
    LessEqual => "LESS_EQUAL",
    /// Comma separated expressions.
    List => "LIST",
    LogicalAnd => "LOGICAL_AND",
    LogicalOr => "LOGICAL_OR",
    LogicalXor => "LOGICAL_XOR",
    /// `~=`
    Match => "MATCH",
    /// `>?`
    Maximum => "MAXIMUM",
    /// `<?`
    Minimum => "MINIMUM",
    /// `name: value` inside an argument list.
    Name => "NAME",
    Namespace => "NAMESPACE",
    New => "NEW",
    NotEqual => "NOT_EQUAL",
    /// `!~`
    NotMatch => "NOT_MATCH",
    Null => "NULL",
    ObjectLiteral => "OBJECT_LITERAL",
    Package => "PACKAGE",
    Param => "PARAM",
    Parameters => "PARAMETERS",
    ParamMatch => "PARAM_MATCH",
    /// `x--`
    PostDecrement => "POST_DECREMENT",
    /// `x++`
    PostIncrement => "POST_INCREMENT",
    /// `**`
    Power => "POWER",
    Private => "PRIVATE",
    /// Root of one compilation unit.
    Program => "PROGRAM",
    Public => "PUBLIC",
    /// `..`
    Range => "RANGE",
    RegularExpression => "REGULAR_EXPRESSION",
    /// `...`
    Rest => "REST",
    Return => "RETURN",
    /// Parent of several programs.
    Root => "ROOT",
    /// `<!`
    RotateLeft => "ROTATE_LEFT",
    /// `>!`
    RotateRight => "ROTATE_RIGHT",
    /// `::`
    Scope => "SCOPE",
    /// Initializer of a variable or parameter.
    Set => "SET",
    ShiftLeft => "SHIFT_LEFT",
    ShiftRight => "SHIFT_RIGHT",
    ShiftRightUnsigned => "SHIFT_RIGHT_UNSIGNED",
    /// `~~`
    SmartMatch => "SMART_MATCH",
    StrictlyEqual => "STRICTLY_EQUAL",
    StrictlyNotEqual => "STRICTLY_NOT_EQUAL",
    String => "STRING",
    Super => "SUPER",
    Switch => "SWITCH",
    Synchronized => "SYNCHRONIZED",
    This => "THIS",
    Throw => "THROW",
    True => "TRUE",
    Try => "TRY",
    Type => "TYPE",
    Typeof => "TYPEOF",
    Undefined => "UNDEFINED",
    Use => "USE",
    Var => "VAR",
    Variable => "VARIABLE",
    VarAttributes => "VAR_ATTRIBUTES",
    /// Identifier whose meaning is resolved at run time.
    Videntifier => "VIDENTIFIER",
    Void => "VOID",
    While => "WHILE",
    With => "WITH",
    Yield => "YIELD",
}

/// Overloadable operators and their source spelling.
const OPERATORS: &[(NodeType, &str)] = &[
    (NodeType::LogicalNot, "!"),
    (NodeType::Modulo, "%"),
    (NodeType::BitwiseAnd, "&"),
    (NodeType::Multiply, "*"),
    (NodeType::Add, "+"),
    (NodeType::Subtract, "-"),
    (NodeType::Divide, "/"),
    (NodeType::Less, "<"),
    (NodeType::Assignment, "="),
    (NodeType::Greater, ">"),
    (NodeType::BitwiseXor, "^"),
    (NodeType::BitwiseOr, "|"),
    (NodeType::BitwiseNot, "~"),
    (NodeType::AssignmentAdd, "+="),
    (NodeType::AssignmentBitwiseAnd, "&="),
    (NodeType::AssignmentBitwiseOr, "|="),
    (NodeType::AssignmentBitwiseXor, "^="),
    (NodeType::AssignmentDivide, "/="),
    (NodeType::AssignmentLogicalAnd, "&&="),
    (NodeType::AssignmentLogicalOr, "||="),
    (NodeType::AssignmentLogicalXor, "^^="),
    (NodeType::AssignmentMaximum, ">?="),
    (NodeType::AssignmentMinimum, "<?="),
    (NodeType::AssignmentModulo, "%="),
    (NodeType::AssignmentMultiply, "*="),
    (NodeType::AssignmentPower, "**="),
    (NodeType::AssignmentRotateLeft, "<!="),
    (NodeType::AssignmentRotateRight, ">!="),
    (NodeType::AssignmentShiftLeft, "<<="),
    (NodeType::AssignmentShiftRight, ">>="),
    (NodeType::AssignmentShiftRightUnsigned, ">>>="),
    (NodeType::AssignmentSubtract, "-="),
    (NodeType::Call, "()"),
    (NodeType::Compare, "<=>"),
    (NodeType::Decrement, "--x"),
    (NodeType::Equal, "=="),
    (NodeType::GreaterEqual, ">="),
    (NodeType::Increment, "++x"),
    (NodeType::LessEqual, "<="),
    (NodeType::LogicalAnd, "&&"),
    (NodeType::LogicalOr, "||"),
    (NodeType::LogicalXor, "^^"),
    (NodeType::Match, "~="),
    (NodeType::Maximum, ">?"),
    (NodeType::Minimum, "<?"),
    (NodeType::NotEqual, "!="),
    (NodeType::NotMatch, "!~"),
    (NodeType::PostDecrement, "x--"),
    (NodeType::PostIncrement, "x++"),
    (NodeType::Power, "**"),
    (NodeType::RotateLeft, "<!"),
    (NodeType::RotateRight, ">!"),
    (NodeType::ShiftLeft, "<<"),
    (NodeType::ShiftRight, ">>"),
    (NodeType::ShiftRightUnsigned, ">>>"),
    (NodeType::SmartMatch, "~~"),
    (NodeType::StrictlyEqual, "==="),
    (NodeType::StrictlyNotEqual, "!=="),
];

impl NodeType {
    /// Source spelling of an overloadable operator.
    pub fn operator_to_string(self) -> Option<&'static str> {
        OPERATORS
            .iter()
            .find(|(node_type, _)| *node_type == self)
            .map(|(_, text)| *text)
    }

    /// Operator tag for a spelling such as `"+="` or `"x++"`.
    pub fn string_to_operator(text: &str) -> Option<NodeType> {
        OPERATORS
            .iter()
            .find(|(_, spelling)| *spelling == text)
            .map(|(node_type, _)| *node_type)
    }

    /// Literal tags: numbers, strings, booleans, null, undefined and regular
    /// expressions.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            NodeType::Int64
                | NodeType::Float64
                | NodeType::String
                | NodeType::True
                | NodeType::False
                | NodeType::Null
                | NodeType::Undefined
                | NodeType::RegularExpression
        )
    }

    /// Whether a node of this tag may own children.
    pub fn can_be_parent(self) -> bool {
        use NodeType::*;
        match self {
            // pure punctuation never makes it into a tree
            Eof | CloseCurvlyBracket | CloseParenthesis | CloseSquareBracket | Colon | Comma
            | OpenCurvlyBracket | OpenParenthesis | OpenSquareBracket | Semicolon | Else => false,

            // terminals
            Int64 | Float64 | String | True | False | Null | Undefined | RegularExpression
            | Identifier | Videntifier | This | Super | Private | Public | Debugger | Auto
            | Empty | Break | Continue | Goto | Rest => false,

            Unknown | Add | BitwiseAnd | BitwiseNot | Assignment | BitwiseOr | BitwiseXor
            | Conditional | Divide | Greater | Less | LogicalNot | Modulo | Multiply | Member
            | Subtract | Array | ArrayLiteral | As | AssignmentAdd | AssignmentBitwiseAnd
            | AssignmentBitwiseOr | AssignmentBitwiseXor | AssignmentDivide
            | AssignmentLogicalAnd | AssignmentLogicalOr | AssignmentLogicalXor
            | AssignmentMaximum | AssignmentMinimum | AssignmentModulo | AssignmentMultiply
            | AssignmentPower | AssignmentRotateLeft | AssignmentRotateRight
            | AssignmentShiftLeft | AssignmentShiftRight | AssignmentShiftRightUnsigned
            | AssignmentSubtract | Attributes | Call | Case | Catch | Class | Compare | Const
            | Decrement | Default | Delete | DirectiveList | Do | Enum | Equal | Exclude
            | Extends | Finally | For | Function | GreaterEqual | If | Implements | Import | In
            | Include | Increment | Instanceof | Interface | Is | Label | LessEqual | List
            | LogicalAnd | LogicalOr | LogicalXor | Match | Maximum | Minimum | Name | Namespace | New
            | NotEqual | NotMatch | ObjectLiteral | Package | Param | Parameters | ParamMatch
            | PostDecrement | PostIncrement | Power | Program | Range | Return | Root
            | RotateLeft | RotateRight | Scope | Set | ShiftLeft | ShiftRight
            | ShiftRightUnsigned | SmartMatch | StrictlyEqual | StrictlyNotEqual | Switch
            | Synchronized | Throw | Try | Type | Typeof | Use | Var | Variable | VarAttributes
            | Void | While | With | Yield => true,
        }
    }

    /// Whether a node of this tag may be owned by another node.
    pub fn can_be_child(self) -> bool {
        use NodeType::*;
        match self {
            Eof | CloseCurvlyBracket | CloseParenthesis | CloseSquareBracket | Colon | Comma
            | OpenCurvlyBracket | OpenParenthesis | OpenSquareBracket | Semicolon | Else
            | Root => false,
            _ => true,
        }
    }

    /// Whether the tag carries a string value.
    pub fn has_string_value(self) -> bool {
        use NodeType::*;
        matches!(
            self,
            String
                | Identifier
                | Videntifier
                | RegularExpression
                | Break
                | Continue
                | Class
                | Interface
                | Enum
                | Function
                | Goto
                | Import
                | Label
                | Name
                | Namespace
                | Package
                | Param
                | Variable
                | VarAttributes
        )
    }

    /// Binary or unary operators that assign to their left operand.
    pub fn is_assignment(self) -> bool {
        use NodeType::*;
        matches!(
            self,
            Assignment
                | AssignmentAdd
                | AssignmentBitwiseAnd
                | AssignmentBitwiseOr
                | AssignmentBitwiseXor
                | AssignmentDivide
                | AssignmentLogicalAnd
                | AssignmentLogicalOr
                | AssignmentLogicalXor
                | AssignmentMaximum
                | AssignmentMinimum
                | AssignmentModulo
                | AssignmentMultiply
                | AssignmentPower
                | AssignmentRotateLeft
                | AssignmentRotateRight
                | AssignmentShiftLeft
                | AssignmentShiftRight
                | AssignmentShiftRightUnsigned
                | AssignmentSubtract
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_names_are_unique() {
        let mut names: Vec<&str> = NodeType::ALL.iter().map(|t| t.name()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn operator_round_trip() {
        for (node_type, text) in OPERATORS {
            assert_eq!(node_type.operator_to_string(), Some(*text));
            assert_eq!(NodeType::string_to_operator(text), Some(*node_type));
        }
        assert_eq!(NodeType::If.operator_to_string(), None);
        assert_eq!(NodeType::string_to_operator("not an operator"), None);
    }

    #[test]
    fn punctuation_is_neither_parent_nor_child() {
        for t in [NodeType::CloseParenthesis, NodeType::Semicolon, NodeType::Comma] {
            assert!(!t.can_be_parent());
            assert!(!t.can_be_child());
        }
        assert!(NodeType::Program.can_be_child());
        assert!(!NodeType::Root.can_be_child());
        assert!(NodeType::Root.can_be_parent());
    }

    #[test]
    fn literals_are_leaves() {
        for t in NodeType::ALL.iter().filter(|t| t.is_literal()) {
            assert!(!t.can_be_parent(), "{} should be a leaf", t);
            assert!(t.can_be_child());
        }
    }
}
