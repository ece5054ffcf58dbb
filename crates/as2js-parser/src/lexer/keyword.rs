use as2js_core::Options;

use crate::node::NodeType;

/// Map a reserved word to its token type.
///
/// `goto` is only reserved with extended statements. The pseudo literals
/// `Infinity`, `NaN`, `__FILE__` and `__LINE__` are handled by the lexer
/// since they carry a value.
pub fn lookup_keyword(ident: &str, options: Options) -> Option<NodeType> {
    use NodeType::*;
    Some(match ident {
        "as" => As,
        "break" => Break,
        "case" => Case,
        "catch" => Catch,
        "class" => Class,
        "const" => Const,
        "continue" => Continue,
        "debugger" => Debugger,
        "default" => Default,
        "delete" => Delete,
        "do" => Do,
        "else" => Else,
        "enum" => Enum,
        "extends" => Extends,
        "false" => False,
        "finally" => Finally,
        "for" => For,
        "function" => Function,
        "goto" if options.contains(Options::EXTENDED_STATEMENTS) => Goto,
        "if" => If,
        "implements" => Implements,
        "import" => Import,
        "in" => In,
        "instanceof" => Instanceof,
        "interface" => Interface,
        "is" => Is,
        "namespace" => Namespace,
        "new" => New,
        "null" => Null,
        "package" => Package,
        "private" => Private,
        "public" => Public,
        "return" => Return,
        "super" => Super,
        "switch" => Switch,
        "synchronized" => Synchronized,
        "this" => This,
        "throw" => Throw,
        "true" => True,
        "try" => Try,
        "typeof" => Typeof,
        "undefined" => Undefined,
        "use" => Use,
        "var" => Var,
        "void" => Void,
        "while" => While,
        "with" => With,
        "yield" => Yield,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(lookup_keyword("while", Options::empty()), Some(NodeType::While));
        assert_eq!(lookup_keyword("instanceof", Options::empty()), Some(NodeType::Instanceof));
        assert_eq!(lookup_keyword("whilst", Options::empty()), None);
        assert_eq!(lookup_keyword("static", Options::empty()), None);
    }

    #[test]
    fn goto_needs_extended_statements() {
        assert_eq!(lookup_keyword("goto", Options::empty()), None);
        assert_eq!(
            lookup_keyword("goto", Options::EXTENDED_STATEMENTS),
            Some(NodeType::Goto)
        );
    }
}
