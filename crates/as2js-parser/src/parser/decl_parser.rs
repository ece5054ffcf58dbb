//! Declarations: variables, classes and interfaces, enumerations, packages,
//! imports and namespaces.

use as2js_core::ErrorCode;

use super::Parser;
use crate::input::Input;
use crate::node::{Flag, NodeId, NodeResult, NodeType};

/// Which keyword introduced a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum VariableKind {
    Var,
    Const,
    Final,
}

impl VariableKind {
    fn describe(self) -> &'static str {
        match self {
            VariableKind::Var => "variable",
            VariableKind::Const => "constant",
            VariableKind::Final => "final variable",
        }
    }
}

impl<I: Input> Parser<I> {
    // =========================================
    // Variables
    // =========================================

    /// Parse `name [: type] [= value], ...` into a `VAR` node with one
    /// `VARIABLE` child per name. The keyword was already consumed.
    pub(super) fn variable(&mut self, kind: VariableKind) -> NodeResult<NodeId> {
        let var = self.new_node(NodeType::Var);
        loop {
            if !self.check(NodeType::Identifier) {
                self.error(
                    ErrorCode::InvalidVariable,
                    format!("expected an identifier as the {} name", kind.describe()),
                );
                break;
            }
            let token = self.advance();
            let variable = self.tree.create_replacement(token, NodeType::Variable)?;
            let name = self.tree.string(token)?.to_string();
            self.tree.set_string(variable, name)?;
            match kind {
                VariableKind::Var => {}
                VariableKind::Const => self.tree.set_flag(variable, Flag::VariableConst, true)?,
                VariableKind::Final => self.tree.set_flag(variable, Flag::VariableFinal, true)?,
            }
            self.tree.append_child(var, variable)?;

            if self.check(NodeType::Colon) {
                let colon = self.advance();
                let type_node = self.tree.create_replacement(colon, NodeType::Type)?;
                let expr = self.conditional_expression(false)?;
                self.tree.append_child(type_node, expr)?;
                self.tree.append_child(variable, type_node)?;
            }
            if self.check(NodeType::Assignment) {
                let token = self.advance();
                let set = self.tree.create_replacement(token, NodeType::Set)?;
                let value = self.conditional_expression(false)?;
                self.tree.append_child(set, value)?;
                self.tree.append_child(variable, set)?;
            }

            if !self.eat(NodeType::Comma) {
                break;
            }
        }
        Ok(var)
    }

    // =========================================
    // Classes and interfaces
    // =========================================

    /// `class Name [extends E] [implements I, J] { ... }` or a forward
    /// declaration ending with `;`. `token` is the keyword.
    pub(super) fn class_declaration(&mut self, token: NodeId) -> NodeResult<NodeId> {
        let keyword = self.tree.node_type(token)?;
        if self.check(NodeType::Identifier) {
            let name = self.token_string();
            self.advance();
            self.tree.set_string(token, name)?;
        } else {
            self.error(
                ErrorCode::InvalidClass,
                format!("the name of the {} is expected after the keyword", keyword),
            );
        }

        while matches!(self.peek(), NodeType::Extends | NodeType::Implements) {
            let inheritance = self.advance();
            let expr = self.expression()?;
            self.tree.append_child(inheritance, expr)?;
            self.tree.append_child(token, inheritance)?;
        }

        match self.peek() {
            NodeType::OpenCurvlyBracket => {
                self.advance();
                let list = self.directive_list(false)?;
                self.tree.append_child(token, list)?;
                self.expect(
                    NodeType::CloseCurvlyBracket,
                    ErrorCode::CurvlyBracketsExpected,
                    "'}' expected to close the class definition",
                );
            }
            NodeType::Semicolon => {
                self.advance();
            }
            _ => {
                self.error(
                    ErrorCode::CurvlyBracketsExpected,
                    format!("'{{' expected to start the definition of the {}", keyword),
                );
            }
        }
        Ok(token)
    }

    // =========================================
    // Enumerations
    // =========================================

    /// `enum [class] [Name] [: type] { A, B = 5, C }`.
    ///
    /// Entries are constant `VARIABLE` nodes. An entry without a value is
    /// the previous entry plus one, or zero for the first entry.
    pub(super) fn enum_declaration(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if self.eat(NodeType::Class) {
            self.tree.set_flag(token, Flag::EnumClass, true)?;
        }
        let named = self.check(NodeType::Identifier);
        if named {
            let name = self.token_string();
            self.advance();
            self.tree.set_string(token, name)?;
        }
        if self.check(NodeType::Colon) {
            let colon = self.advance();
            let type_node = self.tree.create_replacement(colon, NodeType::Type)?;
            let expr = self.conditional_expression(false)?;
            self.tree.append_child(type_node, expr)?;
            self.tree.append_child(token, type_node)?;
        }

        if named && self.eat(NodeType::Semicolon) {
            return Ok(token);
        }
        if !self.eat(NodeType::OpenCurvlyBracket) {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                "'{' missing in the enumeration definition",
            );
            return Ok(token);
        }

        let mut previous: Option<String> = None;
        loop {
            match self.peek() {
                NodeType::CloseCurvlyBracket => {
                    self.advance();
                    break;
                }
                NodeType::Eof => {
                    self.error(
                        ErrorCode::CurvlyBracketsExpected,
                        "'}' expected to close the enumeration",
                    );
                    break;
                }
                NodeType::Comma => {
                    self.warning(ErrorCode::UnexpectedPunctuation, "',' unexpected without a name");
                    self.advance();
                }
                NodeType::Identifier => {
                    let entry = self.enum_entry(previous.as_deref())?;
                    previous = Some(self.tree.string(entry)?.to_string());
                    self.tree.append_child(token, entry)?;
                    match self.peek() {
                        NodeType::Comma => {
                            self.advance();
                        }
                        NodeType::CloseCurvlyBracket | NodeType::Eof => {}
                        _ => {
                            self.error(
                                ErrorCode::CommaExpected,
                                "',' expected between enumeration elements",
                            );
                        }
                    }
                }
                _ => {
                    self.error(
                        ErrorCode::InvalidEnum,
                        "each enumeration entry must start with an identifier",
                    );
                    self.advance();
                }
            }
        }
        Ok(token)
    }

    fn enum_entry(&mut self, previous: Option<&str>) -> NodeResult<NodeId> {
        let name_token = self.advance();
        let entry = self.tree.create_replacement(name_token, NodeType::Variable)?;
        let name = self.tree.string(name_token)?.to_string();
        self.tree.set_string(entry, name)?;
        self.tree.set_flag(entry, Flag::VariableConst, true)?;
        self.tree.set_flag(entry, Flag::VariableEnum, true)?;

        let set = self.tree.create_replacement(name_token, NodeType::Set)?;
        let value = if self.eat(NodeType::Assignment) {
            self.conditional_expression(false)?
        } else if let Some(previous) = previous {
            let add = self.tree.create_replacement(name_token, NodeType::Add)?;
            let reference = self.tree.create_replacement(name_token, NodeType::Identifier)?;
            self.tree.set_string(reference, previous)?;
            let one = self.tree.create_replacement(name_token, NodeType::Int64)?;
            self.tree.set_int64(one, 1)?;
            self.tree.append_child(add, reference)?;
            self.tree.append_child(add, one)?;
            add
        } else {
            let zero = self.tree.create_replacement(name_token, NodeType::Int64)?;
            self.tree.set_int64(zero, 0)?;
            zero
        };
        self.tree.append_child(set, value)?;
        self.tree.append_child(entry, set)?;
        Ok(entry)
    }

    // =========================================
    // Packages and imports
    // =========================================

    /// `package [a.b.c | "name"] { ... }`. The keyword was already consumed.
    pub(super) fn package(&mut self) -> NodeResult<NodeId> {
        let package = self.new_node(NodeType::Package);
        let name = match self.peek() {
            NodeType::String => {
                let name = self.token_string();
                self.advance();
                name
            }
            NodeType::Identifier => {
                let first = self.token_string();
                self.advance();
                self.dotted_name(first, false)
            }
            _ => String::new(),
        };
        self.tree.set_string(package, name)?;

        if !self.eat(NodeType::OpenCurvlyBracket) {
            self.error(
                ErrorCode::CurvlyBracketsExpected,
                "'{' expected after the package name",
            );
            return Ok(package);
        }
        let list = self.directive_list(false)?;
        self.tree.append_child(package, list)?;
        self.expect(
            NodeType::CloseCurvlyBracket,
            ErrorCode::CurvlyBracketsExpected,
            "'}' expected to close the package",
        );
        Ok(package)
    }

    /// Read `.name` parts following `first`. With `wildcard`, the name may
    /// end with `.*`.
    fn dotted_name(&mut self, first: String, wildcard: bool) -> String {
        let mut name = first;
        while self.eat(NodeType::Member) {
            match self.peek() {
                NodeType::Identifier => {
                    name.push('.');
                    name.push_str(&self.token_string());
                    self.advance();
                }
                NodeType::Multiply if wildcard => {
                    self.advance();
                    name.push_str(".*");
                    break;
                }
                _ => {
                    self.error(
                        ErrorCode::InvalidPackageName,
                        "invalid package name (expected an identifier after the last '.')",
                    );
                    break;
                }
            }
        }
        name
    }

    /// `import [implements] [alias =] name [, namespace ns | , include ... | , exclude ...]`.
    pub(super) fn import(&mut self, token: NodeId) -> NodeResult<NodeId> {
        if self.eat(NodeType::Implements) {
            self.tree.set_flag(token, Flag::ImportImplements, true)?;
        }

        let name = match self.peek() {
            NodeType::Identifier => {
                let first = self.advance();
                let first_name = self.tree.string(first)?.to_string();
                if self.eat(NodeType::Assignment) {
                    // `import alias = name;`
                    self.tree.append_child(token, first)?;
                    self.import_name()?
                } else {
                    self.dotted_name(first_name, true)
                }
            }
            NodeType::String => self.import_name()?,
            _ => {
                self.error(
                    ErrorCode::InvalidImport,
                    "a composed name or a string was expected after 'import'",
                );
                String::new()
            }
        };
        self.tree.set_string(token, name)?;

        let mut include = false;
        let mut exclude = false;
        while self.eat(NodeType::Comma) {
            let clause_type = if self.check(NodeType::Namespace) {
                NodeType::Use
            } else if self.check_contextual("include") {
                include = true;
                NodeType::Include
            } else if self.check_contextual("exclude") {
                exclude = true;
                NodeType::Exclude
            } else {
                self.error(
                    ErrorCode::InvalidImport,
                    "'namespace', 'include' or 'exclude' was expected after the ','",
                );
                break;
            };
            let keyword = self.advance();
            let clause = self.tree.create_replacement(keyword, clause_type)?;
            let expr = self.conditional_expression(false)?;
            self.tree.append_child(clause, expr)?;
            self.tree.append_child(token, clause)?;
        }
        if include && exclude {
            self.error(
                ErrorCode::InvalidImport,
                "include and exclude are mutually exclusive",
            );
        }
        Ok(token)
    }

    fn import_name(&mut self) -> NodeResult<String> {
        Ok(match self.peek() {
            NodeType::String => {
                let name = self.token_string();
                self.advance();
                name
            }
            NodeType::Identifier => {
                let first = self.token_string();
                self.advance();
                self.dotted_name(first, true)
            }
            _ => {
                self.error(
                    ErrorCode::InvalidImport,
                    "the name of a package was expected after '='",
                );
                String::new()
            }
        })
    }

    // =========================================
    // Namespaces
    // =========================================

    /// `namespace [name] { ... }`. An anonymous namespace is private, which
    /// is recorded by adding `private` to its attributes.
    pub(super) fn namespace_block(
        &mut self,
        token: NodeId,
        attributes: &mut Option<NodeId>,
    ) -> NodeResult<NodeId> {
        if self.check(NodeType::Identifier) {
            let name = self.token_string();
            self.advance();
            self.tree.set_string(token, name)?;
        } else {
            let attrs = match *attributes {
                Some(attrs) => attrs,
                None => {
                    let attrs = self.tree.create_replacement(token, NodeType::Attributes)?;
                    *attributes = Some(attrs);
                    attrs
                }
            };
            let private = self.tree.create_replacement(token, NodeType::Private)?;
            self.tree.append_child(attrs, private)?;
        }

        if !self.eat(NodeType::OpenCurvlyBracket) {
            self.error(
                ErrorCode::InvalidNamespace,
                "'{' missing after the name of this namespace",
            );
            return Ok(token);
        }
        let list = self.directive_list(false)?;
        self.tree.append_child(token, list)?;
        self.expect(
            NodeType::CloseCurvlyBracket,
            ErrorCode::CurvlyBracketsExpected,
            "'}' expected to close the namespace",
        );
        Ok(token)
    }

    /// `use namespace expr;`. Both keywords were already consumed.
    pub(super) fn use_namespace(&mut self) -> NodeResult<NodeId> {
        let node = self.new_node(NodeType::Use);
        let expr = self.expression()?;
        self.tree.append_child(node, expr)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::{ErrorCode, Severity};

    use crate::node::{Flag, Link, NodeType};

    #[test]
    fn variables_with_types_and_initializers() {
        let output = parse("var a: int = 1, b;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "VAR\n  VARIABLE \"a\"\n    TYPE\n      IDENTIFIER \"int\"\n    SET\n      INT64 1\n  VARIABLE \"b\"\n"
        );
    }

    #[test]
    fn constants() {
        let output = parse("const var x = 3; const y = 4;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        for var in directives(&output) {
            let variable = output.tree.child(var, 0).unwrap();
            assert!(output.tree.flag(variable, Flag::VariableConst).unwrap());
        }
    }

    #[test]
    fn variable_without_a_name() {
        let output = parse("var = 3;");
        assert_eq!(
            codes(&output),
            vec![ErrorCode::InvalidVariable, ErrorCode::SemicolonExpected]
        );
    }

    #[test]
    fn class_with_inheritance() {
        let output = parse("class A extends B implements C, D { var x; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "CLASS \"A\"\n  EXTENDS\n    IDENTIFIER \"B\"\n  IMPLEMENTS\n    LIST\n      IDENTIFIER \"C\"\n      IDENTIFIER \"D\"\n  DIRECTIVE_LIST DIRECTIVE_LIST_NEW_VARIABLES\n    VAR\n      VARIABLE \"x\"\n"
        );
    }

    #[test]
    fn interface_forward_declaration() {
        let output = parse("interface I; a;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(dump_first(&output), "INTERFACE \"I\"\n");
        assert_eq!(directives(&output).len(), 2);
    }

    #[test]
    fn class_without_name() {
        let output = parse("class { }");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidClass]);
    }

    #[test]
    fn enum_values_follow_the_previous_entry() {
        let output = parse("enum E { A, B = 5, C }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "ENUM \"E\"\n  VARIABLE \"A\" VARIABLE_CONST VARIABLE_ENUM\n    SET\n      INT64 0\n  VARIABLE \"B\" VARIABLE_CONST VARIABLE_ENUM\n    SET\n      INT64 5\n  VARIABLE \"C\" VARIABLE_CONST VARIABLE_ENUM\n    SET\n      ADD\n        IDENTIFIER \"B\"\n        INT64 1\n"
        );
    }

    #[test]
    fn enum_class_with_a_type() {
        let output = parse("enum class Color : int { Red }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let node = directives(&output)[0];
        assert!(output.tree.flag(node, Flag::EnumClass).unwrap());
        let type_node = output.tree.child(node, 0).unwrap();
        assert_eq!(output.tree.node_type(type_node).unwrap(), NodeType::Type);
    }

    #[test]
    fn enum_errors() {
        let output = parse("enum E { , A B, 3 }");
        let severities: Vec<Severity> = output.diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(
            codes(&output),
            vec![
                ErrorCode::UnexpectedPunctuation,
                ErrorCode::CommaExpected,
                ErrorCode::InvalidEnum,
            ]
        );
        assert_eq!(severities[0], Severity::Warning);
        assert_eq!(output.tree.children_count(directives(&output)[0]).unwrap(), 2);
    }

    #[test]
    fn packages() {
        let output = parse("package a.b.c { var x; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let package = directives(&output)[0];
        assert_eq!(output.tree.string(package).unwrap(), "a.b.c");
        assert_eq!(output.tree.children_count(package).unwrap(), 1);

        let output = parse("package \"my package\" { }");
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.tree.string(directives(&output)[0]).unwrap(), "my package");

        let output = parse("package a. { }");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidPackageName]);
    }

    #[test]
    fn imports() {
        let output = parse("import implements a.b.*;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let import = directives(&output)[0];
        assert_eq!(output.tree.string(import).unwrap(), "a.b.*");
        assert!(output.tree.flag(import, Flag::ImportImplements).unwrap());

        let output = parse("import alias = x.y, namespace ns;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "IMPORT \"x.y\"\n  IDENTIFIER \"alias\"\n  USE\n    IDENTIFIER \"ns\"\n"
        );
    }

    #[test]
    fn import_include_and_exclude_conflict() {
        let output = parse("import a, include b, exclude c;");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidImport]);
        assert_eq!(
            dump_first(&output),
            "IMPORT \"a\"\n  INCLUDE\n    IDENTIFIER \"b\"\n  EXCLUDE\n    IDENTIFIER \"c\"\n"
        );
    }

    #[test]
    fn namespaces() {
        let output = parse("namespace n { var a; }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let namespace = directives(&output)[0];
        assert_eq!(output.tree.string(namespace).unwrap(), "n");
        assert_eq!(output.tree.link(namespace, Link::Attributes).unwrap(), None);
    }

    #[test]
    fn anonymous_namespace_is_private() {
        let output = parse("namespace { }");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let namespace = directives(&output)[0];
        let attrs = output.tree.link(namespace, Link::Attributes).unwrap().unwrap();
        assert_eq!(output.tree.display(attrs).to_string(), "ATTRIBUTES\n  PRIVATE\n");

        let output = parse("namespace n;");
        assert_eq!(codes(&output), vec![ErrorCode::InvalidNamespace]);
    }

    #[test]
    fn use_namespace() {
        let output = parse("use namespace a.b;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        assert_eq!(
            dump_first(&output),
            "USE\n  MEMBER\n    IDENTIFIER \"a\"\n    IDENTIFIER \"b\"\n"
        );
    }
}
