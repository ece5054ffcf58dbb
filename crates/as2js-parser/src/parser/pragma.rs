//! `use` pragmas.
//!
//! A pragma turns an option on or off for the rest of the compilation unit:
//!
//! ```text
//! use extended_operators, no_octal, strict(false), extended_statements(3);
//! use extended_operators(true)?;   // prima: only checks the current value
//! ```

use as2js_core::{ErrorCode, Options};
use log::debug;

use super::Parser;
use crate::input::Input;
use crate::node::{NodeResult, NodeType};

/// Value given between the parenthesis of a pragma.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PragmaArgument {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String,
}

impl<I: Input> Parser<I> {
    /// Parse the pragmas following `use` up to the closing `;`, which is
    /// left for the directive.
    pub(super) fn pragma(&mut self) -> NodeResult<()> {
        if !self.check(NodeType::Identifier) {
            self.error(ErrorCode::BadPragma, "a pragma name was expected after 'use'");
            return Ok(());
        }

        while self.check(NodeType::Identifier) {
            let name = self.token_string();
            self.advance();

            let argument = if self.eat(NodeType::OpenParenthesis) {
                self.pragma_argument()
            } else {
                None
            };
            let prima = self.eat(NodeType::Conditional);

            match Options::from_pragma(&name) {
                Some((option, value)) => self.apply_pragma(&name, option, value, argument, prima),
                None => debug!("ignoring unknown pragma '{}'", name),
            }

            match self.peek() {
                NodeType::Comma => {
                    self.advance();
                }
                NodeType::Identifier => {
                    self.error(ErrorCode::BadPragma, "pragmas must be separated by commas");
                }
                NodeType::Semicolon => {}
                _ => {
                    self.error(
                        ErrorCode::BadPragma,
                        "pragmas must be separated by commas and ended by a semicolon",
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    /// Read the argument after `(` including the closing `)`.
    fn pragma_argument(&mut self) -> Option<PragmaArgument> {
        if self.eat(NodeType::CloseParenthesis) {
            return None;
        }

        let negative = self.eat(NodeType::Subtract);
        let argument = match self.peek() {
            NodeType::True => Some(PragmaArgument::Boolean(true)),
            NodeType::False => Some(PragmaArgument::Boolean(false)),
            NodeType::String => Some(PragmaArgument::String),
            NodeType::Int64 => self.tree.int64(self.token).ok().map(|n| {
                PragmaArgument::Integer(if negative { n.wrapping_neg() } else { n })
            }),
            NodeType::Float64 => self.tree.float64(self.token).ok().map(|f| {
                PragmaArgument::Float(if negative { -f } else { f })
            }),
            NodeType::CloseParenthesis if negative => {
                self.error(ErrorCode::BadPragma, "a pragma argument cannot just be '-'");
                self.advance();
                return None;
            }
            _ => None,
        };

        match argument {
            None => self.error(ErrorCode::BadPragma, "invalid argument type for a pragma"),
            Some(PragmaArgument::Boolean(_) | PragmaArgument::String) if negative => {
                self.error(ErrorCode::BadPragma, "invalid negative argument for a pragma");
            }
            Some(_) => {}
        }
        if argument.is_some() || !self.check(NodeType::CloseParenthesis) {
            self.advance();
        }

        if !self.eat(NodeType::CloseParenthesis) {
            self.error(ErrorCode::BadPragma, "invalid argument for a pragma");
            // resynchronize on the closing parenthesis when it is close by
            while !matches!(
                self.peek(),
                NodeType::CloseParenthesis | NodeType::Semicolon | NodeType::Eof
            ) {
                self.advance();
            }
            self.eat(NodeType::CloseParenthesis);
        }
        argument
    }

    fn apply_pragma(
        &mut self,
        name: &str,
        option: Options,
        value: bool,
        argument: Option<PragmaArgument>,
        prima: bool,
    ) {
        // `no_` names invert whatever the argument says
        let mut wanted = self.options;
        match argument {
            None => wanted.set(option, value),
            Some(PragmaArgument::Boolean(b)) => wanted.set(option, b == value),
            Some(PragmaArgument::Integer(n)) if option == Options::EXTENDED_STATEMENTS => {
                wanted.set(Options::EXTENDED_STATEMENTS, ((n & 1) != 0) == value);
                wanted.set(Options::FORCED_BLOCK, ((n & 2) != 0) == value);
            }
            Some(PragmaArgument::Integer(n)) => wanted.set(option, (n != 0) == value),
            Some(PragmaArgument::Float(f)) => wanted.set(option, (f.trunc() != 0.0) == value),
            Some(PragmaArgument::String) => {
                self.error(
                    ErrorCode::IncompatiblePragmaArgument,
                    format!("incompatible pragma argument for '{}'", name),
                );
                return;
            }
        }

        if prima {
            if wanted != self.options {
                self.error(ErrorCode::PragmaFailed, format!("prima pragma '{}' failed", name));
            }
            return;
        }
        if wanted != self.options {
            self.set_options(wanted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use as2js_core::{ErrorCode, Options};

    #[test]
    fn pragma_turns_on_extended_operators() {
        let output = parse("use extended_operators; a ** b;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
        let power = directives(&output)[0];
        assert_eq!(
            output.tree.display(power).to_string(),
            "POWER\n  IDENTIFIER \"a\"\n  IDENTIFIER \"b\"\n"
        );
    }

    #[test]
    fn without_the_pragma_power_is_rejected() {
        let output = parse("a ** b;");
        assert!(!output.diagnostics.is_empty());
    }

    #[test]
    fn no_prefix_and_arguments() {
        let output = parse_with("use no_extended_operators; a ** b;", Options::EXTENDED_OPERATORS);
        assert!(!output.diagnostics.is_empty());

        let output = parse("use extended_operators(0), extended_operators(1); a ** b;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);

        let output = parse("use extended_operators(false); a ** b;");
        assert!(!output.diagnostics.is_empty());
    }

    #[test]
    fn extended_statements_integer_also_forces_blocks() {
        let output = parse("use extended_statements(2); if (a) b;");
        assert!(!codes(&output).is_empty());

        let output = parse("use extended_statements(1); goto done;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
    }

    #[test]
    fn prima_pragma_checks_without_changing() {
        let output = parse("use octal(false)?;");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);

        let output = parse("use octal(true)?;");
        assert_eq!(codes(&output), vec![ErrorCode::PragmaFailed]);

        // a prima pragma never turns the option on
        let output = parse("use extended_operators?; a ** b;");
        assert_eq!(codes(&output)[0], ErrorCode::PragmaFailed);
        assert!(codes(&output).len() > 1);
    }

    #[test]
    fn bad_pragmas() {
        assert_eq!(codes(&parse("use;")), vec![ErrorCode::BadPragma]);
        assert_eq!(codes(&parse("use octal strict;")), vec![ErrorCode::BadPragma]);
        assert_eq!(codes(&parse("use octal(-);")), vec![ErrorCode::BadPragma]);
        assert_eq!(codes(&parse("use octal(-true);")), vec![ErrorCode::BadPragma]);
        assert_eq!(codes(&parse("use octal(a);")), vec![ErrorCode::BadPragma]);
        assert_eq!(codes(&parse("use octal(1 2);")), vec![ErrorCode::BadPragma]);
        assert_eq!(
            codes(&parse("use octal(\"yes\");")),
            vec![ErrorCode::IncompatiblePragmaArgument]
        );
    }

    #[test]
    fn unknown_pragmas_are_ignored() {
        let output = parse("use something_else(3);");
        assert!(output.diagnostics.is_empty(), "{}", output.diagnostics);
    }
}
