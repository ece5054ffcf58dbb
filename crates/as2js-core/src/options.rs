//! Language options consulted by the lexer and the parser.
//!
//! Every toggle defaults to off; an empty [`Options`] set behaves exactly as
//! if no options were supplied at all.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::OptionsError;

bitflags! {
    /// Named boolean toggles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u32 {
        /// Accept `**`, `<?`, `>?`, `<!`, `>!`, `~=`, `~~`, `!~`, `<=>`, `:=`, `<>`.
        const EXTENDED_OPERATORS = 1 << 0;
        /// Accept `goto`, range cases and similar statement extensions.
        const EXTENDED_STATEMENTS = 1 << 1;
        /// Accept legacy octal literals such as `017`.
        const OCTAL = 1 << 2;
        /// Accept `\e`, `\U########` and octal escapes in strings.
        const EXTENDED_ESCAPE_SEQUENCES = 1 << 3;
        /// Strict mode.
        const STRICT = 1 << 4;
        /// Accept the `with` statement.
        const ALLOW_WITH = 1 << 5;
        /// Require braces around every control-flow body.
        const FORCED_BLOCK = 1 << 6;
        const TRACE = 1 << 7;
        const TRACE_TO_OBJECT = 1 << 8;
    }
}

const OPTION_NAMES: [(&str, Options); 9] = [
    ("extended_operators", Options::EXTENDED_OPERATORS),
    ("extended_statements", Options::EXTENDED_STATEMENTS),
    ("octal", Options::OCTAL),
    ("extended_escape_sequences", Options::EXTENDED_ESCAPE_SEQUENCES),
    ("strict", Options::STRICT),
    ("allow_with", Options::ALLOW_WITH),
    ("forced_block", Options::FORCED_BLOCK),
    ("trace", Options::TRACE),
    ("trace_to_object", Options::TRACE_TO_OBJECT),
];

impl Options {
    /// Look up an option by its pragma name.
    ///
    /// Returns the option and the value the pragma assigns to it, so that
    /// `no_octal` yields `(OCTAL, false)`.
    pub fn from_pragma(name: &str) -> Option<(Options, bool)> {
        let (name, value) = match name.strip_prefix("no_") {
            Some(rest) => (rest, false),
            None if name == "not_strict" => ("strict", false),
            None => (name, true),
        };
        Self::from_option_name(name).map(|option| (option, value))
    }

    /// Look up an option by its canonical name.
    pub fn from_option_name(name: &str) -> Option<Options> {
        OPTION_NAMES
            .iter()
            .find(|(option_name, _)| *option_name == name)
            .map(|(_, option)| *option)
    }

    /// Canonical name of a single option.
    pub fn name(self) -> &'static str {
        OPTION_NAMES
            .iter()
            .find(|(_, option)| *option == self)
            .map_or("<combined>", |(name, _)| *name)
    }
}

impl FromStr for Options {
    type Err = OptionsError;

    /// Parse a comma or whitespace separated list of option names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Options::empty();
        for name in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
        {
            match Options::from_option_name(name) {
                Some(option) => options |= option,
                None => {
                    return Err(OptionsError::UnknownOption {
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(options)
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for option in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(option.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_is_all_off() {
        let options = Options::default();
        assert!(options.is_empty());
        assert!(!options.contains(Options::EXTENDED_OPERATORS));
    }

    #[test]
    fn options_from_pragma_names() {
        assert_eq!(
            Options::from_pragma("extended_operators"),
            Some((Options::EXTENDED_OPERATORS, true))
        );
        assert_eq!(Options::from_pragma("no_octal"), Some((Options::OCTAL, false)));
        assert_eq!(Options::from_pragma("not_strict"), Some((Options::STRICT, false)));
        assert_eq!(Options::from_pragma("whatever"), None);
    }

    #[test]
    fn options_lookup_uses_pragma_spelling() {
        assert_eq!(
            Options::from_option_name("extended_escape_sequences"),
            Some(Options::EXTENDED_ESCAPE_SEQUENCES)
        );
        assert_eq!(Options::from_option_name("EXTENDED_ESCAPE_SEQUENCES"), None);
        // the generated constant-name lookup stays available
        assert_eq!(Options::from_name("STRICT"), Some(Options::STRICT));
    }

    #[test]
    fn options_parse_list() {
        let options: Options = "extended_operators, strict".parse().unwrap();
        assert_eq!(options, Options::EXTENDED_OPERATORS | Options::STRICT);
        assert_eq!(options.to_string(), "extended_operators,strict");
    }

    #[test]
    fn options_parse_unknown_name() {
        let err = "octal,bogus".parse::<Options>().unwrap_err();
        assert_eq!(
            err,
            OptionsError::UnknownOption {
                name: "bogus".to_string()
            }
        );
    }
}
