//! Declaration attributes (`public`, `static`, `final`, ...).
//!
//! Some attributes are mutually exclusive within a group. A conflicting
//! assignment is refused and reported; the value already set wins.

use bitflags::bitflags;

use super::NodeType;

/// A single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    // member visibility
    Public,
    Private,
    Protected,
    Internal,
    Transient,
    Volatile,

    // function type
    Static,
    Abstract,
    Virtual,
    Array,
    Inline,

    // function contract
    RequireElse,
    EnsureThen,

    // function/variable is defined in the host
    Intrinsic,
    Unimplemented,

    Deprecated,
    Unsafe,

    Constructor,

    Final,
    Enumerable,

    True,
    False,
    Unused,

    Dynamic,

    // switch
    Foreach,
    Nobreak,
    Autobreak,

    // type-checking state
    Type,

    Defined,
}

bitflags! {
    /// Storage for the attributes of one node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeSet: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;
        const TRANSIENT = 1 << 4;
        const VOLATILE = 1 << 5;
        const STATIC = 1 << 6;
        const ABSTRACT = 1 << 7;
        const VIRTUAL = 1 << 8;
        const ARRAY = 1 << 9;
        const INLINE = 1 << 10;
        const REQUIRE_ELSE = 1 << 11;
        const ENSURE_THEN = 1 << 12;
        const INTRINSIC = 1 << 13;
        const UNIMPLEMENTED = 1 << 14;
        const DEPRECATED = 1 << 15;
        const UNSAFE = 1 << 16;
        const CONSTRUCTOR = 1 << 17;
        const FINAL = 1 << 18;
        const ENUMERABLE = 1 << 19;
        const TRUE = 1 << 20;
        const FALSE = 1 << 21;
        const UNUSED = 1 << 22;
        const DYNAMIC = 1 << 23;
        const FOREACH = 1 << 24;
        const NOBREAK = 1 << 25;
        const AUTOBREAK = 1 << 26;
        const TYPE = 1 << 27;
        const DEFINED = 1 << 28;
    }
}

/// A set of attributes of which at most one may be set at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeGroup {
    MemberVisibility,
    FunctionType,
    Switch,
    Conditional,
}

impl AttributeGroup {
    pub fn members(self) -> AttributeSet {
        match self {
            AttributeGroup::MemberVisibility => {
                AttributeSet::PUBLIC | AttributeSet::PRIVATE | AttributeSet::PROTECTED
            }
            AttributeGroup::FunctionType => {
                AttributeSet::STATIC
                    | AttributeSet::ABSTRACT
                    | AttributeSet::VIRTUAL
                    | AttributeSet::CONSTRUCTOR
            }
            AttributeGroup::Switch => {
                AttributeSet::FOREACH | AttributeSet::NOBREAK | AttributeSet::AUTOBREAK
            }
            AttributeGroup::Conditional => AttributeSet::TRUE | AttributeSet::FALSE,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AttributeGroup::MemberVisibility => "public, private, and protected",
            AttributeGroup::FunctionType => "static, abstract, virtual, and constructor",
            AttributeGroup::Switch => "foreach, nobreak, and autobreak",
            AttributeGroup::Conditional => "true and false",
        }
    }
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: &'static [Attribute] = &[
        Attribute::Public,
        Attribute::Private,
        Attribute::Protected,
        Attribute::Internal,
        Attribute::Transient,
        Attribute::Volatile,
        Attribute::Static,
        Attribute::Abstract,
        Attribute::Virtual,
        Attribute::Array,
        Attribute::Inline,
        Attribute::RequireElse,
        Attribute::EnsureThen,
        Attribute::Intrinsic,
        Attribute::Unimplemented,
        Attribute::Deprecated,
        Attribute::Unsafe,
        Attribute::Constructor,
        Attribute::Final,
        Attribute::Enumerable,
        Attribute::True,
        Attribute::False,
        Attribute::Unused,
        Attribute::Dynamic,
        Attribute::Foreach,
        Attribute::Nobreak,
        Attribute::Autobreak,
        Attribute::Type,
        Attribute::Defined,
    ];

    pub(crate) fn bit(self) -> AttributeSet {
        match self {
            Attribute::Public => AttributeSet::PUBLIC,
            Attribute::Private => AttributeSet::PRIVATE,
            Attribute::Protected => AttributeSet::PROTECTED,
            Attribute::Internal => AttributeSet::INTERNAL,
            Attribute::Transient => AttributeSet::TRANSIENT,
            Attribute::Volatile => AttributeSet::VOLATILE,
            Attribute::Static => AttributeSet::STATIC,
            Attribute::Abstract => AttributeSet::ABSTRACT,
            Attribute::Virtual => AttributeSet::VIRTUAL,
            Attribute::Array => AttributeSet::ARRAY,
            Attribute::Inline => AttributeSet::INLINE,
            Attribute::RequireElse => AttributeSet::REQUIRE_ELSE,
            Attribute::EnsureThen => AttributeSet::ENSURE_THEN,
            Attribute::Intrinsic => AttributeSet::INTRINSIC,
            Attribute::Unimplemented => AttributeSet::UNIMPLEMENTED,
            Attribute::Deprecated => AttributeSet::DEPRECATED,
            Attribute::Unsafe => AttributeSet::UNSAFE,
            Attribute::Constructor => AttributeSet::CONSTRUCTOR,
            Attribute::Final => AttributeSet::FINAL,
            Attribute::Enumerable => AttributeSet::ENUMERABLE,
            Attribute::True => AttributeSet::TRUE,
            Attribute::False => AttributeSet::FALSE,
            Attribute::Unused => AttributeSet::UNUSED,
            Attribute::Dynamic => AttributeSet::DYNAMIC,
            Attribute::Foreach => AttributeSet::FOREACH,
            Attribute::Nobreak => AttributeSet::NOBREAK,
            Attribute::Autobreak => AttributeSet::AUTOBREAK,
            Attribute::Type => AttributeSet::TYPE,
            Attribute::Defined => AttributeSet::DEFINED,
        }
    }

    /// Lower-case name as written in source.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Public => "public",
            Attribute::Private => "private",
            Attribute::Protected => "protected",
            Attribute::Internal => "internal",
            Attribute::Transient => "transient",
            Attribute::Volatile => "volatile",
            Attribute::Static => "static",
            Attribute::Abstract => "abstract",
            Attribute::Virtual => "virtual",
            Attribute::Array => "array",
            Attribute::Inline => "inline",
            Attribute::RequireElse => "require_else",
            Attribute::EnsureThen => "ensure_then",
            Attribute::Intrinsic => "intrinsic",
            Attribute::Unimplemented => "unimplemented",
            Attribute::Deprecated => "deprecated",
            Attribute::Unsafe => "unsafe",
            Attribute::Constructor => "constructor",
            Attribute::Final => "final",
            Attribute::Enumerable => "enumerable",
            Attribute::True => "true",
            Attribute::False => "false",
            Attribute::Unused => "unused",
            Attribute::Dynamic => "dynamic",
            Attribute::Foreach => "foreach",
            Attribute::Nobreak => "nobreak",
            Attribute::Autobreak => "autobreak",
            Attribute::Type => "type",
            Attribute::Defined => "defined",
        }
    }

    /// The exclusion group this attribute belongs to, if any.
    pub fn group(self) -> Option<AttributeGroup> {
        match self {
            Attribute::Public | Attribute::Private | Attribute::Protected => {
                Some(AttributeGroup::MemberVisibility)
            }
            Attribute::Static | Attribute::Abstract | Attribute::Virtual | Attribute::Constructor => {
                Some(AttributeGroup::FunctionType)
            }
            Attribute::Foreach | Attribute::Nobreak | Attribute::Autobreak => {
                Some(AttributeGroup::Switch)
            }
            Attribute::True | Attribute::False => Some(AttributeGroup::Conditional),
            _ => None,
        }
    }

    /// Whether the attribute may be set on nodes of type `node_type`.
    ///
    /// Programs carry no attributes besides `defined`.
    pub fn is_allowed_on(self, node_type: NodeType) -> bool {
        match self {
            Attribute::Defined => true,
            _ => node_type != NodeType::Program,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_groups_contain_their_members() {
        for attribute in Attribute::ALL {
            if let Some(group) = attribute.group() {
                assert!(group.members().contains(attribute.bit()));
            }
        }
    }

    #[test]
    fn attribute_bits_cover_every_attribute() {
        let all = Attribute::ALL
            .iter()
            .fold(AttributeSet::empty(), |acc, a| acc | a.bit());
        assert_eq!(all, AttributeSet::all());
    }

    #[test]
    fn program_only_takes_defined() {
        assert!(Attribute::Defined.is_allowed_on(NodeType::Program));
        assert!(!Attribute::Public.is_allowed_on(NodeType::Program));
        assert!(Attribute::Public.is_allowed_on(NodeType::Function));
    }
}
