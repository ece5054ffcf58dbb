//! Per-node boolean flags.
//!
//! Each flag is meaningful only on a few node types; reading or writing it
//! anywhere else is a contract violation.

use bitflags::bitflags;

use super::NodeType;

/// A single node flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    CatchTyped,

    DirectiveListNewVariables,

    EnumClass,

    ForConst,
    ForForeach,
    ForIn,

    FunctionGetter,
    FunctionSetter,
    FunctionOut,
    FunctionVoid,
    FunctionNever,
    FunctionNoparams,
    FunctionOperator,

    IdentifierWith,
    IdentifierTyped,

    ImportImplements,

    PackageFoundLabels,
    PackageReferenced,

    ParamConst,
    ParamIn,
    ParamOut,
    ParamNamed,
    ParamRest,
    ParamUnchecked,
    ParamUnprototyped,
    ParamReferenced,
    ParamParamref,
    ParamCatch,

    ParamMatchUnprototyped,

    SwitchDefault,

    TypeModified,

    VariableConst,
    VariableFinal,
    VariableLocal,
    VariableMember,
    VariableAttributes,
    VariableEnum,
    VariableCompiled,
    VariableInuse,
    VariableAttrs,
    VariableDefined,
    VariableDefining,
    VariableToadd,
}

bitflags! {
    /// Storage for the flags of one node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlagSet: u64 {
        const CATCH_TYPED = 1 << 0;
        const DIRECTIVE_LIST_NEW_VARIABLES = 1 << 1;
        const ENUM_CLASS = 1 << 2;
        const FOR_CONST = 1 << 3;
        const FOR_FOREACH = 1 << 4;
        const FOR_IN = 1 << 5;
        const FUNCTION_GETTER = 1 << 6;
        const FUNCTION_SETTER = 1 << 7;
        const FUNCTION_OUT = 1 << 8;
        const FUNCTION_VOID = 1 << 9;
        const FUNCTION_NEVER = 1 << 10;
        const FUNCTION_NOPARAMS = 1 << 11;
        const FUNCTION_OPERATOR = 1 << 12;
        const IDENTIFIER_WITH = 1 << 13;
        const IDENTIFIER_TYPED = 1 << 14;
        const IMPORT_IMPLEMENTS = 1 << 15;
        const PACKAGE_FOUND_LABELS = 1 << 16;
        const PACKAGE_REFERENCED = 1 << 17;
        const PARAM_CONST = 1 << 18;
        const PARAM_IN = 1 << 19;
        const PARAM_OUT = 1 << 20;
        const PARAM_NAMED = 1 << 21;
        const PARAM_REST = 1 << 22;
        const PARAM_UNCHECKED = 1 << 23;
        const PARAM_UNPROTOTYPED = 1 << 24;
        const PARAM_REFERENCED = 1 << 25;
        const PARAM_PARAMREF = 1 << 26;
        const PARAM_CATCH = 1 << 27;
        const PARAM_MATCH_UNPROTOTYPED = 1 << 28;
        const SWITCH_DEFAULT = 1 << 29;
        const TYPE_MODIFIED = 1 << 30;
        const VARIABLE_CONST = 1 << 31;
        const VARIABLE_FINAL = 1 << 32;
        const VARIABLE_LOCAL = 1 << 33;
        const VARIABLE_MEMBER = 1 << 34;
        const VARIABLE_ATTRIBUTES = 1 << 35;
        const VARIABLE_ENUM = 1 << 36;
        const VARIABLE_COMPILED = 1 << 37;
        const VARIABLE_INUSE = 1 << 38;
        const VARIABLE_ATTRS = 1 << 39;
        const VARIABLE_DEFINED = 1 << 40;
        const VARIABLE_DEFINING = 1 << 41;
        const VARIABLE_TOADD = 1 << 42;
    }
}

impl Flag {
    pub(crate) fn bit(self) -> FlagSet {
        match self {
            Flag::CatchTyped => FlagSet::CATCH_TYPED,
            Flag::DirectiveListNewVariables => FlagSet::DIRECTIVE_LIST_NEW_VARIABLES,
            Flag::EnumClass => FlagSet::ENUM_CLASS,
            Flag::ForConst => FlagSet::FOR_CONST,
            Flag::ForForeach => FlagSet::FOR_FOREACH,
            Flag::ForIn => FlagSet::FOR_IN,
            Flag::FunctionGetter => FlagSet::FUNCTION_GETTER,
            Flag::FunctionSetter => FlagSet::FUNCTION_SETTER,
            Flag::FunctionOut => FlagSet::FUNCTION_OUT,
            Flag::FunctionVoid => FlagSet::FUNCTION_VOID,
            Flag::FunctionNever => FlagSet::FUNCTION_NEVER,
            Flag::FunctionNoparams => FlagSet::FUNCTION_NOPARAMS,
            Flag::FunctionOperator => FlagSet::FUNCTION_OPERATOR,
            Flag::IdentifierWith => FlagSet::IDENTIFIER_WITH,
            Flag::IdentifierTyped => FlagSet::IDENTIFIER_TYPED,
            Flag::ImportImplements => FlagSet::IMPORT_IMPLEMENTS,
            Flag::PackageFoundLabels => FlagSet::PACKAGE_FOUND_LABELS,
            Flag::PackageReferenced => FlagSet::PACKAGE_REFERENCED,
            Flag::ParamConst => FlagSet::PARAM_CONST,
            Flag::ParamIn => FlagSet::PARAM_IN,
            Flag::ParamOut => FlagSet::PARAM_OUT,
            Flag::ParamNamed => FlagSet::PARAM_NAMED,
            Flag::ParamRest => FlagSet::PARAM_REST,
            Flag::ParamUnchecked => FlagSet::PARAM_UNCHECKED,
            Flag::ParamUnprototyped => FlagSet::PARAM_UNPROTOTYPED,
            Flag::ParamReferenced => FlagSet::PARAM_REFERENCED,
            Flag::ParamParamref => FlagSet::PARAM_PARAMREF,
            Flag::ParamCatch => FlagSet::PARAM_CATCH,
            Flag::ParamMatchUnprototyped => FlagSet::PARAM_MATCH_UNPROTOTYPED,
            Flag::SwitchDefault => FlagSet::SWITCH_DEFAULT,
            Flag::TypeModified => FlagSet::TYPE_MODIFIED,
            Flag::VariableConst => FlagSet::VARIABLE_CONST,
            Flag::VariableFinal => FlagSet::VARIABLE_FINAL,
            Flag::VariableLocal => FlagSet::VARIABLE_LOCAL,
            Flag::VariableMember => FlagSet::VARIABLE_MEMBER,
            Flag::VariableAttributes => FlagSet::VARIABLE_ATTRIBUTES,
            Flag::VariableEnum => FlagSet::VARIABLE_ENUM,
            Flag::VariableCompiled => FlagSet::VARIABLE_COMPILED,
            Flag::VariableInuse => FlagSet::VARIABLE_INUSE,
            Flag::VariableAttrs => FlagSet::VARIABLE_ATTRS,
            Flag::VariableDefined => FlagSet::VARIABLE_DEFINED,
            Flag::VariableDefining => FlagSet::VARIABLE_DEFINING,
            Flag::VariableToadd => FlagSet::VARIABLE_TOADD,
        }
    }

    /// Whether the flag has a meaning on nodes of type `node_type`.
    pub fn is_allowed_on(self, node_type: NodeType) -> bool {
        match self {
            Flag::CatchTyped => node_type == NodeType::Catch,

            Flag::DirectiveListNewVariables => node_type == NodeType::DirectiveList,

            Flag::EnumClass => node_type == NodeType::Enum,

            Flag::ForConst | Flag::ForForeach | Flag::ForIn => node_type == NodeType::For,

            Flag::FunctionGetter
            | Flag::FunctionSetter
            | Flag::FunctionOut
            | Flag::FunctionVoid
            | Flag::FunctionNever
            | Flag::FunctionNoparams
            | Flag::FunctionOperator => node_type == NodeType::Function,

            Flag::IdentifierWith | Flag::IdentifierTyped => matches!(
                node_type,
                NodeType::Identifier | NodeType::Videntifier | NodeType::String
            ),

            Flag::ImportImplements => node_type == NodeType::Import,

            Flag::PackageFoundLabels | Flag::PackageReferenced => node_type == NodeType::Package,

            Flag::ParamConst
            | Flag::ParamIn
            | Flag::ParamOut
            | Flag::ParamNamed
            | Flag::ParamRest
            | Flag::ParamUnchecked
            | Flag::ParamUnprototyped
            | Flag::ParamReferenced
            | Flag::ParamParamref
            | Flag::ParamCatch => node_type == NodeType::Param,

            Flag::ParamMatchUnprototyped => node_type == NodeType::ParamMatch,

            Flag::SwitchDefault => node_type == NodeType::Switch,

            Flag::TypeModified => node_type == NodeType::Type,

            Flag::VariableConst
            | Flag::VariableFinal
            | Flag::VariableLocal
            | Flag::VariableMember
            | Flag::VariableAttributes
            | Flag::VariableEnum
            | Flag::VariableCompiled
            | Flag::VariableInuse
            | Flag::VariableAttrs
            | Flag::VariableDefined
            | Flag::VariableDefining
            | Flag::VariableToadd => {
                matches!(node_type, NodeType::Variable | NodeType::VarAttributes)
            }
        }
    }
}
