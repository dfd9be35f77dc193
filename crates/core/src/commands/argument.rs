use super::{SenderKind, error::ParseError};
use std::fmt;

/// A closed set of named constants a parameter can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: &'static str,
    pub constants: &'static [&'static str],
}

impl EnumType {
    pub fn of<E: CommandEnum>() -> Self {
        EnumType {
            name: E::NAME,
            constants: E::CONSTANTS,
        }
    }

    /// Index of the constant matching `input`, ignoring case.
    pub fn find(&self, input: &str) -> Option<usize> {
        let input = input.to_lowercase();
        self.constants
            .iter()
            .position(|constant| constant.to_lowercase() == input)
    }

    pub(super) fn parse(&self, input: &str) -> Result<usize, ParseError> {
        self.find(input).ok_or_else(|| ParseError::NoSuchEnumConstant {
            type_name: self.name.to_string(),
            input: input.to_string(),
        })
    }
}

/// Implemented by enums whose variants can be typed as command arguments.
/// Use [`command_enum!`](crate::command_enum) rather than implementing this by hand.
pub trait CommandEnum: Sized + 'static {
    const NAME: &'static str;
    const CONSTANTS: &'static [&'static str];

    fn from_index(index: usize) -> Option<Self>;
}

/// Implements [`CommandEnum`] for a fieldless `Copy` enum, using the variant names as constants.
///
/// ```
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Difficulty { Peaceful, Easy, Normal, Hard }
/// cmdroute_core::command_enum!(Difficulty { Peaceful, Easy, Normal, Hard });
/// ```
#[macro_export]
macro_rules! command_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::commands::CommandEnum for $ty {
            const NAME: &'static str = stringify!($ty);
            const CONSTANTS: &'static [&'static str] = &[$(stringify!($variant)),*];

            fn from_index(index: usize) -> Option<Self> {
                let all = [$($ty::$variant),*];
                all.get(index).copied()
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Enum(EnumType),
    /// A host-defined type; needs a coercion registered under the same name.
    Custom(String),
}

impl ArgumentType {
    pub fn boolean() -> Self {
        ArgumentType::Boolean
    }

    pub fn byte() -> Self {
        ArgumentType::Byte
    }

    pub fn short() -> Self {
        ArgumentType::Short
    }

    pub fn integer() -> Self {
        ArgumentType::Integer
    }

    pub fn long() -> Self {
        ArgumentType::Long
    }

    pub fn float() -> Self {
        ArgumentType::Float
    }

    pub fn double() -> Self {
        ArgumentType::Double
    }

    pub fn string() -> Self {
        ArgumentType::String
    }

    pub fn enumeration<E: CommandEnum>() -> Self {
        ArgumentType::Enum(EnumType::of::<E>())
    }

    pub fn custom(name: impl Into<String>) -> Self {
        ArgumentType::Custom(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            ArgumentType::Boolean => "boolean",
            ArgumentType::Byte => "byte",
            ArgumentType::Short => "short",
            ArgumentType::Integer => "integer",
            ArgumentType::Long => "long",
            ArgumentType::Float => "float",
            ArgumentType::Double => "double",
            ArgumentType::String => "string",
            ArgumentType::Enum(enum_type) => enum_type.name,
            ArgumentType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which senders a sender slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderRequirement {
    Any,
    ConsoleOnly,
    PlayerOnly,
}

impl SenderRequirement {
    pub fn accepts(self, kind: SenderKind) -> bool {
        match self {
            SenderRequirement::Any => true,
            SenderRequirement::ConsoleOnly => kind == SenderKind::Console,
            SenderRequirement::PlayerOnly => kind == SenderKind::Player,
        }
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSpec {
    /// Bound to whoever ran the command.
    Sender {
        name: String,
        requirement: SenderRequirement,
    },
    /// Bound to every token not consumed before it.
    Remainder { name: String },
    /// Consumes one token.
    Typed { name: String, arg_type: ArgumentType },
    /// Consumes one token if there is one left, otherwise parses `default`.
    Optional {
        name: String,
        arg_type: ArgumentType,
        default: String,
    },
}

impl ParameterSpec {
    pub fn sender(name: impl Into<String>) -> Self {
        ParameterSpec::Sender {
            name: name.into(),
            requirement: SenderRequirement::Any,
        }
    }

    pub fn console(name: impl Into<String>) -> Self {
        ParameterSpec::Sender {
            name: name.into(),
            requirement: SenderRequirement::ConsoleOnly,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        ParameterSpec::Sender {
            name: name.into(),
            requirement: SenderRequirement::PlayerOnly,
        }
    }

    pub fn remainder(name: impl Into<String>) -> Self {
        ParameterSpec::Remainder { name: name.into() }
    }

    pub fn typed(name: impl Into<String>, arg_type: ArgumentType) -> Self {
        ParameterSpec::Typed {
            name: name.into(),
            arg_type,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        arg_type: ArgumentType,
        default: impl Into<String>,
    ) -> Self {
        ParameterSpec::Optional {
            name: name.into(),
            arg_type,
            default: default.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ParameterSpec::Sender { name, .. }
            | ParameterSpec::Remainder { name }
            | ParameterSpec::Typed { name, .. }
            | ParameterSpec::Optional { name, .. } => name,
        }
    }

    pub fn arg_type(&self) -> Option<&ArgumentType> {
        match self {
            ParameterSpec::Typed { arg_type, .. } | ParameterSpec::Optional { arg_type, .. } => {
                Some(arg_type)
            }
            _ => None,
        }
    }
}
