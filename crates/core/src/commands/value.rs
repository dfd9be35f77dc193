use crate::commands::{
    argument::EnumType,
    error::{CommandResult, InternalError},
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A coerced argument.
#[derive(Clone)]
pub enum Value {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Enum { enum_type: EnumType, index: usize },
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// The constant name for enum values.
    pub fn enum_constant(&self) -> Option<&'static str> {
        match self {
            Value::Enum { enum_type, index } => enum_type.constants.get(*index).copied(),
            _ => None,
        }
    }

    fn type_error(&self, expected: &str) -> InternalError {
        InternalError::WrongArgumentType {
            name: format!("{:?}", self),
            expected: expected.to_string(),
        }
    }

    pub(super) fn as_boolean(&self) -> CommandResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.type_error("Boolean").into()),
        }
    }

    pub(super) fn as_byte(&self) -> CommandResult<i8> {
        match self {
            Value::Byte(b) => Ok(*b),
            _ => Err(self.type_error("Byte").into()),
        }
    }

    pub(super) fn as_short(&self) -> CommandResult<i16> {
        match self {
            Value::Short(s) => Ok(*s),
            _ => Err(self.type_error("Short").into()),
        }
    }

    pub(super) fn as_integer(&self) -> CommandResult<i32> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.type_error("Integer").into()),
        }
    }

    pub(super) fn as_long(&self) -> CommandResult<i64> {
        match self {
            Value::Long(l) => Ok(*l),
            _ => Err(self.type_error("Long").into()),
        }
    }

    pub(super) fn as_float(&self) -> CommandResult<f32> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.type_error("Float").into()),
        }
    }

    pub(super) fn as_double(&self) -> CommandResult<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            _ => Err(self.type_error("Double").into()),
        }
    }

    pub(super) fn as_string(&self) -> CommandResult<&String> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("String").into()),
        }
    }

    pub(super) fn as_enum(&self, expected: &EnumType) -> CommandResult<usize> {
        match self {
            Value::Enum { enum_type, index } if enum_type == expected => Ok(*index),
            _ => Err(self.type_error(expected.name).into()),
        }
    }

    pub(super) fn as_custom<T: Any + Send + Sync>(&self) -> CommandResult<Arc<T>> {
        match self {
            Value::Custom(value) => Arc::clone(value)
                .downcast::<T>()
                .map_err(|_| self.type_error(std::any::type_name::<T>()).into()),
            _ => Err(self.type_error(std::any::type_name::<T>()).into()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Byte(b) => f.debug_tuple("Byte").field(b).finish(),
            Value::Short(s) => f.debug_tuple("Short").field(s).finish(),
            Value::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Value::Long(l) => f.debug_tuple("Long").field(l).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Enum { enum_type, index } => f
                .debug_struct("Enum")
                .field("type", &enum_type.name)
                .field("constant", &enum_type.constants.get(*index))
                .finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (
                Value::Enum {
                    enum_type: a_type,
                    index: a_index,
                },
                Value::Enum {
                    enum_type: b_type,
                    index: b_index,
                },
            ) => a_type == b_type && a_index == b_index,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
