use crate::commands::{
    argument::{ArgumentType, EnumType},
    error::ParseError,
    value::Value,
};
use rustc_hash::FxHashMap;
use std::str::FromStr;
use std::sync::Arc;

pub type Coercion = Arc<dyn Fn(&str) -> Result<Value, ParseError> + Send + Sync>;

/// Turns argument tokens into typed values.
pub struct TypeCoercionRegistry {
    coercions: FxHashMap<ArgumentType, Coercion>,
}

impl Default for TypeCoercionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCoercionRegistry {
    /// A registry with the boolean, integer, floating point and string coercions.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ArgumentType::Boolean, parse_boolean);
        registry.register(ArgumentType::Byte, |input| {
            parse_number(&ArgumentType::Byte, input, Value::Byte)
        });
        registry.register(ArgumentType::Short, |input| {
            parse_number(&ArgumentType::Short, input, Value::Short)
        });
        registry.register(ArgumentType::Integer, |input| {
            parse_number(&ArgumentType::Integer, input, Value::Integer)
        });
        registry.register(ArgumentType::Long, |input| {
            parse_number(&ArgumentType::Long, input, Value::Long)
        });
        registry.register(ArgumentType::Float, |input| {
            parse_number(&ArgumentType::Float, input, Value::Float)
        });
        registry.register(ArgumentType::Double, |input| {
            parse_number(&ArgumentType::Double, input, Value::Double)
        });
        registry.register(ArgumentType::String, |input| {
            Ok(Value::String(input.to_string()))
        });
        registry
    }

    pub fn empty() -> Self {
        Self {
            coercions: FxHashMap::default(),
        }
    }

    /// Registers or replaces the coercion for `arg_type`. An explicit registration
    /// for an enum type takes precedence over the constant scan.
    pub fn register<F>(&mut self, arg_type: ArgumentType, coercion: F)
    where
        F: Fn(&str) -> Result<Value, ParseError> + Send + Sync + 'static,
    {
        self.coercions.insert(arg_type, Arc::new(coercion));
    }

    pub fn supports(&self, arg_type: &ArgumentType) -> bool {
        self.coercions.contains_key(arg_type) || matches!(arg_type, ArgumentType::Enum(_))
    }

    pub fn coerce(&self, arg_type: &ArgumentType, input: &str) -> Result<Value, ParseError> {
        if let Some(coercion) = self.coercions.get(arg_type) {
            return coercion(input);
        }
        match arg_type {
            ArgumentType::Enum(enum_type) => parse_enum(enum_type, input),
            _ => Err(ParseError::NoCoercionRegistered {
                type_name: arg_type.name().to_string(),
            }),
        }
    }
}

fn parse_enum(enum_type: &EnumType, input: &str) -> Result<Value, ParseError> {
    let index = enum_type.parse(input)?;
    Ok(Value::Enum {
        enum_type: *enum_type,
        index,
    })
}

fn parse_boolean(input: &str) -> Result<Value, ParseError> {
    let value = match input.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" => false,
        _ => return Err(ParseError::invalid_value("boolean", input)),
    };
    Ok(Value::Boolean(value))
}

fn parse_number<T: FromStr>(
    arg_type: &ArgumentType,
    input: &str,
    wrap: fn(T) -> Value,
) -> Result<Value, ParseError> {
    input
        .parse::<T>()
        .map(wrap)
        .map_err(|_| ParseError::invalid_value(arg_type.name(), input))
}
