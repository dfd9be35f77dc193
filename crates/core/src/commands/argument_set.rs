use crate::commands::{
    argument::{CommandEnum, EnumType},
    error::{CommandResult, InternalError},
    value::Value,
};
use std::any::Any;
use std::sync::Arc;

/// What a single declared parameter was bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArgument {
    Sender,
    Remainder(Vec<String>),
    Value(Value),
}

/// The bound parameters of one invocation, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    args: Vec<(String, BoundArgument)>,
}

impl ArgumentSet {
    pub(super) fn new(args: Vec<(String, BoundArgument)>) -> Self {
        Self { args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundArgument)> {
        self.args.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    pub fn get(&self, name: &str) -> CommandResult<&BoundArgument> {
        self.args
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, arg)| arg)
            .ok_or_else(|| {
                InternalError::MissingArgument {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn get_value(&self, name: &str) -> CommandResult<&Value> {
        match self.get(name)? {
            BoundArgument::Value(value) => Ok(value),
            other => Err(InternalError::WrongArgumentType {
                name: format!("{name} ({other:?})"),
                expected: "Value".to_string(),
            }
            .into()),
        }
    }

    pub fn get_boolean(&self, name: &str) -> CommandResult<bool> {
        self.get_value(name)?.as_boolean()
    }

    pub fn get_byte(&self, name: &str) -> CommandResult<i8> {
        self.get_value(name)?.as_byte()
    }

    pub fn get_short(&self, name: &str) -> CommandResult<i16> {
        self.get_value(name)?.as_short()
    }

    pub fn get_integer(&self, name: &str) -> CommandResult<i32> {
        self.get_value(name)?.as_integer()
    }

    pub fn get_long(&self, name: &str) -> CommandResult<i64> {
        self.get_value(name)?.as_long()
    }

    pub fn get_float(&self, name: &str) -> CommandResult<f32> {
        self.get_value(name)?.as_float()
    }

    pub fn get_double(&self, name: &str) -> CommandResult<f64> {
        self.get_value(name)?.as_double()
    }

    pub fn get_string(&self, name: &str) -> CommandResult<String> {
        Ok(self.get_value(name)?.as_string()?.clone())
    }

    pub fn get_enum<E: CommandEnum>(&self, name: &str) -> CommandResult<E> {
        let index = self.get_value(name)?.as_enum(&EnumType::of::<E>())?;
        E::from_index(index).ok_or_else(|| {
            InternalError::WrongArgumentType {
                name: name.to_string(),
                expected: E::NAME.to_string(),
            }
            .into()
        })
    }

    pub fn get_custom<T: Any + Send + Sync>(&self, name: &str) -> CommandResult<Arc<T>> {
        self.get_value(name)?.as_custom::<T>()
    }

    pub fn get_remainder(&self, name: &str) -> CommandResult<&[String]> {
        match self.get(name)? {
            BoundArgument::Remainder(words) => Ok(words),
            other => Err(InternalError::WrongArgumentType {
                name: format!("{name} ({other:?})"),
                expected: "Remainder".to_string(),
            }
            .into()),
        }
    }
}
