use thiserror::Error;

/// Why a token could not be turned into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{input}' is not a valid {type_name}")]
    InvalidValue { type_name: String, input: String },
    #[error("'{input}' is not a valid value for {type_name}")]
    NoSuchEnumConstant { type_name: String, input: String },
    #[error("No registered coercion for {type_name}")]
    NoCoercionRegistered { type_name: String },
}

impl ParseError {
    pub fn invalid_value(type_name: impl Into<String>, input: impl Into<String>) -> Self {
        ParseError::InvalidValue {
            type_name: type_name.into(),
            input: input.into(),
        }
    }

    /// `false` for failures that point at a registration bug rather than at what was typed.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ParseError::NoCoercionRegistered { .. })
    }
}

/// A command descriptor that can never work. Raised while registering, never while dispatching.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Command pattern is empty")]
    EmptyPattern,
    #[error("Command '{pattern}' is already registered")]
    DuplicatePattern { pattern: String },
    #[error("Command '{pattern}' has no executor")]
    MissingExecutor { pattern: String },
    #[error("Command '{pattern}' declares more than one remainder parameter")]
    MultipleRemainders { pattern: String },
    #[error(
        "Parameter '{parameter}' of '{pattern}' has type {type_name} which has no registered coercion"
    )]
    NoCoercionRegistered {
        pattern: String,
        parameter: String,
        type_name: String,
    },
    #[error("Default '{default}' of parameter '{parameter}' in '{pattern}' does not parse: {source}")]
    InvalidDefault {
        pattern: String,
        parameter: String,
        default: String,
        #[source]
        source: ParseError,
    },
}

/// Errors a handler wants the sender to read.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("This command can only be executed by players")]
    PlayerOnly,
    #[error("{0}")]
    Message(String),
}

/// Errors that mean the command system itself was misused.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error: Argument '{name}' not found in ArgumentSet (command registration bug)")]
    MissingArgument { name: String },
    #[error("Internal error: Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongArgumentType { name: String, expected: String },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
