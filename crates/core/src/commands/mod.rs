mod argument;
mod argument_set;
mod autocomplete;
mod builtin;
mod coercion;
mod context;
mod descriptor;
mod error;
mod executor;
mod manager;
mod messages;
mod parser;
mod pattern;
mod registry;
mod suggestion;
mod usage;
mod value;

pub use argument::{ArgumentType, CommandEnum, EnumType, ParameterSpec, SenderRequirement};
pub use argument_set::{ArgumentSet, BoundArgument};
pub use autocomplete::{CompletionResolver, filter_suggestions};
pub use coercion::{Coercion, TypeCoercionRegistry};
pub use context::ExecutionContext;
pub use descriptor::{CommandDescriptor, Executor, TabCompleter};
pub use error::{
    CommandError, CommandResult, InternalError, ParseError, RegistrationError, RuntimeError,
};
pub use executor::{Dispatcher, Outcome};
pub use manager::CommandManager;
pub use messages::{MessageKey, MessageService};
pub use pattern::CommandPattern;
pub use registry::{CommandRegistry, HandlerBinding, TabCompletionBinding};
pub use suggestion::{
    Catalog, CompletionHint, CompletionSource, CompletionSourceRegistry, EmptyCatalog,
    SourceContext,
};
pub use usage::{generate_base_name, generate_parameter_details, generate_usage};
pub use value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderKind {
    Player,
    Console,
}

/// Whoever typed the command, as seen by the host.
pub trait CommandSender {
    fn kind(&self) -> SenderKind;

    fn name(&self) -> &str;

    fn has_permission(&self, permission: &str) -> bool;

    /// Delivers an already colorized message.
    fn send_message(&self, message: &str);
}
