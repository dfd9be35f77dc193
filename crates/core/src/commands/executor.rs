use crate::commands::{
    CommandSender,
    argument::{ParameterSpec, SenderRequirement},
    argument_set::{ArgumentSet, BoundArgument},
    coercion::TypeCoercionRegistry,
    context::ExecutionContext,
    error::CommandError,
    messages::{MessageKey, MessageService},
    parser,
    registry::{CommandRegistry, HandlerBinding},
    usage,
};
use cmdroute_text::translate_alternate_color_codes;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// How a single dispatch ended. Exactly one per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Executed,
    CommandNotFound,
    PermissionDenied { permission: String },
    WrongInvokerKind { required: SenderRequirement },
    MissingArguments,
    /// A token was present but did not coerce. Reported like a missing argument.
    InvalidUsage,
    /// The handler returned an internal error or panicked.
    HandlerFailure,
}

impl Outcome {
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            Outcome::Executed => None,
            Outcome::CommandNotFound => Some(MessageKey::Exists),
            Outcome::PermissionDenied { .. } => Some(MessageKey::Permission),
            Outcome::WrongInvokerKind {
                required: SenderRequirement::ConsoleOnly,
            } => Some(MessageKey::ConsoleOnly),
            Outcome::WrongInvokerKind { .. } => Some(MessageKey::PlayerOnly),
            Outcome::MissingArguments => Some(MessageKey::NoArgs),
            Outcome::InvalidUsage => Some(MessageKey::WrongUsage),
            Outcome::HandlerFailure => Some(MessageKey::HandlerFailure),
        }
    }

    /// Whether a handler ran, successfully or not.
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Executed | Outcome::HandlerFailure)
    }

    pub fn is_usage_error(&self) -> bool {
        matches!(self, Outcome::MissingArguments | Outcome::InvalidUsage)
    }
}

pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
    coercions: &'r TypeCoercionRegistry,
    messages: &'r MessageService,
}

impl<'r> Dispatcher<'r> {
    pub fn new(
        registry: &'r CommandRegistry,
        coercions: &'r TypeCoercionRegistry,
        messages: &'r MessageService,
    ) -> Self {
        Self {
            registry,
            coercions,
            messages,
        }
    }

    /// Runs `command_line` for `sender` and tells the sender about any failure.
    pub fn dispatch(&self, sender: &dyn CommandSender, command_line: &str) -> Outcome {
        let command_line = self.registry.expand_custom_aliases(command_line.trim());
        let tokens = parser::tokenize(&command_line);

        let Some(binding) = self.registry.find_longest_prefix_match(&tokens) else {
            debug!("No command matches '{}'", command_line);
            return self.report(sender, None, Outcome::CommandNotFound);
        };
        debug!("'{}' resolved to '{}'", command_line, binding.pattern());

        let remaining = &tokens[binding.pattern().len()..];
        let outcome = self.execute_binding(sender, binding, remaining);
        self.report(sender, Some(binding), outcome)
    }

    fn execute_binding(
        &self,
        sender: &dyn CommandSender,
        binding: &HandlerBinding,
        remaining: &[&str],
    ) -> Outcome {
        if let Some(permission) = binding.permission() {
            if !sender.has_permission(permission) {
                return Outcome::PermissionDenied {
                    permission: permission.to_string(),
                };
            }
        }

        match bind_arguments(self.coercions, binding, sender, remaining) {
            Ok(arguments) => self.invoke(sender, binding, arguments),
            Err(outcome) => outcome,
        }
    }

    fn invoke(
        &self,
        sender: &dyn CommandSender,
        binding: &HandlerBinding,
        arguments: ArgumentSet,
    ) -> Outcome {
        let executor = Arc::clone(binding.executor());
        let mut ctx = ExecutionContext::new(sender, arguments, binding, self.registry);

        match panic::catch_unwind(AssertUnwindSafe(|| executor(&mut ctx))) {
            Ok(Ok(())) => Outcome::Executed,
            Ok(Err(CommandError::Runtime(err))) => {
                warn!("Command '{}' stopped: {}", binding.pattern(), err);
                if let Err(err) = ctx.error(&err.to_string()) {
                    return handler_failure(binding, &err);
                }
                Outcome::HandlerFailure
            }
            Ok(Err(err)) => handler_failure(binding, &err),
            Err(payload) => {
                error!(
                    "Command '{}' panicked: {}",
                    binding.pattern(),
                    panic_message(payload.as_ref())
                );
                Outcome::HandlerFailure
            }
        }
    }

    fn report(
        &self,
        sender: &dyn CommandSender,
        binding: Option<&HandlerBinding>,
        outcome: Outcome,
    ) -> Outcome {
        if let Some(key) = outcome.message_key() {
            self.messages.send(key, sender);
        }
        if let Some(binding) = binding.filter(|_| outcome.is_usage_error()) {
            let usage = usage::generate_usage(binding);
            sender.send_message(&translate_alternate_color_codes(
                '&',
                &format!("&6Usage: &e{}", usage),
            ));
        }
        outcome
    }
}

fn handler_failure(binding: &HandlerBinding, err: &CommandError) -> Outcome {
    error!("Command '{}' failed: {}", binding.pattern(), err);
    Outcome::HandlerFailure
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}

/// Walks the declared parameters left to right. Only typed and optional slots move the
/// token cursor; extra tokens are ignored.
fn bind_arguments(
    coercions: &TypeCoercionRegistry,
    binding: &HandlerBinding,
    sender: &dyn CommandSender,
    remaining: &[&str],
) -> Result<ArgumentSet, Outcome> {
    let mut cursor = 0;
    let mut arguments = Vec::with_capacity(binding.parameters().len());

    for (i, parameter) in binding.parameters().iter().enumerate() {
        let bound = match parameter {
            ParameterSpec::Sender { requirement, .. } => {
                if !requirement.accepts(sender.kind()) {
                    return Err(Outcome::WrongInvokerKind {
                        required: *requirement,
                    });
                }
                BoundArgument::Sender
            }
            ParameterSpec::Remainder { .. } => BoundArgument::Remainder(
                remaining[cursor..]
                    .iter()
                    .map(|token| token.to_string())
                    .collect(),
            ),
            ParameterSpec::Typed { arg_type, .. } | ParameterSpec::Optional { arg_type, .. } => {
                match remaining.get(cursor) {
                    Some(token) => {
                        cursor += 1;
                        match coercions.coerce(arg_type, token) {
                            Ok(value) => BoundArgument::Value(value),
                            Err(err) if err.is_user_error() => {
                                debug!("Argument '{}' rejected: {}", parameter.name(), err);
                                return Err(Outcome::InvalidUsage);
                            }
                            Err(err) => {
                                error!("Argument '{}' of '{}': {}", parameter.name(), binding.pattern(), err);
                                return Err(Outcome::InvalidUsage);
                            }
                        }
                    }
                    None => match binding.default_at(i) {
                        Some(default) => BoundArgument::Value(default.clone()),
                        None => return Err(Outcome::MissingArguments),
                    },
                }
            }
        };
        arguments.push((parameter.name().to_string(), bound));
    }

    Ok(ArgumentSet::new(arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ArgumentType, CommandDescriptor, SenderKind};
    use std::cell::RefCell;

    struct Recorder {
        kind: SenderKind,
        messages: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn new(kind: SenderKind) -> Self {
            Self {
                kind,
                messages: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandSender for Recorder {
        fn kind(&self) -> SenderKind {
            self.kind
        }

        fn name(&self) -> &str {
            "tester"
        }

        fn has_permission(&self, permission: &str) -> bool {
            !permission.starts_with("admin.")
        }

        fn send_message(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    struct Fixture {
        registry: CommandRegistry,
        coercions: TypeCoercionRegistry,
        messages: MessageService,
    }

    impl Fixture {
        fn new(descriptors: Vec<CommandDescriptor>) -> Self {
            let coercions = TypeCoercionRegistry::new();
            let mut registry = CommandRegistry::new();
            for descriptor in descriptors {
                registry.register(descriptor, &coercions).unwrap();
            }
            Self {
                registry,
                coercions,
                messages: MessageService::new(),
            }
        }

        fn dispatch(&self, sender: &Recorder, line: &str) -> Outcome {
            Dispatcher::new(&self.registry, &self.coercions, &self.messages).dispatch(sender, line)
        }
    }

    fn echo_remainder(pattern: &str) -> CommandDescriptor {
        CommandDescriptor::new(pattern)
            .remainder("args")
            .executes(|ctx| {
                let args = ctx.args().get_remainder("args")?.join(",");
                ctx.reply(&format!("{} [{}]", ctx.binding().pattern(), args))
            })
    }

    #[test]
    fn remainder_follows_the_longest_match() {
        let fixture = Fixture::new(vec![echo_remainder("warp"), echo_remainder("warp set")]);
        let sender = Recorder::new(SenderKind::Player);

        assert_eq!(fixture.dispatch(&sender, "warp set spawn"), Outcome::Executed);
        assert_eq!(fixture.dispatch(&sender, "warp list"), Outcome::Executed);
        assert_eq!(
            *sender.messages.borrow(),
            ["warp set [spawn]", "warp [list]"]
        );
    }

    #[test]
    fn optional_default_is_bound() {
        let fixture = Fixture::new(vec![CommandDescriptor::new("heal")
            .optional("amount", ArgumentType::integer(), "5")
            .executes(|ctx| {
                let amount = ctx.args().get_integer("amount")?;
                ctx.reply(&amount.to_string())
            })]);
        let sender = Recorder::new(SenderKind::Player);

        assert_eq!(fixture.dispatch(&sender, "heal"), Outcome::Executed);
        assert_eq!(fixture.dispatch(&sender, "heal 12"), Outcome::Executed);
        assert_eq!(*sender.messages.borrow(), ["5", "12"]);
    }

    #[test]
    fn binding_failures_do_not_invoke() {
        let fixture = Fixture::new(vec![
            CommandDescriptor::new("stop")
                .console("console")
                .executes(|_| panic!("must not run")),
            CommandDescriptor::new("tp")
                .argument("x", ArgumentType::integer())
                .executes(|_| panic!("must not run")),
            CommandDescriptor::new("ban")
                .require_permission("admin.ban")
                .argument("target", ArgumentType::string())
                .executes(|_| panic!("must not run")),
        ]);
        let player = Recorder::new(SenderKind::Player);

        assert_eq!(
            fixture.dispatch(&player, "stop"),
            Outcome::WrongInvokerKind {
                required: SenderRequirement::ConsoleOnly
            }
        );
        assert_eq!(fixture.dispatch(&player, "tp"), Outcome::MissingArguments);
        assert_eq!(fixture.dispatch(&player, "tp north"), Outcome::InvalidUsage);
        assert_eq!(
            fixture.dispatch(&player, "ban"),
            Outcome::PermissionDenied {
                permission: "admin.ban".to_string()
            }
        );
        assert_eq!(fixture.dispatch(&player, "xyzzy foo"), Outcome::CommandNotFound);
    }

    #[test]
    fn handler_errors() {
        let fixture = Fixture::new(vec![
            CommandDescriptor::new("fail").executes(|_| Err(CommandError::runtime("Nope"))),
            CommandDescriptor::new("bug").executes(|_| Err(CommandError::internal("broken"))),
            CommandDescriptor::new("crash").executes(|_| panic!("boom")),
        ]);
        let sender = Recorder::new(SenderKind::Console);

        assert_eq!(fixture.dispatch(&sender, "fail"), Outcome::HandlerFailure);
        assert_eq!(fixture.dispatch(&sender, "bug"), Outcome::HandlerFailure);
        assert_eq!(fixture.dispatch(&sender, "crash"), Outcome::HandlerFailure);

        let messages = sender.messages.borrow();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], "§cNope");
        assert!(!messages[2].contains("broken"));
        assert_eq!(messages[1], messages[2]);
        assert_eq!(messages[2], messages[3]);
    }

    #[test]
    fn outcome_keys() {
        assert_eq!(Outcome::Executed.message_key(), None);
        assert_eq!(
            Outcome::WrongInvokerKind {
                required: SenderRequirement::PlayerOnly
            }
            .message_key(),
            Some(MessageKey::PlayerOnly)
        );
        assert!(Outcome::HandlerFailure.is_handled());
        assert!(!Outcome::PermissionDenied {
            permission: String::new()
        }
        .is_handled());
        assert!(Outcome::InvalidUsage.is_usage_error());
    }
}
