use crate::commands::{
    CommandSender,
    autocomplete::CompletionResolver,
    builtin,
    coercion::TypeCoercionRegistry,
    descriptor::CommandDescriptor,
    error::{CommandResult, RegistrationError},
    executor::{Dispatcher, Outcome},
    messages::MessageService,
    registry::CommandRegistry,
    suggestion::{Catalog, CompletionSourceRegistry},
};
use crate::config::Config;
use itertools::Itertools;
use std::sync::Arc;
use tracing::info;

/// Owns every registry. Register everything first, then hand out dispatchers and resolvers.
pub struct CommandManager {
    registry: CommandRegistry,
    coercions: TypeCoercionRegistry,
    sources: CompletionSourceRegistry,
    messages: MessageService,
}

impl CommandManager {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            coercions: TypeCoercionRegistry::new(),
            sources: CompletionSourceRegistry::new(catalog),
            messages: MessageService::new(),
        }
    }

    /// Applies the custom aliases and message overrides from `config`.
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &Config) -> Self {
        let mut manager = Self::new(catalog);
        for (alias, replacement) in &config.command_aliases {
            manager.add_custom_alias(alias.trim(), replacement.trim());
        }
        for (id, template) in &config.messages {
            manager.messages.register(id.as_str(), template.as_str());
        }
        manager
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Coercions must be registered before the commands that use them.
    pub fn coercions_mut(&mut self) -> &mut TypeCoercionRegistry {
        &mut self.coercions
    }

    pub fn sources_mut(&mut self) -> &mut CompletionSourceRegistry {
        &mut self.sources
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistrationError> {
        self.registry.register(descriptor, &self.coercions)
    }

    /// Registers every descriptor, stopping at the first one that is rejected.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
    ) -> Result<(), RegistrationError> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        info!(
            "{} command patterns registered: {}",
            self.registry.len(),
            self.registry
                .bindings()
                .map(|binding| binding.pattern().to_string())
                .join(", ")
        );
        Ok(())
    }

    pub fn register_tab_completer<I, S, F>(
        &mut self,
        prefixes: I,
        completer: F,
    ) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&dyn CommandSender, &[String]) -> CommandResult<Vec<String>> + Send + Sync + 'static,
    {
        self.registry.register_tab_completer(prefixes, completer)
    }

    pub fn register_builtin_commands(&mut self) -> Result<(), RegistrationError> {
        builtin::register_commands(&mut self.registry, &self.coercions)
    }

    pub fn add_custom_alias(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        self.registry.add_custom_alias(prefix, replacement);
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry, &self.coercions, &self.messages)
    }

    pub fn resolver(&self) -> CompletionResolver<'_> {
        CompletionResolver::new(&self.registry, &self.sources)
    }

    pub fn dispatch(&self, sender: &dyn CommandSender, command_line: &str) -> Outcome {
        self.dispatcher().dispatch(sender, command_line)
    }

    /// Host entry point. Returns whether a handler ran.
    pub fn dispatch_command(&self, sender: &dyn CommandSender, command: &str, args: &[&str]) -> bool {
        let command_line = std::iter::once(command).chain(args.iter().copied()).join(" ");
        self.dispatch(sender, &command_line).is_handled()
    }

    /// Host entry point. The last of `args` is the word being typed.
    pub fn complete(&self, sender: &dyn CommandSender, command: &str, args: &[&str]) -> Vec<String> {
        self.resolver().complete_args(sender, command, args)
    }
}
