use crate::commands::{
    CommandSender,
    argument::{ArgumentType, ParameterSpec},
    context::ExecutionContext,
    error::CommandResult,
};
use std::sync::Arc;

pub type Executor = Arc<dyn Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync>;

/// Produces suggestions from the sender and the words typed after the completer's prefix.
/// The last word is the one being typed.
pub type TabCompleter =
    Arc<dyn Fn(&dyn CommandSender, &[String]) -> CommandResult<Vec<String>> + Send + Sync>;

/// Everything needed to register one command handler.
///
/// ```
/// use cmdroute_core::commands::{ArgumentType, CommandDescriptor};
///
/// let descriptor = CommandDescriptor::new("warp set")
///     .alias("setwarp")
///     .require_permission("warps.set")
///     .player("player")
///     .argument("name", ArgumentType::string())
///     .completions(["@warp"])
///     .executes(|ctx| {
///         let name = ctx.args().get_string("name")?;
///         ctx.reply(&format!("Warp {name} set"))
///     });
/// ```
#[derive(Clone)]
pub struct CommandDescriptor {
    pub(super) pattern: String,
    pub(super) aliases: Vec<String>,
    pub(super) parameters: Vec<ParameterSpec>,
    pub(super) permission: Option<String>,
    pub(super) completions: Vec<String>,
    pub(super) description: Option<String>,
    pub(super) executor: Option<Executor>,
}

impl CommandDescriptor {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            aliases: Vec::new(),
            parameters: Vec::new(),
            permission: None,
            completions: Vec::new(),
            description: None,
            executor: None,
        }
    }

    /// Another full pattern bound to the same handler, e.g. `setwarp` for `warp set`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn sender(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::sender(name))
    }

    pub fn console(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::console(name))
    }

    pub fn player(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::player(name))
    }

    pub fn argument(self, name: impl Into<String>, arg_type: ArgumentType) -> Self {
        self.param(ParameterSpec::typed(name, arg_type))
    }

    pub fn optional(
        self,
        name: impl Into<String>,
        arg_type: ArgumentType,
        default: impl Into<String>,
    ) -> Self {
        self.param(ParameterSpec::optional(name, arg_type, default))
    }

    pub fn remainder(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::remainder(name))
    }

    /// Completion hints for the argument positions after the pattern, in order.
    pub fn completions<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completions.extend(hints.into_iter().map(Into::into));
        self
    }

    pub fn executes<F>(mut self, executor: F) -> Self
    where
        F: Fn(&mut ExecutionContext<'_>) -> CommandResult<()> + Send + Sync + 'static,
    {
        self.executor = Some(Arc::new(executor));
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
