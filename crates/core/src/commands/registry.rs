use crate::commands::{
    CommandSender,
    argument::{ArgumentType, ParameterSpec},
    coercion::TypeCoercionRegistry,
    descriptor::{CommandDescriptor, Executor, TabCompleter},
    error::{CommandResult, ParseError, RegistrationError},
    parser::{self, Patterned},
    pattern::CommandPattern,
    suggestion::CompletionHint,
    value::Value,
};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, error};

/// A registered pattern and everything needed to run it.
#[derive(Clone)]
pub struct HandlerBinding {
    pattern: CommandPattern,
    alias_of: Option<CommandPattern>,
    parameters: Vec<ParameterSpec>,
    /// Coerced defaults, parallel to `parameters`.
    defaults: Vec<Option<Value>>,
    permission: Option<String>,
    completions: Vec<CompletionHint>,
    description: Option<String>,
    executor: Executor,
}

impl HandlerBinding {
    pub fn pattern(&self) -> &CommandPattern {
        &self.pattern
    }

    /// The primary pattern if this binding was registered as an alias.
    pub fn alias_of(&self) -> Option<&CommandPattern> {
        self.alias_of.as_ref()
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn default_at(&self, parameter: usize) -> Option<&Value> {
        self.defaults.get(parameter).and_then(Option::as_ref)
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn completions(&self) -> &[CompletionHint] {
        &self.completions
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(super) fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn is_permitted(&self, sender: &dyn CommandSender) -> bool {
        self.permission
            .as_deref()
            .is_none_or(|permission| sender.has_permission(permission))
    }

    /// Declared type of the `index`th token after the pattern. Sender and remainder
    /// slots are skipped.
    pub fn argument_type_at(&self, index: usize) -> Option<&ArgumentType> {
        self.parameters
            .iter()
            .filter_map(ParameterSpec::arg_type)
            .nth(index)
    }
}

impl Patterned for HandlerBinding {
    fn pattern(&self) -> &CommandPattern {
        &self.pattern
    }
}

#[derive(Clone)]
pub struct TabCompletionBinding {
    pattern: CommandPattern,
    completer: TabCompleter,
}

impl TabCompletionBinding {
    pub fn pattern(&self) -> &CommandPattern {
        &self.pattern
    }

    pub(super) fn complete(
        &self,
        sender: &dyn CommandSender,
        args: &[String],
    ) -> CommandResult<Vec<String>> {
        (self.completer)(sender, args)
    }
}

impl Patterned for TabCompletionBinding {
    fn pattern(&self) -> &CommandPattern {
        &self.pattern
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    bindings: IndexMap<String, HandlerBinding>,
    tab_completers: IndexMap<String, TabCompletionBinding>,
    custom_aliases: Vec<(String, String)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `descriptor` and binds its pattern and every alias to it. Nothing is
    /// registered if any part is rejected.
    pub fn register(
        &mut self,
        descriptor: CommandDescriptor,
        coercions: &TypeCoercionRegistry,
    ) -> Result<(), RegistrationError> {
        let CommandDescriptor {
            pattern,
            aliases,
            parameters,
            permission,
            completions,
            description,
            executor,
        } = descriptor;

        let pattern = CommandPattern::parse(&pattern)?;
        let Some(executor) = executor else {
            return Err(RegistrationError::MissingExecutor {
                pattern: pattern.to_string(),
            });
        };
        let aliases = aliases
            .iter()
            .map(|alias| CommandPattern::parse(alias))
            .collect::<Result<Vec<_>, _>>()?;

        let mut keys: Vec<String> = Vec::with_capacity(aliases.len() + 1);
        for candidate in std::iter::once(&pattern).chain(&aliases) {
            let key = candidate.key();
            if self.bindings.contains_key(&key) || keys.contains(&key) {
                return Err(RegistrationError::DuplicatePattern {
                    pattern: candidate.to_string(),
                });
            }
            keys.push(key);
        }

        let defaults = validate_parameters(&pattern, &parameters, coercions)?;

        let binding = HandlerBinding {
            pattern: pattern.clone(),
            alias_of: None,
            parameters,
            defaults,
            permission,
            completions: completions
                .iter()
                .map(|hint| CompletionHint::parse(hint))
                .collect(),
            description,
            executor,
        };

        let alias_bindings: Vec<HandlerBinding> = aliases
            .into_iter()
            .map(|alias| HandlerBinding {
                pattern: alias,
                alias_of: Some(pattern.clone()),
                ..binding.clone()
            })
            .collect();

        debug!("Registered command '{}'", pattern);
        self.bindings.insert(pattern.key(), binding);
        for alias_binding in alias_bindings {
            debug!("Registered alias '{}' for '{}'", alias_binding.pattern, pattern);
            self.bindings.insert(alias_binding.pattern.key(), alias_binding);
        }
        Ok(())
    }

    /// Binds `completer` to each of `prefixes`. Prefixes are matched with the same
    /// longest-prefix rule as commands.
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
        let patterns = prefixes
            .into_iter()
            .map(|prefix| CommandPattern::parse(prefix.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(RegistrationError::EmptyPattern);
        }
        for (i, pattern) in patterns.iter().enumerate() {
            if self.tab_completers.contains_key(&pattern.key()) || patterns[..i].contains(pattern) {
                return Err(RegistrationError::DuplicatePattern {
                    pattern: pattern.to_string(),
                });
            }
        }

        let completer: TabCompleter = Arc::new(completer);
        for pattern in patterns {
            debug!("Registered tab completer for '{}'", pattern);
            self.tab_completers.insert(
                pattern.key(),
                TabCompletionBinding {
                    pattern,
                    completer: Arc::clone(&completer),
                },
            );
        }
        Ok(())
    }

    /// Every binding in registration order, aliases included.
    pub fn bindings(&self) -> impl Iterator<Item = &HandlerBinding> {
        self.bindings.values()
    }

    pub fn get(&self, pattern: &str) -> Option<&HandlerBinding> {
        let pattern = CommandPattern::parse(pattern).ok()?;
        self.bindings.get(&pattern.key())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn find_longest_prefix_match<S: AsRef<str>>(&self, tokens: &[S]) -> Option<&HandlerBinding> {
        parser::find_longest_prefix(self.bindings.values(), tokens)
    }

    /// Like [`Self::find_longest_prefix_match`], restricted to bindings that declare hints.
    pub fn find_completion_binding<S: AsRef<str>>(&self, tokens: &[S]) -> Option<&HandlerBinding> {
        parser::find_longest_prefix(
            self.bindings
                .values()
                .filter(|binding| !binding.completions.is_empty()),
            tokens,
        )
    }

    pub fn find_tab_completer<S: AsRef<str>>(&self, tokens: &[S]) -> Option<&TabCompletionBinding> {
        parser::find_longest_prefix(self.tab_completers.values(), tokens)
    }

    pub fn add_custom_alias(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        self.custom_aliases
            .push((prefix.into(), replacement.into()));
    }

    /// Rewrites the line with the longest custom alias it starts with, the earliest
    /// added on a tie. `{}` in the replacement receives the rest of the line,
    /// otherwise the rest is appended.
    pub fn expand_custom_aliases(&self, command_line: &str) -> String {
        let mut best: Option<(&str, &str)> = None;
        for (alias, expansion) in &self.custom_aliases {
            let Some(rest) = strip_prefix_ignore_case(command_line, alias) else {
                continue;
            };
            if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
                continue;
            }
            if best.is_none_or(|(longest, _)| alias.len() > longest.len()) {
                best = Some((alias.as_str(), expansion.as_str()));
            }
        }

        let Some((alias, expansion)) = best else {
            return command_line.to_string();
        };
        let rest = command_line[alias.len()..].trim();
        let expanded = if expansion.contains("{}") {
            expansion.replace("{}", rest)
        } else {
            format!("{} {}", expansion, rest)
        };
        let expanded = expanded.trim().to_string();
        debug!("Expanded '{}' to '{}'", command_line, expanded);
        expanded
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        line.get(prefix.len()..)
    } else {
        None
    }
}

fn validate_parameters(
    pattern: &CommandPattern,
    parameters: &[ParameterSpec],
    coercions: &TypeCoercionRegistry,
) -> Result<Vec<Option<Value>>, RegistrationError> {
    let remainders = parameters
        .iter()
        .filter(|parameter| matches!(parameter, ParameterSpec::Remainder { .. }))
        .count();
    if remainders > 1 {
        return Err(RegistrationError::MultipleRemainders {
            pattern: pattern.to_string(),
        });
    }

    let mut defaults = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        if let Some(arg_type) = parameter.arg_type() {
            if !coercions.supports(arg_type) {
                error!(
                    "Parameter '{}' of '{}' has type {} with no registered coercion",
                    parameter.name(),
                    pattern,
                    arg_type
                );
                return Err(RegistrationError::NoCoercionRegistered {
                    pattern: pattern.to_string(),
                    parameter: parameter.name().to_string(),
                    type_name: arg_type.name().to_string(),
                });
            }
        }

        let default = match parameter {
            ParameterSpec::Optional {
                name,
                arg_type,
                default,
            } => Some(coercions.coerce(arg_type, default).map_err(|source: ParseError| {
                RegistrationError::InvalidDefault {
                    pattern: pattern.to_string(),
                    parameter: name.clone(),
                    default: default.clone(),
                    source,
                }
            })?),
            _ => None,
        };
        defaults.push(default);
    }
    Ok(defaults)
}
