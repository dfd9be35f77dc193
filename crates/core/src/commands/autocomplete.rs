use crate::commands::{
    CommandSender,
    parser::PartialLine,
    registry::CommandRegistry,
    suggestion::CompletionSourceRegistry,
};
use indexmap::IndexSet;
use tracing::{debug, warn};

/// Suggests the word under the cursor. Tried in order, the first tier with candidates wins:
/// the next literal word of longer patterns, the declared hint for the argument position,
/// then the longest matching tab completer.
pub struct CompletionResolver<'r> {
    registry: &'r CommandRegistry,
    sources: &'r CompletionSourceRegistry,
}

impl<'r> CompletionResolver<'r> {
    pub fn new(registry: &'r CommandRegistry, sources: &'r CompletionSourceRegistry) -> Self {
        Self { registry, sources }
    }

    pub fn complete(&self, sender: &dyn CommandSender, line: &str) -> Vec<String> {
        self.resolve(sender, &PartialLine::parse(line))
    }

    /// `args` as split by the host; the last one is being typed.
    pub fn complete_args(&self, sender: &dyn CommandSender, command: &str, args: &[&str]) -> Vec<String> {
        self.resolve(sender, &PartialLine::from_args(command, args))
    }

    fn resolve(&self, sender: &dyn CommandSender, line: &PartialLine<'_>) -> Vec<String> {
        let mut candidates = self.subcommands(sender, &line.completed);
        if candidates.is_empty() {
            candidates = self.hinted(sender, &line.completed);
        }
        if candidates.is_empty() {
            candidates = self.dynamic(sender, line);
        }
        filter_suggestions(candidates, line.current)
    }

    fn subcommands(&self, sender: &dyn CommandSender, completed: &[&str]) -> Vec<String> {
        let subcommands: IndexSet<String> = self
            .registry
            .bindings()
            .filter(|binding| binding.is_permitted(sender))
            .filter_map(|binding| binding.pattern().next_token(completed))
            .map(str::to_string)
            .collect();
        subcommands.into_iter().collect()
    }

    fn hinted(&self, sender: &dyn CommandSender, completed: &[&str]) -> Vec<String> {
        let Some(binding) = self.registry.find_completion_binding(completed) else {
            return Vec::new();
        };
        let index = completed.len() - binding.pattern().len();
        let Some(hint) = binding.completions().get(index) else {
            return Vec::new();
        };
        debug!("Completing argument {} of '{}' with {:?}", index, binding.pattern(), hint);
        self.sources
            .resolve(hint, sender, binding.argument_type_at(index))
    }

    fn dynamic(&self, sender: &dyn CommandSender, line: &PartialLine<'_>) -> Vec<String> {
        let Some(completer) = self.registry.find_tab_completer(&line.completed) else {
            return Vec::new();
        };
        let args: Vec<String> = line.completed[completer.pattern().len()..]
            .iter()
            .chain(std::iter::once(&line.current))
            .map(|arg| arg.to_string())
            .collect();

        completer.complete(sender, &args).unwrap_or_else(|err| {
            warn!("Tab completer for '{}' failed: {}", completer.pattern(), err);
            Vec::new()
        })
    }
}

/// Keeps the candidates that start with `current`, ignoring case.
pub fn filter_suggestions(candidates: Vec<String>, current: &str) -> Vec<String> {
    let current = current.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().starts_with(&current))
        .collect()
}
