use crate::commands::pattern::CommandPattern;

/// Anything that is looked up by its command pattern.
pub(super) trait Patterned {
    fn pattern(&self) -> &CommandPattern;
}

pub(super) fn tokenize(command_line: &str) -> Vec<&str> {
    command_line.split_whitespace().collect()
}

/// A line that is still being typed: the finished words plus the word under the cursor,
/// which is empty right after a space.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct PartialLine<'a> {
    pub completed: Vec<&'a str>,
    pub current: &'a str,
}

impl<'a> PartialLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut completed = tokenize(line);
        let ends_in_word = line.chars().last().is_some_and(|c| !c.is_whitespace());
        let current = if ends_in_word {
            completed.pop().unwrap_or_default()
        } else {
            ""
        };
        Self { completed, current }
    }

    /// Builds the line from a command name and host-split arguments, where the last
    /// argument is the one being typed.
    pub fn from_args(command: &'a str, args: &[&'a str]) -> Self {
        let mut completed = vec![command];
        let current = match args.split_last() {
            Some((last, rest)) => {
                completed.extend(rest.iter().flat_map(|arg| arg.split_whitespace()));
                *last
            }
            None => "",
        };
        Self { completed, current }
    }
}

/// Linear scan for the longest pattern `input` starts with. Registered patterns are unique,
/// so the winner does not depend on iteration order.
pub(super) fn find_longest_prefix<'a, T, S>(
    entries: impl IntoIterator<Item = &'a T>,
    input: &[S],
) -> Option<&'a T>
where
    T: Patterned + 'a,
    S: AsRef<str>,
{
    let mut best: Option<&'a T> = None;
    for entry in entries {
        let pattern = entry.pattern();
        if !pattern.is_prefix_of(input) {
            continue;
        }
        if best.is_none_or(|best| pattern.len() > best.pattern().len()) {
            best = Some(entry);
        }
    }
    best
}
