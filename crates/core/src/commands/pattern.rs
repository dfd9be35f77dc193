use super::error::RegistrationError;
use std::fmt;

/// A flat sequence of literal words such as `warp set`. Compared case-insensitively.
#[derive(Debug, Clone)]
pub struct CommandPattern {
    tokens: Vec<String>,
    normalized: Vec<String>,
}

impl CommandPattern {
    pub fn parse(pattern: &str) -> Result<Self, RegistrationError> {
        let tokens: Vec<String> = pattern.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(RegistrationError::EmptyPattern);
        }
        let normalized = tokens.iter().map(|token| token.to_lowercase()).collect();
        Ok(Self { tokens, normalized })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn command_name(&self) -> &str {
        &self.tokens[0]
    }

    /// Whether `input` starts with every word of this pattern.
    pub fn is_prefix_of<S: AsRef<str>>(&self, input: &[S]) -> bool {
        input.len() >= self.normalized.len() && self.matches_leading(input)
    }

    /// Whether this pattern begins with every word of `input`.
    pub fn starts_with<S: AsRef<str>>(&self, input: &[S]) -> bool {
        input.len() <= self.normalized.len() && self.matches_leading(input)
    }

    /// The word that follows `typed` if this pattern is strictly longer and starts with it.
    pub fn next_token<S: AsRef<str>>(&self, typed: &[S]) -> Option<&str> {
        if self.tokens.len() > typed.len() && self.matches_leading(typed) {
            Some(&self.tokens[typed.len()])
        } else {
            None
        }
    }

    pub(super) fn key(&self) -> String {
        self.normalized.join(" ")
    }

    fn matches_leading<S: AsRef<str>>(&self, input: &[S]) -> bool {
        self.normalized
            .iter()
            .zip(input)
            .all(|(word, token)| *word == token.as_ref().to_lowercase())
    }
}

impl PartialEq for CommandPattern {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for CommandPattern {}

impl fmt::Display for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_collapses_whitespace() {
        let pattern = CommandPattern::parse("  Warp   set ").unwrap();
        assert_eq!(pattern.tokens(), ["Warp", "set"]);
        assert_eq!(pattern.key(), "warp set");
        assert_eq!(pattern.to_string(), "Warp set");
        assert!(matches!(
            CommandPattern::parse("   "),
            Err(RegistrationError::EmptyPattern)
        ));
    }

    #[test]
    fn prefix_matching_is_per_word() {
        let pattern = CommandPattern::parse("warp set").unwrap();
        assert!(pattern.is_prefix_of(&["WARP", "Set", "spawn"]));
        assert!(pattern.is_prefix_of(&["warp", "set"]));
        assert!(!pattern.is_prefix_of(&["warp"]));
        assert!(!pattern.is_prefix_of(&["warp", "setx"]));
        assert!(!pattern.is_prefix_of(&["warpset"]));
        assert!(pattern.starts_with(&["WARP"]));
        assert!(!pattern.starts_with(&["warp", "set", "home"]));
    }

    #[test]
    fn next_token_only_for_longer_patterns() {
        let pattern = CommandPattern::parse("warp set").unwrap();
        assert_eq!(pattern.next_token(&["warp"]), Some("set"));
        assert_eq!(pattern.next_token::<&str>(&[]), Some("warp"));
        assert_eq!(pattern.next_token(&["warp", "set"]), None);
        assert_eq!(pattern.next_token(&["home"]), None);
    }
}
