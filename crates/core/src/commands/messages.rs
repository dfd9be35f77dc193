use super::CommandSender;
use cmdroute_text::translate_alternate_color_codes;
use rustc_hash::FxHashMap;
use tracing::warn;

/// Messages the dispatcher sends on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Permission,
    NoArgs,
    WrongUsage,
    Exists,
    PlayerOnly,
    ConsoleOnly,
    HandlerFailure,
    NoMessage,
}

impl MessageKey {
    pub const ALL: [MessageKey; 8] = [
        MessageKey::Permission,
        MessageKey::NoArgs,
        MessageKey::WrongUsage,
        MessageKey::Exists,
        MessageKey::PlayerOnly,
        MessageKey::ConsoleOnly,
        MessageKey::HandlerFailure,
        MessageKey::NoMessage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MessageKey::Permission => "command.error.permission",
            MessageKey::NoArgs => "command.error.no-args",
            MessageKey::WrongUsage => "command.error.wrong-usage",
            MessageKey::Exists => "command.error.exists",
            MessageKey::PlayerOnly => "command.error.player-only",
            MessageKey::ConsoleOnly => "command.error.console-only",
            MessageKey::HandlerFailure => "command.error.handler-failure",
            MessageKey::NoMessage => "command.error.no-message",
        }
    }

    pub fn from_id(id: &str) -> Option<MessageKey> {
        MessageKey::ALL.into_iter().find(|key| key.id() == id)
    }

    fn default_template(self) -> &'static str {
        match self {
            MessageKey::Permission => {
                "&e⚠ &7| &cOops! You don't have the required permissions to execute this command!"
            }
            MessageKey::NoArgs => {
                "&e⚠ &7| &cNot enough arguments provided! &7Please check the command usage and try again."
            }
            MessageKey::WrongUsage => {
                "&e⚠ &7| &cIncorrect command usage! &7Please review the syntax and try again."
            }
            MessageKey::Exists => {
                "&e⚠ &7| &cThe command you're trying to use doesn't seem to exist!"
            }
            MessageKey::PlayerOnly => "&e⚠ &7| &cThis command can only be executed by players!",
            MessageKey::ConsoleOnly => "&e⚠ &7| &cThis command can only be executed from the console!",
            MessageKey::HandlerFailure | MessageKey::NoMessage => {
                "&e⚠ &7| &cAn error occurred while executing the command. &7Please contact the administrator!"
            }
        }
    }
}

/// Message templates by id. Unknown ids use `command.error.no-message`.
pub struct MessageService {
    templates: FxHashMap<String, String>,
}

impl Default for MessageService {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageService {
    pub fn new() -> Self {
        let templates = MessageKey::ALL
            .into_iter()
            .map(|key| (key.id().to_string(), key.default_template().to_string()))
            .collect();
        Self { templates }
    }

    /// Registers or overrides the template for `id`. Templates use `&` color codes.
    pub fn register(&mut self, id: impl Into<String>, template: impl Into<String>) {
        let id = id.into();
        if id.starts_with("command.") && MessageKey::from_id(&id).is_none() {
            warn!("Message '{}' is not used by the dispatcher", id);
        }
        self.templates.insert(id, template.into());
    }

    pub fn template(&self, id: &str) -> &str {
        self.templates
            .get(id)
            .or_else(|| self.templates.get(MessageKey::NoMessage.id()))
            .map(String::as_str)
            .unwrap_or(MessageKey::NoMessage.default_template())
    }

    pub fn render(&self, id: &str) -> String {
        translate_alternate_color_codes('&', self.template(id))
    }

    pub fn send(&self, key: MessageKey, sender: &dyn CommandSender) {
        self.send_id(key.id(), sender);
    }

    pub fn send_id(&self, id: &str, sender: &dyn CommandSender) {
        sender.send_message(&self.render(id));
    }
}
