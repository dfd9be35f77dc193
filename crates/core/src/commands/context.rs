use super::{CommandSender, SenderKind, argument_set::ArgumentSet};
use crate::commands::{
    error::{CommandResult, RuntimeError},
    registry::{CommandRegistry, HandlerBinding},
};
use cmdroute_text::translate_alternate_color_codes;

pub struct ExecutionContext<'a> {
    sender: &'a dyn CommandSender,
    arguments: ArgumentSet,
    binding: &'a HandlerBinding,
    registry: &'a CommandRegistry,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        sender: &'a dyn CommandSender,
        arguments: ArgumentSet,
        binding: &'a HandlerBinding,
        registry: &'a CommandRegistry,
    ) -> Self {
        Self {
            sender,
            arguments,
            binding,
            registry,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }

    pub fn sender(&self) -> &'a dyn CommandSender {
        self.sender
    }

    /// The binding that matched, which is the alias binding when an alias was typed.
    pub fn binding(&self) -> &'a HandlerBinding {
        self.binding
    }

    pub fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }

    /// Sends `message` with `&` color codes translated.
    pub fn reply(&self, message: &str) -> CommandResult<()> {
        self.sender
            .send_message(&translate_alternate_color_codes('&', message));
        Ok(())
    }

    pub fn error(&self, message: &str) -> CommandResult<()> {
        self.reply(&format!("&c{}", message))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.sender.has_permission(permission)
    }

    pub fn require_permission(&self, permission: &str) -> CommandResult<()> {
        if !self.has_permission(permission) {
            return Err(RuntimeError::PermissionDenied {
                permission: permission.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn player_name(&self) -> CommandResult<&'a str> {
        match self.sender.kind() {
            SenderKind::Player => Ok(self.sender.name()),
            SenderKind::Console => Err(RuntimeError::PlayerOnly.into()),
        }
    }
}
