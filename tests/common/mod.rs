#![allow(dead_code)]

use cmdroute_core::commands::{Catalog, CommandManager, CommandSender, SenderKind};
use cmdroute_core::permissions::PermissionSet;
use cmdroute_text::strip_color_codes;
use std::cell::RefCell;
use std::sync::{Arc, Mutex};

/// Records everything it is sent, with color codes removed.
pub struct TestSender {
    kind: SenderKind,
    name: String,
    permissions: PermissionSet,
    messages: RefCell<Vec<String>>,
}

impl TestSender {
    pub fn player(permissions: &[&str]) -> Self {
        Self {
            kind: SenderKind::Player,
            name: "Notch".to_string(),
            permissions: PermissionSet::from_nodes(permissions),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn console() -> Self {
        Self {
            kind: SenderKind::Console,
            name: "CONSOLE".to_string(),
            permissions: PermissionSet::from_nodes(["*"]),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn take_messages(&self) -> Vec<String> {
        self.messages.take()
    }
}

impl CommandSender for TestSender {
    fn kind(&self) -> SenderKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.has(permission)
    }

    fn send_message(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(strip_color_codes(message));
    }
}

pub struct StaticCatalog;

impl Catalog for StaticCatalog {
    fn online_players(&self) -> Vec<String> {
        vec!["Notch".to_string(), "jeb_".to_string(), "Dinnerbone".to_string()]
    }

    fn materials(&self) -> Vec<String> {
        vec!["stone".to_string(), "sandstone".to_string(), "redstone".to_string()]
    }
}

pub fn manager() -> CommandManager {
    CommandManager::new(Arc::new(StaticCatalog))
}

/// Handler invocations, shared with the executors that record them.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}
