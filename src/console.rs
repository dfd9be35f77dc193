use anyhow::Result;
use cmdroute_core::commands::{CommandManager, CommandSender, Outcome, SenderKind};
use cmdroute_core::permissions::PermissionSet;
use cmdroute_text::{ColorCode, TextSpan};
use owo_colors::{AnsiColors, OwoColorize, Style};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// A sender typing into this terminal.
pub struct TerminalSender {
    kind: SenderKind,
    name: String,
    permissions: PermissionSet,
}

impl TerminalSender {
    pub fn console(permissions: PermissionSet) -> Self {
        Self {
            kind: SenderKind::Console,
            name: "CONSOLE".to_string(),
            permissions,
        }
    }

    pub fn player(name: &str, permissions: PermissionSet) -> Self {
        Self {
            kind: SenderKind::Player,
            name: name.to_string(),
            permissions,
        }
    }
}

impl CommandSender for TerminalSender {
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
        anstream::println!("{}", render(message));
    }
}

fn ansi_color(color: ColorCode) -> Option<AnsiColors> {
    Some(match color {
        ColorCode::Black => AnsiColors::Black,
        ColorCode::DarkBlue => AnsiColors::Blue,
        ColorCode::DarkGreen => AnsiColors::Green,
        ColorCode::DarkAqua => AnsiColors::Cyan,
        ColorCode::DarkRed => AnsiColors::Red,
        ColorCode::DarkPurple => AnsiColors::Magenta,
        ColorCode::Gold => AnsiColors::Yellow,
        ColorCode::Gray => AnsiColors::White,
        ColorCode::DarkGray => AnsiColors::BrightBlack,
        ColorCode::Blue => AnsiColors::BrightBlue,
        ColorCode::Green => AnsiColors::BrightGreen,
        ColorCode::Aqua => AnsiColors::BrightCyan,
        ColorCode::Red => AnsiColors::BrightRed,
        ColorCode::LightPurple => AnsiColors::BrightMagenta,
        ColorCode::Yellow => AnsiColors::BrightYellow,
        ColorCode::White => AnsiColors::BrightWhite,
        _ => return None,
    })
}

/// Converts color codes into ANSI escapes. `anstream` strips them again when
/// stdout is not a terminal.
fn render(message: &str) -> String {
    let mut out = String::new();
    for span in TextSpan::from_legacy_text(message) {
        if span.is_text_only() {
            out.push_str(&span.text);
            continue;
        }
        let mut style = Style::new();
        if let Some(color) = span.color.and_then(ansi_color) {
            style = style.color(color);
        }
        if span.bold {
            style = style.bold();
        }
        if span.italic {
            style = style.italic();
        }
        if span.underlined {
            style = style.underline();
        }
        if span.strikethrough {
            style = style.strikethrough();
        }
        if span.obfuscated {
            style = style.dimmed();
        }
        let _ = write!(out, "{}", span.text.style(style));
    }
    out
}

const HELP: &str = "Type a command without the leading slash. \
:tab <line> lists completions, :as player|console switches sender, :quit exits.";

/// The partial line after `:tab`, which may be empty.
fn completion_request(line: &str) -> Option<&str> {
    match line.strip_prefix(":tab")? {
        "" => Some(""),
        rest => rest.strip_prefix(' '),
    }
}

/// Reads command lines from stdin until EOF or `:quit`.
pub fn run(
    manager: &CommandManager,
    console: TerminalSender,
    player: TerminalSender,
    start_as_player: bool,
) -> Result<()> {
    let mut as_player = start_as_player;
    anstream::println!("{}", HELP.dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let sender = if as_player { &player } else { &console };
        let mut stdout = anstream::stdout();
        write!(stdout, "{} ", format!("{}>", sender.name()).green().bold())?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim_start();
        let line = line.strip_prefix('/').unwrap_or(line);

        if let Some(partial) = completion_request(line) {
            let suggestions = manager.resolver().complete(sender, partial);
            if suggestions.is_empty() {
                anstream::println!("{}", "(no suggestions)".dimmed());
            } else {
                anstream::println!("{}", suggestions.join("  ").cyan());
            }
            continue;
        }

        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" => anstream::println!("{}", HELP.dimmed()),
            ":as player" => as_player = true,
            ":as console" => as_player = false,
            line => {
                let outcome = manager.dispatch(sender, line);
                if outcome != Outcome::Executed {
                    debug!("'{}' ended with {:?}", line, outcome);
                }
            }
        }
    }
    Ok(())
}
