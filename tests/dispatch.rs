mod common;
use common::*;

use cmdroute_core::commands::{
    ArgumentType, CommandDescriptor, CommandError, CommandManager, MessageKey, Outcome,
    SenderRequirement,
};
use cmdroute_core::config::Config;
use expect_test::expect;
use std::sync::Arc;

fn recording(pattern: &str, calls: &Calls) -> CommandDescriptor {
    let calls = calls.clone();
    let name = pattern.to_string();
    CommandDescriptor::new(pattern)
        .remainder("args")
        .executes(move |ctx| {
            let args = ctx.args().get_remainder("args")?;
            calls.record(format!("{} {:?}", name, args));
            Ok(())
        })
}

fn warp_manager(calls: &Calls) -> CommandManager {
    let mut manager = manager();
    manager
        .register_all([recording("warp", calls), recording("warp set", calls)])
        .unwrap();
    manager
}

#[test]
fn longest_pattern_receives_the_rest() {
    let calls = Calls::default();
    let manager = warp_manager(&calls);
    let sender = TestSender::player(&["*"]);

    assert_eq!(manager.dispatch(&sender, "warp set spawn"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "warp list"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "WARP Set"), Outcome::Executed);
    assert_eq!(
        calls.take(),
        [r#"warp set ["spawn"]"#, r#"warp ["list"]"#, "warp set []"]
    );
    assert!(sender.take_messages().is_empty());
}

#[test]
fn unknown_command() {
    let calls = Calls::default();
    let manager = warp_manager(&calls);
    let sender = TestSender::player(&["*"]);

    assert_eq!(manager.dispatch(&sender, "xyzzy foo"), Outcome::CommandNotFound);
    assert!(!manager.dispatch_command(&sender, "xyzzy", &["foo"]));
    assert!(calls.take().is_empty());
    assert_eq!(
        sender.take_messages(),
        [
            "⚠ | The command you're trying to use doesn't seem to exist!",
            "⚠ | The command you're trying to use doesn't seem to exist!"
        ]
    );
}

#[test]
fn host_entry_point_joins_arguments() {
    let calls = Calls::default();
    let manager = warp_manager(&calls);
    let sender = TestSender::player(&["*"]);

    assert!(manager.dispatch_command(&sender, "warp", &["set", "home"]));
    assert!(manager.dispatch_command(&sender, "warp", &[]));
    assert_eq!(calls.take(), [r#"warp set ["home"]"#, "warp []"]);
}

#[test]
fn permission_is_checked_before_binding() {
    let calls = Calls::default();
    let mut manager = manager();
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("ban")
                .require_permission("admin.ban")
                .argument("target", ArgumentType::string())
                .argument("days", ArgumentType::integer())
                .executes(move |_| {
                    recorder.record("ban");
                    Ok(())
                }),
        )
        .unwrap();

    let sender = TestSender::player(&["-admin.*", "*"]);
    for line in ["ban", "ban Notch", "ban Notch forever", "ban Notch 3"] {
        assert_eq!(
            manager.dispatch(&sender, line),
            Outcome::PermissionDenied {
                permission: "admin.ban".to_string()
            }
        );
    }
    assert!(calls.take().is_empty());

    let admin = TestSender::player(&["admin.ban"]);
    assert_eq!(manager.dispatch(&admin, "ban Notch 3"), Outcome::Executed);
    assert_eq!(calls.take(), ["ban"]);
}

#[test]
fn sender_slots_narrow_the_invoker() {
    let calls = Calls::default();
    let mut manager = manager();
    let (console_calls, player_calls) = (calls.clone(), calls.clone());
    manager
        .register_all([
            CommandDescriptor::new("stop")
                .console("console")
                .executes(move |_| {
                    console_calls.record("stop");
                    Ok(())
                }),
            CommandDescriptor::new("fly")
                .player("player")
                .executes(move |ctx| {
                    player_calls.record(format!("fly {}", ctx.player_name()?));
                    Ok(())
                }),
        ])
        .unwrap();

    let player = TestSender::player(&["*"]);
    let console = TestSender::console();

    assert_eq!(
        manager.dispatch(&player, "stop"),
        Outcome::WrongInvokerKind {
            required: SenderRequirement::ConsoleOnly
        }
    );
    assert_eq!(
        manager.dispatch(&console, "fly"),
        Outcome::WrongInvokerKind {
            required: SenderRequirement::PlayerOnly
        }
    );
    assert!(calls.take().is_empty());
    assert_eq!(
        player.take_messages(),
        ["⚠ | This command can only be executed from the console!"]
    );
    assert_eq!(
        console.take_messages(),
        ["⚠ | This command can only be executed by players!"]
    );

    assert_eq!(manager.dispatch(&console, "stop"), Outcome::Executed);
    assert_eq!(manager.dispatch(&player, "fly"), Outcome::Executed);
    assert_eq!(calls.take(), ["stop", "fly Notch"]);
}

#[test]
fn optional_parameters_fall_back_to_their_default() {
    let calls = Calls::default();
    let mut manager = manager();
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("heal")
                .optional("amount", ArgumentType::integer(), "5")
                .executes(move |ctx| {
                    recorder.record(ctx.args().get_integer("amount")?.to_string());
                    Ok(())
                }),
        )
        .unwrap();
    let sender = TestSender::console();

    assert_eq!(manager.dispatch(&sender, "heal"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "heal 7"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "heal 7 extra words"), Outcome::Executed);
    assert_eq!(calls.take(), ["5", "7", "7"]);
}

#[test]
fn usage_errors_show_usage_without_type_details() {
    let calls = Calls::default();
    let mut manager = manager();
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("warp set")
                .player("player")
                .argument("name", ArgumentType::string())
                .optional("radius", ArgumentType::integer(), "5")
                .executes(move |_| {
                    recorder.record("set");
                    Ok(())
                }),
        )
        .unwrap();
    let sender = TestSender::player(&["*"]);

    assert_eq!(manager.dispatch(&sender, "warp set"), Outcome::MissingArguments);
    assert_eq!(
        sender.take_messages(),
        [
            "⚠ | Not enough arguments provided! Please check the command usage and try again.",
            "Usage: /warp set <name> [radius]"
        ]
    );

    assert_eq!(manager.dispatch(&sender, "warp set home far"), Outcome::InvalidUsage);
    assert_eq!(
        sender.take_messages(),
        [
            "⚠ | Incorrect command usage! Please review the syntax and try again.",
            "Usage: /warp set <name> [radius]"
        ]
    );
    assert!(calls.take().is_empty());
}

#[test]
fn sender_and_remainder_slots_do_not_consume_tokens() {
    let calls = Calls::default();
    let mut manager = manager();
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("mix")
                .argument("first", ArgumentType::integer())
                .sender("sender")
                .remainder("all")
                .argument("second", ArgumentType::integer())
                .executes(move |ctx| {
                    let args = ctx.args();
                    recorder.record(format!(
                        "{} {:?} {}",
                        args.get_integer("first")?,
                        args.get_remainder("all")?,
                        args.get_integer("second")?
                    ));
                    Ok(())
                }),
        )
        .unwrap();
    let sender = TestSender::console();

    assert_eq!(manager.dispatch(&sender, "mix 1 2 3"), Outcome::Executed);
    assert_eq!(calls.take(), [r#"1 ["2", "3"] 2"#]);
}

#[test]
fn enum_and_custom_arguments() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Survival,
        Creative,
    }
    cmdroute_core::command_enum!(Mode { Survival, Creative });

    let calls = Calls::default();
    let mut manager = manager();
    manager.coercions_mut().register(
        ArgumentType::custom("coords"),
        |input| {
            let (x, z) = input
                .split_once(',')
                .ok_or_else(|| cmdroute_core::commands::ParseError::invalid_value("coords", input))?;
            match (x.parse::<i32>(), z.parse::<i32>()) {
                (Ok(x), Ok(z)) => Ok(cmdroute_core::commands::Value::custom((x, z))),
                _ => Err(cmdroute_core::commands::ParseError::invalid_value("coords", input)),
            }
        },
    );
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("gamemode")
                .argument("mode", ArgumentType::enumeration::<Mode>())
                .argument("at", ArgumentType::custom("coords"))
                .executes(move |ctx| {
                    let mode = ctx.args().get_enum::<Mode>("mode")?;
                    let at = ctx.args().get_custom::<(i32, i32)>("at")?;
                    recorder.record(format!("{:?} {:?}", mode, at));
                    Ok(())
                }),
        )
        .unwrap();
    let sender = TestSender::console();

    assert_eq!(manager.dispatch(&sender, "gamemode creative 3,-4"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "gamemode hardcore 3,-4"), Outcome::InvalidUsage);
    assert_eq!(manager.dispatch(&sender, "gamemode survival 3"), Outcome::InvalidUsage);
    assert_eq!(calls.take(), ["Creative (3, -4)"]);
}

#[test]
fn handler_failures_are_reported_generically() {
    let mut manager = manager();
    manager
        .register_all([
            CommandDescriptor::new("explode")
                .executes(|_| Err(CommandError::internal("database password is hunter2"))),
            CommandDescriptor::new("panic").executes(|_| panic!("secret detail")),
            CommandDescriptor::new("refuse")
                .executes(|_| Err(CommandError::runtime("You cannot do that here"))),
        ])
        .unwrap();
    let sender = TestSender::console();

    assert_eq!(manager.dispatch(&sender, "explode"), Outcome::HandlerFailure);
    assert!(manager.dispatch_command(&sender, "panic", &[]));
    assert_eq!(manager.dispatch(&sender, "refuse"), Outcome::HandlerFailure);
    assert!(manager.dispatch_command(&sender, "refuse", &[]));

    let failure = cmdroute_text::strip_color_codes(
        &manager.messages().render(MessageKey::HandlerFailure.id()),
    );
    let refusal = "You cannot do that here".to_string();
    assert_eq!(
        sender.take_messages(),
        [
            failure.clone(),
            failure.clone(),
            refusal.clone(),
            failure.clone(),
            refusal,
            failure,
        ]
    );
}

#[test]
fn aliases_share_the_handler() {
    let calls = Calls::default();
    let mut manager = manager();
    let recorder = calls.clone();
    manager
        .register(
            CommandDescriptor::new("warp set")
                .alias("setwarp")
                .argument("name", ArgumentType::string())
                .executes(move |ctx| {
                    recorder.record(format!("{} {}", ctx.binding().pattern(), ctx.args().get_string("name")?));
                    Ok(())
                }),
        )
        .unwrap();
    let sender = TestSender::console();

    assert_eq!(manager.dispatch(&sender, "setwarp home"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "warp set home"), Outcome::Executed);
    assert_eq!(calls.take(), ["setwarp home", "warp set home"]);
}

#[test]
fn configuration_aliases_and_messages() {
    let calls = Calls::default();
    let mut config = Config::default();
    config
        .command_aliases
        .insert("sw".to_string(), "warp set {} 10".to_string());
    config.command_aliases.insert("w".to_string(), "warp".to_string());
    config
        .messages
        .insert(MessageKey::Exists.id().to_string(), "&cUnknown command.".to_string());

    let mut manager = CommandManager::from_config(Arc::new(StaticCatalog), &config);
    manager
        .register_all([recording("warp", &calls), recording("warp set", &calls)])
        .unwrap();
    let sender = TestSender::player(&["*"]);

    assert_eq!(manager.dispatch(&sender, "sw home"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "w spawn"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "wx"), Outcome::CommandNotFound);
    assert_eq!(
        calls.take(),
        [r#"warp set ["home", "10"]"#, r#"warp ["spawn"]"#]
    );
    assert_eq!(sender.take_messages(), ["Unknown command."]);
}

#[test]
fn overlapping_configuration_aliases_prefer_the_longest() {
    let calls = Calls::default();
    let mut config = Config::default();
    config.command_aliases.insert("w".to_string(), "warp".to_string());
    config
        .command_aliases
        .insert("w s".to_string(), "warp set {} 1".to_string());

    let mut manager = CommandManager::from_config(Arc::new(StaticCatalog), &config);
    manager
        .register_all([recording("warp", &calls), recording("warp set", &calls)])
        .unwrap();
    let sender = TestSender::player(&["*"]);

    assert_eq!(manager.dispatch(&sender, "w s base"), Outcome::Executed);
    assert_eq!(manager.dispatch(&sender, "W spawn"), Outcome::Executed);
    assert_eq!(
        calls.take(),
        [r#"warp set ["base", "1"]"#, r#"warp ["spawn"]"#]
    );
}

#[test]
fn help_lists_permitted_commands() {
    let calls = Calls::default();
    let mut manager = manager();
    manager
        .register_all([
            recording("warp", &calls),
            recording("warp set", &calls).alias("setwarp"),
            CommandDescriptor::new("stop")
                .require_permission("server.stop")
                .executes(|_| Ok(())),
        ])
        .unwrap();
    manager.register_builtin_commands().unwrap();
    let sender = TestSender::player(&["-server.*", "*"]);

    assert_eq!(manager.dispatch(&sender, "help"), Outcome::Executed);
    expect![[r#"
        [
            "Run /help <command> for more information.",
            "Available commands:",
            " /help (Aliases: ?)",
            " /warp",
            " /warp set (Aliases: setwarp)",
        ]
    "#]]
    .assert_debug_eq(&sender.take_messages());

    assert_eq!(manager.dispatch(&sender, "? warp"), Outcome::Executed);
    expect![[r#"
        [
            "Usage: /warp [args...]",
            "Usage: /warp set [args...]",
        ]
    "#]]
    .assert_debug_eq(&sender.take_messages());

    assert_eq!(manager.dispatch(&sender, "help nothing"), Outcome::Executed);
    assert_eq!(sender.take_messages(), ["Command not found: nothing"]);
}
