mod console;
mod demo;

use anyhow::Result;
use backtrace::Backtrace;
use clap::Parser;
use cmdroute_core::commands::CommandManager;
use cmdroute_core::config::Config;
use cmdroute_core::permissions::PermissionSet;
use console::TerminalSender;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Interactive console for the command dispatcher.
#[derive(Parser, Debug)]
#[command(name = "cmdroute", version, about)]
struct Cli {
    /// Configuration file, created with defaults if missing
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Run one command line and exit instead of starting the console
    #[arg(long)]
    exec: Option<String>,

    /// Send commands as the configured player instead of the console
    #[arg(long)]
    as_player: bool,
}

fn main() -> Result<()> {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "cmdroute.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CMDROUTE_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = Backtrace::new();
        error!("{}\n{:?}", panic_info, backtrace);
    }));

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let catalog = Arc::new(demo::DemoCatalog::new(&config.player_name));
    let mut manager = CommandManager::from_config(catalog.clone(), &config);
    demo::register(&mut manager, catalog)?;
    manager.register_builtin_commands()?;

    let console = TerminalSender::console(PermissionSet::from_nodes(&config.console_permissions));
    let player = TerminalSender::player(
        &config.player_name,
        PermissionSet::from_nodes(&config.player_permissions),
    );

    match cli.exec {
        Some(line) => {
            let sender = if cli.as_player { &player } else { &console };
            let outcome = manager.dispatch(sender, &line);
            info!("{} -> {:?}", line, outcome);
            Ok(())
        }
        None => console::run(&manager, console, player, cli.as_player),
    }
}
