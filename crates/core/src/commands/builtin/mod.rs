use crate::commands::{
    coercion::TypeCoercionRegistry,
    context::ExecutionContext,
    descriptor::CommandDescriptor,
    error::{CommandResult, RegistrationError},
    registry::{CommandRegistry, HandlerBinding},
    usage,
};
use itertools::Itertools;

pub fn register_commands(
    registry: &mut CommandRegistry,
    coercions: &TypeCoercionRegistry,
) -> Result<(), RegistrationError> {
    registry.register(
        CommandDescriptor::new("help")
            .alias("?")
            .description("Lists commands or shows how to use one")
            .remainder("command")
            .executes(exec_help_command),
        coercions,
    )
}

fn exec_help_command(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let command = ctx.args().get_remainder("command")?;
    let registry = ctx.registry();
    let sender = ctx.sender();

    if command.is_empty() {
        let commands = registry
            .bindings()
            .filter(|binding| binding.alias_of().is_none() && binding.is_permitted(sender))
            .map(|binding| {
                let aliases = registry
                    .bindings()
                    .filter(|alias| alias.alias_of() == Some(binding.pattern()))
                    .map(|alias| alias.pattern().to_string())
                    .collect_vec();
                if aliases.is_empty() {
                    format!("/{}", binding.pattern())
                } else {
                    format!("/{} (Aliases: {})", binding.pattern(), aliases.join(", "))
                }
            })
            .sorted()
            .collect_vec();

        ctx.reply("&eRun &6/help <command>&e for more information.")?;
        ctx.reply("&6Available commands:")?;
        for command in commands {
            ctx.reply(&format!(" &e{}", command))?;
        }
        return Ok(());
    }

    let mut matching: Vec<&HandlerBinding> = registry
        .bindings()
        .filter(|binding| binding.alias_of().is_none() && binding.is_permitted(sender))
        .filter(|binding| binding.pattern().starts_with(command))
        .collect();
    if matching.is_empty() {
        matching.extend(registry.find_longest_prefix_match(command));
    }
    if matching.is_empty() {
        return ctx.error(&format!("Command not found: {}", command.join(" ")));
    }

    for binding in matching {
        ctx.reply(&format!("&6Usage: &e{}", usage::generate_usage(binding)))?;
        if let Some(description) = binding.description() {
            ctx.reply(&format!(" &7{}", description))?;
        }
        for detail in usage::generate_parameter_details(binding) {
            ctx.reply(&format!("  &7{}", detail))?;
        }
    }
    Ok(())
}
