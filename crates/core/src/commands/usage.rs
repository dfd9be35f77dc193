use super::{argument::ParameterSpec, registry::HandlerBinding};
use itertools::Itertools;

/// `/warp set <name> [radius] [args...]`. Sender slots are not typed, so they are left out.
pub fn generate_usage(binding: &HandlerBinding) -> String {
    let mut parts = binding
        .pattern()
        .tokens()
        .iter()
        .cloned()
        .chain(binding.parameters().iter().filter_map(get_display_name));

    format!("/{}", parts.join(" "))
}

fn get_display_name(parameter: &ParameterSpec) -> Option<String> {
    match parameter {
        ParameterSpec::Sender { .. } => None,
        ParameterSpec::Typed { name, .. } => Some(format!("<{}>", name)),
        ParameterSpec::Optional { name, .. } => Some(format!("[{}]", name)),
        ParameterSpec::Remainder { name } => Some(format!("[{}...]", name)),
    }
}

/// One line per typed parameter, e.g. `radius: integer (default: 5)`.
pub fn generate_parameter_details(binding: &HandlerBinding) -> Vec<String> {
    binding
        .parameters()
        .iter()
        .filter_map(|parameter| match parameter {
            ParameterSpec::Typed { name, arg_type } => Some(format!("{}: {}", name, arg_type)),
            ParameterSpec::Optional {
                name,
                arg_type,
                default,
            } => Some(format!("{}: {} (default: {})", name, arg_type, default)),
            _ => None,
        })
        .collect()
}

pub fn generate_base_name(binding: &HandlerBinding) -> String {
    format!("/{}", binding.pattern())
}
