//! Generation of the `clap::Command` for the registered declarations.

use clap::builder::ValueRange;
use clap::{Arg, ArgAction, Command};

use crate::parameter::{Action, CliFlags, Declared, Nargs};
use crate::parameters::Settings;
use crate::value::ValueType;

fn value_range(nargs: Nargs) -> ValueRange {
    match nargs {
        Nargs::One => 1_usize.into(),
        Nargs::Exactly(count) => count.into(),
        Nargs::ZeroOrMore => (0_usize..).into(),
        Nargs::OneOrMore => (1_usize..).into(),
    }
}

fn build_arg(entry: &Declared, flags: &CliFlags) -> Arg {
    let parameter = &entry.parameter;
    let mut arg = Arg::new(entry.key.clone());
    if let Some(long) = &flags.long {
        arg = arg.long(long.clone());
    }
    if let Some(short) = flags.short {
        arg = arg.short(short);
    }
    for alias in &flags.long_aliases {
        arg = arg.visible_alias(alias.clone());
    }
    for short in &flags.short_aliases {
        arg = arg.visible_short_alias(*short);
    }
    if flags.positional {
        arg = arg.value_name(entry.name.to_uppercase());
    }
    if let Some(help) = &parameter.help {
        arg = arg.help(help.clone());
    }
    if !entry.in_default_group() {
        arg = arg.help_heading(parameter.group.clone());
    }
    if parameter.action.takes_value()
        && matches!(
            parameter.effective_type(),
            ValueType::Integer | ValueType::Float
        )
    {
        arg = arg.allow_negative_numbers(true);
    }
    match parameter.action {
        Action::Store => arg.action(ArgAction::Set).num_args(value_range(parameter.nargs)),
        Action::Append => arg
            .action(ArgAction::Append)
            .num_args(value_range(parameter.nargs)),
        Action::StoreConst | Action::StoreTrue => arg.action(ArgAction::SetTrue),
        Action::StoreFalse => arg.action(ArgAction::SetFalse),
        Action::Count => arg.action(ArgAction::Count),
    }
}

/// Build the command for every entry read from arguments.
///
/// Entries of non-default groups are listed under a help heading named after
/// their group. A repeated flag keeps its last value.
pub(crate) fn build_command(settings: &Settings, entries: &[Declared]) -> Command {
    let mut command = Command::new(settings.program.clone()).args_override_self(true);
    if let Some(about) = &settings.about {
        command = command.about(about.clone());
    }
    if let Some(version) = &settings.version {
        command = command.version(version.clone());
    }
    entries
        .iter()
        .filter_map(|entry| entry.flags.as_ref().map(|flags| build_arg(entry, flags)))
        .fold(command, |command, arg| command.arg(arg))
}
