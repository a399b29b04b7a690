//! Command-line spellings derived from a parameter's options.

use crate::{CrumbsError, CrumbsResult};

use super::DEFAULT_GROUP;

/// Flags a declaration contributes to the generated command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CliFlags {
    pub(crate) long: Option<String>,
    pub(crate) long_aliases: Vec<String>,
    pub(crate) short: Option<char>,
    pub(crate) short_aliases: Vec<char>,
    pub(crate) positional: bool,
}

enum Spelling<'a> {
    Long(&'a str),
    Short(char),
    Positional,
}

fn classify<'a>(label: &str, option: &'a str) -> CrumbsResult<Spelling<'a>> {
    if let Some(long) = option.strip_prefix("--") {
        if long.is_empty()
            || long.starts_with('-')
            || long.contains(|c: char| c == '=' || c.is_whitespace())
        {
            return Err(CrumbsError::invalid(
                label,
                format!("malformed long option '{option}'"),
            ));
        }
        return Ok(Spelling::Long(long));
    }
    if let Some(short) = option.strip_prefix('-') {
        let mut chars = short.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' && !c.is_whitespace() => Ok(Spelling::Short(c)),
            _ => Err(CrumbsError::invalid(
                label,
                format!("single-dash option '{option}' must be one character"),
            )),
        };
    }
    if option.is_empty() {
        return Err(CrumbsError::invalid(label, "empty option"));
    }
    Ok(Spelling::Positional)
}

impl CliFlags {
    /// Derive the flags for `options`.
    ///
    /// The longest long option is the primary flag and receives the group
    /// prefix when `group_prefix` is set; remaining options become aliases.
    /// With no options at all the local name is used as the long flag.
    pub(crate) fn derive(
        label: &str,
        options: &[String],
        group: &str,
        group_prefix: bool,
    ) -> CrumbsResult<Self> {
        if options.is_empty() {
            return Ok(Self {
                long: Some(prefixed(&label.replace('_', "-"), group, group_prefix)),
                ..Self::default()
            });
        }

        let mut longs: Vec<&str> = Vec::new();
        let mut shorts: Vec<char> = Vec::new();
        let mut positional = false;
        for option in options {
            match classify(label, option)? {
                Spelling::Long(long) => longs.push(long),
                Spelling::Short(short) => shorts.push(short),
                Spelling::Positional => positional = true,
            }
        }

        if positional {
            if options.len() > 1 {
                return Err(CrumbsError::invalid(
                    label,
                    "a positional argument cannot also have flags",
                ));
            }
            return Ok(Self {
                positional: true,
                ..Self::default()
            });
        }

        let primary = longs
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, long)| long.len())
            .map(|(index, _)| index);
        let long = primary.map(|index| longs.remove(index));
        let short = (!shorts.is_empty()).then(|| shorts.remove(0));

        Ok(Self {
            long: long.map(|primary_long| prefixed(primary_long, group, group_prefix)),
            long_aliases: longs.into_iter().map(str::to_owned).collect(),
            short,
            short_aliases: shorts,
            positional: false,
        })
    }

    /// Every spelling as typed by a user, for conflict detection.
    pub(crate) fn spellings(&self) -> Vec<String> {
        let longs = self
            .long
            .iter()
            .chain(&self.long_aliases)
            .map(|long| format!("--{long}"));
        let shorts = self
            .short
            .iter()
            .chain(&self.short_aliases)
            .map(|short| format!("-{short}"));
        longs.chain(shorts).collect()
    }
}

fn prefixed(long: &str, group: &str, group_prefix: bool) -> String {
    if group_prefix && group != DEFAULT_GROUP {
        format!("{}-{long}", group.replace('_', "-"))
    } else {
        long.to_owned()
    }
}
