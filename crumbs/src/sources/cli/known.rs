//! Argument filtering for partial parses.
//!
//! A partial parse happens before every parameter is registered, typically to
//! find the configuration file to load. Help flags and arguments no entry
//! recognises are dropped so the parse neither prints help nor stops at the
//! first unknown flag.

use std::ffi::OsString;

use crate::parameter::{Declared, Nargs};

#[derive(Clone, Copy)]
enum Arity {
    Flag,
    Values(Nargs),
}

fn arity(entry: &Declared) -> Arity {
    if entry.parameter.action.takes_value() {
        Arity::Values(entry.parameter.nargs)
    } else {
        Arity::Flag
    }
}

fn find_long<'a>(entries: &'a [Declared], name: &str) -> Option<&'a Declared> {
    entries.iter().find(|entry| {
        entry.flags.as_ref().is_some_and(|flags| {
            flags.long.as_deref() == Some(name) || flags.long_aliases.iter().any(|a| a == name)
        })
    })
}

fn find_short(entries: &[Declared], short: char) -> Option<&Declared> {
    entries.iter().find(|entry| {
        entry.flags.as_ref().is_some_and(|flags| {
            flags.short == Some(short) || flags.short_aliases.contains(&short)
        })
    })
}

/// Whether `text` reads as a negative number such as `-5` or `-0.5`.
fn is_negative_number(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
        && text.parse::<f64>().is_ok()
}

fn is_flag(arg: &OsString) -> bool {
    arg.to_str().is_some_and(|text| {
        text.len() > 1 && text.starts_with('-') && !is_negative_number(text)
    })
}

/// Move the values following a recognised flag from `rest` into `kept`.
fn take_values<I>(nargs: Nargs, rest: &mut std::iter::Peekable<I>, kept: &mut Vec<OsString>)
where
    I: Iterator<Item = OsString>,
{
    let limit = match nargs {
        Nargs::One => Some(1),
        Nargs::Exactly(count) => Some(count),
        Nargs::ZeroOrMore | Nargs::OneOrMore => None,
    };
    let mut taken = 0_usize;
    while limit.is_none_or(|max| taken < max) {
        match rest.next_if(|next| !is_flag(next)) {
            Some(value) => kept.push(value),
            None => break,
        }
        taken += 1;
    }
}

/// Keep the program name, recognised flags with their values and bare
/// positional values; drop everything else.
pub(super) fn retain_known(args: Vec<OsString>, entries: &[Declared]) -> Vec<OsString> {
    let mut rest = args.into_iter().peekable();
    let mut kept: Vec<OsString> = rest.next().into_iter().collect();

    while let Some(arg) = rest.next() {
        let Some(text) = arg.to_str().map(str::to_owned) else {
            kept.push(arg);
            continue;
        };
        if text == "--" {
            kept.push(arg);
            kept.extend(rest.by_ref());
            break;
        }
        if text == "-h" || text == "--help" {
            continue;
        }
        if is_negative_number(&text) {
            kept.push(arg);
            continue;
        }
        let (entry, inline_value) = if let Some(long) = text.strip_prefix("--") {
            let (name, value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            (find_long(entries, name), value)
        } else if let Some(short) = text.strip_prefix('-').filter(|s| !s.is_empty()) {
            let mut chars = short.chars();
            let first = chars.next();
            (
                first.and_then(|c| find_short(entries, c)),
                chars.next().is_some(),
            )
        } else {
            kept.push(arg);
            continue;
        };

        let Some(entry) = entry else {
            continue;
        };
        kept.push(arg);
        if let Arity::Values(nargs) = arity(entry)
            && !inline_value
        {
            take_values(nargs, &mut rest, &mut kept);
        }
    }
    kept
}
