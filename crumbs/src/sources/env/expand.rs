//! `$VAR` and `${VAR}` references in environment values.
//!
//! References are replaced with the referenced variable's value in a single
//! pass; references to unset variables are left as written.

use std::borrow::Cow;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expand references in `raw`, looking variables up with `lookup`.
pub(crate) fn expand<'a, 'v, F>(raw: &'a str, lookup: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<&'v str>,
{
    if !raw.contains('$') {
        return Cow::Borrowed(raw);
    }
    let resolve = |name: &str| (!name.is_empty()).then(|| lookup(name)).flatten();

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut name = String::new();
        if chars.next_if_eq(&'{').is_some() {
            let mut closed = false;
            for next in chars.by_ref() {
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }
            match resolve(&name).filter(|_| closed) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("${");
                    out.push_str(&name);
                    if closed {
                        out.push('}');
                    }
                }
            }
        } else {
            while let Some(next) = chars.next_if(|&next| is_name_char(next)) {
                name.push(next);
            }
            match resolve(&name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('$');
                    out.push_str(&name);
                }
            }
        }
    }
    Cow::Owned(out)
}
