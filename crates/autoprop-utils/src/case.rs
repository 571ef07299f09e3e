use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// NamingConvention
///
/// Key-name convention applied to member identifiers.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum NamingConvention {
    #[default]
    LowerCamel,
    UpperCamel,
    Snake,
    Kebab,
}

impl NamingConvention {
    pub const ALL: [Self; 4] = [Self::LowerCamel, Self::UpperCamel, Self::Snake, Self::Kebab];

    #[must_use]
    pub const fn separator(self) -> Option<char> {
        match self {
            Self::Snake => Some('_'),
            Self::Kebab => Some('-'),
            Self::LowerCamel | Self::UpperCamel => None,
        }
    }
}

/// Convert an identifier into the given naming convention.
#[must_use]
pub fn mutate(s: &str, convention: NamingConvention) -> String {
    match (convention, convention.separator()) {
        (_, Some(separator)) => to_separated(s, separator),
        (NamingConvention::LowerCamel, None) => to_lower_camel(s),
        _ => s.to_string(),
    }
}

/// Lowercase exactly the first character.
#[must_use]
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_lowercase() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    out.push(lower_char(first));
    out.extend(chars);

    out
}

/// Lowercase every uppercase letter, inserting `separator` at word starts.
///
/// Only letters with a lowercase mapping count as uppercase, so the output
/// is stable under a second pass. A run of uppercase letters is one word (`WriteIO` -> `write_io`), except
/// that its last letter opens a new word when a lowercase letter follows
/// (`HTTPServer` -> `http_server`).
#[must_use]
pub fn to_separated(s: &str, separator: char) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() * 2);

    for (i, &ch) in chars.iter().enumerate() {
        if !has_lower(ch) {
            out.push(ch);
            continue;
        }

        let prev_upper = i > 0 && has_lower(chars[i - 1]);
        let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
        if i > 0 && (!prev_upper || next_lower) {
            out.push(separator);
        }
        out.push(lower_char(ch));
    }

    out
}

// lowercase expansions keep their base letter (U+0130 -> 'i')
pub(crate) fn lower_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn has_lower(ch: char) -> bool {
    ch.is_uppercase() && lower_char(ch) != ch
}

// uppercase expansions keep the original char ('ß' stays 'ß')
pub(crate) fn upper_char(ch: char) -> char {
    single(ch.to_uppercase()).unwrap_or(ch)
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

///
/// TESTS
///
