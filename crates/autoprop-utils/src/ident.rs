use crate::case::upper_char;

/// Returned by [`property_name`] when no character can be uppercased.
pub const NO_UPPERCASABLE_LETTER: &str = "NoLetterCanUppercase";

/// Derive the accessor name for a storage identifier.
///
/// The first lowercase character is uppercased and everything before it is
/// dropped, so `_health` becomes `Health` and `m_speed` becomes `M_speed`.
#[must_use]
pub fn property_name(ident: &str) -> String {
    let Some((idx, ch)) = ident.char_indices().find(|(_, c)| c.is_lowercase()) else {
        return NO_UPPERCASABLE_LETTER.to_string();
    };

    let rest = &ident[idx + ch.len_utf8()..];
    let mut out = String::with_capacity(rest.len() + ch.len_utf8());
    out.push(upper_char(ch));
    out.push_str(rest);

    out
}
