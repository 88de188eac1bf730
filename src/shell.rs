use std::borrow::Cow;

const RESERVED: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '#', '&', '*', '(', ')', '[', ']', '{', '}',
    '|', ';', '<', '>', '?',
];

/// Turns `value` into a single POSIX shell word that evaluates back to it.
///
/// Strings without reserved characters pass through untouched; everything
/// else is single-quoted, with embedded quotes rewritten as `'"'"'`.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(RESERVED) {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    quoted.push_str(&value.replace('\'', "'\"'\"'"));
    quoted.push('\'');
    Cow::Owned(quoted)
}
