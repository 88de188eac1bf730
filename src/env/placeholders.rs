use anyhow::{anyhow, bail, Result};

use crate::env::EnvMap;

/// Replaces `{NAME}` with its value from `env`, falling back to the process
/// environment.
///
/// A `{` not followed by a letter or underscore is literal, so JSON bodies
/// pass through untouched. `\{` and `\}` produce literal braces.
pub fn expand_placeholders(input: &str, env: &EnvMap) -> Result<String> {
    if !input.contains('{') && !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(index) = rest.find(['\\', '{']) {
        output.push_str(&rest[..index]);
        let tail = &rest[index..];
        let mut chars = tail.chars();

        match (chars.next(), chars.next()) {
            (Some('\\'), Some(brace @ ('{' | '}'))) => {
                output.push(brace);
                rest = &tail[2..];
            }
            (Some('\\'), Some(other)) => {
                output.push('\\');
                output.push(other);
                rest = &tail[1 + other.len_utf8()..];
            }
            (Some('{'), Some(first)) if starts_name(first) => {
                let body = &tail[1..];
                let (name, consumed) = match body.find('}') {
                    Some(end) => (&body[..end], end + 2),
                    None => (body, tail.len()),
                };
                if !is_valid_name(name) {
                    bail!("Invalid template variable: {name}");
                }
                output.push_str(&lookup(name, env)?);
                rest = &tail[consumed..];
            }
            (Some(ch), _) => {
                output.push(ch);
                rest = &tail[ch.len_utf8()..];
            }
            (None, _) => break,
        }
    }
    output.push_str(rest);

    Ok(output)
}

/// Expands `value` and writes the result back.
pub fn expand_in_place(value: &mut String, env: &EnvMap) -> Result<()> {
    let expanded = expand_placeholders(value, env)?;
    *value = expanded;
    Ok(())
}

fn lookup(name: &str, env: &EnvMap) -> Result<String> {
    env.get(name)
        .cloned()
        .or_else(|| std::env::var(name).ok())
        .ok_or_else(|| anyhow!("Missing template variable: {name}"))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(starts_name)
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-'))
}

fn starts_name(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
