use crate::shell::escape;

/// Ordered argument list. Flags are trusted literals; every value that came
/// from the user goes through [`escape`].
#[derive(Debug, Default)]
pub(crate) struct Args {
    tokens: Vec<String>,
}

impl Args {
    pub(crate) fn flag(&mut self, flag: &'static str) {
        self.tokens.push(flag.to_string());
    }

    pub(crate) fn flag_if(&mut self, enabled: bool, flag: &'static str) {
        if enabled {
            self.flag(flag);
        }
    }

    /// Flag followed by a value escaped for the shell.
    pub(crate) fn value(&mut self, flag: &'static str, value: &str) {
        self.flag(flag);
        self.tokens.push(escape(value).into_owned());
    }

    /// Emits the pair only for non-empty values.
    pub(crate) fn value_if_set(&mut self, flag: &'static str, value: &str) {
        if !value.is_empty() {
            self.value(flag, value);
        }
    }

    /// Flag followed by a token the caller already rendered.
    pub(crate) fn literal(&mut self, flag: &'static str, token: impl Into<String>) {
        self.flag(flag);
        self.tokens.push(token.into());
    }

    pub(crate) fn push_escaped(&mut self, value: &str) {
        self.tokens.push(escape(value).into_owned());
    }

    pub(crate) fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}
