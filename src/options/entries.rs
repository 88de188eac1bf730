use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

fn root_path() -> String {
    "/".to_string()
}

/// Header, url-encoded field or `--resolve` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Enabled entries with a non-empty key take part in generation.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

impl Default for KeyValue {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_file: bool,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl FormField {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_file: true,
            file_path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            is_file: false,
            file_path: String::new(),
            content_type: String::new(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "root_path")]
    pub path: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && !self.name.is_empty()
    }
}

impl Default for Cookie {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            domain: String::new(),
            path: root_path(),
            enabled: true,
        }
    }
}
