use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::{command::DEFAULT_BINARY, executor::DEFAULT_SHELL};

pub const CONFIG_FILE_NAME: &str = "curlsmith.json";
pub const DEFAULT_HISTORY_FILE: &str = ".curlsmith/history.json";
pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 100;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CurlsmithProfileConfig {
    pub env: Option<String>,
    pub variables: HashMap<String, String>,
    #[serde(rename = "defaultHeaders")]
    pub default_headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurlsmithConfig {
    #[serde(rename = "curlBinary")]
    pub curl_binary: String,
    pub shell: String,
    #[serde(rename = "historyFile")]
    pub history_file: String,
    #[serde(rename = "maxHistoryItems")]
    pub max_history_items: usize,
    pub variables: HashMap<String, String>,
    pub env: Option<String>,
    #[serde(rename = "defaultHeaders")]
    pub default_headers: BTreeMap<String, String>,
    #[serde(rename = "defaultProfile")]
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, CurlsmithProfileConfig>,
}

impl Default for CurlsmithConfig {
    fn default() -> Self {
        Self {
            curl_binary: DEFAULT_BINARY.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            variables: HashMap::new(),
            env: None,
            default_headers: BTreeMap::new(),
            default_profile: None,
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CurlsmithConfig,
    pub path: PathBuf,
    pub dir: PathBuf,
}

/// Loads `curlsmith.json` from `target`, which may be the file itself or the
/// directory holding it. A missing file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()
            .context("resolving current directory")?
            .join(target)
    };

    let (file_path, dir) = if resolved.is_dir() {
        (resolved.join(CONFIG_FILE_NAME), resolved)
    } else {
        let dir = match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            None => std::env::current_dir().context("resolving current directory")?,
        };
        (resolved, dir)
    };

    if !file_path.exists() {
        debug!(path = %file_path.display(), "no config file");
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: CurlsmithConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    debug!(path = %file_path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(Some(LoadedConfig {
        config,
        path: file_path,
        dir,
    }))
}
