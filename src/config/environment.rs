use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::env::{load_env_file, EnvMap};

use super::loader::{CurlsmithConfig, CurlsmithProfileConfig, LoadedConfig};

fn resolve_relative(base: &Path, value: &str) -> PathBuf {
    let candidate = Path::new(value);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}

/// Everything a request run needs from configuration, with paths resolved.
#[derive(Debug, Clone)]
pub struct EnvironmentContext {
    pub base_dir: PathBuf,
    pub config_dir: PathBuf,
    pub profile_name: Option<String>,
    /// Config variables, root first and the profile on top.
    pub variables: EnvMap,
    /// `variables` plus every loaded env file; placeholders expand from here.
    pub env: EnvMap,
    pub env_files: Vec<PathBuf>,
    pub default_headers: BTreeMap<String, String>,
    pub curl_binary: String,
    pub shell: String,
    pub history_file: PathBuf,
    pub max_history_items: usize,
}

#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    base_dir: PathBuf,
    config: Option<LoadedConfig>,
    requested_profile: Option<String>,
    explicit_env: Option<PathBuf>,
}

impl EnvironmentBuilder {
    pub fn new(
        base_dir: PathBuf,
        config: Option<LoadedConfig>,
        requested_profile: Option<String>,
        explicit_env: Option<PathBuf>,
    ) -> Self {
        Self {
            base_dir,
            config,
            requested_profile,
            explicit_env,
        }
    }

    pub fn build(&self) -> Result<EnvironmentContext> {
        let defaults = CurlsmithConfig::default();
        let (config, config_dir) = match &self.config {
            Some(loaded) => (&loaded.config, loaded.dir.clone()),
            None => (&defaults, self.base_dir.clone()),
        };

        let profile = resolve_profile(config, self.requested_profile.as_deref())?;
        let profile_name = profile.map(|(name, _)| name.to_string());
        let profile = profile.map(|(_, profile)| profile);

        let mut variables = config.variables.clone();
        let mut default_headers = config.default_headers.clone();
        if let Some(profile) = profile {
            variables.extend(profile.variables.clone());
            default_headers.extend(profile.default_headers.clone());
        }

        let mut env = variables.clone();
        let mut env_files = Vec::new();
        let env_paths = config
            .env
            .iter()
            .chain(profile.and_then(|profile| profile.env.as_ref()))
            .map(|value| resolve_relative(&config_dir, value))
            .chain(self.explicit_env.iter().map(|path| self.base_dir.join(path)));
        for path in env_paths {
            env_files.push(load_env_file(&path, &mut env)?);
        }

        if let Some(name) = &profile_name {
            info!(profile = %name, env_files = env_files.len(), "resolved profile");
        } else {
            debug!(env_files = env_files.len(), "no profile selected");
        }

        Ok(EnvironmentContext {
            base_dir: self.base_dir.clone(),
            history_file: resolve_relative(&config_dir, &config.history_file),
            config_dir,
            profile_name,
            variables,
            env,
            env_files,
            default_headers,
            curl_binary: config.curl_binary.clone(),
            shell: config.shell.clone(),
            max_history_items: config.max_history_items,
        })
    }
}

/// Explicit name, then `defaultProfile`, then no profile at all.
fn resolve_profile<'a>(
    config: &'a CurlsmithConfig,
    requested: Option<&'a str>,
) -> Result<Option<(&'a str, &'a CurlsmithProfileConfig)>> {
    if let Some(name) = requested {
        return match config.profiles.get(name) {
            Some(profile) => Ok(Some((name, profile))),
            None => bail!("Unknown profile: {name}"),
        };
    }

    match config.default_profile.as_deref() {
        Some(name) => match config.profiles.get(name) {
            Some(profile) => Ok(Some((name, profile))),
            None => bail!("Default profile {name} is not defined"),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_file(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    const CONFIG: &str = r#"{
  "variables": {"HOST": "api.example.com", "VERSION": "v1"},
  "env": "base.env",
  "defaultHeaders": {"Accept": "application/json", "X-Client": "curlsmith"},
  "historyFile": "state/history.json",
  "profiles": {
    "dev": {"variables": {"HOST": "localhost:8080"}},
    "staging": {
      "env": "staging.env",
      "variables": {"HOST": "staging.example.com"},
      "defaultHeaders": {"X-Client": "curlsmith-staging"}
    }
  },
  "defaultProfile": "dev"
}"#;

    #[test]
    fn explicit_profile_and_env_layer_on_top() -> Result<()> {
        let temp = tempdir()?;
        let base_dir = temp.path().join("workspace");
        let config_dir = temp.path().join("config");
        std::fs::create_dir_all(&base_dir)?;

        write_file(&config_dir.join("curlsmith.json"), CONFIG);
        write_file(&config_dir.join("base.env"), "TOKEN=base\nREGION=eu\n");
        write_file(&config_dir.join("staging.env"), "TOKEN=staging\n");
        write_file(&base_dir.join("override.env"), "TOKEN=override\n");

        let loaded = load_config(&config_dir)?;
        let environment = EnvironmentBuilder::new(
            base_dir.clone(),
            loaded,
            Some("staging".to_string()),
            Some(base_dir.join("override.env")),
        )
        .build()?;

        assert_eq!(environment.profile_name.as_deref(), Some("staging"));
        assert_eq!(environment.variables["HOST"], "staging.example.com");
        assert_eq!(environment.variables["VERSION"], "v1");
        assert_eq!(environment.env["TOKEN"], "override");
        assert_eq!(environment.env["REGION"], "eu");
        assert_eq!(environment.env["HOST"], "staging.example.com");
        assert_eq!(
            environment.env_files,
            vec![
                config_dir.join("base.env"),
                config_dir.join("staging.env"),
                base_dir.join("override.env"),
            ]
        );
        assert_eq!(environment.default_headers["X-Client"], "curlsmith-staging");
        assert_eq!(environment.default_headers["Accept"], "application/json");
        assert_eq!(environment.history_file, config_dir.join("state/history.json"));
        Ok(())
    }

    #[test]
    fn default_profile_applies_without_a_request() -> Result<()> {
        let temp = tempdir()?;
        write_file(&temp.path().join("curlsmith.json"), CONFIG);
        write_file(&temp.path().join("base.env"), "TOKEN=base\n");

        let loaded = load_config(temp.path())?;
        let environment =
            EnvironmentBuilder::new(temp.path().to_path_buf(), loaded, None, None).build()?;

        assert_eq!(environment.profile_name.as_deref(), Some("dev"));
        assert_eq!(environment.env["HOST"], "localhost:8080");
        Ok(())
    }

    #[test]
    fn unknown_profile_is_an_error() -> Result<()> {
        let temp = tempdir()?;
        write_file(&temp.path().join("curlsmith.json"), CONFIG);
        write_file(&temp.path().join("base.env"), "");

        let loaded = load_config(temp.path())?;
        let err = EnvironmentBuilder::new(
            temp.path().to_path_buf(),
            loaded,
            Some("prod".to_string()),
            None,
        )
        .build()
        .unwrap_err();
        assert!(err.to_string().contains("Unknown profile: prod"));
        Ok(())
    }

    #[test]
    fn works_without_config() -> Result<()> {
        let temp = tempdir()?;
        let env_path = temp.path().join("local.env");
        write_file(&env_path, "FOO=bar\n");

        let environment = EnvironmentBuilder::new(
            temp.path().to_path_buf(),
            None,
            None,
            Some(PathBuf::from("local.env")),
        )
        .build()?;

        assert!(environment.profile_name.is_none());
        assert!(environment.variables.is_empty());
        assert_eq!(environment.env["FOO"], "bar");
        assert_eq!(environment.env_files, vec![env_path]);
        assert_eq!(environment.curl_binary, "curl");
        assert_eq!(environment.shell, "sh");
        assert_eq!(environment.max_history_items, 100);
        assert_eq!(
            environment.history_file,
            temp.path().join(".curlsmith/history.json")
        );
        Ok(())
    }
}
