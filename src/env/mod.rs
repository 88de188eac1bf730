use std::collections::HashMap;

pub type EnvMap = HashMap<String, String>;

#[cfg(feature = "cli")]
mod loader;
mod placeholders;

#[cfg(feature = "cli")]
pub use loader::load_env_file;
pub use placeholders::{expand_in_place, expand_placeholders};
