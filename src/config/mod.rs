mod environment;
mod loader;

pub use environment::{EnvironmentBuilder, EnvironmentContext};
pub use loader::{
    load_config, CurlsmithConfig, CurlsmithProfileConfig, LoadedConfig, CONFIG_FILE_NAME,
    DEFAULT_HISTORY_FILE, DEFAULT_MAX_HISTORY_ITEMS,
};
