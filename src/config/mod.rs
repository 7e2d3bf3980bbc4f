//! Generator configuration.
//!
//! Settings come from an optional `.nativegen.toml` found in the current
//! directory or one of its ancestors, overridden by command-line flags.

mod core;
mod loader;

pub use self::core::{
    GeneratorConfig, Settings, CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_SCHEMA_PATH,
};
pub use self::loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
};
