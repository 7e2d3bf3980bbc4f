use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pipeline::stages::ExclusionRules;

/// Config file name searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".nativegen.toml";

pub const DEFAULT_SCHEMA_PATH: &str = "lib/torch/native/native_functions.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "ext/torch";

/// Root configuration structure for nativegen
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Schema file to read
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Directory the generated files are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Extra function names whose bindings are written by hand
    #[serde(default)]
    pub skip_bindings: Vec<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub schema_path: PathBuf,
    pub output_dir: PathBuf,
    pub skip_bindings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        GeneratorConfig::default().resolve(None, None)
    }
}

impl GeneratorConfig {
    /// Apply command-line overrides and fill in defaults.
    pub fn resolve(self, schema_path: Option<PathBuf>, output_dir: Option<PathBuf>) -> Settings {
        Settings {
            schema_path: schema_path
                .or(self.schema_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH)),
            output_dir: output_dir
                .or(self.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            skip_bindings: self.skip_bindings,
        }
    }
}

impl Settings {
    pub fn exclusion_rules(&self) -> ExclusionRules {
        ExclusionRules::default().with_skip_bindings(self.skip_bindings.iter().cloned())
    }
}
