use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Switches for the value renderer. Every field has a default, so an empty
/// document (or `RenderConfig::default()`) gives the standard behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub version: u32,

    /// Explain failed string comparisons with an edit distance and alignment.
    pub string_diff: bool,

    /// Skip the string diff when either operand is longer than this many chars.
    /// The edit path is quadratic in the operand lengths.
    pub max_diff_chars: Option<usize>,

    /// Append type names when both operands of a failed comparison print the same.
    pub type_hints: bool,

    /// Hide enum constants whose rendering repeats the source text.
    pub suppress_enum_constants: bool,

    /// Treat a panic inside user `Display`/`Debug` code like a render failure.
    ///
    /// The panic hook still runs before the panic is caught, so the default
    /// hook prints the panic message to stderr. Callers that render into a
    /// terminal report should install their own hook with
    /// [`std::panic::set_hook`].
    pub catch_panics: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            string_diff: true,
            max_diff_chars: None,
            type_hints: true,
            suppress_enum_constants: true,
            catch_panics: true,
        }
    }
}

impl RenderConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: RenderConfig = serde_yaml::from_str(raw)?;
        if cfg.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: cfg.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        Ok(cfg)
    }

    /// Whether both operands are short enough for the string diff.
    pub(crate) fn allows_diff_of(&self, left: &str, right: &str) -> bool {
        match self.max_diff_chars {
            Some(limit) => left.chars().count() <= limit && right.chars().count() <= limit,
            None => true,
        }
    }
}

pub fn load_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    RenderConfig::from_yaml_str(&raw)
}
