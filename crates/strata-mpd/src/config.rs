use serde::Deserialize;

use crate::error::ConfigError;
use crate::strategy::{CoercionStrategy, DEFAULT_LIST_SEPARATORS, LenientCoercion, StrictCoercion};

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionMode {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoercionConfigInput {
    pub version: u32,
    pub mode: CoercionMode,
    pub log_failures: Option<bool>,
    pub list_separators: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionConfig {
    pub version: u32,
    pub mode: CoercionMode,
    pub log_failures: bool,
    pub list_separators: String,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            mode: CoercionMode::Lenient,
            log_failures: true,
            list_separators: DEFAULT_LIST_SEPARATORS.to_string(),
        }
    }
}

impl CoercionConfigInput {
    pub fn resolve(self) -> Result<CoercionConfig, ConfigError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(version));
        }

        let list_separators = self
            .list_separators
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LIST_SEPARATORS.to_string());

        Ok(CoercionConfig {
            version,
            mode: self.mode,
            log_failures: self.log_failures.unwrap_or(true),
            list_separators,
        })
    }
}

impl CoercionConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(CoercionConfig::default());
        }
        let parsed: CoercionConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }

    /// The strategy this config describes.
    pub fn build_strategy(&self) -> Box<dyn CoercionStrategy> {
        match self.mode {
            CoercionMode::Lenient => Box::new(
                LenientCoercion::new()
                    .with_separators(self.list_separators.clone())
                    .log_failures(self.log_failures),
            ),
            CoercionMode::Strict => {
                Box::new(StrictCoercion::with_separators(self.list_separators.clone()))
            }
        }
    }
}
