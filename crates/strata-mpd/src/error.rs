use thiserror::Error;

use crate::value::TypeDescriptor;

// ── Errors ──────────────────────────────────────────────────────────

/// Raised by the strict strategy when a raw value does not fit its type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("invalid value for attribute '{attr}': '{value}' is not {expected}")]
    InvalidValue {
        attr: String,
        value: String,
        expected: TypeDescriptor,
    },
}

/// Why a coercion strategy could not be installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The conversion hook to replace does not exist.
    #[error("patch target '{target}' is unavailable")]
    Unavailable { target: String },

    #[error("patch target '{target}' rejected the strategy: {reason}")]
    Rejected { target: String, reason: String },
}

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
}
