//! # strata-mpd
//!
//! Lenient attribute coercion for MPEG-DASH manifests.
//!
//! Some origins publish MPDs whose AdaptationSet `id`/`group` are strings
//! such as `"main"`, where the schema says integer. A strict reader fails the
//! whole manifest on that. This crate reads attributes through an
//! [`AttrParser`] whose conversion strategy is injected: strict by default,
//! lenient once patched, in which case bad values turn into `Null` (or text
//! fragments for lists) and a debug log line.
//!
//! ## Crate structure
//!
//! - [`value`] — Type descriptors and coerced values
//! - [`node`] — `AttributeSource` trait, `XmlElement`, element extraction
//! - [`strategy`] — Strict and lenient conversion strategies
//! - [`parser`] — `AttrParser` adapter
//! - [`patch`] — Idempotent strict → lenient switch, process-wide parser
//! - [`schema`] — Declared MPD attribute types
//! - [`config`] — TOML configuration
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod node;
pub mod parser;
pub mod patch;
pub mod schema;
pub mod strategy;
pub mod value;

pub use config::{CoercionConfig, CoercionMode};
pub use error::{CoerceError, ConfigError, NodeError, PatchError};
pub use node::{AttributeSource, XmlElement, collect_elements};
pub use parser::AttrParser;
pub use patch::{CoercionPatch, PatchState, PatchTarget, activate, global_parser, is_activated};
pub use strategy::{CoercionStrategy, LenientCoercion, StrictCoercion};
pub use value::{AttrValue, ScalarType, TypeDescriptor};
