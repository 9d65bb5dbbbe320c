//! Conversion strategies: raw attribute string + declared type → value.
//!
//! [`StrictCoercion`] is the native behavior: a value that does not fit its
//! declared type is an error, which aborts whatever manifest walk is in
//! progress. [`LenientCoercion`] never fails: scalars that do not convert
//! become [`AttrValue::Null`], and a list with any bad fragment is returned
//! as text fragments.

use std::fmt;

use tracing::debug;

use crate::error::CoerceError;
use crate::value::{AttrValue, ScalarType, TypeDescriptor};

/// Characters a list attribute is split on by default.
pub const DEFAULT_LIST_SEPARATORS: &str = ", ";

/// Converts one raw attribute value into its declared type.
pub trait CoercionStrategy: fmt::Debug + Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &str;

    fn coerce(
        &self,
        attr_name: &str,
        raw: &str,
        ty: TypeDescriptor,
    ) -> Result<AttrValue, CoerceError>;
}

// ── Scalar conversion ───────────────────────────────────────────────

/// Convert `raw` to `ty`, or `None` when it does not fit.
///
/// Integers and floats tolerate surrounding whitespace and a leading sign.
/// Booleans follow XML Schema (`true`, `false`, `1`, `0`); unlike the
/// manifest library's native `bool(raw)`, any other text does not convert.
pub fn convert_scalar(raw: &str, ty: ScalarType) -> Option<AttrValue> {
    match ty {
        ScalarType::Int => safe_int(raw).map(AttrValue::Int),
        ScalarType::Float => raw.trim().parse::<f64>().ok().map(AttrValue::Float),
        ScalarType::Bool => match raw.trim() {
            "true" | "1" => Some(AttrValue::Bool(true)),
            "false" | "0" => Some(AttrValue::Bool(false)),
            _ => None,
        },
        ScalarType::Text => Some(AttrValue::Text(raw.to_string())),
    }
}

/// Parse a decimal integer, `None` on anything else.
///
/// Covers the full `xs:long` and `xs:unsignedLong` ranges.
pub fn safe_int(raw: &str) -> Option<i128> {
    raw.trim().parse::<i128>().ok()
}

/// Split a list attribute on every separator character.
///
/// Adjacent separators yield empty fragments (`"1, 2"` → `["1", "", "2"]`).
pub fn split_list<'a>(raw: &'a str, separators: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    raw.split(move |c: char| separators.contains(c))
}

// ── Strict ──────────────────────────────────────────────────────────

/// Native conversion: any value that does not fit is an error.
#[derive(Debug, Clone)]
pub struct StrictCoercion {
    separators: String,
}

impl StrictCoercion {
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_LIST_SEPARATORS)
    }

    pub fn with_separators(separators: impl Into<String>) -> Self {
        Self {
            separators: separators.into(),
        }
    }
}

impl Default for StrictCoercion {
    fn default() -> Self {
        Self::new()
    }
}

impl CoercionStrategy for StrictCoercion {
    fn name(&self) -> &str {
        "strict"
    }

    fn coerce(
        &self,
        attr_name: &str,
        raw: &str,
        ty: TypeDescriptor,
    ) -> Result<AttrValue, CoerceError> {
        let invalid = |value: &str| CoerceError::InvalidValue {
            attr: attr_name.to_string(),
            value: value.to_string(),
            expected: ty,
        };

        match ty {
            TypeDescriptor::List(elem) => split_list(raw, &self.separators)
                .map(|frag| convert_scalar(frag, elem).ok_or_else(|| invalid(frag)))
                .collect::<Result<Vec<_>, _>>()
                .map(AttrValue::List),
            TypeDescriptor::Scalar(t) => convert_scalar(raw, t).ok_or_else(|| invalid(raw)),
        }
    }
}

// ── Lenient ─────────────────────────────────────────────────────────

/// Conversion that degrades instead of failing.
#[derive(Debug, Clone)]
pub struct LenientCoercion {
    separators: String,
    log_failures: bool,
}

impl LenientCoercion {
    pub fn new() -> Self {
        Self {
            separators: DEFAULT_LIST_SEPARATORS.to_string(),
            log_failures: true,
        }
    }

    pub fn with_separators(mut self, separators: impl Into<String>) -> Self {
        self.separators = separators.into();
        self
    }

    /// Turn the per-value debug diagnostics on or off.
    pub fn log_failures(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Every fragment converted, or every fragment as text if any fails.
    fn convert_list(&self, attr_name: &str, raw: &str, elem: ScalarType) -> AttrValue {
        let converted: Option<Vec<AttrValue>> = split_list(raw, &self.separators)
            .map(|frag| convert_scalar(frag, elem))
            .collect();

        match converted {
            Some(items) => AttrValue::List(items),
            None => {
                if self.log_failures {
                    debug!(
                        attr = attr_name,
                        value = raw,
                        expected = %TypeDescriptor::List(elem),
                        "mpd: could not convert list attribute, keeping text fragments"
                    );
                }
                AttrValue::List(
                    split_list(raw, &self.separators)
                        .map(|frag| AttrValue::Text(frag.to_string()))
                        .collect(),
                )
            }
        }
    }

    fn convert_single(&self, attr_name: &str, raw: &str, ty: ScalarType) -> AttrValue {
        match convert_scalar(raw, ty) {
            Some(value) => value,
            None => {
                if self.log_failures {
                    debug!(
                        attr = attr_name,
                        value = raw,
                        expected = %ty,
                        "mpd: could not convert attribute, using null"
                    );
                }
                AttrValue::Null
            }
        }
    }
}

impl Default for LenientCoercion {
    fn default() -> Self {
        Self::new()
    }
}

impl CoercionStrategy for LenientCoercion {
    fn name(&self) -> &str {
        "lenient"
    }

    fn coerce(
        &self,
        attr_name: &str,
        raw: &str,
        ty: TypeDescriptor,
    ) -> Result<AttrValue, CoerceError> {
        Ok(match ty {
            TypeDescriptor::List(elem) => self.convert_list(attr_name, raw, elem),
            TypeDescriptor::Scalar(t) => self.convert_single(attr_name, raw, t),
        })
    }
}
