//! Type descriptors and coerced attribute values.

use serde::Serialize;
use std::fmt;

// ── Type descriptors ────────────────────────────────────────────────

/// Scalar types an MPD attribute can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    Bool,
    Text,
}

impl ScalarType {
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::Text => "str",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of an attribute: a scalar, or a list of one scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Scalar(ScalarType),
    List(ScalarType),
}

impl TypeDescriptor {
    pub const INT: Self = TypeDescriptor::Scalar(ScalarType::Int);
    pub const FLOAT: Self = TypeDescriptor::Scalar(ScalarType::Float);
    pub const BOOL: Self = TypeDescriptor::Scalar(ScalarType::Bool);
    pub const TEXT: Self = TypeDescriptor::Scalar(ScalarType::Text);

    /// The scalar type of the value, or of each list element.
    pub fn element(self) -> ScalarType {
        match self {
            TypeDescriptor::Scalar(t) | TypeDescriptor::List(t) => t,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, TypeDescriptor::List(_))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(t) => write!(f, "{t}"),
            TypeDescriptor::List(t) => write!(f, "[{t}]"),
        }
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// Result of coercing one attribute.
///
/// `Null` stands in for both "attribute absent" and "value could not be
/// converted" on the lenient path. Serializes untagged, so a coerced element
/// renders as plain JSON (`null`, numbers, booleans, strings, arrays).
///
/// `Int` is 128-bit so every `xs:long` and `xs:unsignedLong` value fits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Int(i128),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<AttrValue>),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value has the shape `ty` promises callers.
    ///
    /// `Null` is compatible with every descriptor. A list is compatible with
    /// a list descriptor whether its items were converted or kept as text.
    pub fn conforms_to(&self, ty: TypeDescriptor) -> bool {
        match (self, ty) {
            (AttrValue::Null, _) => true,
            (AttrValue::List(items), TypeDescriptor::List(elem)) => items
                .iter()
                .all(|item| item.matches_scalar(elem) || matches!(item, AttrValue::Text(_))),
            (value, TypeDescriptor::Scalar(t)) => value.matches_scalar(t),
            _ => false,
        }
    }

    fn matches_scalar(&self, ty: ScalarType) -> bool {
        matches!(
            (self, ty),
            (AttrValue::Int(_), ScalarType::Int)
                | (AttrValue::Float(_), ScalarType::Float)
                | (AttrValue::Bool(_), ScalarType::Bool)
                | (AttrValue::Text(_), ScalarType::Text)
        )
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(i128::from(v))
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        AttrValue::Int(i128::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttrValue::Null, Into::into)
    }
}
