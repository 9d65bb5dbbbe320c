//! The attribute-parsing adapter callers thread through manifest code.
//!
//! `AttrParser` owns the conversion strategy instead of relying on a global
//! hook. It starts out with whatever strategy it was built with and can be
//! switched (for example by [`crate::patch::CoercionPatch`]) through a shared
//! reference, since the strategy sits behind an [`ArcSwap`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::{CoerceError, PatchError};
use crate::node::{AttributeSource, XmlElement};
use crate::patch::PatchTarget;
use crate::schema;
use crate::strategy::{CoercionStrategy, LenientCoercion, StrictCoercion};
use crate::value::{AttrValue, TypeDescriptor};

pub struct AttrParser {
    label: String,
    strategy: ArcSwap<Box<dyn CoercionStrategy>>,
    pinned: bool,
}

impl AttrParser {
    /// Parser with the native strict behavior.
    pub fn native() -> Self {
        Self::with_strategy(StrictCoercion::new())
    }

    pub fn lenient() -> Self {
        Self::with_strategy(LenientCoercion::new())
    }

    pub fn with_strategy(strategy: impl CoercionStrategy + 'static) -> Self {
        Self::from_boxed(Box::new(strategy))
    }

    pub fn from_boxed(strategy: Box<dyn CoercionStrategy>) -> Self {
        Self {
            label: "attr_parser".to_string(),
            strategy: ArcSwap::from_pointee(strategy),
            pinned: false,
        }
    }

    /// A parser whose strategy can never be replaced.
    pub fn pinned(strategy: impl CoercionStrategy + 'static) -> Self {
        Self {
            pinned: true,
            ..Self::with_strategy(strategy)
        }
    }

    /// Name reported in patch logs and errors.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn strategy_name(&self) -> String {
        self.strategy.load().name().to_string()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Read `attr_name` from `node` as `ty`.
    ///
    /// An absent attribute is `Null` whatever the strategy; everything else
    /// is up to the active strategy.
    pub fn parse_attr_value<N>(
        &self,
        node: &N,
        attr_name: &str,
        ty: TypeDescriptor,
    ) -> Result<AttrValue, CoerceError>
    where
        N: AttributeSource + ?Sized,
    {
        let Some(raw) = node.attribute(attr_name) else {
            return Ok(AttrValue::Null);
        };
        self.strategy.load().coerce(attr_name, raw, ty)
    }

    /// Coerce every attribute of `element` using its declared MPD types.
    ///
    /// Attributes without a declared type come back as text.
    pub fn coerce_element(
        &self,
        element: &XmlElement,
    ) -> Result<BTreeMap<String, AttrValue>, CoerceError> {
        element
            .attributes()
            .map(|(name, _)| -> Result<(String, AttrValue), CoerceError> {
                let ty = schema::type_of(element.name(), name);
                Ok((name.to_string(), self.parse_attr_value(element, name, ty)?))
            })
            .collect()
    }

    fn replace_strategy(&self, strategy: Box<dyn CoercionStrategy>) {
        self.strategy.store(Arc::new(strategy));
    }
}

impl Default for AttrParser {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Debug for AttrParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrParser")
            .field("label", &self.label)
            .field("strategy", &self.strategy_name())
            .field("pinned", &self.pinned)
            .finish()
    }
}

impl PatchTarget for AttrParser {
    fn target_name(&self) -> &str {
        &self.label
    }

    fn install(&self, strategy: Box<dyn CoercionStrategy>) -> Result<(), PatchError> {
        if self.pinned {
            return Err(PatchError::Rejected {
                target: self.label.clone(),
                reason: format!("strategy is pinned to '{}'", self.strategy_name()),
            });
        }
        self.replace_strategy(strategy);
        Ok(())
    }
}
