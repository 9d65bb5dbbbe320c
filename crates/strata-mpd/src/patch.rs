//! Switching an attribute parser from strict to lenient coercion.
//!
//! Two states, `Unpatched` → `Patched`, one transition. [`CoercionPatch`]
//! keeps that state for a caller-owned target; [`activate`] does the same
//! for the process-wide parser returned by [`global_parser`]. Neither ever
//! fails outward: an unavailable or refusing target is logged at warn level
//! and left as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::config::CoercionConfig;
use crate::error::{CoerceError, PatchError};
use crate::node::AttributeSource;
use crate::parser::AttrParser;
use crate::strategy::{CoercionStrategy, LenientCoercion};
use crate::value::{AttrValue, TypeDescriptor};

/// Something whose attribute conversion can be replaced.
pub trait PatchTarget {
    fn target_name(&self) -> &str;

    fn install(&self, strategy: Box<dyn CoercionStrategy>) -> Result<(), PatchError>;
}

impl<T: PatchTarget + ?Sized> PatchTarget for &T {
    fn target_name(&self) -> &str {
        (**self).target_name()
    }

    fn install(&self, strategy: Box<dyn CoercionStrategy>) -> Result<(), PatchError> {
        (**self).install(strategy)
    }
}

impl<T: PatchTarget + ?Sized> PatchTarget for Arc<T> {
    fn target_name(&self) -> &str {
        (**self).target_name()
    }

    fn install(&self, strategy: Box<dyn CoercionStrategy>) -> Result<(), PatchError> {
        (**self).install(strategy)
    }
}

/// A target that may not be present; `None` is unavailable.
impl<T: PatchTarget> PatchTarget for Option<T> {
    fn target_name(&self) -> &str {
        match self {
            Some(target) => target.target_name(),
            None => "attr_parser",
        }
    }

    fn install(&self, strategy: Box<dyn CoercionStrategy>) -> Result<(), PatchError> {
        match self {
            Some(target) => target.install(strategy),
            None => Err(PatchError::Unavailable {
                target: self.target_name().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchState {
    #[default]
    Unpatched,
    Patched,
}

/// Install `strategy` into `target`, logging the outcome. Returns success.
fn apply<T: PatchTarget + ?Sized>(target: &T, strategy: Box<dyn CoercionStrategy>) -> bool {
    let strategy_name = strategy.name().to_string();
    match target.install(strategy) {
        Ok(()) => {
            debug!(
                target_name = target.target_name(),
                strategy = %strategy_name,
                "mpd coercion patch applied"
            );
            true
        }
        Err(PatchError::Unavailable { target }) => {
            warn!("Could not locate {}, mpd coercion patch not applied", target);
            false
        }
        Err(e) => {
            warn!("Failed to apply mpd coercion patch: {}", e);
            false
        }
    }
}

// ── Caller-owned patch ──────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CoercionPatch {
    state: PatchState,
    config: CoercionConfig,
}

impl CoercionPatch {
    pub fn new(config: CoercionConfig) -> Self {
        Self {
            state: PatchState::Unpatched,
            config,
        }
    }

    pub fn state(&self) -> PatchState {
        self.state
    }

    pub fn is_patched(&self) -> bool {
        self.state == PatchState::Patched
    }

    /// Install the configured strategy into `target`, once.
    ///
    /// After the first success every further call is a no-op, whatever
    /// target it is given.
    pub fn activate<T: PatchTarget + ?Sized>(&mut self, target: &T) -> PatchState {
        if self.is_patched() {
            return self.state;
        }
        if apply(target, self.config.build_strategy()) {
            self.state = PatchState::Patched;
        }
        self.state
    }
}

// ── Process-wide patch ──────────────────────────────────────────────

static PATCHED: AtomicBool = AtomicBool::new(false);
static GLOBAL_PARSER: OnceLock<AttrParser> = OnceLock::new();

/// The shared parser. Strict until [`activate`] succeeds.
pub fn global_parser() -> &'static AttrParser {
    GLOBAL_PARSER.get_or_init(|| AttrParser::native().labeled("global_attr_parser"))
}

/// Make the shared parser lenient. Idempotent.
///
/// Meant to be called once during startup, before manifests are read
/// concurrently; the flag check is not a compare-and-swap.
pub fn activate() {
    if PATCHED.load(Ordering::Acquire) {
        return;
    }
    if apply(global_parser(), Box::new(LenientCoercion::new())) {
        PATCHED.store(true, Ordering::Release);
    }
}

pub fn is_activated() -> bool {
    PATCHED.load(Ordering::Acquire)
}

/// [`AttrParser::parse_attr_value`] on the shared parser.
pub fn parse_attr_value<N>(
    node: &N,
    attr_name: &str,
    ty: TypeDescriptor,
) -> Result<AttrValue, CoerceError>
where
    N: AttributeSource + ?Sized,
{
    global_parser().parse_attr_value(node, attr_name, ty)
}
