//! Control trait and related types.

use crate::surface::Element;
use formbound_types::{Context, Outputs};
use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Metadata about a control type.
#[derive(Debug, Clone)]
pub struct ControlMetadata {
    /// Unique identifier for this control type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this control renders
    pub description: String,
    /// Names of the output fields this control produces
    pub output_keys: Vec<String>,
}

/// Callback handed to a control at init; invoking it tells the host that
/// new outputs are ready to be read.
#[derive(Clone)]
pub struct OutputNotifier {
    callback: Rc<dyn Fn()>,
}

impl OutputNotifier {
    pub fn new<F: Fn() + 'static>(callback: F) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Notifier that discards notifications. Handy in tests.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn notify(&self) {
        (self.callback)();
    }
}

impl std::fmt::Debug for OutputNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputNotifier")
    }
}

/// Session-scoped state the host may carry for a control instance.
pub type SessionState = HashMap<String, Value>;

/// Lifecycle phase of a control instance.
///
/// `Uninitialized -> Ready` after init, `-> Disposed` after destroy;
/// `Ready` self-loops on updates, edits, and output reads, and nothing
/// leaves `Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Uninitialized,
    Ready,
    Disposed,
}

/// Lifecycle calls made out of order, reported by the host driver.
#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("control was already initialized")]
    AlreadyInitialized,
    #[error("control is not initialized")]
    NotInitialized,
    #[error("control was disposed")]
    Disposed,
}

/// Trait for all controls.
///
/// A control mediates between the host runtime's property-bag model and one
/// rendering surface. The host fixes the call order: exactly one `init`,
/// any number of `update_view`/`get_outputs` calls while ready, then one or
/// more `destroy` calls. Controls run on the host's single-threaded event
/// loop and are deliberately not `Send`.
pub trait Control {
    /// Get metadata about this control type.
    fn metadata(&self) -> &ControlMetadata;

    /// Build child elements once, wire input listeners, and perform the
    /// first paint from `context`. Malformed configuration degrades to a
    /// safe rendered state; it never fails the control.
    fn init(
        &mut self,
        context: &Context,
        notifier: OutputNotifier,
        state: &SessionState,
        container: &Element,
    );

    /// Idempotent full repaint from the latest property bag. Any field may
    /// be absent; absent fields fall back to documented defaults.
    fn update_view(&mut self, context: &Context);

    /// Pure read of the current bound value(s); called by the host at its
    /// own cadence, potentially more often than edits occur.
    fn get_outputs(&self) -> Outputs;

    /// Disconnect every listener registered during init. Safe to call even
    /// if init never ran or partially failed.
    fn destroy(&mut self);
}

/// Type-erased control for dynamic dispatch.
pub type BoxedControl = Box<dyn Control>;
