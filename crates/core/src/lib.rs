//! formbound-core: Control adapter contract for host-bound form controls.
//!
//! This crate contains the fundamental `Control` trait, the lifecycle state
//! machine, the host-agnostic surface model, and the global control
//! registry.

mod control;
mod registry;
mod surface;

pub use control::{
    BoxedControl, Control, ControlMetadata, ControlState, LifecycleError, OutputNotifier,
    SessionState,
};
pub use registry::{with_registry, with_registry_mut, ControlFactory, Registry};
pub use surface::{Element, HandlerId, InputEvent};

// Re-export types used in trait signatures for convenience
pub use formbound_types::{Context, Outputs, Property, PropertyValue};
