//! formbound: Host-bound form control adapters.
//!
//! This library provides:
//! - The `Control` adapter contract every widget implements
//! - A host-agnostic element surface model
//! - Built-in controls (autocomplete, color picker, meter, month picker,
//!   custom function)
//! - A `ControlHost` driver that enforces the lifecycle state machine

pub mod host;

// Re-export commonly used types
pub use formbound_controls::register_all;
pub use formbound_core::{
    with_registry, BoxedControl, Context, Control, ControlMetadata, ControlState, Element,
    LifecycleError, OutputNotifier, Outputs, Property, PropertyValue,
};
pub use host::ControlHost;
