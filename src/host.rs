//! Host driver for a single control instance.
//!
//! `ControlHost` stands in for the hosting runtime: it owns one control,
//! its container element, and the session state, enforces the lifecycle
//! state machine (`Uninitialized -> Ready -> Disposed`), and tracks the
//! dirty flag the control raises through its notifier.

use anyhow::Result;
use formbound_core::{
    with_registry, BoxedControl, Context, ControlState, Element, LifecycleError, OutputNotifier,
    Outputs, SessionState,
};
use log::{debug, info};
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

pub struct ControlHost {
    instance_id: Uuid,
    control: BoxedControl,
    container: Element,
    session: SessionState,
    state: ControlState,
    dirty: Rc<Cell<bool>>,
}

impl ControlHost {
    pub fn new(control: BoxedControl) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            control,
            container: Element::new("div"),
            session: SessionState::new(),
            state: ControlState::Uninitialized,
            dirty: Rc::new(Cell::new(false)),
        }
    }

    /// Instantiate a control by id from the global registry.
    pub fn from_registry(id: &str) -> Result<Self> {
        let control = with_registry(|registry| registry.create_control(id))?;
        Ok(Self::new(control))
    }

    pub fn control_id(&self) -> String {
        self.control.metadata().id.clone()
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// The container element the control renders into.
    pub fn container(&self) -> &Element {
        &self.container
    }

    fn ensure_ready(&self) -> Result<(), LifecycleError> {
        match self.state {
            ControlState::Ready => Ok(()),
            ControlState::Uninitialized => Err(LifecycleError::NotInitialized),
            ControlState::Disposed => Err(LifecycleError::Disposed),
        }
    }

    /// Exactly one init per instance.
    pub fn init(&mut self, context: &Context) -> Result<(), LifecycleError> {
        match self.state {
            ControlState::Ready => Err(LifecycleError::AlreadyInitialized),
            ControlState::Disposed => Err(LifecycleError::Disposed),
            ControlState::Uninitialized => {
                let dirty = Rc::clone(&self.dirty);
                let notifier = OutputNotifier::new(move || dirty.set(true));
                self.control
                    .init(context, notifier, &self.session, &self.container);
                self.state = ControlState::Ready;
                info!(
                    "control {} [{}] initialized",
                    self.control_id(),
                    self.instance_id
                );
                Ok(())
            }
        }
    }

    pub fn update_view(&mut self, context: &Context) -> Result<(), LifecycleError> {
        self.ensure_ready()?;
        self.control.update_view(context);
        Ok(())
    }

    /// Read the control's outputs; legal at any cadence while ready.
    pub fn outputs(&self) -> Result<Outputs, LifecycleError> {
        self.ensure_ready()?;
        Ok(self.control.get_outputs())
    }

    /// Deliver one simulated user edit to the control's input element.
    /// Returns false when the control renders no editable element.
    pub fn simulate_edit(&self, value: &str) -> Result<bool, LifecycleError> {
        self.ensure_ready()?;
        let target = self
            .container
            .find_by_tag("input")
            .or_else(|| self.container.find_by_tag("meter"));
        match target {
            Some(element) => {
                debug!("control {}: simulated edit {:?}", self.control_id(), value);
                element.emit_input(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether the control has raised its notifier since the last check.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Tear the control down. Idempotent, and legal from any state so a
    /// partially initialized instance can still be cleaned up.
    pub fn destroy(&mut self) {
        if self.state != ControlState::Disposed {
            self.control.destroy();
            info!(
                "control {} [{}] disposed",
                self.control_id(),
                self.instance_id
            );
        }
        self.state = ControlState::Disposed;
    }
}

impl Drop for ControlHost {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbound_controls::AutocompleteControl;
    use formbound_types::Property;

    fn host() -> ControlHost {
        ControlHost::new(Box::new(AutocompleteControl::default()))
    }

    fn options_context() -> Context {
        let mut ctx = Context::new();
        ctx.set("options", Property::text("A,B,C"));
        ctx
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut host = host();
        assert_eq!(host.state(), ControlState::Uninitialized);

        host.init(&options_context()).unwrap();
        assert_eq!(host.state(), ControlState::Ready);

        host.update_view(&options_context()).unwrap();
        assert!(host.outputs().unwrap().is_empty());

        assert!(host.simulate_edit("B").unwrap());
        assert!(host.take_dirty());
        assert!(!host.take_dirty());
        assert_eq!(
            host.outputs().unwrap().get("selectedValue").unwrap().as_text(),
            "B"
        );

        host.destroy();
        assert_eq!(host.state(), ControlState::Disposed);
    }

    #[test]
    fn test_calls_before_init_are_rejected() {
        let mut host = host();
        assert_eq!(
            host.update_view(&options_context()).unwrap_err(),
            LifecycleError::NotInitialized
        );
        assert_eq!(host.outputs().unwrap_err(), LifecycleError::NotInitialized);
    }

    #[test]
    fn test_double_init_is_rejected() {
        let mut host = host();
        host.init(&options_context()).unwrap();
        assert_eq!(
            host.init(&options_context()).unwrap_err(),
            LifecycleError::AlreadyInitialized
        );
    }

    #[test]
    fn test_nothing_leaves_disposed() {
        let mut host = host();
        host.init(&options_context()).unwrap();
        host.destroy();
        host.destroy();

        assert_eq!(
            host.init(&options_context()).unwrap_err(),
            LifecycleError::Disposed
        );
        assert_eq!(
            host.update_view(&options_context()).unwrap_err(),
            LifecycleError::Disposed
        );
        assert_eq!(host.outputs().unwrap_err(), LifecycleError::Disposed);
    }

    #[test]
    fn test_destroy_legal_before_init() {
        let mut host = host();
        host.destroy();
        assert_eq!(host.state(), ControlState::Disposed);
    }

    #[test]
    fn test_from_registry() {
        formbound_controls::register_all();
        let host = ControlHost::from_registry("meter").unwrap();
        assert_eq!(host.control_id(), "meter");
        assert!(ControlHost::from_registry("bogus").is_err());
    }
}
