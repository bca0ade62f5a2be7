//! Custom function control implementation.
//!
//! Renders nothing; on every view update it applies the function named by
//! the `functionName` selector to `input1` and reports the result, along
//! with a user-visible debug string. An unrecognized selector never fails
//! the control: outputs stay unchanged and the debug string carries an
//! "Invalid Function" marker.

use chrono::Local;
use formbound_core::{
    Control, ControlMetadata, Element, OutputNotifier, SessionState,
};
use formbound_types::{Context, Outputs, PropertyValue};
use log::debug;
use serde_json::json;

/// Debug-string marker for an unrecognized selector.
const INVALID_FUNCTION: &str = "Error:Invalid Function";

/// Custom function control
pub struct CustomFunctionControl {
    metadata: ControlMetadata,
    outputs: Outputs,
    notifier: Option<OutputNotifier>,
}

impl Default for CustomFunctionControl {
    fn default() -> Self {
        Self {
            metadata: ControlMetadata {
                id: "custom_function".to_string(),
                name: "Custom Function".to_string(),
                description: "Applies a host-selected function to its inputs".to_string(),
                output_keys: vec![
                    "output1".to_string(),
                    "output2".to_string(),
                    "debug".to_string(),
                ],
            },
            outputs: Outputs::new(),
            notifier: None,
        }
    }
}

impl Control for CustomFunctionControl {
    fn metadata(&self) -> &ControlMetadata {
        &self.metadata
    }

    fn init(
        &mut self,
        _context: &Context,
        notifier: OutputNotifier,
        _state: &SessionState,
        _container: &Element,
    ) {
        self.notifier = Some(notifier);
    }

    fn update_view(&mut self, context: &Context) {
        let Some(property) = context.parameter("functionName") else {
            return;
        };
        let selector = property.raw_text().unwrap_or_default();

        let inputs = json!({
            "in1": context.parameter("input1"),
            "in2": context.parameter("input2"),
        });
        let mut trace = format!(
            "Debug:\n{}\n{}",
            Local::now().format("%H:%M:%S"),
            inputs
        );

        match selector.as_str() {
            "Math.tanh" => {
                if let Some(x) = context.number("input1") {
                    self.outputs
                        .insert("output1".to_string(), PropertyValue::Number(x.tanh()));
                }
            }
            "Math.acosh" => {
                if let Some(x) = context.number("input1") {
                    self.outputs
                        .insert("output1".to_string(), PropertyValue::Number(x.acosh()));
                }
            }
            "CustomGreeting" => {
                if let Some(name) = context.text("input1") {
                    self.outputs.insert(
                        "output1".to_string(),
                        PropertyValue::Text(format!("Hello {}", name)),
                    );
                }
            }
            _ => {
                debug!("custom_function: unrecognized selector {:?}", selector);
                trace = format!("{}\n{}", INVALID_FUNCTION, trace);
            }
        }

        self.outputs
            .insert("debug".to_string(), PropertyValue::Text(trace));
        if let Some(notifier) = &self.notifier {
            notifier.notify();
        }
    }

    fn get_outputs(&self) -> Outputs {
        self.outputs.clone()
    }

    fn destroy(&mut self) {
        self.notifier = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbound_types::Property;
    use std::cell::Cell;
    use std::rc::Rc;

    fn init_control() -> (CustomFunctionControl, Rc<Cell<u32>>) {
        let mut control = CustomFunctionControl::default();
        let notifications = Rc::new(Cell::new(0));
        let n = Rc::clone(&notifications);
        control.init(
            &Context::new(),
            OutputNotifier::new(move || n.set(n.get() + 1)),
            &SessionState::new(),
            &Element::new("div"),
        );
        (control, notifications)
    }

    fn function_context(selector: &str, input1: Property) -> Context {
        let mut ctx = Context::new();
        ctx.set("functionName", Property::text(selector));
        ctx.set("input1", input1);
        ctx
    }

    #[test]
    fn test_tanh_computes_output1() {
        let (mut control, notifications) = init_control();
        control.update_view(&function_context("Math.tanh", Property::number(0.0)));

        assert_eq!(notifications.get(), 1);
        assert_eq!(
            control.get_outputs().get("output1").unwrap(),
            &PropertyValue::Number(0.0)
        );
        let debug = control.get_outputs().get("debug").unwrap().as_text();
        assert!(debug.starts_with("Debug:"));
        assert!(!debug.contains("Invalid Function"));
    }

    #[test]
    fn test_greeting_builds_text_output() {
        let (mut control, _) = init_control();
        control.update_view(&function_context("CustomGreeting", Property::text("World")));

        assert_eq!(
            control.get_outputs().get("output1").unwrap(),
            &PropertyValue::Text("Hello World".to_string())
        );
    }

    #[test]
    fn test_unknown_selector_leaves_outputs_unchanged() {
        let (mut control, notifications) = init_control();
        control.update_view(&function_context("Math.tanh", Property::number(1.0)));
        let before = control.get_outputs().get("output1").cloned();

        control.update_view(&function_context("Math.frobnicate", Property::number(2.0)));

        assert_eq!(notifications.get(), 2);
        assert_eq!(control.get_outputs().get("output1").cloned(), before);
        let debug = control.get_outputs().get("debug").unwrap().as_text();
        assert!(debug.contains("Invalid Function"));
    }

    #[test]
    fn test_non_numeric_input_skips_computation() {
        let (mut control, _) = init_control();
        control.update_view(&function_context("Math.tanh", Property::text("NaN-ish")));
        assert!(control.get_outputs().get("output1").is_none());
        // The debug trace is still produced.
        assert!(control.get_outputs().get("debug").is_some());
    }

    #[test]
    fn test_missing_selector_property_skips_update() {
        let (mut control, notifications) = init_control();
        control.update_view(&Context::new());
        assert_eq!(notifications.get(), 0);
        assert!(control.get_outputs().is_empty());
    }

    #[test]
    fn test_debug_records_inputs_as_json() {
        let (mut control, _) = init_control();
        let mut ctx = function_context("Math.tanh", Property::number(1.5));
        ctx.set("input2", Property::text("aux"));
        control.update_view(&ctx);

        let debug = control.get_outputs().get("debug").unwrap().as_text();
        assert!(debug.contains("\"in1\""));
        assert!(debug.contains("1.5"));
        assert!(debug.contains("aux"));
    }
}
