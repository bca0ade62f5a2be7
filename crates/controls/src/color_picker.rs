//! Color picker control implementation.
//!
//! Renders a message line plus a color input. The swatch follows the bound
//! `color` property (formatted, else raw, else the default green) and the
//! message line's background follows the user's picks.

use formbound_core::{
    Control, ControlMetadata, Element, HandlerId, OutputNotifier, SessionState,
};
use formbound_types::{Color, Context, Outputs, Property, PropertyValue, DEFAULT_SWATCH};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Foreground color of the message line.
const MESSAGE_FOREGROUND: &str = "#FFFFFF";

/// Resolve the swatch color for a bound `color` property: formatted wins,
/// then raw, then the documented default. Anything that does not parse as
/// `#rrggbb` also degrades to the default.
fn resolve_swatch(property: Option<&Property>) -> String {
    let candidate = property.and_then(Property::display);
    match candidate {
        None => DEFAULT_SWATCH.to_string(),
        Some(value) => match Color::from_hex(&value) {
            Ok(color) => color.to_hex(),
            Err(err) => {
                warn!("color_picker: {}, using default swatch", err);
                DEFAULT_SWATCH.to_string()
            }
        },
    }
}

/// Color picker control
pub struct ColorPickerControl {
    metadata: ControlMetadata,
    value: Rc<RefCell<Option<String>>>,
    message: Option<Element>,
    input: Option<Element>,
    handler: Option<HandlerId>,
}

impl Default for ColorPickerControl {
    fn default() -> Self {
        Self {
            metadata: ControlMetadata {
                id: "color_picker".to_string(),
                name: "Color Picker".to_string(),
                description: "Color input with a live message-line swatch".to_string(),
                output_keys: vec!["color".to_string()],
            },
            value: Rc::new(RefCell::new(None)),
            message: None,
            input: None,
            handler: None,
        }
    }
}

impl Control for ColorPickerControl {
    fn metadata(&self) -> &ControlMetadata {
        &self.metadata
    }

    fn init(
        &mut self,
        context: &Context,
        notifier: OutputNotifier,
        _state: &SessionState,
        container: &Element,
    ) {
        let wrapper = Element::new("div");

        let message = Element::new("div");
        message.set_attribute("id", "clrdiv");
        message.set_attribute("style", &format!("color: {}", MESSAGE_FOREGROUND));
        message.set_text("Message with Color");

        let input = Element::new("input");
        input.set_attribute("type", "color");
        input.set_attribute("id", "clrctl");

        *self.value.borrow_mut() = context.text("color");
        input.set_attribute("value", &resolve_swatch(context.parameter("color")));

        let value = Rc::clone(&self.value);
        let message_for_edit = message.clone();
        self.handler = Some(input.connect_input(move |event| {
            message_for_edit.set_attribute(
                "style",
                &format!(
                    "color: {}; background-color: {}",
                    MESSAGE_FOREGROUND, event.value
                ),
            );
            *value.borrow_mut() = Some(event.value.clone());
            notifier.notify();
        }));

        wrapper.append_child(message.clone());
        wrapper.append_child(input.clone());
        container.append_child(wrapper);

        self.message = Some(message);
        self.input = Some(input);
    }

    fn update_view(&mut self, context: &Context) {
        *self.value.borrow_mut() = context.text("color");
        if let Some(input) = &self.input {
            input.set_attribute("value", &resolve_swatch(context.parameter("color")));
        }
    }

    fn get_outputs(&self) -> Outputs {
        let mut outputs = Outputs::new();
        if let Some(value) = self.value.borrow().as_ref() {
            outputs.insert("color".to_string(), PropertyValue::Text(value.clone()));
        }
        outputs
    }

    fn destroy(&mut self) {
        if let (Some(input), Some(handler)) = (&self.input, self.handler.take()) {
            input.disconnect(handler);
        }
    }
}
