//! Month picker control implementation.
//!
//! Renders one month-typed input. The bound value travels as `YYYY-MM`; the
//! host owns validation, so an edit chrono cannot parse as a month is still
//! stored, just logged.

use chrono::NaiveDate;
use formbound_core::{
    Control, ControlMetadata, Element, HandlerId, OutputNotifier, SessionState,
};
use formbound_types::{Context, Outputs, PropertyValue};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Whether a string is a well-formed `YYYY-MM` month.
fn is_month(value: &str) -> bool {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").is_ok()
}

/// Month picker control
pub struct MonthPickerControl {
    metadata: ControlMetadata,
    value: Rc<RefCell<Option<String>>>,
    input: Option<Element>,
    handler: Option<HandlerId>,
}

impl Default for MonthPickerControl {
    fn default() -> Self {
        Self {
            metadata: ControlMetadata {
                id: "month_picker".to_string(),
                name: "Month Picker".to_string(),
                description: "Month input bound to a YYYY-MM value".to_string(),
                output_keys: vec!["value".to_string()],
            },
            value: Rc::new(RefCell::new(None)),
            input: None,
            handler: None,
        }
    }
}

impl Control for MonthPickerControl {
    fn metadata(&self) -> &ControlMetadata {
        &self.metadata
    }

    fn init(
        &mut self,
        _context: &Context,
        notifier: OutputNotifier,
        _state: &SessionState,
        container: &Element,
    ) {
        let wrapper = Element::new("div");

        let input = Element::new("input");
        input.set_attribute("type", "month");
        input.set_attribute("id", "monthpicker");

        let value = Rc::clone(&self.value);
        self.handler = Some(input.connect_input(move |event| {
            if !event.value.is_empty() && !is_month(&event.value) {
                debug!("month_picker: edit {:?} is not a YYYY-MM month", event.value);
            }
            *value.borrow_mut() = Some(event.value.clone());
            notifier.notify();
        }));

        wrapper.append_child(input.clone());
        container.append_child(wrapper);
        self.input = Some(input);
    }

    fn update_view(&mut self, context: &Context) {
        *self.value.borrow_mut() = context.text("value");
        if let Some(input) = &self.input {
            let formatted = context
                .parameter("value")
                .and_then(|p| p.formatted.clone())
                .unwrap_or_default();
            input.set_attribute("value", &formatted);
        }
    }

    fn get_outputs(&self) -> Outputs {
        let mut outputs = Outputs::new();
        if let Some(value) = self.value.borrow().as_ref() {
            outputs.insert("value".to_string(), PropertyValue::Text(value.clone()));
        }
        outputs
    }

    fn destroy(&mut self) {
        if let (Some(input), Some(handler)) = (&self.input, self.handler.take()) {
            input.disconnect(handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbound_types::Property;
    use std::cell::Cell;

    fn init_control() -> (MonthPickerControl, Element, Rc<Cell<u32>>) {
        let mut control = MonthPickerControl::default();
        let container = Element::new("div");
        let notifications = Rc::new(Cell::new(0));
        let n = Rc::clone(&notifications);
        control.init(
            &Context::new(),
            OutputNotifier::new(move || n.set(n.get() + 1)),
            &SessionState::new(),
            &container,
        );
        (control, container, notifications)
    }

    #[test]
    fn test_month_validation() {
        assert!(is_month("2020-03"));
        assert!(is_month("1999-12"));
        assert!(!is_month("2020-13"));
        assert!(!is_month("March 2020"));
    }

    #[test]
    fn test_init_creates_month_input() {
        let (_control, container, _) = init_control();
        let input = container.find_by_tag("input").unwrap();
        assert_eq!(input.attribute("type").unwrap(), "month");
        assert_eq!(input.attribute("id").unwrap(), "monthpicker");
    }

    #[test]
    fn test_update_paints_formatted_value() {
        let (mut control, container, _) = init_control();

        let mut ctx = Context::new();
        ctx.set("value", Property::text("2020-03").with_formatted("2020-03"));
        control.update_view(&ctx);

        let input = container.find_by_tag("input").unwrap();
        assert_eq!(input.attribute("value").unwrap(), "2020-03");
        assert_eq!(
            control.get_outputs().get("value").unwrap(),
            &PropertyValue::Text("2020-03".to_string())
        );

        // No formatted rendition paints an empty attribute.
        let mut ctx = Context::new();
        ctx.set("value", Property::text("2020-04"));
        control.update_view(&ctx);
        assert_eq!(input.attribute("value").unwrap(), "");
    }

    #[test]
    fn test_edit_notifies_once_per_event() {
        let (control, container, notifications) = init_control();

        let input = container.find_by_tag("input").unwrap();
        input.emit_input("2021-07");
        input.emit_input("2021-08");

        assert_eq!(notifications.get(), 2);
        assert_eq!(
            control.get_outputs().get("value").unwrap(),
            &PropertyValue::Text("2021-08".to_string())
        );
    }

    #[test]
    fn test_unparsable_edit_is_still_stored() {
        let (control, container, notifications) = init_control();

        let input = container.find_by_tag("input").unwrap();
        input.emit_input("soon");

        assert_eq!(notifications.get(), 1);
        assert_eq!(
            control.get_outputs().get("value").unwrap(),
            &PropertyValue::Text("soon".to_string())
        );
    }

    #[test]
    fn test_destroy_silences_edits() {
        let (mut control, container, notifications) = init_control();
        control.destroy();
        container.find_by_tag("input").unwrap().emit_input("2022-01");
        assert_eq!(notifications.get(), 0);
    }
}
