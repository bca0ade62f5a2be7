//! Autocomplete control implementation.
//!
//! Renders a text input backed by a datalist whose options come from the
//! comma-delimited `options` property. The option set is rebuilt from
//! scratch on every view update.

use formbound_core::{
    Control, ControlMetadata, Element, HandlerId, OutputNotifier, SessionState,
};
use formbound_types::{parse_option_list, Context, Outputs, PropertyValue};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Autocomplete control
///
/// One text input plus one datalist; the user's current entry is the bound
/// value, reported under `selectedValue`.
pub struct AutocompleteControl {
    metadata: ControlMetadata,
    value: Rc<RefCell<Option<String>>>,
    options: Vec<String>,
    input: Option<Element>,
    datalist: Option<Element>,
    handler: Option<HandlerId>,
}

impl Default for AutocompleteControl {
    fn default() -> Self {
        Self {
            metadata: ControlMetadata {
                id: "autocomplete".to_string(),
                name: "Autocomplete".to_string(),
                description: "Text input with a host-configured suggestion list".to_string(),
                output_keys: vec!["selectedValue".to_string()],
            },
            value: Rc::new(RefCell::new(None)),
            options: Vec::new(),
            input: None,
            datalist: None,
            handler: None,
        }
    }
}

impl AutocompleteControl {
    /// Rebuild the datalist's option children from the `options` property.
    fn paint_options(&mut self, context: &Context) {
        let raw = context.text("options");
        self.options = parse_option_list(raw.as_deref());

        if let Some(datalist) = &self.datalist {
            let children = self
                .options
                .iter()
                .map(|option| {
                    let element = Element::new("option");
                    element.set_attribute("value", option);
                    element
                })
                .collect();
            datalist.set_children(children);
        }
        debug!("autocomplete: painted {} options", self.options.len());
    }
}

impl Control for AutocompleteControl {
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

        let input = Element::new("input");
        input.set_attribute("list", "ctllist");
        input.set_attribute("name", "ctlautocomplete");

        let value = Rc::clone(&self.value);
        self.handler = Some(input.connect_input(move |event| {
            *value.borrow_mut() = Some(event.value.clone());
            notifier.notify();
        }));

        let datalist = Element::new("datalist");
        datalist.set_attribute("id", "ctllist");

        wrapper.append_child(input.clone());
        wrapper.append_child(datalist.clone());
        container.append_child(wrapper);

        self.input = Some(input);
        self.datalist = Some(datalist);
        self.paint_options(context);
    }

    fn update_view(&mut self, context: &Context) {
        // Optional background color for the input
        if let Some(color) = context.text("backgroundColor") {
            if let Some(input) = &self.input {
                input.set_attribute("style", &format!("background-color: {}", color));
            }
        }

        self.paint_options(context);
    }

    fn get_outputs(&self) -> Outputs {
        let mut outputs = Outputs::new();
        if let Some(value) = self.value.borrow().as_ref() {
            outputs.insert(
                "selectedValue".to_string(),
                PropertyValue::Text(value.clone()),
            );
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

    fn context_with_options(options: &str) -> Context {
        let mut ctx = Context::new();
        ctx.set("options", Property::text(options));
        ctx
    }

    fn init_control(ctx: &Context) -> (AutocompleteControl, Element, Rc<Cell<u32>>) {
        let mut control = AutocompleteControl::default();
        let container = Element::new("div");
        let notifications = Rc::new(Cell::new(0));
        let n = Rc::clone(&notifications);
        control.init(
            ctx,
            OutputNotifier::new(move || n.set(n.get() + 1)),
            &SessionState::new(),
            &container,
        );
        (control, container, notifications)
    }

    fn rendered_options(container: &Element) -> Vec<String> {
        container
            .find_by_tag("datalist")
            .unwrap()
            .children()
            .iter()
            .map(|o| o.attribute("value").unwrap())
            .collect()
    }

    #[test]
    fn test_init_renders_option_list() {
        let ctx = context_with_options("A,B,C");
        let (_control, container, _) = init_control(&ctx);

        let input = container.find_by_tag("input").unwrap();
        assert_eq!(input.attribute("list").unwrap(), "ctllist");
        assert_eq!(input.attribute("name").unwrap(), "ctlautocomplete");
        assert_eq!(rendered_options(&container), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_rebuilds_options_and_is_idempotent() {
        let ctx = context_with_options("A,B,C");
        let (mut control, container, _) = init_control(&ctx);

        let ctx2 = context_with_options("X,Y");
        control.update_view(&ctx2);
        assert_eq!(rendered_options(&container), vec!["X", "Y"]);

        control.update_view(&ctx2);
        let first = container.find_by_tag("input").unwrap().attributes();
        control.update_view(&ctx2);
        let second = container.find_by_tag("input").unwrap().attributes();
        assert_eq!(first, second);
        assert_eq!(rendered_options(&container), vec!["X", "Y"]);
    }

    #[test]
    fn test_missing_options_render_nothing() {
        let ctx = Context::new();
        let (_control, container, _) = init_control(&ctx);
        assert!(rendered_options(&container).is_empty());
    }

    #[test]
    fn test_edit_notifies_once_and_updates_output() {
        let ctx = context_with_options("A,B");
        let (control, container, notifications) = init_control(&ctx);

        assert!(control.get_outputs().is_empty());

        let input = container.find_by_tag("input").unwrap();
        input.emit_input("B");
        assert_eq!(notifications.get(), 1);
        assert_eq!(
            control.get_outputs().get("selectedValue").unwrap(),
            &PropertyValue::Text("B".to_string())
        );

        input.emit_input("Bee");
        assert_eq!(notifications.get(), 2);
    }

    #[test]
    fn test_background_color_applied_on_update() {
        let ctx = context_with_options("A");
        let (mut control, container, _) = init_control(&ctx);

        let mut ctx2 = context_with_options("A");
        ctx2.set("backgroundColor", Property::text("#ffeeaa"));
        control.update_view(&ctx2);

        let input = container.find_by_tag("input").unwrap();
        assert_eq!(
            input.attribute("style").unwrap(),
            "background-color: #ffeeaa"
        );
    }

    #[test]
    fn test_destroy_silences_edits() {
        let ctx = context_with_options("A");
        let (mut control, container, notifications) = init_control(&ctx);

        control.destroy();
        control.destroy();

        let input = container.find_by_tag("input").unwrap();
        input.emit_input("poke");
        assert_eq!(notifications.get(), 0);
        assert!(control.get_outputs().is_empty());
    }
}
