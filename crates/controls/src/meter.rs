//! Meter control implementation.
//!
//! Renders a single meter element. Range comes from the `minimum`/`maximum`
//! properties, the optional `high`/`low`/`optimum` thresholds mirror the
//! host's gauge semantics, and the title line is repainted on every update
//! as `"{value} out of {max} {unit}"`.

use formbound_core::{
    Control, ControlMetadata, Element, HandlerId, OutputNotifier, SessionState,
};
use formbound_types::{format_number, Context, Outputs, PropertyValue};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Range defaults when the host leaves minimum/maximum unset.
const DEFAULT_MINIMUM: f64 = 0.0;
const DEFAULT_MAXIMUM: f64 = 100.0;

/// Meter control
///
/// A zero threshold (or value) means "not set" to the host, so zeroes leave
/// the previously painted attribute untouched.
pub struct MeterControl {
    metadata: ControlMetadata,
    value: Rc<RefCell<Option<f64>>>,
    meter: Option<Element>,
    handler: Option<HandlerId>,
}

impl Default for MeterControl {
    fn default() -> Self {
        Self {
            metadata: ControlMetadata {
                id: "meter".to_string(),
                name: "Meter".to_string(),
                description: "Gauge over a host-configured range".to_string(),
                output_keys: vec!["meterValue".to_string()],
            },
            value: Rc::new(RefCell::new(None)),
            meter: None,
            handler: None,
        }
    }
}

/// Paint a threshold attribute, treating zero as "not set".
fn paint_threshold(meter: &Element, attribute: &str, raw: Option<f64>) {
    if let Some(threshold) = raw {
        if threshold != 0.0 {
            meter.set_attribute(attribute, &format_number(threshold));
        }
    }
}

impl Control for MeterControl {
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

        let meter = Element::new("meter");
        meter.set_attribute("id", "ctlmeter");
        meter.set_attribute("name", "ctlmeter");

        let minimum = context.number("minimum").unwrap_or(DEFAULT_MINIMUM);
        let maximum = context.number("maximum").unwrap_or(DEFAULT_MAXIMUM);
        meter.set_attribute("min", &format_number(minimum));
        meter.set_attribute("max", &format_number(maximum));

        paint_threshold(&meter, "high", context.number("high"));
        paint_threshold(&meter, "low", context.number("low"));
        paint_threshold(&meter, "optimum", context.number("optimum"));

        let value = Rc::clone(&self.value);
        self.handler = Some(meter.connect_input(move |event| {
            match event.value.trim().parse::<f64>() {
                Ok(edited) => {
                    *value.borrow_mut() = Some(edited);
                    notifier.notify();
                }
                Err(_) => debug!("meter: ignoring non-numeric edit {:?}", event.value),
            }
        }));

        wrapper.append_child(meter.clone());
        container.append_child(wrapper);
        self.meter = Some(meter);
    }

    fn update_view(&mut self, context: &Context) {
        let Some(meter) = self.meter.clone() else {
            return;
        };

        if let Some(bound) = context.number("meterValue") {
            if bound != 0.0 {
                *self.value.borrow_mut() = Some(bound);
                meter.set_attribute("value", &format_number(bound));
            }
        }

        // A zero maximum keeps whatever max was painted before.
        let mut maximum = String::new();
        match context.number("maximum") {
            Some(m) if m != 0.0 => {
                meter.set_attribute("max", &format_number(m));
                maximum = format_number(m);
            }
            _ => {
                if let Some(existing) = meter.attribute("max") {
                    maximum = existing;
                }
            }
        }

        let minimum = context.number("minimum").unwrap_or(DEFAULT_MINIMUM);
        meter.set_attribute("min", &format_number(minimum));

        paint_threshold(&meter, "high", context.number("high"));
        paint_threshold(&meter, "low", context.number("low"));
        paint_threshold(&meter, "optimum", context.number("optimum"));

        let unit = context.text("Unit").unwrap_or_default();
        let value = self.value.borrow().unwrap_or(DEFAULT_MINIMUM);
        let title = format!("{} out of {} {}", format_number(value), maximum, unit);
        meter.set_attribute("title", &title);
    }

    fn get_outputs(&self) -> Outputs {
        let mut outputs = Outputs::new();
        if let Some(value) = *self.value.borrow() {
            outputs.insert("meterValue".to_string(), PropertyValue::Number(value));
        }
        outputs
    }

    fn destroy(&mut self) {
        if let (Some(meter), Some(handler)) = (&self.meter, self.handler.take()) {
            meter.disconnect(handler);
        }
    }
}
