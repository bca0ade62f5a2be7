//! formbound-controls: Built-in form controls.
//!
//! Each control is an independent implementer of the `Control` adapter
//! contract; there is no shared rendering code between them.

mod autocomplete;
mod color_picker;
mod custom_function;
mod meter;
mod month_picker;

pub use autocomplete::AutocompleteControl;
pub use color_picker::ColorPickerControl;
pub use custom_function::CustomFunctionControl;
pub use meter::MeterControl;
pub use month_picker::MonthPickerControl;

/// Register all built-in controls with the global registry.
pub fn register_all() {
    formbound_core::register_control!("autocomplete", AutocompleteControl);
    formbound_core::register_control!("color_picker", ColorPickerControl);
    formbound_core::register_control!("custom_function", CustomFunctionControl);
    formbound_core::register_control!("meter", MeterControl);
    formbound_core::register_control!("month_picker", MonthPickerControl);
}
