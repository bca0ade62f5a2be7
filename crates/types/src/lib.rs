//! formbound-types: Shared data types for formbound controls.
//!
//! This crate contains the pure data types exchanged between a hosting
//! runtime and its controls: property bags, scalar values, colors, and the
//! delimited option-list parser. These types have no surface or host
//! dependencies, making them suitable as a foundation layer.

pub mod color;
pub mod options;
pub mod property;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, ColorParseError, DEFAULT_SWATCH};
pub use options::parse_option_list;
pub use property::{format_number, Context, Outputs, Property, PropertyValue};
