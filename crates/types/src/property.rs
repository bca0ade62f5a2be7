//! Property-bag types exchanged between the host runtime and controls.
//!
//! The host supplies a `Context` (name -> `Property`) on init and on every
//! view update; controls hand back an `Outputs` map (name -> `PropertyValue`)
//! whenever the host asks. A `Property` carries the raw bound value plus an
//! optional display-formatted rendition of it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single scalar bound value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// String view of the value. Numbers render without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Number(n) => format_number(*n),
        }
    }

    /// Numeric view of the value, if it is (or parses as) a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

/// One named configuration field supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Property {
    /// The bound value as stored by the host, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<PropertyValue>,
    /// Display-formatted rendition of the value, if the host produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

impl Property {
    pub fn text(raw: &str) -> Self {
        Self {
            raw: Some(PropertyValue::Text(raw.to_string())),
            formatted: None,
        }
    }

    pub fn number(raw: f64) -> Self {
        Self {
            raw: Some(PropertyValue::Number(raw)),
            formatted: None,
        }
    }

    pub fn with_formatted(mut self, formatted: &str) -> Self {
        self.formatted = Some(formatted.to_string());
        self
    }

    /// Raw value as text, if set.
    pub fn raw_text(&self) -> Option<String> {
        self.raw.as_ref().map(PropertyValue::as_text)
    }

    /// Raw value as a number, if set and numeric.
    pub fn raw_number(&self) -> Option<f64> {
        self.raw.as_ref().and_then(PropertyValue::as_number)
    }

    /// Display string: formatted if present, else the raw value's text.
    pub fn display(&self) -> Option<String> {
        self.formatted.clone().or_else(|| self.raw_text())
    }
}

/// The property bag a host passes to `init` and `update_view`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Context {
    #[serde(default)]
    pub parameters: HashMap<String, Property>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter by name. Absent parameters are normal; callers
    /// fall back to their documented defaults.
    pub fn parameter(&self, name: &str) -> Option<&Property> {
        self.parameters.get(name)
    }

    /// Raw text of a parameter, if the parameter is present and set.
    pub fn text(&self, name: &str) -> Option<String> {
        self.parameter(name).and_then(Property::raw_text)
    }

    /// Raw numeric value of a parameter, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.parameter(name).and_then(Property::raw_number)
    }

    pub fn set(&mut self, name: &str, property: Property) -> &mut Self {
        self.parameters.insert(name.to_string(), property);
        self
    }
}

/// The output bag a control hands back from `get_outputs`.
pub type Outputs = HashMap<String, PropertyValue>;

/// Format a number the way the host displays scalars: integral values
/// without a fractional part, everything else via the default float format.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
