//! Capability interface for input-like objects that carry declarative rules.
//!
//! The orchestrator never sees a concrete element type; it only reads and
//! writes attributes through [`Validatable`]. [`FormControl`] is a plain
//! in-memory implementation for hosts without their own element model.

use serde::{Deserialize, Serialize};

/// Attribute holding a validatable's stable identity.
pub const ID_ATTRIBUTE: &str = "id";

/// A single name/value attribute pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Trait for objects the orchestrator can validate.
///
/// Attribute names are matched ASCII case-insensitively, like HTML
/// attributes. `attributes` must enumerate in a stable order; discovery
/// emits rules in that order.
pub trait Validatable {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn value(&self) -> &str;

    fn set_value(&mut self, value: &str);

    /// Input type, such as `"text"` or `"email"`.
    fn input_type(&self) -> &str;

    fn is_disabled(&self) -> bool;

    /// Identifier of the owning form, `None` when the control is detached.
    fn form(&self) -> Option<&str>;

    fn attributes(&self) -> Vec<Attribute>;

    fn has_attribute(&self, name: &str) -> bool;

    fn get_attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&mut self, name: &str, value: &str);

    fn remove_attribute(&mut self, name: &str);
}

/// In-memory form control.
///
/// # Example
///
/// ```rust
/// use rulebook::core::{FormControl, Validatable};
///
/// let control = FormControl::new("email")
///     .in_form("signup")
///     .with_attribute("data-required", "")
///     .with_value("someone@example.com");
///
/// assert!(control.has_attribute("DATA-REQUIRED"));
/// assert_eq!(control.form(), Some("signup"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormControl {
    name: String,
    value: String,
    input_type: String,
    disabled: bool,
    form: Option<String>,
    attributes: Vec<Attribute>,
}

impl FormControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: "text".to_string(),
            ..Self::default()
        }
    }

    pub fn in_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_form(&mut self, form: Option<String>) {
        self.form = form;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl Validatable for FormControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    fn attributes(&self) -> Vec<Attribute> {
        self.attributes.clone()
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.attributes[i].value.clone())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.attributes[i].value = value.to_string(),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        if let Some(i) = self.position(name) {
            self.attributes.remove(i);
        }
    }
}
