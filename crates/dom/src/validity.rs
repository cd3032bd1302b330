//! Native form constraint validation (`form.checkValidity()`).

use crate::document::{Document, NodeId};
use crate::error::DomResult;

/// Outcome of checking one form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    ValueMissing,
    TypeMismatch,
    BadInput,
    RangeUnderflow,
    RangeOverflow,
    TooShort,
    TooLong,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

const SKIPPED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

impl Document {
    /// Whether every submittable control under `form` satisfies its constraints.
    pub fn check_validity(&self, form: NodeId) -> DomResult<bool> {
        for control in self.query_selector_all(form, "input, select, textarea")? {
            if !self.validity(control)?.is_valid() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Constraint state of a single control. Disabled and button-like
    /// controls are barred from validation and always report valid.
    pub fn validity(&self, control: NodeId) -> DomResult<Validity> {
        let el = self.element(control)?;
        if el.attrs.contains_key("disabled") {
            return Ok(Validity::Valid);
        }

        let input_type = match el.tag.as_str() {
            "input" => el.attr("type").unwrap_or("text").to_ascii_lowercase(),
            other => other.to_string(),
        };
        if SKIPPED_INPUT_TYPES.contains(&input_type.as_str()) {
            return Ok(Validity::Valid);
        }

        let required = el.attrs.contains_key("required");
        if matches!(input_type.as_str(), "checkbox" | "radio") {
            let checked = el.attrs.contains_key("checked");
            return Ok(if required && !checked {
                Validity::ValueMissing
            } else {
                Validity::Valid
            });
        }

        let value = el.value.as_str();
        if value.is_empty() {
            return Ok(if required {
                Validity::ValueMissing
            } else {
                Validity::Valid
            });
        }

        match input_type.as_str() {
            "number" => {
                let Ok(number) = value.trim().parse::<f64>() else {
                    return Ok(Validity::BadInput);
                };
                if !number.is_finite() {
                    return Ok(Validity::BadInput);
                }
                if let Some(min) = el.attr("min").and_then(|m| m.parse::<f64>().ok()) {
                    if number < min {
                        return Ok(Validity::RangeUnderflow);
                    }
                }
                if let Some(max) = el.attr("max").and_then(|m| m.parse::<f64>().ok()) {
                    if number > max {
                        return Ok(Validity::RangeOverflow);
                    }
                }
            }
            "email" if !is_email(value) => return Ok(Validity::TypeMismatch),
            _ => {}
        }

        let len = value.chars().count();
        if let Some(min) = el.attr("minlength").and_then(|m| m.parse::<usize>().ok()) {
            if len < min {
                return Ok(Validity::TooShort);
            }
        }
        if let Some(max) = el.attr("maxlength").and_then(|m| m.parse::<usize>().ok()) {
            if len > max {
                return Ok(Validity::TooLong);
            }
        }

        Ok(Validity::Valid)
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
