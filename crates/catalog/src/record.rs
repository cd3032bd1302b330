//! Admin product record (`GET /admin/product/{id}` response body).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product as returned to the admin edit form.
///
/// Every field is optional: the server shape is not validated and a missing
/// field simply leaves the matching form field blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub brand: Option<Value>,
    #[serde(default)]
    pub style: Option<Value>,
    #[serde(default)]
    pub stock_quantity: Option<Value>,
    #[serde(default)]
    pub category_id: Option<Value>,
}

impl ProductRecord {
    /// Pairs of (edit-form field id, value as form text), in form order.
    pub fn form_values(&self) -> [(&'static str, String); 8] {
        [
            ("editProductId", form_text(&self.id)),
            ("editName", form_text(&self.name)),
            ("editDescription", form_text(&self.description)),
            ("editPrice", form_text(&self.price)),
            ("editBrand", form_text(&self.brand)),
            ("editStyle", form_text(&self.style)),
            ("editStock", form_text(&self.stock_quantity)),
            ("editCategory", form_text(&self.category_id)),
        ]
    }
}

/// Render a JSON value the way a form input displays it.
fn form_text(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(other) => other.to_string(),
    }
}

/// Whole-valued floats print without a fraction (`45.0` shows as `45`),
/// matching how a browser stringifies numbers below 1e21.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
