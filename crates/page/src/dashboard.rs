//! Admin dashboard probe.

use storefront_dom::Document;

pub const SALES_CHART_ID: &str = "salesChart";

/// Whether the page has a sales chart slot. Charts are not rendered yet;
/// the slot is only detected and logged.
pub fn has_sales_chart(doc: &Document) -> bool {
    let present = doc.get_element_by_id(SALES_CHART_ID).is_some();
    if present {
        tracing::info!("sales chart placeholder present; chart rendering not implemented");
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_dom::ElementSpec;

    #[test]
    fn detects_the_chart_slot() {
        let mut doc = Document::new();
        assert!(!has_sales_chart(&doc));
        doc.append(doc.body(), ElementSpec::new("canvas").id(SALES_CHART_ID))
            .unwrap();
        assert!(has_sales_chart(&doc));
    }
}
