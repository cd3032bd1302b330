//! Quantity stepper: `−`/`+` buttons beside a quantity input.

use storefront_core::Quantity;
use storefront_dom::{Document, NodeId};

use crate::error::{PageError, PageResult};

pub const STEPPER_BUTTON: &str = ".quantity-btn";
pub const QUANTITY_INPUT: &str = ".quantity-input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

impl StepDirection {
    /// Buttons tagged `decrease` step down; every other stepper button steps up.
    pub fn of_button(doc: &Document, button: NodeId) -> PageResult<Self> {
        Ok(if doc.has_class(button, "decrease")? {
            Self::Decrease
        } else {
            Self::Increase
        })
    }

    pub fn apply(self, quantity: Quantity) -> Quantity {
        match self {
            Self::Increase => quantity.increment(),
            Self::Decrease => quantity.decrement(),
        }
    }
}

/// Handle a click on a stepper button: rewrite the sibling quantity input.
///
/// Text that does not start with an integer counts as the floor before
/// stepping, so the input always ends up holding a quantity of at least 1.
pub fn step_quantity(doc: &mut Document, button: NodeId) -> PageResult<Quantity> {
    let container = doc
        .parent_element(button)
        .ok_or(PageError::NoQuantityInput(button))?;
    let input = doc
        .query_selector(container, QUANTITY_INPUT)?
        .ok_or(PageError::NoQuantityInput(button))?;

    let raw = doc.value(input)?;
    let current = Quantity::parse_input(raw).unwrap_or_else(|e| {
        tracing::warn!(input = %input, error = %e, "unreadable quantity, using floor");
        Quantity::MIN
    });

    let direction = StepDirection::of_button(doc, button)?;
    let next = direction.apply(current);
    doc.set_value(input, &next.to_string())?;

    tracing::debug!(?direction, from = %current, to = %next, "quantity stepped");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_dom::ElementSpec;

    struct Stepper {
        doc: Document,
        minus: NodeId,
        plus: NodeId,
        input: NodeId,
    }

    fn stepper(initial: &str) -> Stepper {
        let mut doc = Document::new();
        let group = doc
            .append(doc.body(), ElementSpec::new("div").class("input-group"))
            .unwrap();
        let minus = doc
            .append(group, ElementSpec::new("button").class("btn quantity-btn decrease").text("-"))
            .unwrap();
        let input = doc
            .append(
                group,
                ElementSpec::new("input")
                    .class("form-control quantity-input")
                    .attr("type", "number")
                    .value(initial),
            )
            .unwrap();
        let plus = doc
            .append(group, ElementSpec::new("button").class("btn quantity-btn increase").text("+"))
            .unwrap();
        Stepper {
            doc,
            minus,
            plus,
            input,
        }
    }

    #[test]
    fn increase_adds_one() {
        let mut s = stepper("3");
        assert_eq!(step_quantity(&mut s.doc, s.plus).unwrap().get(), 4);
        assert_eq!(s.doc.value(s.input).unwrap(), "4");
    }

    #[test]
    fn decrease_subtracts_one() {
        let mut s = stepper("3");
        step_quantity(&mut s.doc, s.minus).unwrap();
        assert_eq!(s.doc.value(s.input).unwrap(), "2");
    }

    #[test]
    fn decrease_at_one_stays_at_one() {
        let mut s = stepper("1");
        step_quantity(&mut s.doc, s.minus).unwrap();
        step_quantity(&mut s.doc, s.minus).unwrap();
        assert_eq!(s.doc.value(s.input).unwrap(), "1");
    }

    #[test]
    fn unreadable_input_is_treated_as_one() {
        let mut s = stepper("lots");
        step_quantity(&mut s.doc, s.plus).unwrap();
        assert_eq!(s.doc.value(s.input).unwrap(), "2");

        s.doc.set_value(s.input, "").unwrap();
        step_quantity(&mut s.doc, s.minus).unwrap();
        assert_eq!(s.doc.value(s.input).unwrap(), "1");
    }

    #[test]
    fn zero_or_negative_input_is_clamped_before_stepping() {
        let mut s = stepper("-4");
        step_quantity(&mut s.doc, s.plus).unwrap();
        assert_eq!(s.doc.value(s.input).unwrap(), "2");
    }

    #[test]
    fn button_without_input_is_reported() {
        let mut doc = Document::new();
        let lone = doc
            .append(doc.body(), ElementSpec::new("button").class("quantity-btn"))
            .unwrap();
        assert_eq!(
            step_quantity(&mut doc, lone),
            Err(PageError::NoQuantityInput(lone))
        );
    }

    #[test]
    fn steppers_only_touch_their_own_input() {
        let mut doc = Document::new();
        let mut rows = Vec::new();
        for initial in ["2", "5"] {
            let row = doc.append(doc.body(), ElementSpec::new("div")).unwrap();
            let btn = doc
                .append(row, ElementSpec::new("button").class("quantity-btn"))
                .unwrap();
            let input = doc
                .append(row, ElementSpec::new("input").class("quantity-input").value(initial))
                .unwrap();
            rows.push((btn, input));
        }

        step_quantity(&mut doc, rows[1].0).unwrap();

        assert_eq!(doc.value(rows[0].1).unwrap(), "2");
        assert_eq!(doc.value(rows[1].1).unwrap(), "6");
    }

    #[test]
    fn increase_past_u32_range_keeps_counting() {
        let mut s = stepper("10000000000");
        let q = step_quantity(&mut s.doc, s.plus).unwrap();
        assert_eq!(q.get(), 10_000_000_001);
        assert_eq!(s.doc.value(s.input).unwrap(), "10000000001");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: decrease yields max(1, n - 1), increase yields n + 1.
            #[test]
            fn clicks_follow_step_arithmetic(n in 1u64..(i64::MAX as u64)) {
                let mut s = stepper(&n.to_string());
                step_quantity(&mut s.doc, s.minus).unwrap();
                prop_assert_eq!(s.doc.value(s.input).unwrap(), (n - 1).max(1).to_string());

                s.doc.set_value(s.input, &n.to_string()).unwrap();
                step_quantity(&mut s.doc, s.plus).unwrap();
                prop_assert_eq!(s.doc.value(s.input).unwrap(), (n + 1).to_string());
            }
        }
    }
}
