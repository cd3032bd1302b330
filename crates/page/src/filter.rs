//! Live catalog filtering: search box and price bracket.
//!
//! Both filters recompute the visibility of every product card on each
//! event. They are not combined; whichever ran last decides what is shown.

use storefront_catalog::{PriceBracket, ProductCard, TextQuery};
use storefront_dom::{Document, NodeId};

use crate::error::PageResult;

pub const PRODUCT_CARD: &str = ".product-card";
pub const PRODUCT_NAME: &str = ".product-name";
pub const PRODUCT_PRICE: &str = ".product-price";
pub const SEARCH_INPUT: &str = ".search-input";
pub const PRICE_FILTER_ID: &str = "price-filter";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub hidden: usize,
}

/// Snapshot every product card on the page.
///
/// A card without a name element reads as an empty name; one without a
/// price element reads as unpriced.
pub fn read_cards(doc: &Document) -> PageResult<Vec<(NodeId, ProductCard)>> {
    let text_of = |card: NodeId, selector: &str| -> PageResult<String> {
        Ok(doc
            .query_selector(card, selector)?
            .map(|n| doc.text_content(n))
            .unwrap_or_default())
    };

    doc.query_selector_all(doc.root(), PRODUCT_CARD)?
        .into_iter()
        .map(|card| {
            let name = text_of(card, PRODUCT_NAME)?;
            let price = text_of(card, PRODUCT_PRICE)?;
            Ok((card, ProductCard::new(name, price)))
        })
        .collect()
}

/// Show the cards whose name contains `query` (case-insensitive).
pub fn apply_text_filter(doc: &mut Document, query: &TextQuery) -> PageResult<FilterSummary> {
    let summary = apply(doc, |card| card.matches_query(query))?;
    tracing::debug!(query = query.as_str(), shown = summary.shown, hidden = summary.hidden, "search filter applied");
    Ok(summary)
}

/// Show the cards whose price falls in `bracket`.
pub fn apply_price_filter(doc: &mut Document, bracket: &PriceBracket) -> PageResult<FilterSummary> {
    if let PriceBracket::Unrecognized(token) = bracket {
        tracing::debug!(token = token.as_str(), "unrecognized price bracket; showing all");
    }
    let summary = apply(doc, |card| card.in_bracket(bracket))?;
    tracing::debug!(bracket = %bracket, shown = summary.shown, hidden = summary.hidden, "price filter applied");
    Ok(summary)
}

fn apply(doc: &mut Document, visible: impl Fn(&ProductCard) -> bool) -> PageResult<FilterSummary> {
    let mut summary = FilterSummary::default();
    for (node, card) in read_cards(doc)? {
        if visible(&card) {
            doc.set_style(node, "display", "block")?;
            summary.shown += 1;
        } else {
            doc.set_style(node, "display", "none")?;
            summary.hidden += 1;
        }
    }
    Ok(summary)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{catalog, visible};
    use super::*;
    use storefront_dom::ElementSpec;

    const SHOES: &[(&str, &str)] = &[
        ("Canvas Sneaker", "$45.00"),
        ("Running Shoe", "$50.00"),
        ("Leather Loafer", "$95.50"),
        ("Hiking Boot", "$200.00"),
        ("Designer Heel", "$350.00"),
    ];

    #[test]
    fn text_filter_matches_case_insensitively() {
        let (mut doc, cards) = catalog(SHOES);

        let summary = apply_text_filter(&mut doc, &TextQuery::new("SHOE")).unwrap();

        assert_eq!(summary, FilterSummary { shown: 1, hidden: 4 });
        assert_eq!(visible(&doc, &cards), [false, true, false, false, false]);
        assert_eq!(doc.style(cards[1], "display").unwrap(), Some("block"));
    }

    #[test]
    fn surrounding_whitespace_in_names_is_matched_as_written() {
        let (mut doc, cards) = catalog(&[("Polar ", "$30.00"), (" Aviator", "$60.00")]);

        apply_text_filter(&mut doc, &TextQuery::new("polar ")).unwrap();
        assert_eq!(visible(&doc, &cards), [true, false]);

        apply_text_filter(&mut doc, &TextQuery::new(" av")).unwrap();
        assert_eq!(visible(&doc, &cards), [false, true]);
    }

    #[test]
    fn empty_query_shows_everything() {
        let (mut doc, cards) = catalog(SHOES);
        apply_text_filter(&mut doc, &TextQuery::new("zzz")).unwrap();
        apply_text_filter(&mut doc, &TextQuery::new("")).unwrap();
        assert!(visible(&doc, &cards).iter().all(|v| *v));
    }

    #[test]
    fn price_filter_respects_bracket_edges() {
        let (mut doc, cards) = catalog(SHOES);

        apply_price_filter(&mut doc, &PriceBracket::parse("0-50")).unwrap();
        assert_eq!(visible(&doc, &cards), [true, true, false, false, false]);

        apply_price_filter(&mut doc, &PriceBracket::parse("50-100")).unwrap();
        assert_eq!(visible(&doc, &cards), [false, false, true, false, false]);

        apply_price_filter(&mut doc, &PriceBracket::parse("100-200")).unwrap();
        assert_eq!(visible(&doc, &cards), [false, false, false, true, false]);

        apply_price_filter(&mut doc, &PriceBracket::parse("200+")).unwrap();
        assert_eq!(visible(&doc, &cards), [false, false, false, false, true]);
    }

    #[test]
    fn unknown_bracket_fails_open() {
        let (mut doc, cards) = catalog(SHOES);
        apply_price_filter(&mut doc, &PriceBracket::parse("0-50")).unwrap();

        let summary = apply_price_filter(&mut doc, &PriceBracket::parse("")).unwrap();

        assert_eq!(summary.shown, SHOES.len());
        assert!(visible(&doc, &cards).iter().all(|v| *v));
    }

    #[test]
    fn last_filter_wins() {
        let (mut doc, cards) = catalog(SHOES);
        apply_price_filter(&mut doc, &PriceBracket::parse("200+")).unwrap();
        apply_text_filter(&mut doc, &TextQuery::new("sneaker")).unwrap();
        assert_eq!(visible(&doc, &cards), [true, false, false, false, false]);
    }

    #[test]
    fn malformed_cards_degrade_predictably() {
        let mut doc = Document::new();
        let unnamed = doc
            .append(
                doc.body(),
                ElementSpec::new("div")
                    .class("product-card")
                    .child(ElementSpec::new("p").class("product-price").text("Call for price")),
            )
            .unwrap();

        apply_text_filter(&mut doc, &TextQuery::new("boot")).unwrap();
        assert!(!doc.is_displayed(unnamed).unwrap());
        apply_text_filter(&mut doc, &TextQuery::new("")).unwrap();
        assert!(doc.is_displayed(unnamed).unwrap());

        apply_price_filter(&mut doc, &PriceBracket::UpTo50).unwrap();
        assert!(!doc.is_displayed(unnamed).unwrap());
        apply_price_filter(&mut doc, &PriceBracket::parse("all")).unwrap();
        assert!(doc.is_displayed(unnamed).unwrap());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a card is visible iff its name contains the query,
            /// case-insensitively.
            #[test]
            fn visibility_tracks_substring_match(
                names in proptest::collection::vec("[A-Za-z ]{1,16}", 1..12),
                query in "[A-Za-z ]{0,3}"
            ) {
                let items: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "$10")).collect();
                let (mut doc, cards) = catalog(&items);

                apply_text_filter(&mut doc, &TextQuery::new(&query)).unwrap();

                for (name, card) in names.iter().zip(&cards) {
                    let expected = name.to_lowercase().contains(&query.to_lowercase());
                    prop_assert_eq!(doc.is_displayed(*card).unwrap(), expected);
                }
            }
        }
    }
}
