//! Page fixtures: a JSON description of a storefront page, rendered into a
//! [`Document`] with the markup the page layer binds to.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_dom::{Document, DomError, ElementSpec};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dom(#[from] DomError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFixture {
    pub name: String,
    /// Price as displayed, e.g. `"$75.00"`.
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub cards: Vec<CardFixture>,
    /// Initial navbar badge; no badge is rendered when absent.
    #[serde(default)]
    pub cart_count: Option<u64>,
    /// Render a quantity stepper on every card.
    #[serde(default)]
    pub steppers: bool,
}

pub const EDIT_FIELDS: [&str; 8] = [
    "editProductId",
    "editName",
    "editDescription",
    "editPrice",
    "editBrand",
    "editStyle",
    "editStock",
    "editCategory",
];

impl PageFixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Render the navbar, filter controls, product grid and admin dialogs.
    pub fn to_document(&self) -> Result<Document, FixtureError> {
        let mut doc = Document::new();
        let body = doc.body();

        let mut nav = ElementSpec::new("nav").class("navbar");
        if let Some(count) = self.cart_count {
            nav = nav.child(
                ElementSpec::new("span")
                    .class("badge bg-primary cart-count")
                    .text(&count.to_string()),
            );
        }
        doc.append(body, nav)?;

        doc.append(
            body,
            ElementSpec::new("div").class("row mb-4").children([
                ElementSpec::new("input")
                    .class("form-control search-input")
                    .attr("type", "text")
                    .attr("placeholder", "Search products..."),
                ElementSpec::new("select")
                    .class("form-select")
                    .id("price-filter")
                    .value("all"),
            ]),
        )?;

        let cards = self.cards.iter().map(|card| self.card_spec(card));
        doc.append(body, ElementSpec::new("div").class("row").children(cards))?;

        doc.append(body, modal("addProductModal", ElementSpec::new("form").class("needs-validation")))?;
        doc.append(
            body,
            modal(
                "editProductModal",
                ElementSpec::new("form").children(
                    EDIT_FIELDS
                        .iter()
                        .map(|id| ElementSpec::new("input").class("form-control").id(id)),
                ),
            ),
        )?;

        Ok(doc)
    }

    fn card_spec(&self, card: &CardFixture) -> ElementSpec {
        let mut body = ElementSpec::new("div").class("card-body").children([
            ElementSpec::new("h5").class("card-title product-name").text(&card.name),
            ElementSpec::new("p").class("card-text product-price").text(&card.price),
        ]);
        if self.steppers {
            body = body.child(ElementSpec::new("div").class("input-group").children([
                ElementSpec::new("button").class("btn btn-outline-secondary quantity-btn decrease").text("-"),
                ElementSpec::new("input")
                    .class("form-control quantity-input")
                    .attr("type", "number")
                    .value("1"),
                ElementSpec::new("button").class("btn btn-outline-secondary quantity-btn increase").text("+"),
            ]));
        }
        ElementSpec::new("div")
            .class("col-md-4")
            .child(ElementSpec::new("div").class("card product-card").child(body))
    }
}

fn modal(id: &str, content: ElementSpec) -> ElementSpec {
    ElementSpec::new("div")
        .class("modal fade")
        .id(id)
        .attr("tabindex", "-1")
        .attr("aria-hidden", "true")
        .child(ElementSpec::new("div").class("modal-dialog").child(content))
}
