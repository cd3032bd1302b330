//! Replays console commands against a bound page.

use std::fmt::Write as _;
use std::sync::Arc;

use storefront_client::StorefrontApi;
use storefront_dom::{Document, NodeId};
use storefront_page::filter::{PRODUCT_CARD, read_cards};
use storefront_page::{
    DomModalHost, Handled, Page, PageConfig, PageError, PageEvent, PageResult, RecordingReloader,
    SharedDocument, StepDirection,
};

use crate::command::Command;
use crate::fixture::EDIT_FIELDS;

const MODALS: [&str; 2] = ["addProductModal", "editProductModal"];

/// What the driver should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Output(String),
    Quit,
}

pub struct Session {
    page: Page,
    modals: Arc<DomModalHost>,
    reloader: Arc<RecordingReloader>,
}

impl Session {
    pub fn new(doc: Document, config: PageConfig, api: Arc<dyn StorefrontApi>) -> PageResult<Self> {
        let doc = SharedDocument::new(doc);
        let modals = Arc::new(DomModalHost::new(doc.clone()));
        let reloader = Arc::new(RecordingReloader::new());
        let page = Page::bind(doc, config, api, modals.clone(), reloader.clone())?;
        Ok(Self {
            page,
            modals,
            reloader,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn execute(&self, command: Command) -> PageResult<Step> {
        tracing::debug!(?command, "console command");
        let out = match command {
            Command::Search(query) => {
                let input = self
                    .page
                    .bindings()
                    .search_input
                    .ok_or_else(|| PageError::MissingElement(".search-input".into()))?;
                self.set_value(input, &query)?;
                describe(self.page.dispatch(PageEvent::Input(input))?)
            }
            Command::Price(token) => {
                let select = self
                    .page
                    .bindings()
                    .price_filter
                    .ok_or_else(|| PageError::MissingElement("#price-filter".into()))?;
                self.set_value(select, &token)?;
                describe(self.page.dispatch(PageEvent::Change(select))?)
            }
            Command::Step { card, direction } => {
                let button = self.stepper_button(card, direction)?;
                describe(self.page.dispatch(PageEvent::Click(button))?)
            }
            Command::Add {
                product_id,
                quantity,
            } => {
                let outcome = self.page.cart().add_to_cart(product_id, quantity).await?;
                format!("add_to_cart: {outcome:?}")
            }
            Command::Update {
                cart_item_id,
                quantity,
            } => {
                let outcome = self
                    .page
                    .cart()
                    .update_cart_item(cart_item_id, quantity)
                    .await?;
                format!("update_cart_item: {outcome:?}")
            }
            Command::Edit(product_id) => {
                let outcome = self.page.admin().edit_product(product_id).await?;
                format!("edit_product: {outcome:?}")
            }
            Command::Show => self.snapshot()?,
            Command::Quit => return Ok(Step::Quit),
        };
        Ok(Step::Output(out))
    }

    fn set_value(&self, node: NodeId, value: &str) -> PageResult<()> {
        self.page.document().write(|doc| doc.set_value(node, value))??;
        Ok(())
    }

    fn stepper_button(&self, card: usize, direction: StepDirection) -> PageResult<NodeId> {
        let selector = match direction {
            StepDirection::Increase => ".quantity-btn.increase",
            StepDirection::Decrease => ".quantity-btn.decrease",
        };
        self.page.document().read(|doc| {
            let cards = doc.query_selector_all(doc.root(), PRODUCT_CARD)?;
            let node = cards
                .get(card.wrapping_sub(1))
                .ok_or_else(|| PageError::MissingElement(format!("product card #{card}")))?;
            doc.query_selector(*node, selector)?
                .ok_or_else(|| PageError::MissingElement(format!("{selector} on card #{card}")))
        })?
    }

    /// Human-readable dump of everything the page currently shows.
    pub fn snapshot(&self) -> PageResult<String> {
        let mut out = String::new();
        self.page.document().read(|doc| -> PageResult<()> {
            let root = doc.root();
            match doc.query_selector(root, ".cart-count")? {
                Some(badge) => {
                    let _ = writeln!(out, "cart: {}", doc.text_content(badge));
                }
                None => out.push_str("cart: -\n"),
            }

            for (i, (node, card)) in read_cards(doc)?.into_iter().enumerate() {
                let shown = if doc.is_displayed(node)? { "shown" } else { "hidden" };
                let qty = match doc.query_selector(node, ".quantity-input")? {
                    Some(input) => format!(" qty={}", doc.value(input)?),
                    None => String::new(),
                };
                let _ = writeln!(out, "card {}: {} {} [{shown}]{qty}", i + 1, card.name, card.price_text);
            }

            for banner in doc.query_selector_all(root, ".alert")? {
                let _ = writeln!(out, "alert: {}", doc.text_content(banner).trim());
            }

            for name in MODALS {
                let Some(dialog) = doc.get_element_by_id(name) else {
                    continue;
                };
                if doc.has_class(dialog, "show")? {
                    let _ = writeln!(out, "modal: {name} open");
                    if name == "editProductModal" {
                        for field in EDIT_FIELDS {
                            if let Some(input) = doc.get_element_by_id(field) {
                                let _ = writeln!(out, "  {field} = {}", doc.value(input)?);
                            }
                        }
                    }
                }
            }
            Ok(())
        })??;
        let _ = write!(out, "reloads: {}", self.reloader.count());
        Ok(out)
    }

    pub fn modals(&self) -> &DomModalHost {
        &self.modals
    }
}

fn describe(handled: Handled) -> String {
    match handled {
        Handled::Filtered(summary) => format!("{} shown, {} hidden", summary.shown, summary.hidden),
        Handled::Stepped(quantity) => format!("quantity {quantity}"),
        other => format!("{other:?}"),
    }
}
