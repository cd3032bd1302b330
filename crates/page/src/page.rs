//! Load-time binding and event routing for one page.

use std::sync::Arc;

use storefront_catalog::{PriceBracket, TextQuery};
use storefront_client::StorefrontApi;
use storefront_core::Quantity;
use storefront_dom::{Document, NodeId};

use crate::admin::AdminActions;
use crate::cart::CartActions;
use crate::config::PageConfig;
use crate::dashboard;
use crate::error::PageResult;
use crate::filter::{self, FilterSummary, PRICE_FILTER_ID, SEARCH_INPUT};
use crate::form_guard::{self, FormVerdict, GUARDED_FORM, SubmitEvent};
use crate::modal::ModalHost;
use crate::notify::{self, DISMISS_TRIGGER, Notifier};
use crate::reload::PageReloader;
use crate::shared::SharedDocument;
use crate::stepper::{self, STEPPER_BUTTON};

/// What was found in the document when the page was bound.
///
/// Elements added later are not picked up, with one exception: notification
/// dismiss buttons are handled by delegation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub steppers: Vec<NodeId>,
    pub forms: Vec<NodeId>,
    pub search_input: Option<NodeId>,
    pub price_filter: Option<NodeId>,
    pub sales_chart: bool,
}

impl Bindings {
    fn scan(doc: &Document) -> PageResult<Self> {
        let root = doc.root();
        Ok(Self {
            steppers: doc.query_selector_all(root, STEPPER_BUTTON)?,
            forms: doc.query_selector_all(root, GUARDED_FORM)?,
            search_input: doc.query_selector(root, SEARCH_INPUT)?,
            price_filter: doc.get_element_by_id(PRICE_FILTER_ID),
            sales_chart: dashboard::has_sales_chart(doc),
        })
    }
}

#[derive(Debug)]
pub enum PageEvent<'a> {
    Click(NodeId),
    Submit(NodeId, &'a mut SubmitEvent),
    /// The element's value changed while typing.
    Input(NodeId),
    /// The element's value was committed (select change).
    Change(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Stepped(Quantity),
    Submitted(FormVerdict),
    Filtered(FilterSummary),
    Dismissed,
    Ignored,
}

/// A bound page: the shared document plus the handlers wired to it.
#[derive(Clone)]
pub struct Page {
    doc: SharedDocument,
    bindings: Bindings,
    notifier: Notifier,
    cart: CartActions,
    admin: AdminActions,
}

impl Page {
    pub fn bind(
        doc: SharedDocument,
        config: PageConfig,
        api: Arc<dyn StorefrontApi>,
        modals: Arc<dyn ModalHost>,
        reloader: Arc<dyn PageReloader>,
    ) -> PageResult<Self> {
        let bindings = doc.read(Bindings::scan)??;
        tracing::info!(
            steppers = bindings.steppers.len(),
            forms = bindings.forms.len(),
            search = bindings.search_input.is_some(),
            price_filter = bindings.price_filter.is_some(),
            "page bound"
        );

        let notifier = Notifier::new(doc.clone(), config.notification_ttl);
        let cart = CartActions::new(api.clone(), doc.clone(), notifier.clone(), reloader);
        let admin = AdminActions::new(api, doc.clone(), modals, notifier.clone());

        Ok(Self {
            doc,
            bindings,
            notifier,
            cart,
            admin,
        })
    }

    /// Route a DOM event to whatever was bound to its target.
    pub fn dispatch(&self, event: PageEvent<'_>) -> PageResult<Handled> {
        let b = &self.bindings;
        match event {
            PageEvent::Click(node) if b.steppers.contains(&node) => {
                let quantity = self.doc.write(|doc| stepper::step_quantity(doc, node))??;
                Ok(Handled::Stepped(quantity))
            }
            PageEvent::Click(node) => self.doc.write(|doc| {
                let Some(trigger) = doc.closest(node, DISMISS_TRIGGER)? else {
                    return Ok(Handled::Ignored);
                };
                Ok(if notify::dismiss(doc, trigger)? {
                    Handled::Dismissed
                } else {
                    Handled::Ignored
                })
            })?,
            PageEvent::Submit(form, event) if b.forms.contains(&form) => {
                let verdict = self
                    .doc
                    .write(|doc| form_guard::guard_submit(doc, form, event))??;
                Ok(Handled::Submitted(verdict))
            }
            PageEvent::Input(node) if b.search_input == Some(node) => self.doc.write(|doc| {
                let query = TextQuery::new(doc.value(node)?);
                Ok(Handled::Filtered(filter::apply_text_filter(doc, &query)?))
            })?,
            PageEvent::Change(node) if b.price_filter == Some(node) => self.doc.write(|doc| {
                let bracket = PriceBracket::parse(doc.value(node)?);
                Ok(Handled::Filtered(filter::apply_price_filter(doc, &bracket)?))
            })?,
            _ => Ok(Handled::Ignored),
        }
    }

    pub fn cart(&self) -> &CartActions {
        &self.cart
    }

    pub fn admin(&self) -> &AdminActions {
        &self.admin
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn has_sales_chart(&self) -> bool {
        self.bindings.sales_chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::DomModalHost;
    use crate::notify::Severity;
    use crate::reload::RecordingReloader;
    use crate::testing::FakeApi;
    use storefront_dom::ElementSpec;

    struct Fixture {
        page: Page,
        minus: NodeId,
        plus: NodeId,
        qty: NodeId,
        form: NodeId,
        search: NodeId,
        price: NodeId,
        cards: Vec<NodeId>,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let body = doc.body();

        let group = doc
            .append(body, ElementSpec::new("div").class("input-group"))
            .unwrap();
        let minus = doc
            .append(group, ElementSpec::new("button").class("quantity-btn decrease"))
            .unwrap();
        let qty = doc
            .append(group, ElementSpec::new("input").class("quantity-input").value("1"))
            .unwrap();
        let plus = doc
            .append(group, ElementSpec::new("button").class("quantity-btn increase"))
            .unwrap();

        let form = doc
            .append(
                body,
                ElementSpec::new("form")
                    .class("needs-validation")
                    .child(ElementSpec::new("input").id("email").attr("required", "")),
            )
            .unwrap();

        let search = doc
            .append(body, ElementSpec::new("input").class("form-control search-input"))
            .unwrap();
        let price = doc
            .append(body, ElementSpec::new("select").id(PRICE_FILTER_ID))
            .unwrap();

        let cards = [("Oak Table", "$75.00"), ("Pine Shelf", "$30.00")]
            .iter()
            .map(|(name, text)| doc.append(body, crate::filter::fixtures::card(name, text)).unwrap())
            .collect::<Vec<NodeId>>();

        let doc = SharedDocument::new(doc);
        let page = Page::bind(
            doc.clone(),
            PageConfig::default(),
            Arc::new(FakeApi::default()),
            Arc::new(DomModalHost::new(doc)),
            Arc::new(RecordingReloader::new()),
        )
        .unwrap();

        Fixture {
            page,
            minus,
            plus,
            qty,
            form,
            search,
            price,
            cards,
        }
    }

    fn value(f: &Fixture, node: NodeId) -> String {
        f.page.document().read(|d| d.value(node).unwrap().to_string()).unwrap()
    }

    fn set_value(f: &Fixture, node: NodeId, v: &str) {
        f.page.document().write(|d| d.set_value(node, v).unwrap()).unwrap();
    }

    #[test]
    fn bind_records_what_the_page_has() {
        let f = fixture();
        let b = f.page.bindings();
        assert_eq!(b.steppers, vec![f.minus, f.plus]);
        assert_eq!(b.forms, vec![f.form]);
        assert_eq!(b.search_input, Some(f.search));
        assert_eq!(b.price_filter, Some(f.price));
        assert!(!f.page.has_sales_chart());
    }

    #[test]
    fn stepper_clicks_route_to_the_stepper() {
        let f = fixture();
        assert_eq!(
            f.page.dispatch(PageEvent::Click(f.plus)).unwrap(),
            Handled::Stepped(Quantity::new(2).unwrap())
        );
        f.page.dispatch(PageEvent::Click(f.minus)).unwrap();
        f.page.dispatch(PageEvent::Click(f.minus)).unwrap();
        assert_eq!(value(&f, f.qty), "1");
    }

    #[test]
    fn invalid_submit_is_blocked() {
        let f = fixture();
        let mut event = SubmitEvent::new();
        assert_eq!(
            f.page.dispatch(PageEvent::Submit(f.form, &mut event)).unwrap(),
            Handled::Submitted(FormVerdict::Blocked)
        );
        assert!(event.default_prevented());
    }

    #[test]
    fn guard_binds_by_class_not_by_tag() {
        let mut doc = Document::new();
        let panel = doc
            .append(
                doc.body(),
                ElementSpec::new("div")
                    .class("needs-validation")
                    .child(ElementSpec::new("input").id("sku").attr("required", "")),
            )
            .unwrap();
        let doc = SharedDocument::new(doc);
        let page = Page::bind(
            doc.clone(),
            PageConfig::default(),
            Arc::new(FakeApi::default()),
            Arc::new(DomModalHost::new(doc.clone())),
            Arc::new(RecordingReloader::new()),
        )
        .unwrap();

        assert_eq!(page.bindings().forms, vec![panel]);
        let mut event = SubmitEvent::new();
        assert_eq!(
            page.dispatch(PageEvent::Submit(panel, &mut event)).unwrap(),
            Handled::Submitted(FormVerdict::Blocked)
        );
        assert!(event.propagation_stopped());
        assert!(doc.read(|d| d.has_class(panel, "was-validated")).unwrap().unwrap());
    }

    #[test]
    fn search_and_price_events_filter_cards() {
        let f = fixture();

        set_value(&f, f.search, "OAK");
        assert_eq!(
            f.page.dispatch(PageEvent::Input(f.search)).unwrap(),
            Handled::Filtered(FilterSummary { shown: 1, hidden: 1 })
        );

        set_value(&f, f.price, "0-50");
        f.page.dispatch(PageEvent::Change(f.price)).unwrap();
        let shown = f
            .page
            .document()
            .read(|d| crate::filter::fixtures::visible(d, &f.cards))
            .unwrap();
        assert_eq!(shown, vec![false, true]);
    }

    #[test]
    fn events_on_unbound_nodes_are_ignored() {
        let f = fixture();
        assert_eq!(f.page.dispatch(PageEvent::Click(f.qty)).unwrap(), Handled::Ignored);
        assert_eq!(f.page.dispatch(PageEvent::Input(f.qty)).unwrap(), Handled::Ignored);
        assert_eq!(f.page.dispatch(PageEvent::Change(f.search)).unwrap(), Handled::Ignored);
    }

    #[test]
    fn steppers_added_after_bind_are_not_bound() {
        let f = fixture();
        let late = f
            .page
            .document()
            .write(|d| {
                let body = d.body();
                d.append(body, ElementSpec::new("button").class("quantity-btn"))
                    .unwrap()
            })
            .unwrap();
        assert_eq!(f.page.dispatch(PageEvent::Click(late)).unwrap(), Handled::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_is_delegated_to_banners_created_later() {
        let f = fixture();
        let banner = f.page.notifier().show("Saved", Severity::Success).unwrap();
        let close = f
            .page
            .document()
            .read(|d| d.query_selector(banner, DISMISS_TRIGGER).unwrap().unwrap())
            .unwrap();

        assert_eq!(f.page.dispatch(PageEvent::Click(close)).unwrap(), Handled::Dismissed);
        assert!(!f.page.document().read(|d| d.is_connected(banner)).unwrap());
    }
}
