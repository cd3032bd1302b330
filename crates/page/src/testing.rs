//! Scripted [`StorefrontApi`] and DOM probes shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storefront_catalog::ProductRecord;
use storefront_client::{AddToCartResponse, CallOutcome, StorefrontApi, UpdateCartResponse};
use storefront_core::{CartItemId, ProductId, Quantity};

use crate::shared::SharedDocument;

/// Answers every call with a fixed outcome and records what it was asked.
pub(crate) struct FakeApi {
    add: CallOutcome<AddToCartResponse>,
    update: CallOutcome<UpdateCartResponse>,
    product: CallOutcome<ProductRecord>,
    add_calls: Mutex<Vec<(ProductId, Quantity)>>,
    update_calls: Mutex<Vec<(CartItemId, u64)>>,
    fetch_calls: Mutex<Vec<ProductId>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            add: unscripted(),
            update: unscripted(),
            product: unscripted(),
            add_calls: Mutex::default(),
            update_calls: Mutex::default(),
            fetch_calls: Mutex::default(),
        }
    }
}

fn unscripted<T>() -> CallOutcome<T> {
    CallOutcome::TransportError("unscripted call".to_string())
}

impl FakeApi {
    pub fn with_add(mut self, outcome: CallOutcome<AddToCartResponse>) -> Self {
        self.add = outcome;
        self
    }

    pub fn with_update(mut self, outcome: CallOutcome<UpdateCartResponse>) -> Self {
        self.update = outcome;
        self
    }

    pub fn with_product(mut self, outcome: CallOutcome<ProductRecord>) -> Self {
        self.product = outcome;
        self
    }

    pub fn add_calls(&self) -> Vec<(ProductId, Quantity)> {
        self.add_calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<(CartItemId, u64)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> Vec<ProductId> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> CallOutcome<AddToCartResponse> {
        self.add_calls.lock().unwrap().push((product_id, quantity));
        self.add.clone()
    }

    async fn update_cart_item(
        &self,
        cart_item_id: CartItemId,
        quantity: u64,
    ) -> CallOutcome<UpdateCartResponse> {
        self.update_calls.lock().unwrap().push((cart_item_id, quantity));
        self.update.clone()
    }

    async fn fetch_product(&self, product_id: ProductId) -> CallOutcome<ProductRecord> {
        self.fetch_calls.lock().unwrap().push(product_id);
        self.product.clone()
    }
}

/// `(text, severity class)` of every banner currently attached.
pub(crate) fn alert_texts(doc: &SharedDocument) -> Vec<(String, &'static str)> {
    doc.read(|d| {
        d.query_selector_all(d.root(), ".alert")
            .unwrap()
            .into_iter()
            .map(|banner| {
                let class = ["alert-success", "alert-error", "alert-info"]
                    .into_iter()
                    .find(|c| d.has_class(banner, c).unwrap())
                    .unwrap_or("");
                (d.text_content(banner), class)
            })
            .collect()
    })
    .unwrap()
}
