//! Storefront endpoint contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_catalog::ProductRecord;
use storefront_core::{CartItemId, ProductId, Quantity};

use crate::outcome::CallOutcome;

/// JSON body of both cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBody {
    pub quantity: u64,
}

/// `POST /add_to_cart/{product_id}` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartResponse {
    #[serde(default)]
    pub success: bool,
    /// Authoritative number of items in the cart after the mutation.
    #[serde(default)]
    pub cart_count: Option<u64>,
}

/// `POST /update_cart/{cart_item_id}` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartResponse {
    #[serde(default)]
    pub success: bool,
}

/// The server calls the page layer makes.
///
/// Implemented over HTTP by [`crate::HttpStorefrontClient`]; tests substitute
/// in-process fakes.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> CallOutcome<AddToCartResponse>;

    /// Set a cart line's quantity. `0` asks the server to drop the line.
    async fn update_cart_item(
        &self,
        cart_item_id: CartItemId,
        quantity: u64,
    ) -> CallOutcome<UpdateCartResponse>;

    async fn fetch_product(&self, product_id: ProductId) -> CallOutcome<ProductRecord>;
}
