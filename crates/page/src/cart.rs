//! Cart actions: add to cart, change a cart line.

use std::sync::Arc;

use storefront_client::{CallOutcome, StorefrontApi};
use storefront_core::{CartItemId, ProductId, Quantity};

use crate::error::PageResult;
use crate::notify::{Notifier, Severity};
use crate::reload::PageReloader;
use crate::shared::SharedDocument;

pub const CART_COUNT: &str = ".cart-count";

pub const MSG_ADDED: &str = "Product added to cart!";
pub const MSG_ADD_REJECTED: &str = "Could not add product to cart";
pub const MSG_ADD_FAILED: &str = "Error adding product to cart";
pub const MSG_UPDATE_FAILED: &str = "Error updating cart";

/// How a server-backed action ended, after its effects were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the change and the page reflects it.
    Applied,
    /// The server replied but declined (`success: false`).
    Rejected,
    /// No usable reply (transport failure or non-2xx).
    Failed,
}

/// Cart mutations. One request per call: no retry beyond what the client's
/// policy does, so duplicate clicks send duplicate requests.
#[derive(Clone)]
pub struct CartActions {
    api: Arc<dyn StorefrontApi>,
    doc: SharedDocument,
    notifier: Notifier,
    reloader: Arc<dyn PageReloader>,
}

impl CartActions {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        doc: SharedDocument,
        notifier: Notifier,
        reloader: Arc<dyn PageReloader>,
    ) -> Self {
        Self {
            api,
            doc,
            notifier,
            reloader,
        }
    }

    /// Add `quantity` of a product and sync the cart badge with the server's count.
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> PageResult<ActionOutcome> {
        tracing::info!(product_id = %product_id, quantity = %quantity, "adding to cart");

        match self.api.add_to_cart(product_id, quantity).await {
            CallOutcome::Success(resp) if resp.success => {
                if let Some(count) = resp.cart_count {
                    self.set_cart_count(count)?;
                }
                self.notifier.show(MSG_ADDED, Severity::Success)?;
                Ok(ActionOutcome::Applied)
            }
            CallOutcome::Success(_) => {
                tracing::warn!(product_id = %product_id, "server declined add to cart");
                self.notifier.show(MSG_ADD_REJECTED, Severity::Error)?;
                Ok(ActionOutcome::Rejected)
            }
            failure => {
                log_failure("add_to_cart", &failure);
                self.notifier.show(MSG_ADD_FAILED, Severity::Error)?;
                Ok(ActionOutcome::Failed)
            }
        }
    }

    /// Set a cart line's quantity (`0` removes it), then reload the page so
    /// every total is re-rendered by the server.
    pub async fn update_cart_item(
        &self,
        cart_item_id: CartItemId,
        quantity: u64,
    ) -> PageResult<ActionOutcome> {
        tracing::info!(cart_item_id = %cart_item_id, quantity, "updating cart item");

        match self.api.update_cart_item(cart_item_id, quantity).await {
            CallOutcome::Success(resp) if resp.success => {
                self.reloader.reload();
                Ok(ActionOutcome::Applied)
            }
            CallOutcome::Success(_) => {
                tracing::warn!(cart_item_id = %cart_item_id, "server declined cart update");
                self.notifier.show(MSG_UPDATE_FAILED, Severity::Error)?;
                Ok(ActionOutcome::Rejected)
            }
            failure => {
                log_failure("update_cart_item", &failure);
                self.notifier.show(MSG_UPDATE_FAILED, Severity::Error)?;
                Ok(ActionOutcome::Failed)
            }
        }
    }

    /// Overwrite the cart badge with the server's count. No badge, no-op.
    fn set_cart_count(&self, count: u64) -> PageResult<()> {
        self.doc.write(|doc| {
            if let Some(badge) = doc.query_selector(doc.root(), CART_COUNT)? {
                doc.set_text_content(badge, &count.to_string())?;
            }
            Ok(())
        })?
    }
}

pub(crate) fn log_failure<T>(call: &str, outcome: &CallOutcome<T>) {
    match outcome {
        CallOutcome::TransportError(msg) => {
            tracing::error!(call, error = msg.as_str(), "storefront call failed");
        }
        CallOutcome::ServerError { status, body } => {
            tracing::error!(call, status, body = body.as_str(), "storefront call rejected");
        }
        CallOutcome::Success(_) => {}
    }
}
