//! Admin product dialogs.

use std::sync::Arc;

use storefront_catalog::ProductRecord;
use storefront_client::{CallOutcome, StorefrontApi};
use storefront_core::ProductId;

use crate::cart::{ActionOutcome, log_failure};
use crate::error::PageResult;
use crate::modal::ModalHost;
use crate::notify::{Notifier, Severity};
use crate::shared::SharedDocument;

pub const ADD_PRODUCT_MODAL: &str = "addProductModal";
pub const EDIT_PRODUCT_MODAL: &str = "editProductModal";

pub const MSG_LOAD_FAILED: &str = "Error loading product";

#[derive(Clone)]
pub struct AdminActions {
    api: Arc<dyn StorefrontApi>,
    doc: SharedDocument,
    modals: Arc<dyn ModalHost>,
    notifier: Notifier,
}

impl AdminActions {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        doc: SharedDocument,
        modals: Arc<dyn ModalHost>,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            doc,
            modals,
            notifier,
        }
    }

    pub fn show_add_product_modal(&self) -> PageResult<()> {
        self.modals.open(ADD_PRODUCT_MODAL)
    }

    /// Load a product into the edit form and open the edit dialog.
    ///
    /// The dialog only opens once the form holds the fetched values.
    pub async fn edit_product(&self, product_id: ProductId) -> PageResult<ActionOutcome> {
        tracing::info!(product_id = %product_id, "loading product for edit");

        let record = match self.api.fetch_product(product_id).await {
            CallOutcome::Success(record) => record,
            failure => {
                log_failure("fetch_product", &failure);
                self.notifier.show(MSG_LOAD_FAILED, Severity::Error)?;
                return Ok(ActionOutcome::Failed);
            }
        };

        self.fill_edit_form(&record)?;
        self.modals.open(EDIT_PRODUCT_MODAL)?;
        Ok(ActionOutcome::Applied)
    }

    fn fill_edit_form(&self, record: &ProductRecord) -> PageResult<()> {
        self.doc.write(|doc| {
            for (field, text) in record.form_values() {
                match doc.get_element_by_id(field) {
                    Some(input) => doc.set_value(input, &text)?,
                    None => tracing::warn!(field, "edit form field missing; skipped"),
                }
            }
            Ok(())
        })?
    }
}
