//! Modal dialogs as an injected capability.

use storefront_dom::{Document, NodeId};

use crate::error::{PageError, PageResult};
use crate::shared::SharedDocument;

/// Opens and closes named dialogs.
pub trait ModalHost: Send + Sync {
    fn open(&self, name: &str) -> PageResult<()>;
    fn close(&self, name: &str) -> PageResult<()>;
}

/// Drives dialogs that already exist in the page markup, addressed by id,
/// the way the Bootstrap modal plugin toggles them.
#[derive(Debug, Clone)]
pub struct DomModalHost {
    doc: SharedDocument,
}

impl DomModalHost {
    pub fn new(doc: SharedDocument) -> Self {
        Self { doc }
    }

    /// Whether the named dialog is currently shown.
    pub fn is_open(&self, name: &str) -> PageResult<bool> {
        self.doc.read(|doc| {
            let dialog = find(doc, name)?;
            Ok(doc.has_class(dialog, "show")?)
        })?
    }
}

fn find(doc: &Document, name: &str) -> PageResult<NodeId> {
    doc.get_element_by_id(name)
        .ok_or_else(|| PageError::MissingElement(format!("#{name}")))
}

impl ModalHost for DomModalHost {
    fn open(&self, name: &str) -> PageResult<()> {
        self.doc.write(|doc| {
            let dialog = find(doc, name)?;
            doc.add_class(dialog, "show")?;
            doc.set_style(dialog, "display", "block")?;
            doc.set_attr(dialog, "aria-modal", "true")?;
            doc.remove_attr(dialog, "aria-hidden")?;
            let body = doc.body();
            doc.add_class(body, "modal-open")?;
            tracing::debug!(modal = name, "modal opened");
            Ok(())
        })?
    }

    fn close(&self, name: &str) -> PageResult<()> {
        self.doc.write(|doc| {
            let dialog = find(doc, name)?;
            doc.remove_class(dialog, "show")?;
            doc.set_style(dialog, "display", "none")?;
            doc.set_attr(dialog, "aria-hidden", "true")?;
            doc.remove_attr(dialog, "aria-modal")?;
            let body = doc.body();
            doc.remove_class(body, "modal-open")?;
            tracing::debug!(modal = name, "modal closed");
            Ok(())
        })?
    }
}
