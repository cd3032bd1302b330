//! The one document every handler on a page shares.

use std::sync::{Arc, Mutex};

use storefront_dom::Document;

use crate::error::{PageError, PageResult};

/// Shared handle to the page's [`Document`].
///
/// Access goes through closures so a lock is never held across an `.await`:
/// async actions read the DOM, release it, await the network, then lock
/// again to apply the result.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(Arc<Mutex<Document>>);

impl SharedDocument {
    pub fn new(doc: Document) -> Self {
        Self(Arc::new(Mutex::new(doc)))
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> PageResult<R> {
        let guard = self.0.lock().map_err(|_| PageError::Poisoned)?;
        Ok(f(&guard))
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> PageResult<R> {
        let mut guard = self.0.lock().map_err(|_| PageError::Poisoned)?;
        Ok(f(&mut guard))
    }
}

impl From<Document> for SharedDocument {
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}
