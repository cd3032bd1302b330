//! Submit guard for elements marked `needs-validation`, whatever their tag.

use storefront_dom::{Document, NodeId};

use crate::error::PageResult;

pub const GUARDED_FORM: &str = ".needs-validation";
pub const VALIDATED_CLASS: &str = "was-validated";

/// The cancellable parts of a submit event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// `true` means the browser must not navigate/submit.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVerdict {
    /// Constraints pass; the submission proceeds untouched.
    Valid,
    /// Constraints fail; the event was cancelled.
    Blocked,
}

/// Gate a form submission on native constraint validation.
///
/// Invalid forms get their submit cancelled and propagation stopped. Either
/// way the form is flagged `was-validated` so field feedback renders.
pub fn guard_submit(
    doc: &mut Document,
    form: NodeId,
    event: &mut SubmitEvent,
) -> PageResult<FormVerdict> {
    let verdict = if doc.check_validity(form)? {
        FormVerdict::Valid
    } else {
        event.prevent_default();
        event.stop_propagation();
        FormVerdict::Blocked
    };

    doc.add_class(form, VALIDATED_CLASS)?;
    tracing::debug!(form = %form, ?verdict, "form submit guarded");
    Ok(verdict)
}
