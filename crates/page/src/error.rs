use thiserror::Error;

use storefront_dom::{DomError, NodeId};

pub type PageResult<T> = Result<T, PageError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The markup contract was not met (e.g. a stepper with no input).
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("no quantity input next to stepper button {0}")]
    NoQuantityInput(NodeId),

    /// A handler panicked while holding the shared document.
    #[error("document lock poisoned")]
    Poisoned,

    /// Timers need a tokio runtime to be scheduled on.
    #[error("no async runtime available to schedule {0}")]
    NoRuntime(&'static str),
}
