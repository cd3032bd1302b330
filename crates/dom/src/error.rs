use thiserror::Error;

use crate::document::NodeId;

pub type DomResult<T> = Result<T, DomError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// Tree mutation that would create a cycle or re-parent the root.
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),
}
