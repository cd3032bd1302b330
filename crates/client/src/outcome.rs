//! Explicit result of one storefront call.

/// What happened to a request, as far as the page is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    /// 2xx with a body that decoded into `T`.
    Success(T),
    /// The request never produced a usable reply: connection failure,
    /// timeout, or a body that was not the expected JSON.
    TransportError(String),
    /// The server answered with a non-2xx status.
    ServerError { status: u16, body: String },
}

impl<T> CallOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            Self::Success(value) => CallOutcome::Success(f(value)),
            Self::TransportError(msg) => CallOutcome::TransportError(msg),
            Self::ServerError { status, body } => CallOutcome::ServerError { status, body },
        }
    }

    /// Worth another attempt under a retry policy: transport failures and
    /// 5xx replies.
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            Self::Success(_) => false,
            Self::TransportError(_) => true,
            Self::ServerError { status, .. } => *status >= 500,
        }
    }
}
