//! Transient toast notifications.

use std::time::Duration;

use storefront_dom::{Document, ElementSpec, NodeId};

use crate::error::{PageError, PageResult};
use crate::shared::SharedDocument;

pub const DISMISS_TRIGGER: &str = "[data-bs-dismiss=\"alert\"]";
const BANNER_STYLE: &[(&str, &str)] = &[
    ("top", "20px"),
    ("right", "20px"),
    ("z-index", "1050"),
    ("min-width", "300px"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates dismissible banners that remove themselves after a delay.
///
/// Banners are independent: several can be up at once, each with its own
/// removal timer.
#[derive(Debug, Clone)]
pub struct Notifier {
    doc: SharedDocument,
    ttl: Duration,
}

impl Notifier {
    pub fn new(doc: SharedDocument, ttl: Duration) -> Self {
        Self { doc, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a banner to the body and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str, severity: Severity) -> PageResult<NodeId> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| PageError::NoRuntime("notification removal"))?;

        let banner = self.doc.write(|doc| append_banner(doc, message, severity))??;
        tracing::info!(severity = %severity, text = message, "notification shown");

        let doc = self.doc.clone();
        let ttl = self.ttl;
        runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            let removed = doc.write(|doc| {
                // Already dismissed by hand: nothing to detach.
                if doc.parent(banner).is_none() {
                    return false;
                }
                doc.remove(banner).unwrap_or(false)
            });
            match removed {
                Ok(true) => tracing::debug!(banner = %banner, "notification expired"),
                Ok(false) => {}
                Err(e) => tracing::warn!(banner = %banner, error = %e, "notification removal skipped"),
            }
        });

        Ok(banner)
    }
}

fn append_banner(doc: &mut Document, message: &str, severity: Severity) -> PageResult<NodeId> {
    let body = doc.body();
    let banner = doc.append(
        body,
        ElementSpec::new("div")
            .class(&format!(
                "alert alert-{severity} alert-dismissible fade show position-fixed"
            ))
            .attr("role", "alert")
            .text(message)
            .child(
                ElementSpec::new("button")
                    .attr("type", "button")
                    .class("btn-close")
                    .attr("data-bs-dismiss", "alert"),
            ),
    )?;
    for (property, value) in BANNER_STYLE {
        doc.set_style(banner, property, value)?;
    }
    Ok(banner)
}

/// Close the banner enclosing a clicked `data-bs-dismiss="alert"` control.
///
/// Returns `false` when `trigger` is not a dismiss control or its banner is
/// already gone.
pub fn dismiss(doc: &mut Document, trigger: NodeId) -> PageResult<bool> {
    if !doc.matches(trigger, DISMISS_TRIGGER)? {
        return Ok(false);
    }
    let Some(banner) = doc.closest(trigger, ".alert")? else {
        return Ok(false);
    };
    let removed = doc.remove(banner)?;
    if removed {
        tracing::debug!(banner = %banner, "notification dismissed");
    }
    Ok(removed)
}
