//! Clipboard copy/cut for browser apps, without the async clipboard API.
//!
//! Browsers only honor clipboard commands inside a trusted user gesture, and
//! the permission-gated async API is not available everywhere. This crate
//! takes the classic route instead: select the content to copy, run the
//! native `copy`/`cut` command, and restore whatever the user had selected
//! before. When literal text is supplied, a one-shot listener intercepts the
//! in-flight event and places that text on the clipboard directly.
//!
//! Call [`synthesize`] (or [`copy_plain_text`]) from an input event handler:
//!
//! ```no_run
//! use clipboard_bridge::{copy_plain_text, synthesize, EventKind, EventOptions};
//!
//! fn copy_invoice(invoice: &str) {
//!     if let Err(e) = copy_plain_text(invoice) {
//!         log::error!("failed to copy invoice: {}", e);
//!     }
//! }
//!
//! fn cut_draft(draft: web_sys::Node) {
//!     let result = synthesize(EventOptions {
//!         kind: EventKind::Cut,
//!         target: Some(draft),
//!         ..Default::default()
//!     });
//!     if let Err(e) = result {
//!         log::error!("failed to cut draft: {}", e);
//!     }
//! }
//! ```
//!
//! Paste cannot be synthesized; asking for it is a usage error.
//!
//! The synthesis engine is generic over a [`ClipboardHost`], so code built on
//! it can run against [`FakeHost`](host::fake::FakeHost) in ordinary unit
//! tests (enable the `testing` feature) instead of a real DOM.

mod bridge;
mod error;
pub mod host;
mod options;

pub use bridge::{copy_plain_text, copy_plain_text_on, synthesize, synthesize_on};
pub use error::ClipboardError;
pub use host::{ClipboardHost, ClipboardPayload, DomHost, PayloadHandler};
pub use options::{EventKind, EventOptions};

#[cfg(any(test, feature = "testing"))]
pub use host::{CommandPolicy, FakeHost, FakeRange, FakeRegion};
