//! Host capability interface for the clipboard bridge.
//!
//! The browser's live selection, command execution, and event registration
//! are global mutable state. The bridge reaches them only through
//! [`ClipboardHost`], so the save/select/execute/restore sequence can be
//! driven against an in-memory fake in unit tests and against the real DOM
//! in a browser.

pub mod dom;
#[cfg(any(test, feature = "testing"))]
pub mod fake;

pub use dom::DomHost;
#[cfg(any(test, feature = "testing"))]
pub use fake::{CommandPolicy, FakeHost, FakeRange, FakeRegion};

use crate::error::ClipboardError;
use crate::options::EventKind;

/// Single-use callback run against the payload of an in-flight clipboard
/// event.
pub type PayloadHandler = Box<dyn FnOnce(&dyn ClipboardPayload)>;

/// Mutable payload of a clipboard event that is currently dispatching.
pub trait ClipboardPayload {
    /// Write `text` under `format` into the event's clipboard data.
    fn set_data(&self, format: &str, text: &str);

    /// Suppress the event's default action, which would otherwise place the
    /// selected content on the clipboard instead of whatever
    /// [`set_data`](ClipboardPayload::set_data) wrote.
    fn prevent_default(&self);
}

/// Narrow capability interface over the host's selection and clipboard
/// command machinery.
///
/// Implementations are single-threaded and synchronous: every method
/// completes before returning, and [`exec_command`] dispatches the resulting
/// event to armed listeners before it returns.
///
/// [`exec_command`]: ClipboardHost::exec_command
pub trait ClipboardHost {
    /// A region of content whose descendants can be selected.
    type Region;
    /// An independently owned selection range.
    type Range: Clone;
    /// Guard for an armed listener. Dropping it unregisters the listener if
    /// it has not fired; after firing the drop is a no-op.
    type Listener;

    /// Snapshot the live selection as cloned ranges, in order. The live
    /// selection object is mutable shared state, so no alias of it may leave
    /// this method.
    fn selection_ranges(&self) -> Result<Vec<Self::Range>, ClipboardError>;

    /// Replace the live selection with `ranges`, in order. An empty slice
    /// clears the selection.
    fn set_selection_ranges(&self, ranges: &[Self::Range]) -> Result<(), ClipboardError>;

    /// Replace the live selection with the full contents of `region`. An
    /// empty region yields an empty selection, not an error.
    fn select_contents(&self, region: &Self::Region) -> Result<(), ClipboardError>;

    /// The region used when the caller does not name one: the document body
    /// in a browser. `None` when the host has no such region.
    fn default_region(&self) -> Option<Self::Region>;

    /// Arm a single-shot listener for `kind` events. The handler runs at
    /// most once, however often the host dispatches.
    fn listen_once(
        &self,
        kind: EventKind,
        handler: PayloadHandler,
    ) -> Result<Self::Listener, ClipboardError>;

    /// Execute the host's native clipboard command, synchronously firing the
    /// corresponding event. `Ok(false)` means the host refused the command
    /// (typically because the call did not originate from a user gesture)
    /// and is not an error: the host gives no better signal.
    fn exec_command(&self, kind: EventKind) -> Result<bool, ClipboardError>;
}
