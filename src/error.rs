use std::fmt;

use crate::options::EventKind;

/// Error type for clipboard bridge operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// The requested event kind cannot be synthesized. Browsers refuse to
    /// generate paste events, so the bridge fails fast instead of running a
    /// command that can only no-op.
    UnsupportedKind(EventKind),
    /// Neither literal text nor a target region was supplied, so there is
    /// nothing to put on the clipboard.
    MissingContent,
    /// A string did not name a clipboard event kind.
    UnknownKind(String),
    /// A host primitive failed.
    Host(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClipboardError::UnsupportedKind(kind) => {
                write!(f, "{} events cannot be synthesized", kind)
            }
            ClipboardError::MissingContent => {
                write!(f, "must specify either a target region or text to put on the clipboard")
            }
            ClipboardError::UnknownKind(s) => write!(f, "unknown clipboard event kind: {}", s),
            ClipboardError::Host(msg) => write!(f, "clipboard host error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}
