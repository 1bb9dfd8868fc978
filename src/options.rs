use std::fmt;
use std::str::FromStr;

use crate::error::ClipboardError;

/// The clipboard event vocabulary.
///
/// `Paste` is part of the vocabulary so that a paste request can be rejected
/// explicitly: browsers never allow paste to be synthesized, and
/// [`synthesize`](crate::synthesize) fails fast on it rather than running a
/// command that silently does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Copy,
    Cut,
    Paste,
}

impl EventKind {
    /// The DOM event type string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Copy => "copy",
            EventKind::Cut => "cut",
            EventKind::Paste => "paste",
        }
    }
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Copy
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ClipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(EventKind::Copy),
            "cut" => Ok(EventKind::Cut),
            "paste" => Ok(EventKind::Paste),
            other => Err(ClipboardError::UnknownKind(other.to_string())),
        }
    }
}

/// Options for a synthesized clipboard event.
///
/// `R` is the host's content-region type; in a browser that is
/// [`web_sys::Node`], which is why it is the default.
///
/// At least one of `text` and `target` must be supplied. Everything else has
/// a working default, so call sites usually spell only the fields they care
/// about:
///
/// ```no_run
/// use clipboard_bridge::{synthesize, EventOptions};
///
/// synthesize(EventOptions {
///     text: Some("hello".to_string()),
///     ..Default::default()
/// })?;
/// # Ok::<(), clipboard_bridge::ClipboardError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EventOptions<R = web_sys::Node> {
    /// The kind of event to synthesize: `Copy` (the default) or `Cut`.
    pub kind: EventKind,
    /// Literal text to place on the clipboard instead of the selected
    /// region's content.
    pub text: Option<String>,
    /// The content region to select before the command runs; `None` selects
    /// the whole document body.
    pub target: Option<R>,
    /// Which event kind the text-injection listener subscribes to. `None`
    /// follows `kind`, which is what callers want unless they are deliberately
    /// arming a `copy` interceptor under a `cut` command.
    pub intercept: Option<EventKind>,
}

impl<R> Default for EventOptions<R> {
    fn default() -> Self {
        Self {
            kind: EventKind::default(),
            text: None,
            target: None,
            intercept: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(EventKind::Copy.as_str(), "copy");
        assert_eq!(EventKind::Cut.as_str(), "cut");
        assert_eq!(EventKind::Paste.as_str(), "paste");
        assert_eq!(EventKind::Cut.to_string(), "cut");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("copy".parse::<EventKind>().unwrap(), EventKind::Copy);
        assert_eq!("cut".parse::<EventKind>().unwrap(), EventKind::Cut);
        assert_eq!("paste".parse::<EventKind>().unwrap(), EventKind::Paste);

        let err = "move".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, ClipboardError::UnknownKind(ref s) if s == "move"));
    }

    #[test]
    fn test_default_options() {
        let options: EventOptions<String> = EventOptions::default();
        assert_eq!(options.kind, EventKind::Copy);
        assert!(options.text.is_none());
        assert!(options.target.is_none());
        assert!(options.intercept.is_none());
    }
}
