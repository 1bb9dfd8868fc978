//! Clipboard event synthesis.
//!
//! The sequence is the same for every host: save the live selection, select
//! the target region, optionally arm a one-shot interceptor that swaps in
//! literal text, run the native command, and put the saved selection back.
//! The last step runs unconditionally: it lives in a drop guard, so early
//! returns and host errors cannot skip it.

use crate::error::ClipboardError;
use crate::host::dom::DomHost;
use crate::host::{ClipboardHost, ClipboardPayload};
use crate::options::{EventKind, EventOptions};

/// Payload format the injected text is written under; hosts treat `"text"`
/// as plain text.
const TEXT_FORMAT: &str = "text";

/// Synthesize a clipboard event in the current browser window.
///
/// Selects the target region (the whole document body when none is given),
/// executes the native command for `options.kind`, and restores the user's
/// selection afterwards. When `options.text` is set, a one-shot listener
/// intercepts the resulting event and places that text on the clipboard
/// instead of the selected content.
///
/// # Notes
/// This can only be called in response to a user input event (click,
/// keypress): outside a trusted gesture the browser ignores the command
/// without signalling, and no error is returned. Paste events cannot be
/// synthesized. At least one of `text` and `target` must be supplied.
pub fn synthesize(options: EventOptions) -> Result<(), ClipboardError> {
    synthesize_on(&DomHost::new()?, options)
}

/// Put `text` on the clipboard via a synthesized `copy` event.
///
/// Convenience over [`synthesize`]: a `copy` against the document body with
/// `text` injected into the event payload.
pub fn copy_plain_text(text: &str) -> Result<(), ClipboardError> {
    copy_plain_text_on(&DomHost::new()?, text)
}

/// [`synthesize`] against an explicit host.
///
/// This is the whole engine; [`synthesize`] merely binds it to the browser
/// DOM. Driving it with a fake host is the supported way to unit test code
/// built on the bridge.
pub fn synthesize_on<H: ClipboardHost>(
    host: &H,
    options: EventOptions<H::Region>,
) -> Result<(), ClipboardError> {
    let EventOptions {
        kind,
        text,
        target,
        intercept,
    } = options;

    if !matches!(kind, EventKind::Copy | EventKind::Cut) {
        return Err(ClipboardError::UnsupportedKind(kind));
    }
    if text.is_none() && target.is_none() {
        return Err(ClipboardError::MissingContent);
    }

    log::debug!(
        "synthesizing {} event (text: {}, explicit target: {})",
        kind,
        text.is_some(),
        target.is_some()
    );

    // Capture before anything is touched; from here on the guard owns
    // putting the selection back, no matter how this call exits.
    let saved = host.selection_ranges()?;
    let _restore = RestoreSelection { host, ranges: saved };

    match target.or_else(|| host.default_region()) {
        Some(region) => host.select_contents(&region)?,
        None => {
            log::warn!("no target region available; running {} against an empty selection", kind);
            host.set_selection_ranges(&[])?;
        }
    }

    let _listener = match text {
        Some(text) => {
            let listen_kind = intercept.unwrap_or(kind);
            Some(host.listen_once(
                listen_kind,
                Box::new(move |payload: &dyn ClipboardPayload| {
                    payload.set_data(TEXT_FORMAT, &text);
                    payload.prevent_default();
                }),
            )?)
        }
        None => None,
    };

    if !host.exec_command(kind)? {
        // The host gives no better signal than `false`; outside a trusted
        // user gesture this is the expected silent refusal.
        log::debug!("{} command ignored by the host", kind);
    }

    // `_listener` drops first, disarming an unfired interceptor; `_restore`
    // then reinstates the saved ranges.
    Ok(())
}

/// [`copy_plain_text`] against an explicit host.
pub fn copy_plain_text_on<H: ClipboardHost>(host: &H, text: &str) -> Result<(), ClipboardError> {
    synthesize_on(
        host,
        EventOptions {
            kind: EventKind::Copy,
            text: Some(text.to_string()),
            target: None,
            intercept: None,
        },
    )
}

/// Puts the captured selection back when the call scope exits, success or
/// not; the `finally` of the synthesis sequence.
struct RestoreSelection<'a, H: ClipboardHost> {
    host: &'a H,
    ranges: Vec<H::Range>,
}

impl<H: ClipboardHost> Drop for RestoreSelection<'_, H> {
    fn drop(&mut self) {
        match self.host.set_selection_ranges(&self.ranges) {
            Ok(()) => log::debug!("restored {} selection range(s)", self.ranges.len()),
            Err(e) => log::warn!("failed to restore selection: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{CommandPolicy, FakeHost, FakeRange, FakeRegion};

    fn copy_with_text(text: &str) -> EventOptions<FakeRegion> {
        EventOptions {
            kind: EventKind::Copy,
            text: Some(text.to_string()),
            target: None,
            intercept: None,
        }
    }

    fn copy_of_region(content: &str) -> EventOptions<FakeRegion> {
        EventOptions {
            kind: EventKind::Copy,
            text: None,
            target: Some(FakeRegion::new(content)),
            intercept: None,
        }
    }

    #[test]
    fn test_selection_restored_after_copy() {
        let host = FakeHost::with_body("body text");
        let initial = vec![FakeRange::new("first"), FakeRange::new("second")];
        host.set_selection_ranges(&initial).unwrap();

        synthesize_on(&host, copy_of_region("region text")).unwrap();

        assert_eq!(host.selection_ranges().unwrap(), initial);
    }

    #[test]
    fn test_selection_restored_when_command_throws() {
        let host = FakeHost::with_body("body text");
        let initial = vec![FakeRange::new("kept")];
        host.set_selection_ranges(&initial).unwrap();
        host.set_policy(CommandPolicy::Throw);

        let err = synthesize_on(&host, copy_with_text("x")).unwrap_err();

        assert!(matches!(err, ClipboardError::Host(_)));
        assert_eq!(host.selection_ranges().unwrap(), initial);
    }

    #[test]
    fn test_selection_restored_when_host_rejects() {
        let host = FakeHost::with_body("body text");
        let initial = vec![FakeRange::new("kept")];
        host.set_selection_ranges(&initial).unwrap();
        host.set_policy(CommandPolicy::Reject);

        synthesize_on(&host, copy_with_text("x")).unwrap();

        assert_eq!(host.selection_ranges().unwrap(), initial);
        assert_eq!(host.clipboard_text(), None);
        assert_eq!(host.armed_listeners(), 0);
    }

    #[test]
    fn test_paste_is_rejected_up_front() {
        let host = FakeHost::with_body("body text");
        host.set_selection_ranges(&[FakeRange::new("kept")]).unwrap();
        let mutations_before = host.selection_mutations();

        let err = synthesize_on(
            &host,
            EventOptions {
                kind: EventKind::Paste,
                text: Some("x".to_string()),
                target: None,
                intercept: None,
            },
        )
        .unwrap_err();

        assert!(matches!(err, ClipboardError::UnsupportedKind(EventKind::Paste)));
        assert_eq!(host.selection_mutations(), mutations_before);
        assert!(host.executed_commands().is_empty());
    }

    #[test]
    fn test_missing_text_and_target_rejected() {
        let host = FakeHost::with_body("body text");

        let err = synthesize_on(
            &host,
            EventOptions {
                kind: EventKind::Copy,
                text: None,
                target: None,
                intercept: None,
            },
        )
        .unwrap_err();

        assert!(matches!(err, ClipboardError::MissingContent));
        assert_eq!(host.selection_mutations(), 0);
        assert!(host.executed_commands().is_empty());
    }

    #[test]
    fn test_text_overrides_region_content() {
        let host = FakeHost::with_body("body text");

        synthesize_on(
            &host,
            EventOptions {
                kind: EventKind::Copy,
                text: Some("override".to_string()),
                target: Some(FakeRegion::new("region text")),
                intercept: None,
            },
        )
        .unwrap();

        assert_eq!(host.clipboard_text(), Some("override".to_string()));
        assert_eq!(host.payload_writes(), 1);
    }

    #[test]
    fn test_region_content_copied_without_text() {
        let host = FakeHost::with_body("body text");

        synthesize_on(&host, copy_of_region("region text")).unwrap();

        assert_eq!(host.clipboard_text(), Some("region text".to_string()));
        assert_eq!(host.armed_listeners(), 0);
        assert_eq!(host.payload_writes(), 0);
    }

    #[test]
    fn test_default_target_is_body() {
        let host = FakeHost::with_body("body text");

        synthesize_on(&host, copy_with_text("hello")).unwrap();

        assert_eq!(host.selection_at_exec(), Some("body text".to_string()));
        assert_eq!(host.clipboard_text(), Some("hello".to_string()));
    }

    #[test]
    fn test_missing_body_runs_on_empty_selection() {
        let host = FakeHost::new();
        let initial = vec![FakeRange::new("kept")];
        host.set_selection_ranges(&initial).unwrap();

        synthesize_on(&host, copy_with_text("hello")).unwrap();

        assert_eq!(host.selection_at_exec(), Some(String::new()));
        assert_eq!(host.clipboard_text(), Some("hello".to_string()));
        assert_eq!(host.selection_ranges().unwrap(), initial);
    }

    #[test]
    fn test_listener_removed_after_firing() {
        let host = FakeHost::with_body("body text");

        synthesize_on(&host, copy_with_text("hello")).unwrap();

        assert_eq!(host.armed_listeners(), 0);
        assert_eq!(host.payload_writes(), 1);
    }

    #[test]
    fn test_listener_fires_at_most_once() {
        let host = FakeHost::with_body("body text");
        host.set_fire_twice(true);

        synthesize_on(&host, copy_with_text("hello")).unwrap();

        assert_eq!(host.payload_writes(), 1);
        assert_eq!(host.clipboard_text(), Some("hello".to_string()));
    }

    #[test]
    fn test_intercept_defaults_to_command_kind() {
        let host = FakeHost::with_body("body text");

        synthesize_on(
            &host,
            EventOptions {
                kind: EventKind::Cut,
                text: Some("override".to_string()),
                target: Some(FakeRegion::new("region text")),
                intercept: None,
            },
        )
        .unwrap();

        // The listener was armed for `cut`, so it intercepted the cut event.
        assert_eq!(host.executed_commands(), vec![EventKind::Cut]);
        assert_eq!(host.clipboard_text(), Some("override".to_string()));
    }

    #[test]
    fn test_explicit_copy_intercept_under_cut() {
        let host = FakeHost::with_body("body text");

        synthesize_on(
            &host,
            EventOptions {
                kind: EventKind::Cut,
                text: Some("override".to_string()),
                target: Some(FakeRegion::new("region text")),
                intercept: Some(EventKind::Copy),
            },
        )
        .unwrap();

        // No copy event ever fired, so the cut's default action won and the
        // unfired listener was disarmed on the way out.
        assert_eq!(host.clipboard_text(), Some("region text".to_string()));
        assert_eq!(host.payload_writes(), 0);
        assert_eq!(host.armed_listeners(), 0);
    }

    #[test]
    fn test_copy_plain_text_delegates() {
        let via_convenience = FakeHost::with_body("body text");
        let via_options = FakeHost::with_body("body text");
        let initial = vec![FakeRange::new("kept")];
        via_convenience.set_selection_ranges(&initial).unwrap();
        via_options.set_selection_ranges(&initial).unwrap();

        copy_plain_text_on(&via_convenience, "foo").unwrap();
        synthesize_on(&via_options, copy_with_text("foo")).unwrap();

        assert_eq!(via_convenience.clipboard_text(), via_options.clipboard_text());
        assert_eq!(via_convenience.clipboard_text(), Some("foo".to_string()));
        assert_eq!(
            via_convenience.selection_at_exec(),
            via_options.selection_at_exec()
        );
        assert_eq!(via_convenience.selection_ranges().unwrap(), initial);
        assert_eq!(via_options.selection_ranges().unwrap(), initial);
    }
}
