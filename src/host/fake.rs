//! In-memory host for driving the bridge without a browser.
//!
//! `FakeHost` models just enough of the selection/command machinery to
//! exercise every path of the synthesis sequence: a selection made of cloned
//! text snippets, a key→string clipboard, one-shot listeners, and a command
//! policy covering the trusted, untrusted, and throwing host behaviors. Cut
//! is modelled by its clipboard effect only; the fake does not mutate
//! region content.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ClipboardError;
use crate::host::{ClipboardHost, ClipboardPayload, PayloadHandler};
use crate::options::EventKind;

/// How the fake's `exec_command` behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandPolicy {
    /// Dispatch the event and apply the default action: the trusted-gesture
    /// case.
    Permit,
    /// Return `false` without dispatching anything: the untrusted-context
    /// case, where the browser silently ignores the command.
    Reject,
    /// Error out of the command itself.
    Throw,
}

/// A cloned selection range; the fake models a range as the text it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeRange(pub String);

impl FakeRange {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// A selectable content region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeRegion {
    pub content: String,
}

impl FakeRegion {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

struct ArmedListener {
    id: u64,
    kind: EventKind,
    handler: Option<PayloadHandler>,
}

struct Inner {
    ranges: Vec<FakeRange>,
    body: Option<FakeRegion>,
    clipboard: HashMap<String, String>,
    listeners: Vec<ArmedListener>,
    policy: CommandPolicy,
    fire_twice: bool,
    next_listener_id: u64,
    commands: Vec<EventKind>,
    selection_mutations: usize,
    payload_writes: usize,
    selection_at_exec: Option<String>,
}

impl Inner {
    fn new(body: Option<FakeRegion>) -> Self {
        Self {
            ranges: Vec::new(),
            body,
            clipboard: HashMap::new(),
            listeners: Vec::new(),
            policy: CommandPolicy::Permit,
            fire_twice: false,
            next_listener_id: 0,
            commands: Vec::new(),
            selection_mutations: 0,
            payload_writes: 0,
            selection_at_exec: None,
        }
    }

    fn selection_text(&self) -> String {
        self.ranges.iter().map(|range| range.0.as_str()).collect()
    }
}

/// In-memory [`ClipboardHost`] with scriptable command behavior.
///
/// Cloning shares the underlying state, so a test can keep one handle for
/// assertions while the bridge drives another.
#[derive(Clone)]
pub struct FakeHost {
    inner: Rc<RefCell<Inner>>,
}

impl FakeHost {
    /// A host with no document body: `default_region` returns `None`.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::new(None))),
        }
    }

    /// A host whose default region (the "document body") holds `content`.
    pub fn with_body(content: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::new(Some(FakeRegion::new(content))))),
        }
    }

    pub fn set_policy(&self, policy: CommandPolicy) {
        self.inner.borrow_mut().policy = policy;
    }

    /// Make every dispatched event fire twice, like a misbehaving host, to
    /// exercise the at-most-once listener guarantee.
    pub fn set_fire_twice(&self, fire_twice: bool) {
        self.inner.borrow_mut().fire_twice = fire_twice;
    }

    /// The clipboard text written by the last command, if any.
    pub fn clipboard_text(&self) -> Option<String> {
        self.inner.borrow().clipboard.get("text").cloned()
    }

    /// Number of listeners currently registered.
    pub fn armed_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Every command executed so far, in order.
    pub fn executed_commands(&self) -> Vec<EventKind> {
        self.inner.borrow().commands.clone()
    }

    /// How many times the selection has been replaced.
    pub fn selection_mutations(&self) -> usize {
        self.inner.borrow().selection_mutations
    }

    /// How many times a listener wrote into an event payload.
    pub fn payload_writes(&self) -> usize {
        self.inner.borrow().payload_writes
    }

    /// The selection text at the moment the last command ran.
    pub fn selection_at_exec(&self) -> Option<String> {
        self.inner.borrow().selection_at_exec.clone()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        FakeHost::new()
    }
}

impl ClipboardHost for FakeHost {
    type Region = FakeRegion;
    type Range = FakeRange;
    type Listener = FakeListener;

    fn selection_ranges(&self) -> Result<Vec<FakeRange>, ClipboardError> {
        Ok(self.inner.borrow().ranges.clone())
    }

    fn set_selection_ranges(&self, ranges: &[FakeRange]) -> Result<(), ClipboardError> {
        let mut inner = self.inner.borrow_mut();
        inner.ranges = ranges.to_vec();
        inner.selection_mutations += 1;
        Ok(())
    }

    fn select_contents(&self, region: &FakeRegion) -> Result<(), ClipboardError> {
        let mut inner = self.inner.borrow_mut();
        inner.ranges = vec![FakeRange(region.content.clone())];
        inner.selection_mutations += 1;
        Ok(())
    }

    fn default_region(&self) -> Option<FakeRegion> {
        self.inner.borrow().body.clone()
    }

    fn listen_once(
        &self,
        kind: EventKind,
        handler: PayloadHandler,
    ) -> Result<FakeListener, ClipboardError> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push(ArmedListener {
            id,
            kind,
            handler: Some(handler),
        });
        Ok(FakeListener {
            inner: Rc::clone(&self.inner),
            id,
        })
    }

    fn exec_command(&self, kind: EventKind) -> Result<bool, ClipboardError> {
        let (policy, rounds) = {
            let mut inner = self.inner.borrow_mut();
            inner.commands.push(kind);
            inner.selection_at_exec = Some(inner.selection_text());
            (inner.policy, if inner.fire_twice { 2 } else { 1 })
        };

        match policy {
            CommandPolicy::Throw => {
                return Err(ClipboardError::Host("execCommand threw".to_string()))
            }
            CommandPolicy::Reject => return Ok(false),
            CommandPolicy::Permit => {}
        }

        let payload = FakePayload {
            inner: Rc::clone(&self.inner),
            prevented: Cell::new(false),
        };
        for _ in 0..rounds {
            // Handlers are taken out before they run so a handler that
            // touches the host again never sees the cell borrowed, and fired
            // listeners deregister exactly like their DOM counterparts.
            let handlers: Vec<PayloadHandler> = {
                let mut inner = self.inner.borrow_mut();
                let mut taken = Vec::new();
                for listener in inner.listeners.iter_mut() {
                    if listener.kind == kind {
                        if let Some(handler) = listener.handler.take() {
                            taken.push(handler);
                        }
                    }
                }
                inner
                    .listeners
                    .retain(|listener| listener.handler.is_some());
                taken
            };
            for handler in handlers {
                handler(&payload);
            }
        }

        if !payload.prevented.get() {
            let mut inner = self.inner.borrow_mut();
            let text = inner.selection_at_exec.clone().unwrap_or_default();
            inner.clipboard.insert("text".to_string(), text);
        }
        Ok(true)
    }
}

/// Armed fake listener; deregisters on drop if it has not fired.
pub struct FakeListener {
    inner: Rc<RefCell<Inner>>,
    id: u64,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|listener| listener.id != self.id);
    }
}

struct FakePayload {
    inner: Rc<RefCell<Inner>>,
    prevented: Cell<bool>,
}

impl ClipboardPayload for FakePayload {
    fn set_data(&self, format: &str, text: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.clipboard.insert(format.to_string(), text.to_string());
        inner.payload_writes += 1;
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_action_copies_selection() {
        let host = FakeHost::new();
        host.select_contents(&FakeRegion::new("selected")).unwrap();
        assert!(host.exec_command(EventKind::Copy).unwrap());
        assert_eq!(host.clipboard_text(), Some("selected".to_string()));
        assert_eq!(host.executed_commands(), vec![EventKind::Copy]);
    }

    #[test]
    fn test_reject_policy_skips_dispatch() {
        let host = FakeHost::new();
        host.select_contents(&FakeRegion::new("selected")).unwrap();
        host.set_policy(CommandPolicy::Reject);
        assert!(!host.exec_command(EventKind::Copy).unwrap());
        assert_eq!(host.clipboard_text(), None);
    }

    #[test]
    fn test_throw_policy_errors() {
        let host = FakeHost::new();
        host.set_policy(CommandPolicy::Throw);
        let err = host.exec_command(EventKind::Cut).unwrap_err();
        assert!(matches!(err, ClipboardError::Host(_)));
    }

    #[test]
    fn test_listener_guard_deregisters_on_drop() {
        let host = FakeHost::new();
        let listener = host
            .listen_once(EventKind::Copy, Box::new(|_: &dyn ClipboardPayload| {}))
            .unwrap();
        assert_eq!(host.armed_listeners(), 1);
        drop(listener);
        assert_eq!(host.armed_listeners(), 0);
    }

    #[test]
    fn test_fired_listener_deregisters_itself() {
        let host = FakeHost::new();
        let _listener = host
            .listen_once(
                EventKind::Copy,
                Box::new(|payload: &dyn ClipboardPayload| payload.set_data("text", "injected")),
            )
            .unwrap();
        host.exec_command(EventKind::Copy).unwrap();
        assert_eq!(host.armed_listeners(), 0);
        assert_eq!(host.payload_writes(), 1);
    }
}
