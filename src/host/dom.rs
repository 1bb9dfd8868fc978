//! Browser implementation of the host capabilities, backed by web-sys.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::ClipboardError;
use crate::host::{ClipboardHost, ClipboardPayload, PayloadHandler};
use crate::options::EventKind;

type ClosureSlot = Rc<RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>>>;

fn js_error(context: &str, err: JsValue) -> ClipboardError {
    // Thrown values are usually Error objects; fall back to the raw value
    // for anything else.
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", err));
    ClipboardError::Host(format!("{}: {}", context, detail))
}

/// Clipboard host backed by the browser DOM.
///
/// Only meaningful on `wasm32-unknown-unknown` inside a window; constructing
/// one anywhere else fails with [`ClipboardError::Host`].
pub struct DomHost {
    document: web_sys::HtmlDocument,
    selection: web_sys::Selection,
}

impl DomHost {
    /// Bind to the current window's document and selection object.
    pub fn new() -> Result<Self, ClipboardError> {
        let window =
            web_sys::window().ok_or_else(|| ClipboardError::Host("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ClipboardError::Host("no document".to_string()))?
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| ClipboardError::Host("document is not an HTML document".to_string()))?;
        let selection = window
            .get_selection()
            .map_err(|e| js_error("getSelection failed", e))?
            .ok_or_else(|| ClipboardError::Host("no selection object".to_string()))?;
        Ok(Self {
            document,
            selection,
        })
    }
}

impl ClipboardHost for DomHost {
    type Region = web_sys::Node;
    type Range = web_sys::Range;
    type Listener = DomListener;

    fn selection_ranges(&self) -> Result<Vec<web_sys::Range>, ClipboardError> {
        let count = self.selection.range_count();
        let mut ranges = Vec::with_capacity(count as usize);
        for index in 0..count {
            let range = self
                .selection
                .get_range_at(index)
                .map_err(|e| js_error("getRangeAt failed", e))?;
            // The range returned by the selection is live; only clones leave
            // this method.
            ranges.push(range.clone_range());
        }
        Ok(ranges)
    }

    fn set_selection_ranges(&self, ranges: &[web_sys::Range]) -> Result<(), ClipboardError> {
        self.selection
            .remove_all_ranges()
            .map_err(|e| js_error("removeAllRanges failed", e))?;
        for range in ranges {
            self.selection
                .add_range(range)
                .map_err(|e| js_error("addRange failed", e))?;
        }
        Ok(())
    }

    fn select_contents(&self, region: &web_sys::Node) -> Result<(), ClipboardError> {
        let range = self
            .document
            .create_range()
            .map_err(|e| js_error("createRange failed", e))?;
        range
            .select_node_contents(region)
            .map_err(|e| js_error("selectNodeContents failed", e))?;
        self.set_selection_ranges(&[range])
    }

    fn default_region(&self) -> Option<web_sys::Node> {
        self.document.body().map(web_sys::Node::from)
    }

    fn listen_once(
        &self,
        kind: EventKind,
        handler: PayloadHandler,
    ) -> Result<DomListener, ClipboardError> {
        let target: web_sys::EventTarget = self.document.clone().into();
        let slot: ClosureSlot = Rc::new(RefCell::new(None));

        let closure = {
            let target = target.clone();
            let slot = Rc::clone(&slot);
            let mut handler = Some(handler);
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(handler) = handler.take() {
                    handler(&DomPayload { event: &event });
                }
                // Unregister right away so a second dispatch never reaches
                // this closure. The Closure value itself stays in the slot:
                // dropping it here would free the function currently on the
                // stack, so the DomListener guard frees it after the
                // synchronous command call has returned.
                if let Some(closure) = slot.borrow().as_ref() {
                    target
                        .remove_event_listener_with_callback(
                            kind.as_str(),
                            closure.as_ref().unchecked_ref(),
                        )
                        .ok();
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        target
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener failed", e))?;
        *slot.borrow_mut() = Some(closure);
        log::debug!("armed one-shot {} listener", kind);

        Ok(DomListener { target, kind, slot })
    }

    fn exec_command(&self, kind: EventKind) -> Result<bool, ClipboardError> {
        self.document
            .exec_command(kind.as_str())
            .map_err(|e| js_error("execCommand failed", e))
    }
}

/// Armed DOM listener; unregisters on drop if it has not fired.
pub struct DomListener {
    target: web_sys::EventTarget,
    kind: EventKind,
    slot: ClosureSlot,
}

impl Drop for DomListener {
    fn drop(&mut self) {
        if let Some(closure) = self.slot.borrow_mut().take() {
            // Removing a listener that already removed itself is a no-op, so
            // the fired and unfired paths converge here.
            self.target
                .remove_event_listener_with_callback(
                    self.kind.as_str(),
                    closure.as_ref().unchecked_ref(),
                )
                .ok();
            log::debug!("released {} listener", self.kind);
        }
    }
}

struct DomPayload<'a> {
    event: &'a web_sys::Event,
}

impl ClipboardPayload for DomPayload<'_> {
    fn set_data(&self, format: &str, text: &str) {
        match self.event.dyn_ref::<web_sys::ClipboardEvent>() {
            Some(event) => match event.clipboard_data() {
                Some(data) => {
                    if let Err(e) = data.set_data(format, text) {
                        log::warn!("setData failed: {:?}", e);
                    }
                }
                None => log::warn!("clipboard event carries no clipboardData"),
            },
            None => log::warn!("intercepted event is not a clipboard event"),
        }
    }

    fn prevent_default(&self) {
        self.event.prevent_default();
    }
}
