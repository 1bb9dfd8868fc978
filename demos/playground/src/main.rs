#![allow(non_snake_case)]

use clipboard_bridge::{copy_plain_text, synthesize, ClipboardError, EventKind, EventOptions};
use dioxus::prelude::*;

const QUOTE_REGION_ID: &str = "quote-region";
const DRAFT_REGION_ID: &str = "draft-region";

static STYLE_SHEET: &str = r#"
:root { color-scheme: light; }
body { margin: 0; font-family: system-ui, sans-serif; background: #f6f7f9; color: #1c1e21; }
.page { max-width: 640px; margin: 0 auto; padding: 2rem 1rem 4rem; }
.lede { color: #5b616b; }
.card { background: #fff; border: 1px solid #d8dce1; border-radius: 12px; padding: 1.25rem; margin-top: 1rem; }
.card h2 { margin-top: 0; font-size: 1.05rem; }
.card p { color: #5b616b; margin: 0.25rem 0 0; }
.row { display: flex; gap: 0.75rem; align-items: center; margin-top: 0.75rem; }
.row input { flex: 1; padding: 0.5rem 0.75rem; border: 1px solid #c4cad2; border-radius: 8px; }
button { padding: 0.5rem 1rem; border: none; border-radius: 8px; background: #3b82f6; color: #fff; cursor: pointer; }
button:hover { background: #2f6fd6; }
blockquote { border-left: 3px solid #3b82f6; margin: 0.75rem 0 0; padding: 0.25rem 0 0.25rem 0.75rem; font-style: italic; }
.draft { border: 1px dashed #c4cad2; border-radius: 8px; padding: 0.75rem; margin-top: 0.75rem; }
.probe { width: 100%; box-sizing: border-box; padding: 0.5rem 0.75rem; border: 1px solid #c4cad2; border-radius: 8px; margin-top: 0.75rem; font: inherit; }
.overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; padding: 1rem; }
.dialog { background: #fff; border-radius: 12px; max-width: 24rem; width: 100%; padding: 1.5rem; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2); }
.dialog h2 { margin-top: 0; }
.dialog p { color: #5b616b; }
.dialog-actions { display: flex; justify-content: flex-end; margin-top: 1rem; }
"#;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    }

    log::info!("Starting clipboard bridge playground");

    dioxus::launch(App);
}

/// Look up one of the demo regions in the live document.
fn region_node(id: &str) -> Option<web_sys::Node> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)
        .map(web_sys::Node::from)
}

#[derive(Clone, PartialEq)]
struct DialogState {
    title: String,
    message: String,
}

impl DialogState {
    fn from_result(action: &str, result: Result<(), ClipboardError>) -> Self {
        match result {
            Ok(()) => Self {
                title: format!("{action} finished"),
                message: "The content is on your clipboard. Paste into the box at the bottom to inspect it.".to_string(),
            },
            Err(e) => Self {
                title: format!("{action} failed"),
                message: e.to_string(),
            },
        }
    }
}

#[component]
fn App() -> Element {
    let mut dialog = use_signal(|| None::<DialogState>);
    let active_dialog = dialog.read().clone();

    rsx! {
        style { {STYLE_SHEET} }
        div {
            class: "page",
            h1 { "Clipboard bridge playground" }
            p {
                class: "lede",
                "Every button below drives a synthesized copy or cut event. Watch the browser console for the bridge's logging, and use the box at the bottom to inspect what landed on the clipboard."
            }

            LiteralCopyCard {}
            QuoteCard { on_done: move |state| dialog.set(Some(state)) }
            DraftCard { on_done: move |state| dialog.set(Some(state)) }
            PasteRefusalCard { on_done: move |state| dialog.set(Some(state)) }
            PasteProbe {}

            if let Some(state) = active_dialog {
                ResultDialog {
                    title: state.title,
                    message: state.message,
                    on_close: move |_| dialog.set(None),
                }
            }
        }
    }
}

/// Copies typed text straight to the clipboard, no target region involved.
#[component]
fn LiteralCopyCard() -> Element {
    let mut text = use_signal(|| "The five boxing wizards jump quickly".to_string());
    let mut copied = use_signal(|| false);

    let handle_copy = move |_| {
        let value = text.read().clone();
        match copy_plain_text(&value) {
            Ok(()) => {
                copied.set(true);
                // Reset copied state after 2 seconds
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(2000).await;
                    copied.set(false);
                });
            }
            Err(e) => log::error!("Failed to copy text: {}", e),
        }
    };

    rsx! {
        section {
            class: "card",
            h2 { "Copy literal text" }
            p { "Puts whatever you type here on the clipboard without touching the document." }
            div {
                class: "row",
                input {
                    value: "{text}",
                    oninput: move |e| text.set(e.value()),
                }
                button {
                    onclick: handle_copy,
                    if *copied.read() { "Copied!" } else { "Copy" }
                }
            }
        }
    }
}

/// Copies a document region, or literal text while that region is selected.
#[component]
fn QuoteCard(on_done: EventHandler<DialogState>) -> Element {
    let handle_copy_quote = move |_| {
        let node = match region_node(QUOTE_REGION_ID) {
            Some(node) => node,
            None => {
                log::error!("Quote region is missing from the document");
                return;
            }
        };
        let result = synthesize(EventOptions {
            kind: EventKind::Copy,
            target: Some(node),
            ..Default::default()
        });
        on_done.call(DialogState::from_result("Copying the quote", result));
    };

    let handle_copy_citation = move |_| {
        let node = match region_node(QUOTE_REGION_ID) {
            Some(node) => node,
            None => {
                log::error!("Quote region is missing from the document");
                return;
            }
        };
        // The quote gets selected, but the intercepted event carries the
        // citation instead.
        let result = synthesize(EventOptions {
            kind: EventKind::Copy,
            text: Some("Carroll, \"Jabberwocky\" (1871)".to_string()),
            target: Some(node),
            ..Default::default()
        });
        on_done.call(DialogState::from_result("Copying the citation", result));
    };

    rsx! {
        section {
            class: "card",
            h2 { "Copy a region" }
            p { "Selects the quote below, copies it, then restores whatever you had selected before." }
            blockquote {
                id: QUOTE_REGION_ID,
                "'Twas brillig, and the slithy toves did gyre and gimble in the wabe."
            }
            div {
                class: "row",
                button { onclick: handle_copy_quote, "Copy the quote" }
                button { onclick: handle_copy_citation, "Copy the citation instead" }
            }
        }
    }
}

/// Cuts the content out of an editable region.
#[component]
fn DraftCard(on_done: EventHandler<DialogState>) -> Element {
    let handle_cut = move |_| {
        let node = match region_node(DRAFT_REGION_ID) {
            Some(node) => node,
            None => {
                log::error!("Draft region is missing from the document");
                return;
            }
        };
        let result = synthesize(EventOptions {
            kind: EventKind::Cut,
            target: Some(node),
            ..Default::default()
        });
        on_done.call(DialogState::from_result("Cutting the draft", result));
    };

    rsx! {
        section {
            class: "card",
            h2 { "Cut an editable region" }
            p { "The draft below is editable. Cutting removes its content and puts it on the clipboard." }
            div {
                id: DRAFT_REGION_ID,
                class: "draft",
                contenteditable: "true",
                "Rewrite me, then cut me."
            }
            div {
                class: "row",
                button { onclick: handle_cut, "Cut the draft" }
            }
        }
    }
}

/// Demonstrates that paste is refused before the document is touched.
#[component]
fn PasteRefusalCard(on_done: EventHandler<DialogState>) -> Element {
    let handle_paste = move |_| {
        let result = synthesize(EventOptions {
            kind: EventKind::Paste,
            text: Some("never happens".to_string()),
            ..Default::default()
        });
        on_done.call(DialogState::from_result("Synthesizing a paste", result));
    };

    rsx! {
        section {
            class: "card",
            h2 { "Try to synthesize a paste" }
            p { "Browsers never let a script trigger paste, so the bridge refuses up front." }
            div {
                class: "row",
                button { onclick: handle_paste, "Request a paste event" }
            }
        }
    }
}

#[component]
fn PasteProbe() -> Element {
    rsx! {
        section {
            class: "card",
            h2 { "Inspect the clipboard" }
            p { "Paste here (Ctrl+V / Cmd+V) to see what the last command produced." }
            textarea {
                class: "probe",
                rows: "4",
                placeholder: "Paste here...",
            }
        }
    }
}

/// Result dialog - clicking outside or the button dismisses it.
#[component]
fn ResultDialog(title: String, message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "overlay",
            onclick: move |_| on_close.call(()),

            div {
                class: "dialog",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "dialog-title",
                onclick: move |e| e.stop_propagation(),

                h2 {
                    id: "dialog-title",
                    "{title}"
                }
                p { "{message}" }

                div {
                    class: "dialog-actions",
                    button {
                        onclick: move |_| on_close.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}
