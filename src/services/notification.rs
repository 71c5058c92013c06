use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, HtmlElement};

use crate::config::ShopConfig;

const REMOVAL_BACKGROUND: &str = "#dc3545";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastStyle {
    Confirmation,
    Removal,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoteKind {
    /// Page-level `div.cart-toast` on `<body>`.
    Toast(ToastStyle),
    /// `div.wishlist-tooltip` inside the clicked button.
    Tooltip,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Created,
    Visible,
    AnimatingOut,
    Removed,
}

impl Phase {
    /// The phase that follows `self` and the delay in ms before entering it.
    pub fn next(self, kind: NoteKind, config: &ShopConfig) -> Option<(Phase, u32)> {
        match (self, kind) {
            (Phase::Created, _) => Some((Phase::Visible, 0)),
            (Phase::Visible, NoteKind::Toast(_)) => Some((Phase::AnimatingOut, config.toast_ms)),
            (Phase::Visible, NoteKind::Tooltip) => Some((Phase::Removed, config.tooltip_ms)),
            (Phase::AnimatingOut, _) => Some((Phase::Removed, config.toast_exit_ms)),
            (Phase::Removed, _) => None,
        }
    }
}

pub fn added_to_cart_message(title: &str) -> String {
    format!("✓ Added {} to cart!", title)
}

pub const REMOVED_FROM_CART_MESSAGE: &str = "✓ Item removed from cart!";

/// Shows a toast on the page body. Repeated calls stack.
pub fn show_toast(config: &ShopConfig, message: &str, style: ToastStyle) {
    let body = window().and_then(|w| w.document()).and_then(|d| d.body());
    let Some(body) = body else { return };
    if let Err(e) = spawn_note(config, body.into(), "cart-toast", message, NoteKind::Toast(style)) {
        console_error!("Failed to show toast: {:?}", e);
    }
}

/// Shows a short-lived tooltip inside `button`.
pub fn show_tooltip(config: &ShopConfig, button: &Element, message: &str) {
    if let Err(e) = spawn_note(config, button.clone(), "wishlist-tooltip", message, NoteKind::Tooltip) {
        console_error!("Failed to show tooltip: {:?}", e);
    }
}

fn spawn_note(
    config: &ShopConfig,
    parent: Element,
    class: &str,
    message: &str,
    kind: NoteKind,
) -> Result<(), JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let note: HtmlElement = document.create_element("div")?.dyn_into()?;
    note.set_class_name(class);
    note.set_text_content(Some(message));
    if kind == NoteKind::Toast(ToastStyle::Removal) {
        note.style().set_property("background", REMOVAL_BACKGROUND)?;
    }

    let config = config.clone();
    spawn_local(async move {
        let mut phase = Phase::Created;
        while let Some((next, delay)) = phase.next(kind, &config) {
            if delay > 0 {
                TimeoutFuture::new(delay).await;
            }
            if let Err(e) = enter(&note, &parent, next, &config) {
                console_error!("Notification step {:?} failed: {:?}", next, e);
                note.remove();
                break;
            }
            phase = next;
        }
    });
    Ok(())
}

fn enter(note: &HtmlElement, parent: &Element, phase: Phase, config: &ShopConfig) -> Result<(), JsValue> {
    match phase {
        Phase::Created => {}
        Phase::Visible => {
            parent.append_child(note)?;
        }
        Phase::AnimatingOut => {
            let seconds = f64::from(config.toast_exit_ms) / 1000.0;
            note.style().set_property("animation", &format!("slideOut {}s ease", seconds))?;
        }
        Phase::Removed => note.remove(),
    }
    Ok(())
}
