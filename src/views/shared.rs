use dioxus::prelude::*;

/// Modal stand-in for a blocking browser alert.
#[component]
pub fn AlertDialog(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "alert-overlay", role: "alertdialog", aria_modal: "true",
            div { class: "alert-box",
                p { class: "alert-message", "{message}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    autofocus: true,
                    onclick: move |_| on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}

/// Keep the newest entry of a scrolling list in view.
pub fn scroll_to_bottom(element_id: &str) {
    let _ = document::eval(&format!(
        "const el = document.getElementById('{element_id}'); if (el) {{ el.scrollTop = el.scrollHeight; }}"
    ));
}

pub fn copy_to_clipboard(text: String) {
    spawn(async move {
        #[cfg(any(feature = "desktop", feature = "mobile"))]
        {
            match arboard::Clipboard::new() {
                Ok(mut cb) => {
                    if let Err(err) = cb.set_text(text) {
                        tracing::warn!(error = %err, "clipboard write failed");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "clipboard unavailable"),
            }
        }
        #[cfg(not(any(feature = "desktop", feature = "mobile")))]
        {
            let payload = serde_json::to_string(&text).unwrap_or_default();
            let _ = document::eval(&format!("navigator.clipboard.writeText({payload});"));
        }
    });
}
