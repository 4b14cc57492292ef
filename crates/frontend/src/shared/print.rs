//! Browser-delegated printing
//!
//! Clones the rendered subtree of an element into a fresh window and hands
//! it to the browser print dialog. Styling is carried over by copying the
//! style elements of the current document head.

use wasm_bindgen::JsCast;

fn collect_styles(document: &web_sys::Document) -> String {
    let mut combined = String::new();
    if let Ok(nodes) = document.query_selector_all("style, link[rel=stylesheet]") {
        for i in 0..nodes.length() {
            if let Some(node) = nodes.get(i) {
                if let Some(el) = node.dyn_ref::<web_sys::Element>() {
                    combined.push_str(&el.outer_html());
                }
            }
        }
    }
    combined
}

/// Print the element with the given id. Silently does nothing when the
/// element is missing (e.g. the sheet is still loading).
pub fn print_element(element_id: &str, title: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(element) = document.get_element_by_id(element_id) else {
        return;
    };

    let markup = format!(
        "<head><title>{}</title>{}</head><body class=\"print-body\">{}</body>",
        title,
        collect_styles(&document),
        element.outer_html()
    );

    let Ok(Some(print_window)) = window.open_with_url_and_target("", "_blank") else {
        log::warn!("Print window was blocked");
        return;
    };
    if let Some(print_document) = print_window.document() {
        if let Some(root) = print_document.document_element() {
            root.set_inner_html(&markup);
        }
    }
    let _ = print_window.print();
}
