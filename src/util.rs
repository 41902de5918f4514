// Small helpers shared by the pages

/// Browser console logging. Native builds (unit tests) drop the message.
#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg; // keep param to avoid warnings
}

/// Milliseconds since the epoch, as seen by the page.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
