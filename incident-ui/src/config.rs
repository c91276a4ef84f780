use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Base URL of the incident backend. Same-origin by default (the dev setup
/// proxies the API path); deployments can inject an override before the wasm
/// bundle loads:
///
/// ```html
/// <script>
///   window.__MUNI_INCIDENTS_CONFIG__ = { api_url: "https://incidencias.example.org" };
/// </script>
/// ```
pub fn api_base() -> String {
    window_override().unwrap_or_default()
}

fn window_override() -> Option<String> {
    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("__MUNI_INCIDENTS_CONFIG__")).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    Reflect::get(&config, &JsValue::from_str("api_url"))
        .ok()?
        .as_string()
}
