const TOKEN_KEY: &str = "token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok().flatten()
}

pub fn store_token(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Hard navigation to the login view, used when the whole session is
/// discarded on an authorization failure.
pub fn force_login_redirect() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}
