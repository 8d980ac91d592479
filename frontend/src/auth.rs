//! Bearer token persistence in `localStorage`.

use gloo_console::log;
use web_sys::Storage;

use crate::config::{LOGIN_ROUTE, TOKEN_KEY};

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(storage) = storage() {
        storage.set_item(TOKEN_KEY, token).ok();
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        storage.remove_item(TOKEN_KEY).ok();
    }
}

/// Called on any 401: drops the token and goes back to the login route.
pub fn expire_session() {
    log!("session expired, redirecting to login");
    clear_token();
    if let Some(window) = web_sys::window() {
        let on_login = window
            .location()
            .pathname()
            .map(|path| path == LOGIN_ROUTE)
            .unwrap_or(false);
        if !on_login {
            window.location().set_href(LOGIN_ROUTE).ok();
        }
    }
}
