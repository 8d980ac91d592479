//! Build-time configuration. Each value can be overridden through the
//! environment of the `trunk build` / `cargo build` invocation.

/// Prefix joined in front of every endpoint path.
pub const API_BASE: &str = match option_env!("LEADDESK_API_BASE") {
    Some(base) => base,
    None => "/api",
};

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = match option_env!("LEADDESK_TOKEN_KEY") {
    Some(key) => key,
    None => "token",
};

/// Where a 401 sends the user.
pub const LOGIN_ROUTE: &str = "/login";

/// How long success toasts stay on screen, in milliseconds.
pub const TOAST_MILLIS: u32 = 3000;
