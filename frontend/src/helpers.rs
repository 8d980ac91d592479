//! Small utilities shared by the components.
//!
//! - **User feedback**: blocking alerts for failures, confirmation and prompt
//!   dialogs, and temporary toasts for successful actions.
//! - **Event plumbing**: reading the current value out of input, select and
//!   textarea events.
//! - **Formatting**: currency and dates as shown in tables and cards.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::{Event, InputEvent, TargetCast};

use crate::config::TOAST_MILLIS;

/// Blocking modal alert. Every failed call ends up here.
pub fn show_alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` when the user cancels the prompt.
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok().flatten()
}

/// Displays a temporary notification at the bottom of the screen.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                toast.set_class_name("toast");
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// `$1,234.50` style amounts.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}${}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_thousands_separators() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-12.5), "-$12.50");
    }

    #[test]
    fn dates_render_as_iso_days() {
        let at: DateTime<Utc> = "2024-03-01T10:00:00Z".parse().unwrap();
        assert_eq!(optional_date(Some(&at)), "2024-03-01");
        assert_eq!(optional_date(None), "-");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(16.666), "16.7%");
    }
}
