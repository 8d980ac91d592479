use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::requests::{LoginRequest, LoginResponse};

use crate::api;
use crate::auth;
use crate::helpers::input_value;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub on_login: Callback<()>,
}

pub enum Msg {
    Email(String),
    Password(String),
    Submit,
    Done(Result<LoginResponse, ApiError>),
}

pub struct Login {
    email: String,
    password: String,
    error: Option<String>,
    submitting: bool,
}

impl Component for Login {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { email: String::new(), password: String::new(), error: None, submitting: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Email(email) => {
                self.email = email;
                false
            }
            Msg::Password(password) => {
                self.password = password;
                false
            }
            Msg::Submit => {
                if self.email.trim().is_empty() || self.password.is_empty() {
                    self.error = Some("Email and password are required".to_string());
                    return true;
                }
                self.submitting = true;
                self.error = None;
                let credentials = LoginRequest { email: self.email.trim().to_string(), password: self.password.clone() };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Done(api::login(&credentials).await));
                });
                true
            }
            Msg::Done(Ok(response)) => {
                self.submitting = false;
                auth::store_token(&response.token);
                if let Some(user) = &response.user {
                    log!(format!("signed in as {}", user.email));
                }
                ctx.props().on_login.emit(());
                true
            }
            Msg::Done(Err(err)) => {
                self.submitting = false;
                // The login endpoint answers bad credentials with 401.
                self.error = Some(match err {
                    ApiError::Unauthorized => "Invalid email or password".to_string(),
                    other => other.user_message(),
                });
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class="login">
                <form class="login-form" {onsubmit}>
                    <h2>{"Sign in"}</h2>
                    if let Some(error) = &self.error {
                        <div class="error-panel">{ error.clone() }</div>
                    }
                    <input
                        type="email"
                        placeholder="Email"
                        oninput={link.callback(|e: InputEvent| Msg::Email(input_value(&e)))}
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        oninput={link.callback(|e: InputEvent| Msg::Password(input_value(&e)))}
                    />
                    <button type="submit" class="primary" disabled={self.submitting}>{"Sign in"}</button>
                </form>
            </div>
        }
    }
}
