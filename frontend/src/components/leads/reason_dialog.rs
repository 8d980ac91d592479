//! Form asking why a lead is being marked as lost. Shared by the board's
//! drop handler and the detail panel's status selector.

use yew::prelude::*;

use crate::helpers::textarea_value;
use crate::tops_sheet::top_sheet::TopSheet;

#[derive(Properties, PartialEq)]
pub struct ReasonDialogProps {
    pub client_name: AttrValue,
    pub on_submit: Callback<String>,
    pub on_cancel: Callback<()>,
}

pub enum Msg {
    Input(String),
    Submit,
}

pub struct ReasonDialog {
    reason: String,
}

impl Component for ReasonDialog {
    type Message = Msg;
    type Properties = ReasonDialogProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { reason: String::new() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(reason) => {
                self.reason = reason;
                true
            }
            Msg::Submit => {
                // Blank reasons are rejected by the caller.
                ctx.props().on_submit.emit(self.reason.clone());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <TopSheet title="Mark as not interested" on_close={props.on_cancel.clone()}>
                <form class="reason-form" {onsubmit}>
                    <p>{ format!("Why is {} no longer interested?", props.client_name) }</p>
                    <textarea
                        rows="4"
                        placeholder="Reason"
                        value={self.reason.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::Input(textarea_value(&e)))}
                    />
                    <div class="form-actions">
                        <button type="button" onclick={props.on_cancel.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                        <button type="submit" class="primary">{"Confirm"}</button>
                    </div>
                </form>
            </TopSheet>
        }
    }
}
