//! Create-lead form shown in a top sheet.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ApiError;
use common::leads::LeadForm;
use common::model::lead::{LeadCategory, LeadSource, Priority};

use crate::api;
use crate::helpers::{input_value, select_value, show_alert, show_toast, textarea_value};
use crate::tops_sheet::top_sheet::TopSheet;

#[derive(Properties, PartialEq)]
pub struct LeadFormProps {
    pub on_created: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[derive(Clone, Copy)]
pub enum Field {
    ClientName,
    Email,
    Phone,
    Category,
    Priority,
    EstimatedValue,
    Source,
    Description,
    InquiryMessage,
    ExpectedCloseDate,
}

pub enum Msg {
    Input(Field, String),
    Submit,
    Created(Result<String, ApiError>),
}

pub struct LeadFormComponent {
    form: LeadForm,
    saving: bool,
}

impl Component for LeadFormComponent {
    type Message = Msg;
    type Properties = LeadFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { form: LeadForm::default(), saving: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(field, value) => {
                let form = &mut self.form;
                match field {
                    Field::ClientName => form.client_name = value,
                    Field::Email => form.email = value,
                    Field::Phone => form.phone = value,
                    Field::EstimatedValue => form.estimated_value = value,
                    Field::Description => form.description = value,
                    Field::InquiryMessage => form.inquiry_message = value,
                    Field::ExpectedCloseDate => form.expected_close_date = value,
                    Field::Category => form.category = value.parse::<LeadCategory>().unwrap_or_default(),
                    Field::Priority => form.priority = value.parse::<Priority>().unwrap_or_default(),
                    Field::Source => form.source = value.parse::<LeadSource>().unwrap_or_default(),
                }
                true
            }
            Msg::Submit => {
                if self.saving {
                    return false;
                }
                let mutation = match self.form.submit() {
                    Ok(mutation) => mutation,
                    Err(err) => {
                        show_alert(&err.user_message());
                        return false;
                    }
                };
                log!(format!("creating lead {}", self.form.client_name.trim()));
                self.saving = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Created(api::execute(&mutation).await));
                });
                true
            }
            Msg::Created(result) => {
                self.saving = false;
                match result {
                    Ok(_) => {
                        show_toast("Lead created.");
                        self.form = LeadForm::default();
                        ctx.props().on_created.emit(());
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(err) => show_alert(&err.user_message()),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let form = &self.form;
        let text = |field: Field| link.callback(move |e: InputEvent| Msg::Input(field, input_value(&e)));
        let choice = |field: Field| link.callback(move |e: Event| Msg::Input(field, select_value(&e)));
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <TopSheet title="New lead" on_close={ctx.props().on_cancel.clone()}>
                <form class="lead-form" {onsubmit}>
                    <label>{"Client name *"}
                        <input value={form.client_name.clone()} oninput={text(Field::ClientName)} />
                    </label>
                    <label>{"Email *"}
                        <input type="email" value={form.email.clone()} oninput={text(Field::Email)} />
                    </label>
                    <label>{"Phone"}
                        <input type="tel" value={form.phone.clone()} oninput={text(Field::Phone)} />
                    </label>
                    <label>{"Category"}
                        <select onchange={choice(Field::Category)}>
                            { for LeadCategory::ALL.iter().map(|c| html! {
                                <option value={c.as_str()} selected={*c == form.category}>{ c.as_str() }</option>
                            }) }
                        </select>
                    </label>
                    <label>{"Priority"}
                        <select onchange={choice(Field::Priority)}>
                            { for Priority::ALL.iter().map(|p| html! {
                                <option value={p.as_str()} selected={*p == form.priority}>{ p.label() }</option>
                            }) }
                        </select>
                    </label>
                    <label>{"Source"}
                        <select onchange={choice(Field::Source)}>
                            { for LeadSource::ALL.iter().map(|s| html! {
                                <option value={s.as_str()} selected={*s == form.source}>{ s.as_str().replace('_', " ") }</option>
                            }) }
                        </select>
                    </label>
                    <label>{"Estimated value"}
                        <input inputmode="decimal" value={form.estimated_value.clone()} oninput={text(Field::EstimatedValue)} />
                    </label>
                    <label>{"Expected close date"}
                        <input type="date" value={form.expected_close_date.clone()} oninput={text(Field::ExpectedCloseDate)} />
                    </label>
                    <label>{"Description"}
                        <textarea
                            rows="3"
                            value={form.description.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::Input(Field::Description, textarea_value(&e)))}
                        />
                    </label>
                    <label>{"Inquiry message"}
                        <textarea
                            rows="3"
                            value={form.inquiry_message.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::Input(Field::InquiryMessage, textarea_value(&e)))}
                        />
                    </label>
                    <div class="form-actions">
                        <button type="button" onclick={ctx.props().on_cancel.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                        <button type="submit" class="primary" disabled={self.saving}>
                            { if self.saving { "Saving..." } else { "Create lead" } }
                        </button>
                    </div>
                </form>
            </TopSheet>
        }
    }
}
