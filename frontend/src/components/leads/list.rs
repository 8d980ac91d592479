//! Table of all fetched leads with search, status and priority filters.
//!
//! Filtering runs over the in-memory copy handed down by the parent; no
//! request is made while typing. Deleting a row asks for confirmation,
//! issues the call and asks the parent to refetch.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::Mutation;
use common::error::ApiError;
use common::leads::LeadFilter;
use common::model::lead::{Lead, LeadStatus, Priority};
use common::model::reference::Ref;
use common::remote::Remote;

use crate::api;
use crate::helpers::{confirm, format_currency, input_value, optional_date, select_value, show_alert, show_toast};

#[derive(Properties, PartialEq)]
pub struct LeadListProps {
    pub leads: Remote<Vec<Lead>>,
    pub on_select: Callback<String>,
    pub on_refresh: Callback<()>,
}

pub enum Msg {
    Search(String),
    Status(String),
    Priority(String),
    ClearFilters,
    Delete(String),
    Deleted(Result<String, ApiError>),
}

pub struct LeadList {
    filter: LeadFilter,
    deleting: bool,
}

impl Component for LeadList {
    type Message = Msg;
    type Properties = LeadListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { filter: LeadFilter::default(), deleting: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(search) => {
                self.filter.search = search;
                true
            }
            Msg::Status(value) => {
                self.filter.status = value.parse::<LeadStatus>().ok();
                true
            }
            Msg::Priority(value) => {
                self.filter.priority = value.parse::<Priority>().ok();
                true
            }
            Msg::ClearFilters => {
                self.filter = LeadFilter::default();
                true
            }
            Msg::Delete(lead_id) => {
                if !confirm("Delete this lead? This cannot be undone.") {
                    return false;
                }
                log!(format!("deleting lead {lead_id}"));
                self.deleting = true;
                let mutation = Mutation::DeleteLead { lead_id };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Deleted(api::execute(&mutation).await));
                });
                true
            }
            Msg::Deleted(result) => {
                self.deleting = false;
                match result {
                    Ok(_) => show_toast("Lead deleted."),
                    Err(ApiError::Unauthorized) => {}
                    Err(err) => show_alert(&err.user_message()),
                }
                ctx.props().on_refresh.emit(());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let status = self.filter.status.map(LeadStatus::as_str).unwrap_or_default();
        let priority = self.filter.priority.map(Priority::as_str).unwrap_or_default();

        html! {
            <div class="lead-list">
                <div class="filter-bar">
                    <input
                        type="search"
                        placeholder="Search by name or email"
                        value={self.filter.search.clone()}
                        oninput={link.callback(|e: InputEvent| Msg::Search(input_value(&e)))}
                    />
                    <select onchange={link.callback(|e: Event| Msg::Status(select_value(&e)))}>
                        <option value="" selected={status.is_empty()}>{"All statuses"}</option>
                        { for LeadStatus::ALL.iter().map(|s| html! {
                            <option value={s.as_str()} selected={s.as_str() == status}>{ s.label() }</option>
                        }) }
                    </select>
                    <select onchange={link.callback(|e: Event| Msg::Priority(select_value(&e)))}>
                        <option value="" selected={priority.is_empty()}>{"All priorities"}</option>
                        { for Priority::ALL.iter().map(|p| html! {
                            <option value={p.as_str()} selected={p.as_str() == priority}>{ p.label() }</option>
                        }) }
                    </select>
                    if self.filter.is_active() {
                        <button onclick={link.callback(|_| Msg::ClearFilters)}>{"Clear"}</button>
                    }
                </div>
                if let Some(error) = props.leads.error() {
                    <div class="error-panel">{ error.to_string() }</div>
                }
                { self.build_table(ctx) }
            </div>
        }
    }
}

impl LeadList {
    fn build_table(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let Some(leads) = props.leads.data() else {
            return if props.leads.is_loading() {
                html! { <div class="loading">{"Loading leads..."}</div> }
            } else {
                html! {}
            };
        };
        let visible = self.filter.apply(leads);
        if visible.is_empty() {
            return html! { <p class="muted">{"No leads match the current filters."}</p> };
        }

        html! {
            <table class={classes!("data-table", self.deleting.then_some("busy"))}>
                <thead>
                    <tr>
                        <th>{"Client"}</th>
                        <th>{"Email"}</th>
                        <th>{"Status"}</th>
                        <th>{"Priority"}</th>
                        <th>{"Value"}</th>
                        <th>{"Assigned to"}</th>
                        <th>{"Created"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for visible.into_iter().map(|lead| self.build_row(ctx, lead)) }
                </tbody>
            </table>
        }
    }

    fn build_row(&self, ctx: &Context<Self>, lead: &Lead) -> Html {
        let onclick = {
            let on_select = ctx.props().on_select.clone();
            let id = lead.id.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
        };
        let ondelete = {
            let id = lead.id.clone();
            ctx.link().callback(move |e: MouseEvent| {
                e.stop_propagation();
                Msg::Delete(id.clone())
            })
        };

        html! {
            <tr key={lead.id.clone()} class="clickable" {onclick}>
                <td>{ lead.client_name.clone() }</td>
                <td>{ lead.email.clone() }</td>
                <td><span class={classes!("badge", lead.status.as_str())}>{ lead.status.label() }</span></td>
                <td>{ lead.priority.label() }</td>
                <td>{ format_currency(lead.estimated_value) }</td>
                <td>{ lead.assigned_to.as_ref().map(|r| Ref::label(r).to_string()).unwrap_or_else(|| "-".to_string()) }</td>
                <td>{ optional_date(lead.created_at.as_ref()) }</td>
                <td>
                    <button class="icon-btn danger" title="Delete" disabled={self.deleting} onclick={ondelete}>
                        <i class="material-icons">{"delete"}</i>
                    </button>
                </td>
            </tr>
        }
    }
}
