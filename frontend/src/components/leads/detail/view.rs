//! View rendering for the lead detail panel.
//!
//! The panel is a top sheet split into a summary, the status and assignment
//! controls, the note and follow-up forms, and the activity log. Controls are
//! disabled while a mutation is in flight.

use yew::html::Scope;
use yew::prelude::*;

use common::leads::DetailPayload;
use common::model::follow_up::FollowUpType;
use common::model::lead::{Lead, LeadStatus, Priority};

use super::messages::{FollowUpField, Msg};
use super::state::LeadDetailPanel;
use crate::components::leads::reason_dialog::ReasonDialog;
use crate::helpers::{format_currency, input_value, optional_date, select_value, textarea_value};
use crate::tops_sheet::top_sheet::TopSheet;

pub fn view(component: &LeadDetailPanel, ctx: &Context<LeadDetailPanel>) -> Html {
    let link = ctx.link();
    let payload = component.detail.payload();
    let title = component
        .detail
        .lead()
        .map(|l| l.client_name.clone())
        .unwrap_or_else(|| "Lead".to_string());

    html! {
        <TopSheet title={title} on_close={ctx.props().on_close.clone()}>
            {
                if let Some(error) = payload.error() {
                    html! { <div class="error-panel">{ error.to_string() }</div> }
                } else {
                    html! {}
                }
            }
            {
                match payload.data() {
                    Some(data) => build_body(component, ctx, data),
                    None if payload.is_loading() => html! { <div class="loading">{"Loading lead..."}</div> },
                    None => html! {},
                }
            }
            { build_reason_dialog(component, link) }
        </TopSheet>
    }
}

fn build_body(component: &LeadDetailPanel, ctx: &Context<LeadDetailPanel>, data: &DetailPayload) -> Html {
    let link = ctx.link();
    html! {
        <div class={classes!("lead-detail", component.busy.then_some("busy"))}>
            { build_summary(&data.lead) }
            { build_controls(component, ctx, &data.lead) }
            { build_note_form(component, link) }
            { build_follow_up_form(component, link) }
            <section class="activity-log">
                <h3>{"Activity"}</h3>
                {
                    if data.activities.is_empty() {
                        html! { <p class="muted">{"No activity yet."}</p> }
                    } else {
                        html! {
                            <ul>
                                { for data.activities.iter().map(|activity| html! {
                                    <li key={activity.id.clone()}>
                                        <span class="activity-date">{ optional_date(activity.created_at.as_ref()) }</span>
                                        <span class="activity-actor">{ activity.actor().to_string() }</span>
                                        <span class="activity-summary">{ activity.summary() }</span>
                                    </li>
                                }) }
                            </ul>
                        }
                    }
                }
            </section>
        </div>
    }
}

fn build_summary(lead: &Lead) -> Html {
    let row = |label: &'static str, value: String| {
        html! {
            <div class="detail-row">
                <span class="detail-label">{ label }</span>
                <span class="detail-value">{ value }</span>
            </div>
        }
    };

    html! {
        <section class="lead-summary">
            { row("Email", lead.email.clone()) }
            { row("Phone", lead.phone.clone()) }
            { row("Category", lead.category.as_str().to_string()) }
            { row("Source", lead.source.as_str().replace('_', " ")) }
            { row("Priority", lead.priority.label().to_string()) }
            { row("Estimated value", format_currency(lead.estimated_value)) }
            { row("Expected close", optional_date(lead.expected_close_date.as_ref())) }
            { row("Created", optional_date(lead.created_at.as_ref())) }
            {
                if let Some(message) = &lead.inquiry_message {
                    row("Inquiry", message.clone())
                } else {
                    html! {}
                }
            }
            {
                if let Some(description) = &lead.description {
                    row("Description", description.clone())
                } else {
                    html! {}
                }
            }
            {
                if let Some(reason) = &lead.lost_reason {
                    row("Lost reason", reason.clone())
                } else {
                    html! {}
                }
            }
        </section>
    }
}

fn build_controls(component: &LeadDetailPanel, ctx: &Context<LeadDetailPanel>, lead: &Lead) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let assignee = lead.assignee_id().unwrap_or_default().to_string();
    let team = lead.team_id().unwrap_or_default().to_string();

    html! {
        <section class="lead-controls">
            <label>
                {"Status"}
                // Re-keyed when a pending change is dropped so the DOM selection snaps back.
                <select
                    key={format!("{}-{}", lead.status.as_str(), component.detail.pending().is_some())}
                    disabled={component.busy}
                    onchange={link.batch_callback(|e: Event| select_value(&e).parse::<LeadStatus>().ok().map(Msg::ChangeStatus))}
                >
                    { for LeadStatus::ALL.iter().map(|status| html! {
                        <option value={status.as_str()} selected={*status == lead.status}>{ status.label() }</option>
                    }) }
                </select>
            </label>
            <label>
                {"Assigned to"}
                <select
                    disabled={component.busy}
                    onchange={link.callback(|e: Event| Msg::AssignUser(select_value(&e)))}
                >
                    <option value="" selected={assignee.is_empty()}>{"Unassigned"}</option>
                    { for props.users.iter().map(|user| html! {
                        <option value={user.id.clone()} selected={user.id == assignee}>
                            { if user.name.is_empty() { user.email.clone() } else { user.name.clone() } }
                        </option>
                    }) }
                </select>
            </label>
            <label>
                {"Team"}
                <select
                    disabled={component.busy}
                    onchange={link.callback(|e: Event| Msg::AssignTeam(select_value(&e)))}
                >
                    <option value="" selected={team.is_empty()}>{"No team"}</option>
                    { for props.teams.iter().map(|t| html! {
                        <option value={t.id.clone()} selected={t.id == team}>{ t.name.clone() }</option>
                    }) }
                </select>
            </label>
            <div class="form-actions">
                <button
                    class="primary"
                    disabled={component.busy || lead.status == LeadStatus::Converted}
                    onclick={link.callback(|_| Msg::Convert)}
                >
                    {"Convert"}
                </button>
                <button class="danger" disabled={component.busy} onclick={link.callback(|_| Msg::Delete)}>
                    {"Delete"}
                </button>
            </div>
        </section>
    }
}

fn build_note_form(component: &LeadDetailPanel, link: &Scope<LeadDetailPanel>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitNote
    });
    html! {
        <form class="note-form" {onsubmit}>
            <h3>{"Add note"}</h3>
            <textarea
                rows="3"
                value={component.note.value().clone()}
                oninput={link.callback(|e: InputEvent| Msg::NoteInput(textarea_value(&e)))}
            />
            <button type="submit" disabled={component.busy}>{"Save note"}</button>
        </form>
    }
}

fn build_follow_up_form(component: &LeadDetailPanel, link: &Scope<LeadDetailPanel>) -> Html {
    let form = component.follow_up.value();
    let on_input = |field: FollowUpField| link.callback(move |e: InputEvent| Msg::FollowUpInput(field, input_value(&e)));
    let on_select = |field: FollowUpField| link.callback(move |e: Event| Msg::FollowUpInput(field, select_value(&e)));
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::ScheduleFollowUp
    });

    html! {
        <form class="follow-up-form" {onsubmit}>
            <h3>{"Schedule follow-up"}</h3>
            <input
                placeholder="Title"
                value={form.title.clone()}
                oninput={on_input(FollowUpField::Title)}
            />
            <input
                placeholder="Description"
                value={form.description.clone().unwrap_or_default()}
                oninput={on_input(FollowUpField::Description)}
            />
            <input type="date" value={form.scheduled_date.clone()} oninput={on_input(FollowUpField::Date)} />
            <input
                type="time"
                value={form.scheduled_time.clone().unwrap_or_default()}
                oninput={on_input(FollowUpField::Time)}
            />
            <select onchange={on_select(FollowUpField::Priority)}>
                { for Priority::ALL.iter().map(|p| html! {
                    <option value={p.as_str()} selected={*p == form.priority}>{ p.label() }</option>
                }) }
            </select>
            <select onchange={on_select(FollowUpField::Type)}>
                { for FollowUpType::ALL.iter().map(|t| html! {
                    <option value={t.as_str()} selected={*t == form.follow_up_type}>{ t.as_str() }</option>
                }) }
            </select>
            <button type="submit" disabled={component.busy}>{"Schedule"}</button>
        </form>
    }
}

fn build_reason_dialog(component: &LeadDetailPanel, link: &Scope<LeadDetailPanel>) -> Html {
    if component.detail.pending().is_none() {
        return html! {};
    }
    let client_name = component
        .detail
        .lead()
        .map(|l| l.client_name.clone())
        .unwrap_or_default();

    html! {
        <ReasonDialog
            client_name={client_name}
            on_submit={link.callback(Msg::ReasonSubmitted)}
            on_cancel={link.callback(|_: ()| Msg::ReasonCancelled)}
        />
    }
}
