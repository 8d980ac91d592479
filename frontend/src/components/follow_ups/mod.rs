//! Follow-up tabs (upcoming / overdue) with complete and reschedule actions.
//!
//! Every action is one call followed by a refetch of the active tab.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::Mutation;
use common::error::ApiError;
use common::follow_ups::FollowUpBoard;
use common::model::follow_up::{FollowUp, FollowUpTab};
use common::model::reference::Ref;

use crate::api;
use crate::helpers::{input_value, optional_date, prompt, show_alert, show_toast};

/// Inline reschedule editor for one row.
#[derive(Clone, Default)]
pub struct RescheduleDraft {
    pub follow_up_id: String,
    pub date: String,
    pub time: String,
}

pub enum Msg {
    SelectTab(FollowUpTab),
    Load,
    Loaded(FollowUpTab, Result<Vec<FollowUp>, ApiError>),
    Complete(String),
    StartReschedule(String),
    RescheduleDate(String),
    RescheduleTime(String),
    SubmitReschedule,
    CancelReschedule,
    MutationDone(Result<String, ApiError>),
}

pub struct FollowUpList {
    board: FollowUpBoard,
    rescheduling: Option<RescheduleDraft>,
    busy: bool,
}

impl FollowUpList {
    fn send(&mut self, ctx: &Context<Self>, mutation: Mutation) -> bool {
        log!(mutation.describe());
        self.busy = true;
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::MutationDone(api::execute(&mutation).await));
        });
        true
    }

    fn fetch(&self, ctx: &Context<Self>) {
        let tab = self.board.tab();
        let query = self.board.query();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(tab, api::fetch::<Vec<FollowUp>>(&query).await));
        });
    }
}

impl Component for FollowUpList {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self { board: FollowUpBoard::default(), rescheduling: None, busy: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTab(tab) => {
                if self.board.select_tab(tab).is_none() {
                    return false;
                }
                self.rescheduling = None;
                self.fetch(ctx);
                true
            }
            Msg::Load => {
                self.board.refreshing();
                self.fetch(ctx);
                true
            }
            Msg::Loaded(tab, Ok(items)) => {
                self.board.loaded(tab, items);
                true
            }
            Msg::Loaded(tab, Err(err)) => {
                if tab == self.board.tab() {
                    self.board.failed(&err);
                }
                true
            }
            Msg::Complete(id) => {
                // Cancelling the prompt aborts; an empty answer completes without an outcome.
                let Some(outcome) = prompt("Outcome (optional)") else {
                    return false;
                };
                match self.board.complete(&id, &outcome) {
                    Ok(mutation) => self.send(ctx, mutation),
                    Err(err) => {
                        show_alert(&err.user_message());
                        false
                    }
                }
            }
            Msg::StartReschedule(id) => {
                self.rescheduling = Some(RescheduleDraft { follow_up_id: id, ..Default::default() });
                true
            }
            Msg::RescheduleDate(date) => {
                if let Some(draft) = &mut self.rescheduling {
                    draft.date = date;
                }
                true
            }
            Msg::RescheduleTime(time) => {
                if let Some(draft) = &mut self.rescheduling {
                    draft.time = time;
                }
                true
            }
            Msg::SubmitReschedule => {
                let Some(draft) = &self.rescheduling else {
                    return false;
                };
                match self.board.reschedule(&draft.follow_up_id, &draft.date, &draft.time) {
                    Ok(mutation) => {
                        self.rescheduling = None;
                        self.send(ctx, mutation)
                    }
                    Err(err) => {
                        show_alert(&err.user_message());
                        false
                    }
                }
            }
            Msg::CancelReschedule => {
                self.rescheduling = None;
                true
            }
            Msg::MutationDone(result) => {
                self.busy = false;
                match result {
                    Ok(_) => show_toast("Follow-up updated."),
                    Err(ApiError::Unauthorized) => return true,
                    Err(err) => show_alert(&err.user_message()),
                }
                ctx.link().send_message(Msg::Load);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let list = self.board.list();

        html! {
            <div class="follow-ups">
                <nav class="tabs">
                    { for [FollowUpTab::Upcoming, FollowUpTab::Overdue].into_iter().map(|tab| html! {
                        <button
                            class={classes!("tab", (tab == self.board.tab()).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SelectTab(tab))}
                        >
                            { tab.label() }
                        </button>
                    }) }
                </nav>
                if let Some(error) = list.error() {
                    <div class="error-panel">{ error.to_string() }</div>
                }
                {
                    match list.data() {
                        Some(items) if items.is_empty() => html! { <p class="muted">{"Nothing scheduled here."}</p> },
                        Some(items) => html! {
                            <ul class={classes!("follow-up-list", self.busy.then_some("busy"))}>
                                { for items.iter().map(|f| self.build_item(ctx, f)) }
                            </ul>
                        },
                        None if list.is_loading() => html! { <div class="loading">{"Loading follow-ups..."}</div> },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}

impl FollowUpList {
    fn build_item(&self, ctx: &Context<Self>, follow_up: &FollowUp) -> Html {
        let link = ctx.link();
        let id = follow_up.id.clone();
        let complete_id = id.clone();
        let reschedule_id = id.clone();
        let when = match &follow_up.scheduled_time {
            Some(time) => format!("{} {time}", optional_date(follow_up.scheduled_date.as_ref())),
            None => optional_date(follow_up.scheduled_date.as_ref()),
        };
        let editing = self.rescheduling.as_ref().filter(|d| d.follow_up_id == id);

        html! {
            <li key={id.clone()} class={classes!("follow-up", follow_up.priority.as_str(), follow_up.completed.then_some("done"))}>
                <div class="follow-up-head">
                    <span class="follow-up-type">{ follow_up.follow_up_type.as_str() }</span>
                    <span class="follow-up-title">{ follow_up.title.clone() }</span>
                    <span class="follow-up-when">{ when }</span>
                </div>
                <div class="follow-up-meta">
                    { follow_up.lead.as_ref().map(|l| Ref::label(l).to_string()).unwrap_or_default() }
                    { " · " }
                    { follow_up.assigned_to.as_ref().map(|u| Ref::label(u).to_string()).unwrap_or_else(|| "Unassigned".to_string()) }
                </div>
                if let Some(description) = &follow_up.description {
                    <p class="follow-up-description">{ description.clone() }</p>
                }
                if let Some(outcome) = &follow_up.outcome {
                    <p class="follow-up-outcome">{ format!("Outcome: {outcome}") }</p>
                }
                {
                    if let Some(draft) = editing {
                        html! {
                            <div class="reschedule">
                                <input
                                    type="date"
                                    value={draft.date.clone()}
                                    oninput={link.callback(|e: InputEvent| Msg::RescheduleDate(input_value(&e)))}
                                />
                                <input
                                    type="time"
                                    value={draft.time.clone()}
                                    oninput={link.callback(|e: InputEvent| Msg::RescheduleTime(input_value(&e)))}
                                />
                                <button class="primary" disabled={self.busy} onclick={link.callback(|_| Msg::SubmitReschedule)}>{"Save"}</button>
                                <button onclick={link.callback(|_| Msg::CancelReschedule)}>{"Cancel"}</button>
                            </div>
                        }
                    } else if !follow_up.completed {
                        html! {
                            <div class="form-actions">
                                <button
                                    class="primary"
                                    disabled={self.busy}
                                    onclick={link.callback(move |_| Msg::Complete(complete_id.clone()))}
                                >
                                    {"Complete"}
                                </button>
                                <button
                                    disabled={self.busy}
                                    onclick={link.callback(move |_| Msg::StartReschedule(reschedule_id.clone()))}
                                >
                                    {"Reschedule"}
                                </button>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </li>
        }
    }
}
