//! Update function for the lead detail panel.
//!
//! Elm-style: mutate state for `msg`, spawn any request, return whether to
//! re-render. Mutations never patch the loaded payload; their completion
//! (`MutationDone`) triggers a full reload of lead and activities instead.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::Mutation;
use common::error::ApiError;
use common::model::activity::Activity;
use common::model::lead::Lead;

use super::messages::{FollowUpField, Msg};
use super::state::LeadDetailPanel;
use crate::api;
use crate::helpers::{confirm, show_alert, show_toast};

pub fn update(component: &mut LeadDetailPanel, ctx: &Context<LeadDetailPanel>, msg: Msg) -> bool {
    match msg {
        Msg::Load => {
            component.detail.refreshing();
            let [lead_query, activities_query] = component.detail.queries();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match api::fetch::<Lead>(&lead_query).await {
                    Ok(lead) => api::fetch::<Vec<Activity>>(&activities_query)
                        .await
                        .map(|activities| (lead, activities)),
                    Err(err) => Err(err),
                };
                link.send_message(Msg::Loaded(result));
            });
            true
        }
        Msg::Loaded(Ok((lead, activities))) => {
            component.detail.loaded(lead, activities);
            true
        }
        Msg::Loaded(Err(err)) => {
            component.detail.failed(&err);
            true
        }
        Msg::ChangeStatus(target) => match component.detail.change_status(target) {
            Some(mutation) => send(component, ctx, mutation),
            // Either nothing changed or the reason form opened.
            None => true,
        },
        Msg::ReasonSubmitted(reason) => match component.detail.submit_reason(&reason) {
            Ok(mutation) => send(component, ctx, mutation),
            Err(err) => {
                show_alert(&err.user_message());
                false
            }
        },
        Msg::ReasonCancelled => {
            component.detail.cancel_reason();
            true
        }
        Msg::AssignUser(user_id) => {
            let team_id = component.detail.lead().and_then(Lead::team_id).map(str::to_string);
            match component.detail.assign(Some(&user_id), team_id.as_deref()) {
                Some(mutation) => send(component, ctx, mutation),
                None => false,
            }
        }
        Msg::AssignTeam(team_id) => {
            let user_id = component.detail.lead().and_then(Lead::assignee_id).map(str::to_string);
            match component.detail.assign(user_id.as_deref(), Some(&team_id)) {
                Some(mutation) => send(component, ctx, mutation),
                None => false,
            }
        }
        Msg::NoteInput(note) => {
            component.note.set(note);
            true
        }
        Msg::SubmitNote => match component.detail.add_note(component.note.value()) {
            Ok(mutation) => {
                component.note.submitted();
                send(component, ctx, mutation)
            }
            Err(err) => {
                show_alert(&err.user_message());
                false
            }
        },
        Msg::FollowUpInput(field, value) => {
            let form = component.follow_up.value_mut();
            match field {
                FollowUpField::Title => form.title = value,
                FollowUpField::Description => {
                    form.description = (!value.trim().is_empty()).then_some(value)
                }
                FollowUpField::Date => form.scheduled_date = value,
                FollowUpField::Time => form.scheduled_time = (!value.is_empty()).then_some(value),
                FollowUpField::Priority => {
                    if let Ok(priority) = value.parse() {
                        form.priority = priority;
                    }
                }
                FollowUpField::Type => {
                    if let Ok(kind) = value.parse() {
                        form.follow_up_type = kind;
                    }
                }
            }
            true
        }
        Msg::ScheduleFollowUp => {
            match component.detail.schedule_follow_up(component.follow_up.value().clone()) {
                Ok(mutation) => {
                    component.follow_up.submitted();
                    send(component, ctx, mutation)
                }
                Err(err) => {
                    show_alert(&err.user_message());
                    false
                }
            }
        }
        Msg::Convert => match component.detail.convert() {
            Some(mutation) => send(component, ctx, mutation),
            None => false,
        },
        Msg::Delete => {
            if !confirm("Delete this lead? This cannot be undone.") {
                return false;
            }
            let mutation = component.detail.delete();
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Deleted(api::execute(&mutation).await));
            });
            true
        }
        Msg::MutationDone(result) => {
            component.busy = false;
            component.note.settled(result.is_ok());
            component.follow_up.settled(result.is_ok());
            match result {
                Ok(_) => {
                    show_toast("Lead updated.");
                    ctx.props().on_changed.emit(());
                }
                Err(ApiError::Unauthorized) => return true,
                Err(err) => show_alert(&err.user_message()),
            }
            ctx.link().send_message(Msg::Load);
            true
        }
        Msg::Deleted(result) => {
            component.busy = false;
            match result {
                Ok(_) => {
                    show_toast("Lead deleted.");
                    ctx.props().on_changed.emit(());
                    ctx.props().on_close.emit(());
                }
                Err(ApiError::Unauthorized) => {}
                Err(err) => show_alert(&err.user_message()),
            }
            true
        }
    }
}

fn send(component: &mut LeadDetailPanel, ctx: &Context<LeadDetailPanel>, mutation: Mutation) -> bool {
    log!(format!("{} for lead {}", mutation.describe(), component.detail.lead_id()));
    component.busy = true;
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::MutationDone(api::execute(&mutation).await));
    });
    true
}
