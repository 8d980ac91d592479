//! Kanban board: one column per lead status, drag a card to change its status.
//!
//! The board never reorders cards on its own. A drop issues the same status
//! update the detail panel uses; once the call settles, successful or not,
//! the parent refetches the full list and the columns are rebuilt from it.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::Mutation;
use common::error::ApiError;
use common::leads::{Board, PendingStatusChange, StatusChange};
use common::model::lead::Lead;
use common::remote::Remote;

use crate::api;
use crate::helpers::{show_alert, show_toast};

mod messages;
mod view;

pub use messages::Msg;

#[derive(Properties, PartialEq)]
pub struct KanbanBoardProps {
    pub leads: Remote<Vec<Lead>>,
    pub on_select: Callback<String>,
    pub on_refresh: Callback<()>,
}

pub struct KanbanBoard {
    pub board: Board,
    pub pending: Option<PendingStatusChange>,
    pub updating: bool,
}

impl KanbanBoard {
    fn send(&mut self, ctx: &Context<Self>, mutation: Mutation) {
        self.updating = true;
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Updated(api::execute(&mutation).await));
        });
    }
}

impl Component for KanbanBoard {
    type Message = Msg;
    type Properties = KanbanBoardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { board: Board::default(), pending: None, updating: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::DragStart(lead_id) => {
                self.board.drag_start(&lead_id);
                false
            }
            Msg::DragEnd => {
                self.board.drag_cancel();
                false
            }
            Msg::Drop(target) => {
                let leads = ctx.props().leads.data().map(Vec::as_slice).unwrap_or_default();
                match self.board.drop_on(leads, target) {
                    StatusChange::Unchanged => false,
                    StatusChange::Ready(mutation) => {
                        log!(format!("moving lead to {}", target.as_str()));
                        self.send(ctx, mutation);
                        true
                    }
                    StatusChange::NeedsReason(pending) => {
                        self.pending = Some(pending);
                        true
                    }
                }
            }
            Msg::ReasonSubmitted(reason) => {
                let Some(pending) = &self.pending else {
                    return false;
                };
                match pending.with_reason(&reason) {
                    Ok(mutation) => {
                        self.pending = None;
                        self.send(ctx, mutation);
                        true
                    }
                    Err(err) => {
                        show_alert(&err.user_message());
                        false
                    }
                }
            }
            Msg::ReasonCancelled => {
                self.pending = None;
                true
            }
            Msg::Updated(result) => {
                self.updating = false;
                match result {
                    Ok(_) => show_toast("Lead moved."),
                    Err(ApiError::Unauthorized) => {}
                    Err(err) => show_alert(&err.user_message()),
                }
                ctx.props().on_refresh.emit(());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
