//! Task list with the subtasks of the selected task.
//!
//! Subtask writes go through their own endpoints; after each one the owning
//! task's subtasks are fetched again.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::{Mutation, Query};
use common::draft::Draft;
use common::error::ApiError;
use common::model::reference::Ref;
use common::model::task::{Subtask, Task, TaskStatus};
use common::remote::Remote;
use common::requests::SubtaskDraft;
use common::tasks::SubtaskList;

use crate::api;
use crate::helpers::{confirm, input_value, optional_date, show_alert, show_toast};

pub enum Msg {
    TasksLoaded(Result<Vec<Task>, ApiError>),
    Select(String),
    LoadSubtasks,
    SubtasksLoaded(String, Result<Vec<Subtask>, ApiError>),
    TitleInput(String),
    Create,
    Advance(String),
    Delete(String),
    MutationDone(Result<String, ApiError>),
}

pub struct TaskBoard {
    tasks: Remote<Vec<Task>>,
    subtasks: Option<SubtaskList>,
    new_title: Draft<String>,
    busy: bool,
}

impl TaskBoard {
    fn send(&mut self, ctx: &Context<Self>, mutation: Mutation) -> bool {
        log!(mutation.describe());
        self.busy = true;
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::MutationDone(api::execute(&mutation).await));
        });
        true
    }
}

impl Component for TaskBoard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::TasksLoaded(api::fetch(&Query::Tasks).await));
        });
        let mut tasks = Remote::new();
        tasks.start();
        Self { tasks, subtasks: None, new_title: Draft::default(), busy: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::TasksLoaded(Ok(tasks)) => {
                self.tasks.succeed(tasks);
                true
            }
            Msg::TasksLoaded(Err(err)) => {
                self.tasks.fail(&err);
                true
            }
            Msg::Select(task_id) => {
                if self.subtasks.as_ref().is_some_and(|s| s.task_id() == task_id) {
                    return false;
                }
                self.subtasks = Some(SubtaskList::new(&task_id));
                self.new_title = Draft::default();
                ctx.link().send_message(Msg::LoadSubtasks);
                true
            }
            Msg::LoadSubtasks => {
                let Some(list) = &mut self.subtasks else {
                    return false;
                };
                list.refreshing();
                let task_id = list.task_id().to_string();
                let query = list.query();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::SubtasksLoaded(task_id, api::fetch(&query).await));
                });
                true
            }
            Msg::SubtasksLoaded(task_id, result) => {
                // Ignore answers for a task that is no longer selected.
                let Some(list) = self.subtasks.as_mut().filter(|l| l.task_id() == task_id) else {
                    return false;
                };
                match result {
                    Ok(items) => list.loaded(items),
                    Err(err) => list.failed(&err),
                }
                true
            }
            Msg::TitleInput(title) => {
                self.new_title.set(title);
                true
            }
            Msg::Create => {
                let Some(list) = &self.subtasks else {
                    return false;
                };
                let draft = SubtaskDraft { title: self.new_title.value().clone(), ..SubtaskDraft::default() };
                match list.create(draft) {
                    Ok(mutation) => {
                        self.new_title.submitted();
                        self.send(ctx, mutation)
                    }
                    Err(err) => {
                        show_alert(&err.user_message());
                        false
                    }
                }
            }
            Msg::Advance(subtask_id) => {
                match self.subtasks.as_ref().and_then(|l| l.advance(&subtask_id)) {
                    Some(mutation) => self.send(ctx, mutation),
                    None => false,
                }
            }
            Msg::Delete(subtask_id) => {
                let Some(list) = &self.subtasks else {
                    return false;
                };
                if !confirm("Delete this subtask?") {
                    return false;
                }
                let mutation = list.delete(&subtask_id);
                self.send(ctx, mutation)
            }
            Msg::MutationDone(result) => {
                self.busy = false;
                self.new_title.settled(result.is_ok());
                match result {
                    Ok(_) => show_toast("Subtasks updated."),
                    Err(ApiError::Unauthorized) => return true,
                    Err(err) => show_alert(&err.user_message()),
                }
                ctx.link().send_message(Msg::LoadSubtasks);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let selected = self.subtasks.as_ref().map(SubtaskList::task_id);

        html! {
            <div class="task-board">
                <section class="task-list">
                    <h3>{"Tasks"}</h3>
                    if let Some(error) = self.tasks.error() {
                        <div class="error-panel">{ error.to_string() }</div>
                    }
                    {
                        match self.tasks.data() {
                            Some(tasks) => html! {
                                <ul>
                                    { for tasks.iter().map(|task| {
                                        let id = task.id.clone();
                                        html! {
                                            <li
                                                key={task.id.clone()}
                                                class={classes!("task", task.priority.as_str(), (selected == Some(task.id.as_str())).then_some("selected"))}
                                                onclick={link.callback(move |_| Msg::Select(id.clone()))}
                                            >
                                                <span class="task-title">{ task.title.clone() }</span>
                                                <span class="task-status">{ task.status.label() }</span>
                                                <span class="task-deadline">{ optional_date(task.deadline.as_ref()) }</span>
                                            </li>
                                        }
                                    }) }
                                </ul>
                            },
                            None if self.tasks.is_loading() => html! { <div class="loading">{"Loading tasks..."}</div> },
                            None => html! {},
                        }
                    }
                </section>
                { self.build_subtasks(link) }
            </div>
        }
    }
}

impl TaskBoard {
    fn build_subtasks(&self, link: &yew::html::Scope<Self>) -> Html {
        let Some(list) = &self.subtasks else {
            return html! { <section class="subtasks muted">{"Select a task to see its subtasks."}</section> };
        };
        let (done, total) = list.progress();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Create
        });

        html! {
            <section class={classes!("subtasks", self.busy.then_some("busy"))}>
                <h3>{ format!("Subtasks ({done}/{total} done)") }</h3>
                if let Some(error) = list.list().error() {
                    <div class="error-panel">{ error.to_string() }</div>
                }
                {
                    match list.list().data() {
                        Some(items) => html! {
                            <ul>
                                { for items.iter().map(|subtask| build_subtask(subtask, link, self.busy)) }
                            </ul>
                        },
                        None if list.list().is_loading() => html! { <div class="loading">{"Loading subtasks..."}</div> },
                        None => html! {},
                    }
                }
                <form class="subtask-form" {onsubmit}>
                    <input
                        placeholder="New subtask"
                        value={self.new_title.value().clone()}
                        oninput={link.callback(|e: InputEvent| Msg::TitleInput(input_value(&e)))}
                    />
                    <button type="submit" disabled={self.busy}>{"Add"}</button>
                </form>
            </section>
        }
    }
}

fn build_subtask(subtask: &Subtask, link: &yew::html::Scope<TaskBoard>, busy: bool) -> Html {
    let advance_id = subtask.id.clone();
    let delete_id = subtask.id.clone();
    let next = match subtask.status.next() {
        TaskStatus::NotStarted => "Reopen",
        TaskStatus::InProgress => "Start",
        TaskStatus::Completed => "Complete",
    };

    html! {
        <li key={subtask.id.clone()} class={classes!("subtask", (subtask.status == TaskStatus::Completed).then_some("done"))}>
            <span class="subtask-title">{ subtask.title.clone() }</span>
            <span class="subtask-status">{ subtask.status.label() }</span>
            <span class="subtask-assignee">
                { subtask.assigned_to.as_ref().map(|u| Ref::label(u).to_string()).unwrap_or_default() }
            </span>
            <span class="subtask-deadline">{ optional_date(subtask.deadline.as_ref()) }</span>
            <button disabled={busy} onclick={link.callback(move |_| Msg::Advance(advance_id.clone()))}>{ next }</button>
            <button class="danger" disabled={busy} onclick={link.callback(move |_| Msg::Delete(delete_id.clone()))}>
                {"Delete"}
            </button>
        </li>
    }
}
