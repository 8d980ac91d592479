use yew::html::Scope;
use yew::prelude::*;

use common::leads::{Board, Column};
use common::model::lead::Lead;
use common::model::reference::Ref;

use super::{KanbanBoard, Msg};
use crate::components::leads::reason_dialog::ReasonDialog;
use crate::helpers::format_currency;
use crate::workspace_grid::WorkspaceGrid;

pub fn view(component: &KanbanBoard, ctx: &Context<KanbanBoard>) -> Html {
    let link = ctx.link();
    let props = ctx.props();

    let Some(leads) = props.leads.data() else {
        return if props.leads.is_loading() {
            html! { <div class="loading">{"Loading board..."}</div> }
        } else {
            html! { <div class="error-panel">{ props.leads.error().unwrap_or("No leads loaded").to_string() }</div> }
        };
    };

    html! {
        <div class={classes!("kanban", component.updating.then_some("updating"))}>
            <WorkspaceGrid columns={Board::columns(leads).len()}>
                { for Board::columns(leads).into_iter().map(|column| build_column(column, link, &props.on_select)) }
            </WorkspaceGrid>
            { build_reason_dialog(component, leads, link) }
        </div>
    }
}

fn build_column(column: Column<'_>, link: &Scope<KanbanBoard>, on_select: &Callback<String>) -> Html {
    let status = column.status;
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondrop = link.callback(move |e: DragEvent| {
        e.prevent_default();
        Msg::Drop(status)
    });

    html! {
        <section class={classes!("kanban-column", status.as_str())} {ondragover} {ondrop}>
            <header>
                <span class="column-title">{ status.label() }</span>
                <span class="column-count">{ column.leads.len() }</span>
                <span class="column-total">{ format_currency(column.total_value()) }</span>
            </header>
            { for column.leads.iter().map(|lead| build_card(lead, link, on_select)) }
        </section>
    }
}

fn build_card(lead: &Lead, link: &Scope<KanbanBoard>, on_select: &Callback<String>) -> Html {
    let id = lead.id.clone();
    let ondragstart = link.callback(move |e: DragEvent| {
        if let Some(transfer) = e.data_transfer() {
            transfer.set_data("text/plain", &id).ok();
        }
        Msg::DragStart(id.clone())
    });
    let ondragend = link.callback(|_: DragEvent| Msg::DragEnd);
    let onclick = {
        let on_select = on_select.clone();
        let id = lead.id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    html! {
        <article
            key={lead.id.clone()}
            class={classes!("kanban-card", lead.priority.as_str())}
            draggable="true"
            {ondragstart}
            {ondragend}
            {onclick}
        >
            <div class="card-title">{ lead.client_name.clone() }</div>
            <div class="card-email">{ lead.email.clone() }</div>
            <div class="card-meta">
                <span class="card-value">{ format_currency(lead.estimated_value) }</span>
                <span class="card-priority">{ lead.priority.label() }</span>
            </div>
            {
                if let Some(assignee) = &lead.assigned_to {
                    html! { <div class="card-assignee">{ Ref::label(assignee).to_string() }</div> }
                } else {
                    html! {}
                }
            }
        </article>
    }
}

fn build_reason_dialog(component: &KanbanBoard, leads: &[Lead], link: &Scope<KanbanBoard>) -> Html {
    let Some(pending) = &component.pending else {
        return html! {};
    };
    let client_name = leads
        .iter()
        .find(|l| l.id == pending.lead_id)
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
