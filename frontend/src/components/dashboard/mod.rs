//! Read-only dashboard: headline cards plus three bar charts.
//!
//! Each section is fetched independently so one failing endpoint only blanks
//! its own card.

use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::api::Query;
use common::error::ApiError;
use common::model::analytics::{bar_percentages, InflowPoint, LeadStats, SourceShare, TeamPerformance};
use common::model::lead::LeadStatus;
use common::remote::Remote;

use crate::api;
use crate::helpers::{format_currency, format_percent};
use crate::workspace_grid::WorkspaceGrid;

pub enum Msg {
    Stats(Result<LeadStats, ApiError>),
    Inflow(Result<Vec<InflowPoint>, ApiError>),
    Sources(Result<Vec<SourceShare>, ApiError>),
    Team(Result<Vec<TeamPerformance>, ApiError>),
}

#[derive(Default)]
pub struct Dashboard {
    stats: Remote<LeadStats>,
    inflow: Remote<Vec<InflowPoint>>,
    sources: Remote<Vec<SourceShare>>,
    team: Remote<Vec<TeamPerformance>>,
}

fn settle<T>(remote: &mut Remote<T>, result: Result<T, ApiError>) {
    match result {
        Ok(data) => remote.succeed(data),
        Err(err) => remote.fail(&err),
    }
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        log!("loading dashboard");
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Stats(api::fetch(&Query::LeadStats).await));
            link.send_message(Msg::Inflow(api::fetch(&Query::Inflow).await));
            link.send_message(Msg::Sources(api::fetch(&Query::SourceDistribution).await));
            link.send_message(Msg::Team(api::fetch(&Query::TeamPerformance).await));
        });

        let mut dashboard = Dashboard::default();
        dashboard.stats.start();
        dashboard.inflow.start();
        dashboard.sources.start();
        dashboard.team.start();
        dashboard
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Stats(result) => settle(&mut self.stats, result),
            Msg::Inflow(result) => settle(&mut self.inflow, result),
            Msg::Sources(result) => settle(&mut self.sources, result),
            Msg::Team(result) => settle(&mut self.team, result),
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="dashboard">
                { self.build_cards() }
                <WorkspaceGrid columns={3} min_column_px={280}>
                    <section class="chart">
                        <h3>{"Lead inflow"}</h3>
                        { section(&self.inflow, |points| bar_chart(
                            points.iter().map(|p| (p.date.clone(), p.count)).collect(),
                        )) }
                    </section>
                    <section class="chart">
                        <h3>{"Sources"}</h3>
                        { section(&self.sources, |shares| bar_chart(
                            shares.iter().map(|s| (s.source.replace('_', " "), s.count)).collect(),
                        )) }
                    </section>
                    <section class="chart">
                        <h3>{"Team performance"}</h3>
                        { section(&self.team, |rows| team_table(rows)) }
                    </section>
                </WorkspaceGrid>
            </div>
        }
    }
}

impl Dashboard {
    fn build_cards(&self) -> Html {
        section(&self.stats, |stats| {
            let card = |label: &'static str, value: String| {
                html! {
                    <div class="stat-card">
                        <span class="stat-label">{ label }</span>
                        <span class="stat-value">{ value }</span>
                    </div>
                }
            };
            html! {
                <WorkspaceGrid columns={3 + LeadStatus::ALL.len()} min_column_px={140} class="stat-cards">
                    { card("Total leads", stats.total.to_string()) }
                    { card("Conversion rate", format_percent(stats.conversion_rate)) }
                    { card("Pipeline value", format_currency(stats.pipeline_value)) }
                    { for LeadStatus::ALL.iter().map(|s| card(s.label(), stats.count(*s).to_string())) }
                </WorkspaceGrid>
            }
        })
    }
}

fn section<T>(remote: &Remote<T>, render: impl FnOnce(&T) -> Html) -> Html {
    match (remote.data(), remote.error()) {
        (Some(data), _) => render(data),
        (None, Some(error)) => html! { <div class="error-panel">{ error.to_string() }</div> },
        (None, None) if remote.is_loading() => html! { <div class="loading">{"Loading..."}</div> },
        (None, None) => html! {},
    }
}

/// Horizontal bars, each as wide as its share of the largest value.
fn bar_chart(series: Vec<(String, u64)>) -> Html {
    if series.is_empty() {
        return html! { <p class="muted">{"No data yet."}</p> };
    }
    let counts: Vec<u64> = series.iter().map(|(_, count)| *count).collect();
    let widths = bar_percentages(&counts);

    html! {
        <ul class="bar-chart">
            { for series.into_iter().zip(widths).map(|((label, count), width)| html! {
                <li class="bar-row">
                    <span class="bar-label">{ label }</span>
                    <span class="bar-track">
                        <span class="bar-fill" style={format!("width: {width:.1}%")}></span>
                    </span>
                    <span class="bar-value">{ count }</span>
                </li>
            }) }
        </ul>
    }
}

fn team_table(rows: &[TeamPerformance]) -> Html {
    if rows.is_empty() {
        return html! { <p class="muted">{"No assignments yet."}</p> };
    }
    let converted: Vec<u64> = rows.iter().map(|r| r.converted).collect();
    let widths = bar_percentages(&converted);

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{"Member"}</th>
                    <th>{"Assigned"}</th>
                    <th>{"Converted"}</th>
                    <th>{"Rate"}</th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().zip(widths).map(|(row, width)| html! {
                    <tr>
                        <td>{ row.name.clone() }</td>
                        <td>{ row.assigned }</td>
                        <td>
                            <span class="bar-fill inline" style={format!("width: {width:.1}%")}></span>
                            { row.converted }
                        </td>
                        <td>{ format_percent(row.conversion_rate()) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
