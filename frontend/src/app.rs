//! Application shell: navigation, the shared lead list and the overlays.
//!
//! The list and the board render the same `Remote<Vec<Lead>>` held here, so a
//! refetch after any lead mutation updates both.

use gloo_console::{error, log};
use yew::platform::spawn_local;
use yew::{classes, html, Component, Context, Html};

use common::api::Query;
use common::error::ApiError;
use common::model::lead::Lead;
use common::model::user::{Team, User};
use common::remote::Remote;

use crate::api;
use crate::auth;
use crate::components::dashboard::Dashboard;
use crate::components::follow_ups::FollowUpList;
use crate::components::import::CsvImportComponent;
use crate::components::leads::board::KanbanBoard;
use crate::components::leads::detail::LeadDetailPanel;
use crate::components::leads::form::LeadFormComponent;
use crate::components::leads::list::LeadList;
use crate::components::login::Login;
use crate::components::tasks::TaskBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Leads,
    Board,
    FollowUps,
    Tasks,
    Import,
}

impl Page {
    const ALL: [Page; 6] = [Page::Dashboard, Page::Leads, Page::Board, Page::FollowUps, Page::Tasks, Page::Import];

    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Leads => "Leads",
            Page::Board => "Pipeline",
            Page::FollowUps => "Follow-ups",
            Page::Tasks => "Tasks",
            Page::Import => "Import",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Leads => "list",
            Page::Board => "view_kanban",
            Page::FollowUps => "event",
            Page::Tasks => "checklist",
            Page::Import => "upload_file",
        }
    }
}

pub enum Msg {
    LoggedIn,
    Logout,
    Navigate(Page),
    LoadLeads,
    LeadsLoaded(Result<Vec<Lead>, ApiError>),
    UsersLoaded(Result<Vec<User>, ApiError>),
    TeamsLoaded(Result<Vec<Team>, ApiError>),
    Select(String),
    CloseDetail,
    NewLead,
    CloseForm,
}

pub struct App {
    signed_in: bool,
    page: Page,
    leads: Remote<Vec<Lead>>,
    users: Vec<User>,
    teams: Vec<Team>,
    selected: Option<String>,
    creating: bool,
}

impl App {
    fn load_reference_data(ctx: &Context<Self>) {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::UsersLoaded(api::fetch(&Query::Users).await));
            link.send_message(Msg::TeamsLoaded(api::fetch(&Query::Teams).await));
        });
        ctx.link().send_message(Msg::LoadLeads);
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let signed_in = auth::token().is_some();
        if signed_in {
            Self::load_reference_data(ctx);
        }
        Self {
            signed_in,
            page: Page::Dashboard,
            leads: Remote::new(),
            users: Vec::new(),
            teams: Vec::new(),
            selected: None,
            creating: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::LoggedIn => {
                self.signed_in = true;
                Self::load_reference_data(ctx);
                true
            }
            Msg::Logout => {
                auth::clear_token();
                self.signed_in = false;
                self.leads = Remote::new();
                self.selected = None;
                true
            }
            Msg::Navigate(page) => {
                self.page = page;
                true
            }
            Msg::LoadLeads => {
                log!("fetching leads");
                self.leads.start();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::LeadsLoaded(api::fetch(&Query::Leads).await));
                });
                true
            }
            Msg::LeadsLoaded(Ok(leads)) => {
                log!(format!("{} leads loaded", leads.len()));
                self.leads.succeed(leads);
                true
            }
            Msg::LeadsLoaded(Err(err)) => {
                self.leads.fail(&err);
                true
            }
            Msg::UsersLoaded(result) => match result {
                Ok(users) => {
                    self.users = users;
                    true
                }
                Err(err) => {
                    error!(format!("users unavailable: {err}"));
                    false
                }
            },
            Msg::TeamsLoaded(result) => match result {
                Ok(teams) => {
                    self.teams = teams;
                    true
                }
                Err(err) => {
                    error!(format!("teams unavailable: {err}"));
                    false
                }
            },
            Msg::Select(lead_id) => {
                self.selected = Some(lead_id);
                true
            }
            Msg::CloseDetail => {
                self.selected = None;
                true
            }
            Msg::NewLead => {
                self.creating = true;
                true
            }
            Msg::CloseForm => {
                self.creating = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        if !self.signed_in {
            return html! { <Login on_login={link.callback(|_: ()| Msg::LoggedIn)} /> };
        }

        html! {
            <div class="app">
                <nav class="sidebar">
                    { for Page::ALL.into_iter().map(|page| html! {
                        <button
                            class={classes!("icon-btn", (page == self.page).then_some("active"))}
                            title={page.label()}
                            onclick={link.callback(move |_| Msg::Navigate(page))}
                        >
                            <i class="material-icons">{ page.icon() }</i>
                            <span class="icon-label">{ page.label() }</span>
                        </button>
                    }) }
                    <button class="icon-btn" title="Sign out" onclick={link.callback(|_| Msg::Logout)}>
                        <i class="material-icons">{"logout"}</i>
                    </button>
                </nav>
                <main class="content">
                    <header class="content-header">
                        <h1>{ self.page.label() }</h1>
                        if matches!(self.page, Page::Leads | Page::Board) {
                            <button class="primary" onclick={link.callback(|_| Msg::NewLead)}>{"New lead"}</button>
                        }
                    </header>
                    { self.build_page(ctx) }
                </main>
                if let Some(lead_id) = &self.selected {
                    <LeadDetailPanel
                        lead_id={lead_id.clone()}
                        users={self.users.clone()}
                        teams={self.teams.clone()}
                        on_close={link.callback(|_: ()| Msg::CloseDetail)}
                        on_changed={link.callback(|_: ()| Msg::LoadLeads)}
                    />
                }
                if self.creating {
                    <LeadFormComponent
                        on_created={link.batch_callback(|_: ()| vec![Msg::CloseForm, Msg::LoadLeads])}
                        on_cancel={link.callback(|_: ()| Msg::CloseForm)}
                    />
                }
            </div>
        }
    }
}

impl App {
    fn build_page(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_select = link.callback(Msg::Select);
        let on_refresh = link.callback(|_: ()| Msg::LoadLeads);

        match self.page {
            Page::Dashboard => html! { <Dashboard /> },
            Page::Leads => html! {
                <LeadList leads={self.leads.clone()} {on_select} {on_refresh} />
            },
            Page::Board => html! {
                <KanbanBoard leads={self.leads.clone()} {on_select} {on_refresh} />
            },
            Page::FollowUps => html! { <FollowUpList /> },
            Page::Tasks => html! { <TaskBoard /> },
            Page::Import => html! { <CsvImportComponent on_imported={on_refresh} /> },
        }
    }
}
