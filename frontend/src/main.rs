use crate::app::App;

mod api;
mod app;
mod auth;
mod components;
mod config;
mod helpers;
mod tops_sheet;
mod workspace_grid;

fn main() {
    yew::Renderer::<App>::new().render();
}
