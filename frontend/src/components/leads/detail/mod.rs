//! Lead detail panel: root module wiring the Yew `Component` implementation
//! with submodules for messages, props, state, update logic and view rendering.
//!
//! Responsibilities
//! - Load the lead and its activity log when opened or when `lead_id` changes.
//! - Turn every action into one API call, then refetch the whole panel.
//! - Tell the parent after successful mutations so the list/board refetches too.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::{FollowUpField, Msg};
pub use props::LeadDetailProps;
pub use state::LeadDetailPanel;

impl Component for LeadDetailPanel {
    type Message = Msg;
    type Properties = LeadDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        LeadDetailPanel::new(&ctx.props().lead_id)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().lead_id != old_props.lead_id {
            *self = LeadDetailPanel::new(&ctx.props().lead_id);
            ctx.link().send_message(Msg::Load);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
