//! Properties of the lead detail panel.

use common::model::user::{Team, User};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LeadDetailProps {
    /// Lead to show. Changing it reloads the panel.
    pub lead_id: AttrValue,

    /// Options for the assignee picker.
    #[prop_or_default]
    pub users: Vec<User>,

    /// Options for the team picker.
    #[prop_or_default]
    pub teams: Vec<Team>,

    pub on_close: Callback<()>,

    /// Fired after every successful mutation so the list/board behind the
    /// panel can refetch.
    pub on_changed: Callback<()>,
}
