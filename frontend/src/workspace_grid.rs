use yew::{classes, html, Children, Classes, Component, Context, Html, Properties};

/// Equal-width column layout used by the kanban board and dashboard cards.
#[derive(Properties, PartialEq)]
pub struct WorkspaceGridProps {
    pub columns: usize,
    /// Narrowest a column may get before the grid scrolls horizontally.
    #[prop_or(220)]
    pub min_column_px: u32,
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

pub struct WorkspaceGrid;

impl Component for WorkspaceGrid {
    type Message = ();
    type Properties = WorkspaceGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, minmax({}px, 1fr));
             gap: 12px;
             overflow-x: auto;
             align-items: start;",
            props.columns.max(1),
            props.min_column_px
        );

        html! {
            <div class={classes!("workspace-grid", props.class.clone())} style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
