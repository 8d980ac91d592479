//! Slide-down sheet used for the lead detail panel and modal forms.
//!
//! The sheet is mounted closed and receives the `show` class a moment after
//! its first render so the CSS transition plays.

use uuid::Uuid;
use yew::prelude::*;

pub struct TopSheet {
    pub id: String,
    node_ref: NodeRef,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
            node_ref: NodeRef::default(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());
        html! {
            <div class="top-sheet-backdrop">
                <div class="top-sheet" id={self.id.clone()} ref={self.node_ref.clone()}>
                    <div class="top-sheet-header">
                        <h2>{ ctx.props().title.to_string() }</h2>
                        <button class="icon-btn" title="Close" onclick={on_close}>
                            <i class="material-icons">{"close"}</i>
                        </button>
                    </div>
                    <div class="top-sheet-body">
                        { ctx.props().children.clone() }
                    </div>
                </div>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            open_top_sheet(self.node_ref.clone());
        }
    }
}

/// Adds the `show` class after a short delay so the slide-in transition runs.
pub fn open_top_sheet(sheet_ref: NodeRef) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        if let Some(sheet) = sheet_ref.cast::<web_sys::Element>() {
            sheet.class_list().add_1("show").ok();
        }
    });
}
