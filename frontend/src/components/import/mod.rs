//! Two-step CSV lead import.
//!
//! 1. The chosen file is uploaded to the preview endpoint, which returns a
//!    per-row verdict.
//! 2. Confirming sends only the rows marked valid. A successful import shows
//!    the summary and asks the parent to refetch the lead list.

use gloo_console::log;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::csv_import::{CsvImport, ImportStage};
use common::error::ApiError;
use common::model::import::{CsvPreview, ImportSummary, PreviewRow};

use crate::api;
use crate::helpers::{show_alert, show_toast};

#[derive(Properties, PartialEq)]
pub struct CsvImportProps {
    pub on_imported: Callback<()>,
}

pub enum Msg {
    FileChosen(Option<web_sys::File>),
    Previewed(Result<CsvPreview, ApiError>),
    Confirm,
    Imported(Result<ImportSummary, ApiError>),
    Reset,
}

pub struct CsvImportComponent {
    import: CsvImport,
    file_label: Option<String>,
    input_ref: NodeRef,
}

impl Component for CsvImportComponent {
    type Message = Msg;
    type Properties = CsvImportProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { import: CsvImport::default(), file_label: None, input_ref: NodeRef::default() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(None) => false,
            Msg::FileChosen(Some(file)) => {
                let info = gloo_file::File::from(file.clone());
                self.file_label = Some(format!("{} ({} bytes)", info.name(), info.size()));
                log!(format!("uploading {} for preview", info.name()));
                self.import.begin_upload();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Previewed(api::preview_csv(file).await));
                });
                true
            }
            Msg::Previewed(Ok(preview)) => {
                log!(format!(
                    "preview: {} valid, {} invalid",
                    preview.valid_count(),
                    preview.invalid_count()
                ));
                self.import.previewed(preview);
                true
            }
            Msg::Previewed(Err(err)) | Msg::Imported(Err(err)) => {
                self.import.failed(&err);
                if self.import.stage() == &ImportStage::Idle {
                    self.clear_input();
                }
                if err != ApiError::Unauthorized {
                    show_alert(&err.user_message());
                }
                true
            }
            Msg::Confirm => match self.import.confirm() {
                Ok(mutation) => {
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        link.send_message(Msg::Imported(api::execute_json::<ImportSummary>(&mutation).await));
                    });
                    true
                }
                Err(err) => {
                    show_alert(&err.user_message());
                    false
                }
            },
            Msg::Imported(Ok(summary)) => {
                show_toast(&format!("Imported {} leads.", summary.imported));
                self.import.finished(summary);
                ctx.props().on_imported.emit(());
                true
            }
            Msg::Reset => {
                self.import.reset();
                self.file_label = None;
                self.clear_input();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onchange = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::FileChosen(input.files().and_then(|files| files.get(0)))
        });

        html! {
            <div class="csv-import">
                <label class="icon-btn" title="Import leads from CSV">
                    <i class="material-icons">{"table_chart"}</i>
                    <span class="icon-label">{"Choose CSV"}</span>
                    <input type="file" accept=".csv,text/csv" hidden=true ref={self.input_ref.clone()} {onchange} />
                </label>
                if let Some(label) = &self.file_label {
                    <span class="file-label">{ label.clone() }</span>
                }
                if let Some(error) = self.import.error() {
                    <div class="error-panel">{ error.to_string() }</div>
                }
                { self.build_stage(link) }
            </div>
        }
    }
}

impl CsvImportComponent {
    /// Empties the file input; otherwise picking the same file again fires no change event.
    fn clear_input(&self) {
        if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }

    fn build_stage(&self, link: &yew::html::Scope<Self>) -> Html {
        match self.import.stage() {
            ImportStage::Idle => html! {
                <p class="muted">{"Pick a CSV file. Rows are checked by the server before anything is imported."}</p>
            },
            ImportStage::Uploading => html! { <div class="loading">{"Checking file..."}</div> },
            ImportStage::Previewed(preview) => html! {
                <>
                    { build_preview(preview) }
                    <div class="form-actions">
                        <button onclick={link.callback(|_| Msg::Reset)}>{"Cancel"}</button>
                        <button
                            class="primary"
                            disabled={preview.valid_count() == 0}
                            onclick={link.callback(|_| Msg::Confirm)}
                        >
                            { format!("Import {} valid rows", preview.valid_count()) }
                        </button>
                    </div>
                </>
            },
            ImportStage::Importing(preview) => html! {
                <>
                    { build_preview(preview) }
                    <div class="loading">{"Importing..."}</div>
                </>
            },
            ImportStage::Done(summary) => html! {
                <div class="import-summary">
                    <p>{ format!("{} imported, {} failed.", summary.imported, summary.failed) }</p>
                    if !summary.errors.is_empty() {
                        <ul class="import-errors">
                            { for summary.errors.iter().map(|e| html! { <li>{ e.clone() }</li> }) }
                        </ul>
                    }
                    <button onclick={link.callback(|_| Msg::Reset)}>{"Import another file"}</button>
                </div>
            },
        }
    }
}

fn build_preview(preview: &CsvPreview) -> Html {
    html! {
        <>
            <p class="preview-totals">
                { format!("{} rows: {} valid, {} invalid", preview.rows.len(), preview.valid_count(), preview.invalid_count()) }
            </p>
            <table class="data-table preview">
                <thead>
                    <tr>
                        <th>{"Row"}</th>
                        <th>{"Client"}</th>
                        <th>{"Email"}</th>
                        <th>{"Verdict"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for preview.rows.iter().map(build_row) }
                </tbody>
            </table>
        </>
    }
}

fn build_row(row: &PreviewRow) -> Html {
    html! {
        <tr key={row.row_number} class={if row.valid { "valid" } else { "invalid" }}>
            <td>{ row.row_number }</td>
            <td>{ row.client_name() }</td>
            <td>{ row.email() }</td>
            <td>
                {
                    if row.valid {
                        "OK".to_string()
                    } else {
                        row.errors.join("; ")
                    }
                }
            </td>
        </tr>
    }
}
