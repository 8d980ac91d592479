use common::error::ApiError;
use common::model::lead::LeadStatus;

pub enum Msg {
    DragStart(String),
    DragEnd,
    Drop(LeadStatus),
    ReasonSubmitted(String),
    ReasonCancelled,
    Updated(Result<String, ApiError>),
}
