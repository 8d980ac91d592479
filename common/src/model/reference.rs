use serde::{Deserialize, Serialize};

/// Something that can be pointed at by id and shown with a label.
pub trait Identified {
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// A reference to another record as the server sends it: either populated
/// with the referenced object or collapsed to its bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(T),
    Id(String),
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Populated(item) => item.id(),
            Ref::Id(id) => id,
        }
    }

    /// Label for display; falls back to the id when the server did not populate it.
    pub fn label(&self) -> &str {
        match self {
            Ref::Populated(item) => item.label(),
            Ref::Id(id) => id,
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(item) => Some(item),
            Ref::Id(_) => None,
        }
    }
}
