use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// The action was refused before anything was sent
    Blocking,
    /// A request was made and failed; the user may try again
    Transient,
}

/// User-facing message queued by a state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn empty_pantry() -> Self {
        Notice {
            kind: NoticeKind::Blocking,
            title: "No Ingredients".to_string(),
            message: "Please add some ingredients to your pantry first.".to_string(),
        }
    }

    pub fn suggestions_failed() -> Self {
        Notice {
            kind: NoticeKind::Transient,
            title: "Error".to_string(),
            message: "Could not generate recipe suggestions. Please try again.".to_string(),
        }
    }

    pub fn details_failed(recipe_name: &str) -> Self {
        Notice {
            kind: NoticeKind::Transient,
            title: "Error".to_string(),
            message: format!("Could not load details for {}.", recipe_name),
        }
    }
}
