use serde::{Deserialize, Serialize};

/// Reference to a catalog item as handed over by the browsing layer.
///
/// The `source` field is opaque to the controller: it only becomes a playable
/// URL through a [`MediaResolver`](crate::player::traits::MediaResolver),
/// which owns the authentication concerns of the streaming backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: String,
    pub title: String,
    pub source: String,
}

impl MediaDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source: source.into(),
        }
    }
}
