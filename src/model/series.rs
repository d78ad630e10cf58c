use serde::{Deserialize, Serialize};

use crate::model::{Artwork, Id, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: Id,
    pub name: String,
    pub name_en: String,
}

impl Series {
    /// Artworks reference a series by its Spanish display name.
    pub fn contains(&self, artwork: &Artwork) -> bool {
        artwork.series == self.name
    }
}

impl Record for Series {
    const KIND: &'static str = "Series";
    const FILE_NAME: &'static str = "series.json";

    fn id(&self) -> &str {
        &self.id
    }
}
