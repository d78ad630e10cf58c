use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Id, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    Available,
    Sold,
    Reserved,
}

impl ArtworkStatus {
    pub const ALL: [ArtworkStatus; 3] = [
        ArtworkStatus::Available,
        ArtworkStatus::Sold,
        ArtworkStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkStatus::Available => "available",
            ArtworkStatus::Sold => "sold",
            ArtworkStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown artwork status: {}", s))
    }
}

/// Layout hint for the gallery grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpan {
    pub cols: u32,
    pub rows: u32,
}

impl Default for GridSpan {
    fn default() -> Self {
        Self { cols: 4, rows: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: Id,
    pub title: String,
    pub title_en: String,
    pub year: i32,
    pub technique: String,
    pub technique_en: String,
    pub dimensions: String,
    /// Series name, matched by string against `Series::name`; may be empty
    pub series: String,
    pub series_en: String,
    pub status: ArtworkStatus,
    #[serde(default)]
    pub featured: bool,
    pub description: String,
    pub description_en: String,
    pub image_url: String,
    #[serde(default)]
    pub grid_span: GridSpan,
}

impl Record for Artwork {
    const KIND: &'static str = "Artwork";
    const FILE_NAME: &'static str = "artworks.json";

    fn id(&self) -> &str {
        &self.id
    }
}
