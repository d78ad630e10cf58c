use serde::de::DeserializeOwned;
use serde::Serialize;

pub type Id = String;

/// A record kept in one of the catalogue's JSON collections.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human readable entity name used in error messages ("Artwork", "Series", ...)
    const KIND: &'static str;
    /// File holding the collection, relative to the storage directory
    const FILE_NAME: &'static str;

    fn id(&self) -> &str;
}

/// A singleton document (e.g. contact details) persisted as one JSON object.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const FILE_NAME: &'static str;
}
