use std::io;
use std::path::PathBuf;

/// One readable copy of a stored file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCopy {
    pub location: PathBuf,
    pub contents: String,
}

/// Byte-level persistence for the catalogue's JSON files.
///
/// Implementations know nothing about records: they hand back raw file
/// contents and write whole files. Parsing, seeding and caching live in
/// the collection stores.
#[async_trait::async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Every readable copy of `name`, most preferred first.
    /// A missing file yields no copy; it is not an error.
    async fn read_copies(&self, name: &str) -> Vec<StoredCopy>;

    /// Replace the contents of `name`, returning the path actually written.
    async fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf>;
}
