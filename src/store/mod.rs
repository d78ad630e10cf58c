pub mod catalog;
pub mod collection;
pub mod document;
pub mod error;
pub mod file_storage;
pub mod snapshot_cache;
#[cfg(test)]
pub(crate) mod test_support;
pub mod traits;

pub use catalog::*;
pub use collection::*;
pub use document::*;
pub use error::*;
pub use file_storage::*;
pub use snapshot_cache::*;
pub use traits::*;
