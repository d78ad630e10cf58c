pub mod artwork;
pub mod common;
pub mod contact;
pub mod exhibition;
pub mod series;

pub use artwork::*;
pub use common::*;
pub use contact::*;
pub use exhibition::*;
pub use series::*;
