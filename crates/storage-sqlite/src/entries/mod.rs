//! SQLite storage implementation for asset entries.

mod model;
mod repository;

pub use model::{AssetEntryChangesetDB, AssetEntryDB};
pub use repository::EntryRepository;
